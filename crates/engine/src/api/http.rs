//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use cyoa_domain::{Player, PlayerPatch, StoryElement};

use crate::app::App;
use crate::stores::{PlayerError, StoryError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/player", post(create_player))
        .route("/player/{wix_id}", get(get_player).patch(update_player))
        .route("/storyElements", post(create_story_element))
        .route(
            "/storyElements/{node_id}",
            get(get_story_element)
                .put(update_story_element)
                .patch(update_story_element)
                .delete(delete_story_element),
        )
}

async fn health() -> &'static str {
    "OK"
}

async fn create_player(
    State(app): State<Arc<App>>,
    body: Result<Json<Player>, JsonRejection>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let player = bind_body(body, "player")?;
    let created = app.players.create(player).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_player(
    State(app): State<Arc<App>>,
    Path(wix_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player = app.players.get_by_wix_id(&wix_id).await?;
    Ok(Json(player))
}

async fn update_player(
    State(app): State<Arc<App>>,
    Path(wix_id): Path<String>,
    body: Result<Json<PlayerPatch>, JsonRejection>,
) -> Result<Json<&'static str>, ApiError> {
    let patch = bind_body(body, "player")?;
    app.players.update(&wix_id, patch).await?;
    Ok(Json("Player state updated successfully"))
}

async fn create_story_element(
    State(app): State<Arc<App>>,
    body: Result<Json<StoryElement>, JsonRejection>,
) -> Result<(StatusCode, Json<StoryElement>), ApiError> {
    let element = bind_body(body, "story element")?;
    let created = app.stories.create(element).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_story_element(
    State(app): State<Arc<App>>,
    Path(node_id): Path<String>,
) -> Result<Json<StoryElement>, ApiError> {
    let element = app.stories.get_by_node_id(&node_id).await?;
    Ok(Json(element))
}

async fn update_story_element(
    State(app): State<Arc<App>>,
    Path(node_id): Path<String>,
    body: Result<Json<StoryElement>, JsonRejection>,
) -> Result<Json<&'static str>, ApiError> {
    let patch = bind_body(body, "story element")?;
    app.stories.update(&node_id, patch).await?;
    Ok(Json("Story element updated successfully"))
}

async fn delete_story_element(
    State(app): State<Arc<App>>,
    Path(node_id): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    app.stories.delete(&node_id).await?;
    Ok(Json("Story element deleted successfully"))
}

/// Bind a JSON body, forgiving the bare-empty-body case.
///
/// A request with no JSON content type binds the default value, so the
/// stores' emptiness checks decide the response. A syntactically invalid
/// body is a plain bind failure.
fn bind_body<T: Default>(
    body: Result<Json<T>, JsonRejection>,
    entity: &'static str,
) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(_) => Err(ApiError::BadRequest(format!(
            "Failed to bind the request to the {entity}"
        ))),
    }
}

/// API error with the message rendered as a bare JSON string, matching the
/// envelope the Wix frontend already consumes.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(message)).into_response()
    }
}

impl From<PlayerError> for ApiError {
    fn from(e: PlayerError) -> Self {
        match e {
            PlayerError::EmptyBody | PlayerError::InvalidWixId | PlayerError::NoStoryStates => {
                ApiError::BadRequest(e.to_string())
            }
            PlayerError::NotFound => ApiError::NotFound(e.to_string()),
            PlayerError::Insert | PlayerError::Update => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StoryError> for ApiError {
    fn from(e: StoryError) -> Self {
        match e {
            StoryError::EmptyBody => ApiError::BadRequest(e.to_string()),
            StoryError::NotFound => ApiError::NotFound(e.to_string()),
            StoryError::Find | StoryError::Insert | StoryError::Update | StoryError::Delete => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}
