//! CYOA Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cyoa_engine::api;
use cyoa_engine::app::App;
use cyoa_engine::infrastructure::mongo::{self, MongoCollections};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine runs from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cyoa_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CYOA Engine");

    // Load configuration
    let mongo_uri = std::env::var("MONGO_URI").context("MONGO_URI must be set")?;
    let mongo_db = std::env::var("MONGO_DATABASE").unwrap_or_else(|_| "cyoa".into());
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "8080".into())
        .parse()
        .unwrap_or(8080);
    let connect_timeout = env_secs("MONGO_CONNECT_TIMEOUT_SECS", 10);
    let op_timeout = env_secs("MONGO_OP_TIMEOUT_SECS", 5);

    // Connect to MongoDB
    tracing::info!(database = %mongo_db, "Connecting to MongoDB");
    let mut client_options = mongodb::options::ClientOptions::parse(&mongo_uri).await?;
    client_options.server_selection_timeout = Some(connect_timeout);
    client_options.app_name = Some("cyoa-engine".into());
    let client = mongodb::Client::with_options(client_options)?;
    let db = client.database(&mongo_db);

    // Verify connectivity and ensure lookup-key indexes before serving.
    mongo::ping(&db).await.context("MongoDB ping failed")?;
    mongo::ensure_indexes(&db).await?;

    // Create application
    let collections = MongoCollections::new(&db, op_timeout);
    let app = Arc::new(App::from_mongo(collections));

    // Build router
    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn env_secs(name: &str, default: u64) -> Duration {
    let secs = std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let Some(allowed_origins) = allowed_origins else {
        return None;
    };

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // JSON content types trigger CORS preflights from the frontend.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
