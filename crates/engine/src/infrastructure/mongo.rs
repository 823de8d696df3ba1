//! MongoDB implementations of the document store port.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::timeout;

use cyoa_domain::{Player, StoryElement};

use super::ports::{DocumentCollection, StoreError, UpdateOutcome};

pub const PLAYERS_COLLECTION: &str = "players";
pub const STORY_ELEMENTS_COLLECTION: &str = "storyElements";

/// Typed collection handle implementing the store port.
///
/// Every driver call runs under a per-operation deadline; expiry surfaces as
/// `StoreError::Timeout` and the request fails without retry.
pub struct MongoCollection<T>
where
    T: Send + Sync,
{
    collection: Collection<T>,
    op_timeout: Duration,
}

impl<T> MongoCollection<T>
where
    T: Send + Sync,
{
    pub fn new(collection: Collection<T>, op_timeout: Duration) -> Self {
        Self {
            collection,
            op_timeout,
        }
    }
}

#[async_trait]
impl<T> DocumentCollection<T> for MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn insert_one(&self, document: &T) -> Result<(), StoreError> {
        timeout(self.op_timeout, self.collection.insert_one(document))
            .await
            .map_err(|_| StoreError::timeout("insert_one"))?
            .map_err(|e| StoreError::database("insert_one", e))?;
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>, StoreError> {
        timeout(self.op_timeout, self.collection.find_one(filter))
            .await
            .map_err(|_| StoreError::timeout("find_one"))?
            .map_err(|e| StoreError::database("find_one", e))
    }

    async fn update_one(
        &self,
        filter: Document,
        update: Document,
        array_filters: Option<Vec<Document>>,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut action = self.collection.update_one(filter, update);
        if let Some(filters) = array_filters {
            action = action.array_filters(filters);
        }

        let result = timeout(self.op_timeout, action)
            .await
            .map_err(|_| StoreError::timeout("update_one"))?
            .map_err(|e| StoreError::database("update_one", e))?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(&self, filter: Document) -> Result<u64, StoreError> {
        let result = timeout(self.op_timeout, self.collection.delete_one(filter))
            .await
            .map_err(|_| StoreError::timeout("delete_one"))?
            .map_err(|e| StoreError::database("delete_one", e))?;
        Ok(result.deleted_count)
    }
}

/// The two collections this service reads and writes.
pub struct MongoCollections {
    pub players: Arc<MongoCollection<Player>>,
    pub story_elements: Arc<MongoCollection<StoryElement>>,
}

impl MongoCollections {
    pub fn new(db: &Database, op_timeout: Duration) -> Self {
        Self {
            players: Arc::new(MongoCollection::new(
                db.collection(PLAYERS_COLLECTION),
                op_timeout,
            )),
            story_elements: Arc::new(MongoCollection::new(
                db.collection(STORY_ELEMENTS_COLLECTION),
                op_timeout,
            )),
        }
    }
}

/// Initialize the unique lookup-key indexes.
///
/// This should be called once on startup. Index creation is idempotent, and
/// the indexes are sparse so documents that omit the key are tolerated.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let players = db.collection::<Player>(PLAYERS_COLLECTION);
    players
        .create_index(unique_sparse_index(
            doc! { "wixID": 1 },
            "players_wix_id_unique",
        ))
        .await?;

    let story_elements = db.collection::<StoryElement>(STORY_ELEMENTS_COLLECTION);
    story_elements
        .create_index(unique_sparse_index(
            doc! { "nodeID": 1 },
            "story_elements_node_id_unique",
        ))
        .await?;

    tracing::info!("MongoDB indexes ensured (players.wixID, storyElements.nodeID)");
    Ok(())
}

fn unique_sparse_index(keys: Document, name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name(name.to_string())
                .build(),
        )
        .build()
}

/// Startup connectivity probe; failure is fatal to the process.
pub async fn ping(db: &Database) -> Result<(), mongodb::error::Error> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
