//! Story element store operations.

use std::sync::Arc;

use mongodb::bson::{doc, to_document};

use cyoa_domain::StoryElement;

use crate::infrastructure::ports::DocumentCollection;

/// Story element operation errors. The Display strings are the wire messages.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("Empty request body")]
    EmptyBody,
    #[error("Story Element not found")]
    NotFound,
    #[error("An error occurred")]
    Find,
    #[error("Failed to create story element")]
    Insert,
    #[error("Update failed due to an internal error")]
    Update,
    #[error("Delete failed due to an internal error")]
    Delete,
}

/// Story content operations, keyed by the node identifier string.
///
/// Node ids are opaque: no format validation happens here, so a lookup with
/// an arbitrary string is simply not found.
pub struct StoryElementStore {
    collection: Arc<dyn DocumentCollection<StoryElement>>,
}

impl StoryElementStore {
    pub fn new(collection: Arc<dyn DocumentCollection<StoryElement>>) -> Self {
        Self { collection }
    }

    /// Insert a new story element and echo it back.
    pub async fn create(&self, element: StoryElement) -> Result<StoryElement, StoryError> {
        if element.is_empty() {
            return Err(StoryError::EmptyBody);
        }

        self.collection.insert_one(&element).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert story element");
            StoryError::Insert
        })?;

        Ok(element)
    }

    /// Look up a story element by node id. Unlike player lookups, a store
    /// failure here stays distinguishable from a missing document.
    pub async fn get_by_node_id(&self, node_id: &str) -> Result<StoryElement, StoryError> {
        let found = self
            .collection
            .find_one(doc! { "nodeID": node_id })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, node_id, "Story element lookup failed");
                StoryError::Find
            })?;

        found.ok_or(StoryError::NotFound)
    }

    /// Apply a partial field-set update. Absent patch fields serialize to
    /// nothing, so they are never touched; a zero-match update is still
    /// success.
    pub async fn update(&self, node_id: &str, patch: StoryElement) -> Result<(), StoryError> {
        let fields = to_document(&patch).map_err(|e| {
            tracing::error!(error = %e, node_id, "Failed to serialize story element patch");
            StoryError::Update
        })?;

        self.collection
            .update_one(doc! { "nodeID": node_id }, doc! { "$set": fields }, None)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, node_id, "Story element update failed");
                StoryError::Update
            })?;

        Ok(())
    }

    /// Remove the document for a node id. Deleting a non-existent node is
    /// indistinguishable from deleting one that existed.
    pub async fn delete(&self, node_id: &str) -> Result<(), StoryError> {
        self.collection
            .delete_one(doc! { "nodeID": node_id })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, node_id, "Story element delete failed");
                StoryError::Delete
            })?;

        Ok(())
    }
}
