//! Document store port.

use async_trait::async_trait;
use mongodb::bson::Document;

/// Store operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Driver operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// The bounded-duration deadline for a store call expired.
    #[error("Timed out during {operation}")]
    Timeout { operation: &'static str },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Timeout error for the named operation.
    pub fn timeout(operation: &'static str) -> Self {
        Self::Timeout { operation }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Counters reported by an update, used by the conditional-write logic in
/// the player store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// One typed document collection: insert/find/update/delete a single
/// document. Entity stores own the filter construction; the port only moves
/// BSON documents and typed values across the driver boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCollection<T: 'static + Send + Sync>: Send + Sync {
    async fn insert_one(&self, document: &T) -> Result<(), StoreError>;

    async fn find_one(&self, filter: Document) -> Result<Option<T>, StoreError>;

    async fn update_one(
        &self,
        filter: Document,
        update: Document,
        array_filters: Option<Vec<Document>>,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Returns the number of documents deleted (zero is not an error).
    async fn delete_one(&self, filter: Document) -> Result<u64, StoreError>;
}
