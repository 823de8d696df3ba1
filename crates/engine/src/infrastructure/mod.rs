//! Infrastructure boundaries.
//!
//! The only abstraction in the engine is the document-collection port.
//! Everything else is concrete types. The port exists for:
//! - Database access (could swap MongoDB -> another document store)
//! - Testing (stores and handlers run against mocked collections)

pub mod mongo;
pub mod ports;

// Test-only mock collection (only available during test builds)
#[cfg(test)]
pub use ports::MockDocumentCollection;
