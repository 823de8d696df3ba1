//! CYOA Engine library.
//!
//! All server-side code for the choose-your-own-adventure backend.
//!
//! ## Structure
//!
//! - `stores/` - Entity stores wrapping document-collection operations
//! - `infrastructure/` - Store port and MongoDB adapter
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;

pub use app::App;
