//! Application state and composition.

use std::sync::Arc;

use cyoa_domain::{Player, StoryElement};

use crate::infrastructure::mongo::MongoCollections;
use crate::infrastructure::ports::DocumentCollection;
use crate::stores::{PlayerStore, StoryElementStore};

/// Main application state.
///
/// Holds the two entity stores. Passed to HTTP handlers via Axum state.
pub struct App {
    pub players: PlayerStore,
    pub stories: StoryElementStore,
}

impl App {
    /// Create a new App over explicit collection ports. Tests inject mocked
    /// collections here.
    pub fn new(
        players: Arc<dyn DocumentCollection<Player>>,
        stories: Arc<dyn DocumentCollection<StoryElement>>,
    ) -> Self {
        Self {
            players: PlayerStore::new(players),
            stories: StoryElementStore::new(stories),
        }
    }

    /// Wire the App from live MongoDB collections.
    pub fn from_mongo(collections: MongoCollections) -> Self {
        let players: Arc<dyn DocumentCollection<Player>> = collections.players;
        let stories: Arc<dyn DocumentCollection<StoryElement>> = collections.story_elements;
        Self::new(players, stories)
    }
}
