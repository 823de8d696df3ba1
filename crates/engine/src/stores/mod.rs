//! Entity stores wrapping the document-collection port.

mod player;
mod story_element;

pub use player::{PlayerError, PlayerStore};
pub use story_element::{StoryElementStore, StoryError};
