//! Domain entities - the two document shapes the service stores.

mod player;
mod story_element;

pub use player::{Player, PlayerPatch, StoryState, Wisdom};
pub use story_element::{ChoiceOption, SectionMeta, StoryElement};
