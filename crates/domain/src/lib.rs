//! CYOA domain types.
//!
//! Pure data: the player-progress and story-node document shapes, plus the
//! WixID identifier. No store or HTTP concerns live here.

pub mod entities;
pub mod ids;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    ChoiceOption, Player, PlayerPatch, SectionMeta, StoryElement, StoryState, Wisdom,
};

// Re-export ID types
pub use ids::{ParseWixIdError, WixId};
