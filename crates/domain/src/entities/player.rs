//! Player progress documents.

use serde::{Deserialize, Serialize};

use crate::WixId;

/// A player's stored progress record.
///
/// Every field is optional: partial documents are legal both on the wire and
/// in the store, and absent fields are omitted entirely rather than written
/// as nulls. The same shape serves as the POST body and the stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "wixID", skip_serializing_if = "Option::is_none")]
    pub wix_id: Option<WixId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_states: Option<Vec<StoryState>>,
}

impl Player {
    /// True when no field carries a value. Used to reject empty create
    /// requests before they reach the store.
    pub fn is_empty(&self) -> bool {
        self.wix_id.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.story_states.is_none()
    }
}

/// Per-story progress embedded in a player document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryState {
    #[serde(rename = "storyID")]
    pub story_id: String,
    #[serde(rename = "currentNodeID", skip_serializing_if = "Option::is_none")]
    pub current_node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wisdoms: Option<Vec<Wisdom>>,
}

/// A collectible narrative fragment earned within a story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wisdom {
    #[serde(rename = "wisdomID")]
    pub wisdom_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "artURL", skip_serializing_if = "Option::is_none")]
    pub art_url: Option<String>,
}

/// PATCH body for a player: only story states are patchable, any other
/// incoming field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_states: Option<Vec<StoryState>>,
}
