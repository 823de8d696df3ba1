//! Story content nodes.

use serde::{Deserialize, Serialize};

use super::Wisdom;

/// A single addressable unit of story content, keyed by `nodeID`.
///
/// Like [`super::Player`], every field is optional so the struct doubles as
/// the partial-update body: serializing a patch yields only the fields to
/// set, never nulls for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryElement {
    #[serde(rename = "nodeID", skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(rename = "storyID", skip_serializing_if = "Option::is_none")]
    pub story_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<SectionMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<SectionMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wisdoms: Option<Vec<Wisdom>>,
}

impl StoryElement {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.node_id.is_none()
            && self.story_id.is_none()
            && self.content.is_none()
            && self.chapter.is_none()
            && self.part.is_none()
            && self.options.is_none()
            && self.wisdoms.is_none()
    }
}

/// Chapter or part descriptor attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "artURL", skip_serializing_if = "Option::is_none")]
    pub art_url: Option<String>,
    #[serde(rename = "videoURL", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// A player choice leading to another node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "targetNodeID", skip_serializing_if = "Option::is_none")]
    pub target_node_id: Option<String>,
}
