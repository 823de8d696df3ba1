//! Player store operations.

use std::sync::Arc;

use mongodb::bson::{self, doc};

use cyoa_domain::{Player, PlayerPatch, WixId, Wisdom};

use crate::infrastructure::ports::DocumentCollection;

/// Player operation errors. The Display strings are the wire messages.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Empty request body")]
    EmptyBody,
    #[error("Invalid WixID format")]
    InvalidWixId,
    #[error("Player not found")]
    NotFound,
    #[error("No story states provided")]
    NoStoryStates,
    #[error("Failed to create player state")]
    Insert,
    #[error("Failed to update player state")]
    Update,
}

/// Player document operations, keyed by the externally issued WixID.
pub struct PlayerStore {
    collection: Arc<dyn DocumentCollection<Player>>,
}

impl PlayerStore {
    pub fn new(collection: Arc<dyn DocumentCollection<Player>>) -> Self {
        Self { collection }
    }

    /// Insert a new player document and echo it back.
    pub async fn create(&self, player: Player) -> Result<Player, PlayerError> {
        if player.is_empty() {
            return Err(PlayerError::EmptyBody);
        }

        self.collection.insert_one(&player).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert player state");
            PlayerError::Insert
        })?;

        Ok(player)
    }

    /// Look up a player by WixID string.
    ///
    /// A store failure is collapsed into `NotFound`: the caller cannot tell a
    /// missing player from a failed lookup, only the log can.
    pub async fn get_by_wix_id(&self, wix_id: &str) -> Result<Player, PlayerError> {
        let wix_id = parse_wix_id(wix_id)?;

        let found = self
            .collection
            .find_one(doc! { "wixID": wix_id.to_string() })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, %wix_id, "Player lookup failed");
                PlayerError::NotFound
            })?;

        found.ok_or(PlayerError::NotFound)
    }

    /// Record collected wisdoms on an existing player.
    ///
    /// For each wisdom in the patch this is a two-step conditional write:
    /// first a targeted nested-array `$set` matched by story and wisdom id
    /// via positional array filters, then, when that write matches or
    /// modifies nothing, a `$push` appending the wisdom to that story's
    /// list. Re-sending an identical wisdom reports `modified_count == 0`
    /// and therefore appends a duplicate; callers that care must send
    /// changed content.
    pub async fn update(&self, wix_id: &str, patch: PlayerPatch) -> Result<(), PlayerError> {
        let wix_id = parse_wix_id(wix_id)?;

        let story_states = match patch.story_states {
            Some(states) if !states.is_empty() => states,
            _ => return Err(PlayerError::NoStoryStates),
        };

        for state in &story_states {
            let Some(wisdoms) = &state.wisdoms else {
                continue;
            };
            for wisdom in wisdoms {
                self.upsert_wisdom(wix_id, &state.story_id, wisdom).await?;
            }
        }

        Ok(())
    }

    async fn upsert_wisdom(
        &self,
        wix_id: WixId,
        story_id: &str,
        wisdom: &Wisdom,
    ) -> Result<(), PlayerError> {
        let wisdom_bson = bson::to_bson(wisdom).map_err(|e| {
            tracing::error!(error = %e, %wix_id, "Failed to serialize wisdom");
            PlayerError::Update
        })?;

        let outcome = self
            .collection
            .update_one(
                doc! { "wixID": wix_id.to_string() },
                doc! { "$set": { "storyStates.$[story].wisdoms.$[wisdom]": wisdom_bson.clone() } },
                Some(vec![
                    doc! { "story.storyID": story_id },
                    doc! { "wisdom.wisdomID": wisdom.wisdom_id.as_str() },
                ]),
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %wix_id, story_id, "Targeted wisdom update failed");
                PlayerError::Update
            })?;

        if outcome.matched_count == 0 || outcome.modified_count == 0 {
            // No existing entry matched the array filters: append instead.
            self.collection
                .update_one(
                    doc! { "wixID": wix_id.to_string(), "storyStates.storyID": story_id },
                    doc! { "$push": { "storyStates.$.wisdoms": wisdom_bson } },
                    None,
                )
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, %wix_id, story_id, "Wisdom append failed");
                    PlayerError::Update
                })?;
        }

        Ok(())
    }
}

fn parse_wix_id(wix_id: &str) -> Result<WixId, PlayerError> {
    WixId::parse_str(wix_id).map_err(|_| PlayerError::InvalidWixId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockDocumentCollection, StoreError, UpdateOutcome};
    use cyoa_domain::StoryState;
    use mockall::predicate::eq;

    fn test_player() -> Player {
        Player {
            wix_id: Some(WixId::new()),
            username: Some("TestUser".to_string()),
            email: Some("test@example.com".to_string()),
            story_states: None,
        }
    }

    fn test_wisdom(id: &str) -> Wisdom {
        Wisdom {
            wisdom_id: id.to_string(),
            name: Some("Patience".to_string()),
            description: None,
            art_url: None,
        }
    }

    fn patch_with_wisdom(story_id: &str, wisdom: Wisdom) -> PlayerPatch {
        PlayerPatch {
            story_states: Some(vec![StoryState {
                story_id: story_id.to_string(),
                current_node_id: None,
                artifacts: None,
                wisdoms: Some(vec![wisdom]),
            }]),
        }
    }

    fn store(collection: MockDocumentCollection<Player>) -> PlayerStore {
        PlayerStore::new(Arc::new(collection))
    }

    mod create {
        use super::*;

        #[tokio::test]
        async fn rejects_empty_body_without_store_call() {
            let collection = MockDocumentCollection::new();

            let result = store(collection).create(Player::default()).await;
            assert!(matches!(result, Err(PlayerError::EmptyBody)));
        }

        #[tokio::test]
        async fn inserts_and_echoes_the_document() {
            let player = test_player();
            let expected = player.clone();

            let mut collection = MockDocumentCollection::new();
            collection
                .expect_insert_one()
                .withf(move |p: &Player| p.username.as_deref() == Some("TestUser"))
                .returning(|_| Ok(()));

            let created = store(collection).create(player).await.unwrap();
            assert_eq!(created, expected);
        }

        #[tokio::test]
        async fn maps_insert_failure() {
            let mut collection = MockDocumentCollection::new();
            collection
                .expect_insert_one()
                .returning(|_: &Player| Err(StoreError::database("insert_one", "boom")));

            let result = store(collection).create(test_player()).await;
            assert!(matches!(result, Err(PlayerError::Insert)));
            assert_eq!(
                PlayerError::Insert.to_string(),
                "Failed to create player state"
            );
        }
    }

    mod get_by_wix_id {
        use super::*;

        #[tokio::test]
        async fn rejects_malformed_id_without_store_call() {
            let collection = MockDocumentCollection::new();

            let result = store(collection).get_by_wix_id("not-a-uuid").await;
            assert!(matches!(result, Err(PlayerError::InvalidWixId)));
        }

        #[tokio::test]
        async fn filters_on_the_canonical_string_form() {
            let id = WixId::new();
            let player = Player {
                wix_id: Some(id),
                ..Default::default()
            };

            let mut collection = MockDocumentCollection::new();
            collection
                .expect_find_one()
                .with(eq(doc! { "wixID": id.to_string() }))
                .returning(move |_| Ok(Some(player.clone())));

            let found = store(collection).get_by_wix_id(&id.to_string()).await.unwrap();
            assert_eq!(found.wix_id, Some(id));
        }

        #[tokio::test]
        async fn missing_document_is_not_found() {
            let mut collection = MockDocumentCollection::new();
            collection.expect_find_one().returning(|_| Ok(None));

            let result = store(collection).get_by_wix_id(&WixId::new().to_string()).await;
            assert!(matches!(result, Err(PlayerError::NotFound)));
        }

        #[tokio::test]
        async fn store_failure_collapses_to_not_found() {
            let mut collection = MockDocumentCollection::new();
            collection
                .expect_find_one()
                .returning(|_| Err(StoreError::timeout("find_one")));

            let result = store(collection).get_by_wix_id(&WixId::new().to_string()).await;
            assert!(matches!(result, Err(PlayerError::NotFound)));
        }
    }

    mod update {
        use super::*;

        #[tokio::test]
        async fn rejects_malformed_id() {
            let collection = MockDocumentCollection::new();

            let result = store(collection)
                .update("nope", patch_with_wisdom("story-1", test_wisdom("w-1")))
                .await;
            assert!(matches!(result, Err(PlayerError::InvalidWixId)));
        }

        #[tokio::test]
        async fn rejects_absent_and_empty_story_states() {
            let id = WixId::new().to_string();

            let result = store(MockDocumentCollection::new())
                .update(&id, PlayerPatch { story_states: None })
                .await;
            assert!(matches!(result, Err(PlayerError::NoStoryStates)));

            let result = store(MockDocumentCollection::new())
                .update(
                    &id,
                    PlayerPatch {
                        story_states: Some(vec![]),
                    },
                )
                .await;
            assert!(matches!(result, Err(PlayerError::NoStoryStates)));
        }

        #[tokio::test]
        async fn targeted_update_alone_when_it_modifies() {
            let id = WixId::new();

            let mut collection = MockDocumentCollection::new();
            collection
                .expect_update_one()
                .withf(move |filter, update, array_filters| {
                    filter == &doc! { "wixID": id.to_string() }
                        && update.contains_key("$set")
                        && array_filters
                            == &Some(vec![
                                doc! { "story.storyID": "story-1" },
                                doc! { "wisdom.wisdomID": "w-1" },
                            ])
                })
                .times(1)
                .returning(|_, _, _| {
                    Ok(UpdateOutcome {
                        matched_count: 1,
                        modified_count: 1,
                    })
                });

            store(collection)
                .update(&id.to_string(), patch_with_wisdom("story-1", test_wisdom("w-1")))
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn appends_when_targeted_update_matches_nothing() {
            let id = WixId::new();

            let mut collection = MockDocumentCollection::new();
            collection
                .expect_update_one()
                .withf(|_, update, _| update.contains_key("$set"))
                .times(1)
                .returning(|_, _, _| {
                    Ok(UpdateOutcome {
                        matched_count: 1,
                        modified_count: 0,
                    })
                });
            collection
                .expect_update_one()
                .withf(move |filter, update, array_filters| {
                    filter
                        == &doc! { "wixID": id.to_string(), "storyStates.storyID": "story-1" }
                        && update.contains_key("$push")
                        && array_filters.is_none()
                })
                .times(1)
                .returning(|_, _, _| {
                    Ok(UpdateOutcome {
                        matched_count: 1,
                        modified_count: 1,
                    })
                });

            store(collection)
                .update(&id.to_string(), patch_with_wisdom("story-1", test_wisdom("w-1")))
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn targeted_update_failure_skips_the_fallback() {
            let mut collection = MockDocumentCollection::new();
            collection
                .expect_update_one()
                .times(1)
                .returning(|_, _, _| Err(StoreError::database("update_one", "boom")));

            let result = store(collection)
                .update(
                    &WixId::new().to_string(),
                    patch_with_wisdom("story-1", test_wisdom("w-1")),
                )
                .await;
            assert!(matches!(result, Err(PlayerError::Update)));
        }

        #[tokio::test]
        async fn fallback_failure_is_an_update_error() {
            let mut collection = MockDocumentCollection::new();
            collection
                .expect_update_one()
                .withf(|_, update, _| update.contains_key("$set"))
                .returning(|_, _, _| {
                    Ok(UpdateOutcome {
                        matched_count: 0,
                        modified_count: 0,
                    })
                });
            collection
                .expect_update_one()
                .withf(|_, update, _| update.contains_key("$push"))
                .returning(|_, _, _| Err(StoreError::timeout("update_one")));

            let result = store(collection)
                .update(
                    &WixId::new().to_string(),
                    patch_with_wisdom("story-1", test_wisdom("w-1")),
                )
                .await;
            assert!(matches!(result, Err(PlayerError::Update)));
        }

        #[tokio::test]
        async fn states_without_wisdoms_are_skipped() {
            let collection = MockDocumentCollection::new();

            store(collection)
                .update(
                    &WixId::new().to_string(),
                    PlayerPatch {
                        story_states: Some(vec![StoryState {
                            story_id: "story-1".to_string(),
                            current_node_id: Some("node-3".to_string()),
                            artifacts: None,
                            wisdoms: None,
                        }]),
                    },
                )
                .await
                .unwrap();
        }
    }
}
