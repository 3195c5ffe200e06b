//! Edit/save flow for entities and relations.
//!
//! Entering edit mode snapshots the entity's properties into a draft;
//! nothing touches the graph store. A successful save is followed by a
//! full reload of the page state after a fixed delay, so there is no
//! incremental merge to get wrong. A failed save keeps the draft so the
//! user can retry or cancel.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::info;

use graphdeck_client::ApiClient;
use graphdeck_core::{Error, Result};
use graphdeck_graph::{EnrichedEdge, EnrichedNode};

use crate::notify::Notifier;
use crate::properties::EntityView;

/// Property key that is never editable.
const SOURCE_ID_KEY: &str = "source_id";

/// Which update endpoint a draft is saved to.
///
/// Entities are keyed by their space-joined display labels, relations by
/// both endpoint labels. The backend keys on labels, not ids, so the key
/// derivation lives here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Entity {
        entity_name: String,
    },
    Relation {
        source_label: String,
        target_label: String,
    },
}

impl EditTarget {
    fn for_node(node: &EnrichedNode) -> Self {
        Self::Entity {
            entity_name: node.node.entity_name(),
        }
    }

    /// Both endpoints must resolve; a stale graph index makes the edge
    /// uneditable until the next reload.
    fn for_edge(edge: &EnrichedEdge) -> Result<Self> {
        let source = edge
            .source_node
            .as_ref()
            .ok_or_else(|| Error::Graph(format!("edge {} source is not in the graph", edge.edge.id)))?;
        let target = edge
            .target_node
            .as_ref()
            .ok_or_else(|| Error::Graph(format!("edge {} target is not in the graph", edge.edge.id)))?;
        Ok(Self::Relation {
            source_label: source.entity_name(),
            target_label: target.entity_name(),
        })
    }
}

/// An in-flight edit: the target endpoint plus a string-valued draft of
/// every property except the immutable `source_id`.
#[derive(Debug, Clone)]
pub struct EditSession {
    target: EditTarget,
    draft: BTreeMap<String, String>,
}

impl EditSession {
    pub fn for_node(node: &EnrichedNode) -> Self {
        Self {
            target: EditTarget::for_node(node),
            draft: snapshot(&node.node.properties),
        }
    }

    pub fn for_edge(edge: &EnrichedEdge) -> Result<Self> {
        Ok(Self {
            target: EditTarget::for_edge(edge)?,
            draft: snapshot(&edge.edge.properties),
        })
    }

    pub fn for_entity(entity: &EntityView) -> Result<Self> {
        match entity {
            EntityView::Node(node) => Ok(Self::for_node(node)),
            EntityView::Edge(edge) => Self::for_edge(edge),
        }
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    pub fn draft(&self) -> &BTreeMap<String, String> {
        &self.draft
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.draft.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.draft.insert(key.into(), value.into());
    }

    /// Submit the draft to the matching update endpoint.
    pub async fn save(&self, client: &ApiClient) -> Result<SaveOutcome> {
        let response = match &self.target {
            EditTarget::Entity { entity_name } => {
                client.update_entity(entity_name, &self.draft).await?
            }
            EditTarget::Relation {
                source_label,
                target_label,
            } => {
                client
                    .update_relation(source_label, target_label, &self.draft)
                    .await?
            }
        };
        info!("Saved edit ({}): {}", response.status, response.message);
        Ok(SaveOutcome {
            message: response.message,
        })
    }
}

/// Result of a successful save. The caller schedules the full reload.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub message: String,
}

fn snapshot(properties: &serde_json::Map<String, Value>) -> BTreeMap<String, String> {
    properties
        .iter()
        .filter(|(key, _)| key.as_str() != SOURCE_ID_KEY)
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

/// Edit-mode state for the properties panel.
///
/// Holds at most one session. Saving clears edit mode only when the
/// backend accepted the update; otherwise the draft stays editable.
#[derive(Default)]
pub struct Editor {
    session: Option<EditSession>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        self.session.as_mut()
    }

    /// Enter edit mode for the given entity. Fails for an edge whose
    /// endpoints are missing; edit mode is not entered in that case.
    pub fn begin(&mut self, entity: &EntityView) -> Result<()> {
        self.session = Some(EditSession::for_entity(entity)?);
        Ok(())
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Save the current draft. Returns the outcome when the backend
    /// accepted the update; the error toast and retained draft handle
    /// the failure path.
    pub async fn save(&mut self, client: &ApiClient, notifier: &Notifier) -> Option<SaveOutcome> {
        let session = self.session.as_ref()?;
        match session.save(client).await {
            Ok(outcome) => {
                notifier.success(outcome.message.clone());
                self.session = None;
                Some(outcome)
            }
            Err(err) => {
                notifier.backend_error(&err);
                None
            }
        }
    }

    /// Save and, on success, request the full reload after `delay`.
    /// Returns whether the save went through.
    pub async fn save_and_reload(
        &mut self,
        client: &ApiClient,
        notifier: &Notifier,
        reload: &ReloadSignal,
        delay: Duration,
    ) -> bool {
        match self.save(client, notifier).await {
            Some(_) => {
                schedule_reload(delay, reload.clone());
                true
            }
            None => false,
        }
    }
}

/// Signal the host UI observes to perform the post-save full reload.
#[derive(Clone, Default)]
pub struct ReloadSignal(Arc<tokio::sync::Notify>);

impl ReloadSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next reload request.
    pub async fn requested(&self) {
        self.0.notified().await;
    }

    fn trigger(&self) {
        self.0.notify_one();
    }
}

/// Request a full reload after the configured delay.
pub fn schedule_reload(delay: Duration, signal: ReloadSignal) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        info!("Requesting full reload after saved edit");
        signal.trigger();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphdeck_graph::{GraphEdge, GraphNode};
    use serde_json::json;

    fn node_with_props() -> EnrichedNode {
        let properties = json!({
            "description": "a mathematician",
            "source_id": "doc-1",
            "weight": 2.5,
        });
        EnrichedNode {
            node: GraphNode {
                id: "n1".to_string(),
                labels: vec!["Ada".to_string(), "Lovelace".to_string()],
                properties: properties.as_object().unwrap().clone(),
            },
            degree: 0,
            relationships: vec![],
        }
    }

    #[test]
    fn test_snapshot_drops_source_id_and_stringifies() {
        let session = EditSession::for_node(&node_with_props());
        assert_eq!(session.get("description"), Some("a mathematician"));
        assert_eq!(session.get("weight"), Some("2.5"));
        assert!(session.get(SOURCE_ID_KEY).is_none());
    }

    #[test]
    fn test_entity_target_joins_labels() {
        let session = EditSession::for_node(&node_with_props());
        assert_eq!(
            session.target(),
            &EditTarget::Entity {
                entity_name: "Ada Lovelace".to_string()
            }
        );
    }

    #[test]
    fn test_edge_with_missing_endpoint_is_not_editable() {
        let edge = EnrichedEdge {
            edge: GraphEdge {
                id: "e1".to_string(),
                source: "n1".to_string(),
                target: "ghost".to_string(),
                edge_type: None,
                properties: serde_json::Map::new(),
            },
            source_node: Some(node_with_props().node),
            target_node: None,
        };
        assert!(EditSession::for_edge(&edge).is_err());

        let mut editor = Editor::new();
        assert!(editor.begin(&EntityView::Edge(edge)).is_err());
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_enter_then_cancel_leaves_properties_untouched() {
        let node = node_with_props();
        let before = node.node.properties.clone();

        let mut editor = Editor::new();
        editor.begin(&EntityView::Node(node.clone())).unwrap();
        editor.session_mut().unwrap().set("description", "changed");
        editor.cancel();

        assert!(!editor.is_editing());
        assert_eq!(node.node.properties, before);
    }
}
