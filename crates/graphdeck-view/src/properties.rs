//! Properties panel: resolves the store's selection into exactly one
//! enriched entity, or none.

use serde::Serialize;

use graphdeck_graph::{EnrichedEdge, EnrichedNode, GraphStore};

/// The entity currently shown in the properties panel.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EntityView {
    Node(EnrichedNode),
    Edge(EnrichedEdge),
}

impl EntityView {
    pub fn id(&self) -> &str {
        match self {
            Self::Node(n) => &n.node.id,
            Self::Edge(e) => &e.edge.id,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

/// Resolve the current selection, node over edge, focus over selection:
/// focused node, selected node, focused edge, selected edge. A stale id
/// that no longer resolves falls through to the next candidate.
pub fn current_entity(store: &GraphStore) -> Option<EntityView> {
    let selection = store.selection();

    let node_id = [selection.focused_node, selection.selected_node];
    for id in node_id.into_iter().flatten() {
        if let Some(node) = store.enrich_node(&id) {
            return Some(EntityView::Node(node));
        }
    }

    let edge_id = [selection.focused_edge, selection.selected_edge];
    for id in edge_id.into_iter().flatten() {
        if let Some(edge) = store.enrich_edge(&id) {
            return Some(EntityView::Edge(edge));
        }
    }

    None
}
