//! In-memory graph snapshot shared by every view.
//!
//! Holds the latest knowledge-graph payload in a petgraph index plus the
//! user's current selection and hover focus. All views read from here;
//! nothing here ever calls the backend.

use std::collections::HashMap;

use parking_lot::RwLock;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use tracing::{debug, warn};

use crate::types::*;

#[derive(Default)]
struct GraphIndex {
    /// Node storage; edge weights are edge ids into `edges`.
    graph: StableDiGraph<GraphNode, String>,
    node_ids: HashMap<String, NodeIndex>,
    /// Every edge from the snapshot, including ones whose endpoints are
    /// missing from the node set (a stale index can produce those).
    edges: HashMap<String, GraphEdge>,
    /// Incident edge ids per node, in snapshot order.
    adjacency: HashMap<String, Vec<String>>,
}

/// Current selection and hover focus, one slot per entity kind.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub selected_node: Option<String>,
    pub focused_node: Option<String>,
    pub selected_edge: Option<String>,
    pub focused_edge: Option<String>,
}

/// Node and edge counts for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

/// Central graph store. Source of truth for all views.
#[derive(Default)]
pub struct GraphStore {
    index: RwLock<GraphIndex>,
    selection: RwLock<Selection>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------
    // Snapshot
    // ---------------------------------------------------------------

    /// Replace the whole snapshot. Rebuilds the adjacency index and
    /// clears selection/focus, since entity ids from the previous
    /// snapshot may no longer exist.
    pub fn replace(&self, kg: KnowledgeGraph) {
        let mut index = GraphIndex::default();

        for node in kg.nodes {
            let id = node.id.clone();
            let idx = index.graph.add_node(node);
            index.node_ids.insert(id.clone(), idx);
            index.adjacency.insert(id, Vec::new());
        }

        let mut dangling = 0usize;
        for edge in kg.edges {
            let src = index.node_ids.get(&edge.source).copied();
            let tgt = index.node_ids.get(&edge.target).copied();
            match (src, tgt) {
                (Some(s), Some(t)) => {
                    index.graph.add_edge(s, t, edge.id.clone());
                    if let Some(incident) = index.adjacency.get_mut(&edge.source) {
                        incident.push(edge.id.clone());
                    }
                    if edge.source != edge.target {
                        if let Some(incident) = index.adjacency.get_mut(&edge.target) {
                            incident.push(edge.id.clone());
                        }
                    }
                }
                _ => dangling += 1,
            }
            index.edges.insert(edge.id.clone(), edge);
        }

        if dangling > 0 {
            warn!("Graph snapshot has {} edges with missing endpoints", dangling);
        }
        debug!(
            "Graph snapshot replaced: {} nodes, {} edges",
            index.node_ids.len(),
            index.edges.len()
        );

        *self.index.write() = index;
        *self.selection.write() = Selection::default();
    }

    pub fn stats(&self) -> GraphStats {
        let index = self.index.read();
        GraphStats {
            node_count: index.node_ids.len(),
            edge_count: index.edges.len(),
        }
    }

    // ---------------------------------------------------------------
    // Lookups
    // ---------------------------------------------------------------

    pub fn node(&self, id: &str) -> Option<GraphNode> {
        let index = self.index.read();
        let idx = index.node_ids.get(id)?;
        index.graph.node_weight(*idx).cloned()
    }

    pub fn edge(&self, id: &str) -> Option<GraphEdge> {
        self.index.read().edges.get(id).cloned()
    }

    /// Incident edge count. Dangling edges don't contribute.
    pub fn node_degree(&self, id: &str) -> Option<usize> {
        self.index.read().adjacency.get(id).map(Vec::len)
    }

    // ---------------------------------------------------------------
    // Enrichment (pure derivation, never mutates the snapshot)
    // ---------------------------------------------------------------

    /// Relationship rows for a node, in snapshot order.
    ///
    /// Kind is the neighbor's role on the edge: `Target` when this node
    /// is the edge source, `Source` when it is the edge target.
    pub fn relationships(&self, node_id: &str) -> Vec<NodeRelationship> {
        let index = self.index.read();
        let Some(incident) = index.adjacency.get(node_id) else {
            return Vec::new();
        };

        incident
            .iter()
            .filter_map(|edge_id| {
                let edge = index.edges.get(edge_id)?;
                let (kind, neighbor_id) = if edge.source == node_id {
                    (RelationshipKind::Target, &edge.target)
                } else {
                    (RelationshipKind::Source, &edge.source)
                };
                let neighbor_label = index
                    .node_ids
                    .get(neighbor_id)
                    .and_then(|idx| index.graph.node_weight(*idx))
                    .map(|n| n.display_label().to_string())
                    .unwrap_or_else(|| neighbor_id.clone());
                Some(NodeRelationship {
                    kind,
                    edge_id: edge_id.clone(),
                    neighbor_id: neighbor_id.clone(),
                    neighbor_label,
                })
            })
            .collect()
    }

    pub fn enrich_node(&self, id: &str) -> Option<EnrichedNode> {
        let node = self.node(id)?;
        let relationships = self.relationships(id);
        Some(EnrichedNode {
            degree: self.node_degree(id).unwrap_or(0),
            node,
            relationships,
        })
    }

    pub fn enrich_edge(&self, id: &str) -> Option<EnrichedEdge> {
        let edge = self.edge(id)?;
        let source_node = self.node(&edge.source);
        let target_node = self.node(&edge.target);
        Some(EnrichedEdge {
            edge,
            source_node,
            target_node,
        })
    }

    // ---------------------------------------------------------------
    // Selection / focus
    // ---------------------------------------------------------------

    pub fn selection(&self) -> Selection {
        self.selection.read().clone()
    }

    pub fn set_selected_node(&self, id: Option<String>) {
        self.selection.write().selected_node = id;
    }

    pub fn set_focused_node(&self, id: Option<String>) {
        self.selection.write().focused_node = id;
    }

    pub fn set_selected_edge(&self, id: Option<String>) {
        self.selection.write().selected_edge = id;
    }

    pub fn set_focused_edge(&self, id: Option<String>) {
        self.selection.write().focused_edge = id;
    }

    pub fn clear_selection(&self) {
        *self.selection.write() = Selection::default();
    }
}
