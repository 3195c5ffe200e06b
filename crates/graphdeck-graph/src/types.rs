//! Graph entity types matching the backend's knowledge-graph JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node as returned by the knowledge-graph endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl GraphNode {
    /// Label shown in relationship lists: first graph label, falling
    /// back to the node id.
    pub fn display_label(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or(&self.id)
    }

    /// Entity name used by the backend's update endpoint: all labels
    /// joined with a space. The backend keys entities by display label,
    /// not by node id.
    pub fn entity_name(&self) -> String {
        self.labels.join(" ")
    }
}

/// An edge as returned by the knowledge-graph endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Full graph payload of `GET /kg/{label}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Role of a neighbor relative to the incident edge.
///
/// When the inspected node is the edge's source the entry is labeled
/// `Target`, and vice versa: the label names the neighbor's role on
/// the edge, not the direction from the inspected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipKind {
    Source,
    Target,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Target => "Target",
        }
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row in a node's relationship list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRelationship {
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    pub edge_id: String,
    pub neighbor_id: String,
    pub neighbor_label: String,
}

/// A node plus everything the properties panel derives for it.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedNode {
    #[serde(flatten)]
    pub node: GraphNode,
    pub degree: usize,
    pub relationships: Vec<NodeRelationship>,
}

/// An edge with its endpoints resolved. Either endpoint may be absent
/// when the graph index is stale.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedEdge {
    #[serde(flatten)]
    pub edge: GraphEdge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_node: Option<GraphNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_node: Option<GraphNode>,
}
