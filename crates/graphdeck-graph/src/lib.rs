//! graphdeck Graph: snapshot types, adjacency index, selection state.

pub mod store;
pub mod types;

pub use store::{GraphStats, GraphStore, Selection};
pub use types::{
    EnrichedEdge, EnrichedNode, GraphEdge, GraphNode, KnowledgeGraph, NodeRelationship,
    RelationshipKind,
};
