//! graphdeck Client: REST client and wire types for the RAG backend.

pub mod api;
pub mod types;

pub use api::ApiClient;
pub use types::{
    DocStatus, DocStatusRecord, DocsStatusesResponse, EntityInfo, HealthResponse, ScanResponse,
    UpdateResponse,
};
