//! Wire types for the backend REST API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pipeline status of an ingested document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStatus {
    Pending,
    Processing,
    Processed,
    Failed,
}

impl DocStatus {
    pub fn all() -> &'static [DocStatus] {
        &[
            Self::Pending,
            Self::Processing,
            Self::Processed,
            Self::Failed,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DocStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One document's ingestion record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocStatusRecord {
    pub id: String,
    pub content_summary: String,
    pub content_length: i64,
    pub status: DocStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl DocStatusRecord {
    /// Sort key for the created column; unparseable timestamps sort as 0.
    pub fn created_at_millis(&self) -> i64 {
        parse_millis(&self.created_at)
    }

    /// Sort key for the updated column; unparseable timestamps sort as 0.
    pub fn updated_at_millis(&self) -> i64 {
        parse_millis(&self.updated_at)
    }
}

fn parse_millis(ts: &str) -> i64 {
    chrono::DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// `GET /documents` payload: records bucketed by status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsStatusesResponse {
    #[serde(default)]
    pub statuses: HashMap<DocStatus, Vec<DocStatusRecord>>,
}

impl DocsStatusesResponse {
    pub fn total_count(&self) -> usize {
        self.statuses.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}

/// `POST /documents/scan` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanResponse {
    pub status: String,
}

/// Entity/relation update response: `{status, message}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    pub status: String,
    pub message: String,
}

/// `GET /health` response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `GET /kg/entity/{name}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityInfo {
    pub entity_name: String,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub graph_data: Option<Value>,
    #[serde(default)]
    pub vector_data: Option<Value>,
}
