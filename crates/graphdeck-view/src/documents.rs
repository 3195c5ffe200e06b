//! Document manager view-model: status filter, column sort, counts,
//! and the manual scan trigger.
//!
//! `DocumentManager` itself is pure and synchronous; the poller feeds
//! it fresh responses and the host UI reads `rows()`.

use std::collections::HashMap;

use graphdeck_client::{ApiClient, DocStatus, DocStatusRecord, DocsStatusesResponse};

use crate::notify::Notifier;

/// Kick off a server-side scan for new documents. The returned status
/// message is surfaced as an info toast; failures become error toasts.
pub async fn trigger_scan(client: &ApiClient, notifier: &Notifier) -> bool {
    match client.scan_new_documents().await {
        Ok(scan) => {
            notifier.info(scan.status);
            true
        }
        Err(err) => {
            notifier.backend_error(&err);
            false
        }
    }
}

/// Single-select status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(DocStatus),
}

/// Sortable columns of the document table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    UpdatedAt,
    CreatedAt,
    ContentLength,
    ChunksCount,
}

impl SortField {
    /// Numeric sort key; missing or unparseable values sort as 0.
    fn key(&self, record: &DocStatusRecord) -> i64 {
        match self {
            Self::UpdatedAt => record.updated_at_millis(),
            Self::CreatedAt => record.created_at_millis(),
            Self::ContentLength => record.content_length,
            Self::ChunksCount => record.chunks_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::UpdatedAt,
            direction: SortDirection::Descending,
        }
    }
}

/// State behind the document-status table.
#[derive(Default)]
pub struct DocumentManager {
    docs: Option<DocsStatusesResponse>,
    filter: StatusFilter,
    sort: SortSpec,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh response. Zero documents across all buckets is
    /// recorded as "no data", not as an empty table.
    pub fn ingest(&mut self, response: DocsStatusesResponse) {
        self.docs = if response.is_empty() {
            None
        } else {
            Some(response)
        };
    }

    pub fn has_data(&self) -> bool {
        self.docs.is_some()
    }

    /// Total document count across all buckets, ignoring the filter.
    pub fn total_count(&self) -> usize {
        self.docs.as_ref().map_or(0, DocsStatusesResponse::total_count)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Header click: same column flips direction, a new column resets
    /// to ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort.field == field {
            self.sort.direction = match self.sort.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.sort = SortSpec {
                field,
                direction: SortDirection::Ascending,
            };
        }
    }

    /// The status map with every non-selected bucket emptied out.
    pub fn filtered_statuses(&self) -> HashMap<DocStatus, Vec<DocStatusRecord>> {
        let Some(docs) = &self.docs else {
            return HashMap::new();
        };
        docs.statuses
            .iter()
            .map(|(status, records)| {
                let visible = match self.filter {
                    StatusFilter::All => records.clone(),
                    StatusFilter::Only(selected) if *status == selected => records.clone(),
                    StatusFilter::Only(_) => Vec::new(),
                };
                (*status, visible)
            })
            .collect()
    }

    /// Count badge for the active filter.
    pub fn filtered_count(&self) -> usize {
        self.filtered_statuses().values().map(Vec::len).sum()
    }

    /// Display rows: filtered, then sorted by the active column.
    /// Ties keep bucket order (pending, processing, processed, failed)
    /// and response order within a bucket.
    pub fn rows(&self) -> Vec<DocStatusRecord> {
        let filtered = self.filtered_statuses();
        let mut rows: Vec<DocStatusRecord> = DocStatus::all()
            .iter()
            .filter_map(|status| filtered.get(status))
            .flatten()
            .cloned()
            .collect();

        let field = self.sort.field;
        match self.sort.direction {
            SortDirection::Ascending => rows.sort_by(|a, b| field.key(a).cmp(&field.key(b))),
            SortDirection::Descending => rows.sort_by(|a, b| field.key(b).cmp(&field.key(a))),
        }
        rows
    }
}
