//! Background refresh of the document table.
//!
//! Polls while the host tab is visible and the backend reports healthy;
//! hidden tabs and unhealthy backends cost zero requests. Responses are
//! not de-duplicated: a slow fetch racing a later one resolves last-wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use graphdeck_client::{ApiClient, DocsStatusesResponse};
use graphdeck_core::Result;

use crate::documents::DocumentManager;
use crate::notify::Notifier;

/// Where the poller gets documents and health from. Seam for tests.
#[async_trait]
pub trait DocumentSource: Send + Sync + 'static {
    /// Health probe; any error counts as unhealthy.
    async fn health_ok(&self) -> bool;

    async fn fetch_documents(&self) -> Result<DocsStatusesResponse>;
}

#[async_trait]
impl DocumentSource for ApiClient {
    async fn health_ok(&self) -> bool {
        match self.health().await {
            Ok(health) => health.is_healthy(),
            Err(err) => {
                debug!("Health probe failed: {}", err);
                false
            }
        }
    }

    async fn fetch_documents(&self) -> Result<DocsStatusesResponse> {
        self.documents().await
    }
}

/// Handle to the refresh task. Dropping it stops polling.
pub struct DocumentPoller {
    visible: Arc<AtomicBool>,
    wake: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl DocumentPoller {
    /// Start the refresh task. No fetch happens until the first
    /// `set_visible(true)`.
    pub fn spawn(
        source: Arc<dyn DocumentSource>,
        manager: Arc<RwLock<DocumentManager>>,
        notifier: Arc<Notifier>,
        interval: Duration,
    ) -> Self {
        let visible = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());
        let handle = tokio::spawn(poll_loop(
            source,
            manager,
            notifier,
            interval,
            visible.clone(),
            wake.clone(),
        ));
        Self {
            visible,
            wake,
            handle,
        }
    }

    /// Track host tab visibility. Becoming visible triggers an
    /// immediate refresh instead of waiting out the current interval.
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
        if visible {
            self.wake.notify_one();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for DocumentPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn poll_loop(
    source: Arc<dyn DocumentSource>,
    manager: Arc<RwLock<DocumentManager>>,
    notifier: Arc<Notifier>,
    interval: Duration,
    visible: Arc<AtomicBool>,
    wake: Arc<Notify>,
) {
    // First tick lands one interval out; the visibility wake covers the
    // initial fetch so it isn't doubled.
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = wake.notified() => {
                ticker.reset();
            }
        }

        if !visible.load(Ordering::SeqCst) {
            continue;
        }
        if !source.health_ok().await {
            debug!("Backend unhealthy, skipping document refresh");
            continue;
        }

        match source.fetch_documents().await {
            Ok(response) => {
                debug!("Document refresh: {} records", response.total_count());
                manager.write().ingest(response);
            }
            Err(err) => {
                warn!("Document refresh failed: {}", err);
                notifier.backend_error(&err);
            }
        }
    }
}
