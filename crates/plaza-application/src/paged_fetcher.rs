//! Paged collection fetcher.
//!
//! Every list view needs the same page-state wiring; this is that logic
//! factored out once. A `PagedFetcher` owns one
//! [`PageState`], maps `(page, filter)` deterministically onto a list fetch,
//! and lets callers invalidate after mutations.

use std::sync::Arc;
use std::time::Duration;

use plaza_core::api::PlatformApi;
use plaza_core::page::{PageFilter, PageState};
use tokio::sync::{RwLock, watch};

/// Receives the response body text of a failed fetch, or `None` when a later
/// fetch succeeds and the message should be dismissed.
pub type ErrorSink = Arc<dyn Fn(Option<String>) + Send + Sync>;

/// Hook run after a page change has resolved, deferred by
/// [`PAGE_CHANGE_DEFER`]. List surfaces scroll back to the top here; the
/// deferral keeps the scroll behind the repaint of the new page.
pub type PageChangeHook = Arc<dyn Fn() + Send + Sync>;

/// Deferral before the after-page-change hook runs, roughly one frame.
pub const PAGE_CHANGE_DEFER: Duration = Duration::from_millis(16);

/// Fetches and owns one paged list.
///
/// Concurrency contract: fetches are not ordered against each other. Two
/// quick page changes race and the last response to arrive wins; in-flight
/// requests are never cancelled. Callers that need stricter gating disable
/// their own controls via the `loading` flag in the published state.
pub struct PagedFetcher {
    /// API used for list fetches
    api: Arc<dyn PlatformApi>,
    /// List endpoint path, e.g. `/api/posts`
    endpoint: String,
    /// Owned page state
    state: Arc<RwLock<PageState>>,
    /// Publishes a snapshot after every state mutation
    changed: watch::Sender<PageState>,
    /// Optional error message receiver
    error_sink: Arc<RwLock<Option<ErrorSink>>>,
    /// Optional deferred after-page-change hook
    after_page_change: Arc<RwLock<Option<PageChangeHook>>>,
}

impl PagedFetcher {
    /// Creates a fetcher for the given list endpoint with an empty filter.
    pub fn new(api: Arc<dyn PlatformApi>, endpoint: impl Into<String>) -> Self {
        Self::with_filter(api, endpoint, PageFilter::new())
    }

    /// Creates a fetcher with an initial filter (realm, author, category,
    /// tag) forwarded verbatim on every fetch.
    pub fn with_filter(
        api: Arc<dyn PlatformApi>,
        endpoint: impl Into<String>,
        filter: PageFilter,
    ) -> Self {
        let mut initial = PageState::new();
        initial.filter = filter;
        let (changed, _) = watch::channel(initial.clone());
        Self {
            api,
            endpoint: endpoint.into(),
            state: Arc::new(RwLock::new(initial)),
            changed,
            error_sink: Arc::new(RwLock::new(None)),
            after_page_change: Arc::new(RwLock::new(None)),
        }
    }

    /// Registers the receiver for fetch error messages.
    pub async fn set_error_sink(&self, sink: ErrorSink) {
        *self.error_sink.write().await = Some(sink);
    }

    /// Registers the deferred hook run after `set_page` resolves.
    pub async fn set_after_page_change(&self, hook: PageChangeHook) {
        *self.after_page_change.write().await = Some(hook);
    }

    /// Returns a snapshot of the current page state.
    pub async fn state(&self) -> PageState {
        self.state.read().await.clone()
    }

    /// Subscribes to page state changes. The receiver always starts with the
    /// current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.changed.subscribe()
    }

    /// Moves to page `n` (clamped to `>= 1`) and refreshes. Once the refresh
    /// has resolved, the after-page-change hook is scheduled behind the
    /// fixed deferral; `set_page` itself does not wait for it.
    pub async fn set_page(&self, n: u32) {
        {
            let mut state = self.state.write().await;
            state.page = n.max(1);
            let _ = self.changed.send(state.clone());
        }

        self.refresh(None).await;

        let hook_slot = Arc::clone(&self.after_page_change);
        tokio::spawn(async move {
            tokio::time::sleep(PAGE_CHANGE_DEFER).await;
            if let Some(hook) = hook_slot.read().await.as_ref() {
                hook();
            }
        });
    }

    /// Fetches the page matching the current `(page, filter)`.
    ///
    /// Passing `Some(filter)` replaces the stored filter before fetching. On
    /// success `items` and `total_count` are replaced atomically and any
    /// previous error message is dismissed. On failure the previous
    /// `items`/`total_count` stay visible (stale but valid) and the response
    /// body text goes to the error sink. The `loading` flag is cleared on
    /// every path.
    pub async fn refresh(&self, filter: Option<PageFilter>) {
        let query = {
            let mut state = self.state.write().await;
            if let Some(filter) = filter {
                state.filter = filter;
            }
            state.loading = true;
            let _ = self.changed.send(state.clone());
            state.query()
        };

        let result = self.api.list(&self.endpoint, &query).await;

        match result {
            Ok(response) => {
                {
                    let mut state = self.state.write().await;
                    state.apply(response);
                    state.loading = false;
                    let _ = self.changed.send(state.clone());
                }
                self.report_error(None).await;
            }
            Err(err) => {
                let message = err.surface_message();
                tracing::debug!("List fetch failed, keeping stale page: {}", message);
                {
                    let mut state = self.state.write().await;
                    state.error = Some(message.clone());
                    state.loading = false;
                    let _ = self.changed.send(state.clone());
                }
                self.report_error(Some(message)).await;
            }
        }
    }

    /// Re-fetches the current page after a successful create/delete/react so
    /// the visible list reflects the mutation.
    pub async fn on_mutation_success(&self) {
        self.refresh(None).await;
    }

    async fn report_error(&self, message: Option<String>) {
        if let Some(sink) = self.error_sink.read().await.as_ref() {
            sink(message);
        }
    }
}
