//! Observer hook for fetch progress.
//!
//! Replaces print-based progress reporting: the fetch machinery notifies an
//! injected observer per page and per retry, and stays decoupled from
//! presentation. The CLI installs an implementation; library callers get
//! [`NullObserver`] by default.

use std::time::Duration;

/// Receives progress notifications from a fetch job.
///
/// All methods have no-op defaults; implement only what you need.
pub trait FetchObserver: Send + Sync {
    /// Called after each successfully fetched page.
    fn on_page(&self, page_number: u32, total_pages: u32, records: usize) {
        let _ = (page_number, total_pages, records);
    }

    /// Called before each backoff sleep.
    fn on_retry(&self, attempt: u32, wait: Duration, reason: &str) {
        let _ = (attempt, wait, reason);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl FetchObserver for NullObserver {}
