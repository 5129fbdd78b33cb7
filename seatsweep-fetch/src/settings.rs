//! Settings for fetch operations.

use std::time::Duration;

/// Default page size for list requests.
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default retry budget per logical request.
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for fetch operations.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Records requested per page.
    pub page_size: u32,
    /// Maximum attempts per logical request before the last transient
    /// outcome surfaces as a terminal failure.
    pub max_attempts: u32,
    /// Bound on each individual network call.
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchSettings {
    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the retry budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
