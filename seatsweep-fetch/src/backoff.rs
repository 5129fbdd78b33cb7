//! Backoff policy for retrying transient failures.

use std::time::Duration;

/// Default exponential base in seconds.
const DEFAULT_BASE_SECS: u64 = 2;

/// Default buffer added on top of a server-supplied hint.
const DEFAULT_HINT_BUFFER_SECS: u64 = 1;

/// Default ceiling for computed (non-hinted) waits.
const DEFAULT_MAX_WAIT_SECS: u64 = 60;

/// Maps an attempt number and optional server hint to a wait duration.
///
/// Pure and deterministic; it never sleeps itself, the caller performs the
/// suspension. Without a hint the wait grows exponentially
/// (base^(attempt+1): 2, 4, 8, 16, ... seconds), clamped at `max_wait`.
/// With a hint the wait is the hint plus a small buffer and is never less
/// than the server's explicit request, ceiling included.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Exponential base in seconds.
    pub base_secs: u64,
    /// Buffer added on top of a server hint.
    pub hint_buffer: Duration,
    /// Ceiling for computed waits.
    pub max_wait: Duration,
}

impl BackoffPolicy {
    /// Creates a policy with default settings.
    pub fn new() -> Self {
        Self {
            base_secs: DEFAULT_BASE_SECS,
            hint_buffer: Duration::from_secs(DEFAULT_HINT_BUFFER_SECS),
            max_wait: Duration::from_secs(DEFAULT_MAX_WAIT_SECS),
        }
    }

    /// Sets the exponential base.
    pub fn with_base_secs(mut self, secs: u64) -> Self {
        self.base_secs = secs;
        self
    }

    /// Sets the ceiling for computed waits.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Computes the wait before retry number `attempt` (0-based).
    pub fn wait_for(&self, attempt: u32, server_hint: Option<Duration>) -> Duration {
        if let Some(hint) = server_hint {
            // The server's explicit request is always honored in full.
            return hint + self.hint_buffer;
        }

        let exp = attempt.saturating_add(1);
        let secs = self
            .base_secs
            .checked_pow(exp)
            .unwrap_or(self.max_wait.as_secs());
        Duration::from_secs(secs).min(self.max_wait)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
