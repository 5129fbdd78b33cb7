//! Fetch error types.
//!
//! Every error here is terminal: transient outcomes (429, 5xx, connection
//! failures) are retried inside the page fetch loop and only surface once
//! the retry budget is exhausted, carrying the last observed classification.
//! The caller never sees intermediate attempts, only the final verdict.

use std::time::Duration;
use thiserror::Error;

/// Terminal error for a fetch job.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Retries exhausted on 429 responses.
    #[error("rate limited, retries exhausted (last Retry-After: {retry_after:?})")]
    RateLimitExceeded {
        /// The server hint carried by the last 429, if any.
        retry_after: Option<Duration>,
    },

    /// Retries exhausted on 5xx responses or connection-level failures.
    #[error("server unavailable: {0}")]
    ServerUnavailable(String),

    /// 401 response. Never retried.
    #[error("unauthorized: credential rejected")]
    Unauthorized,

    /// 403 response. Never retried.
    #[error("forbidden: credential lacks access")]
    Forbidden,

    /// 404 response. Never retried.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other 4xx response. Never retried.
    #[error("request rejected with status {status}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
    },

    /// A 200 response whose body could not be decoded.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The current user's account carries no plan id.
    ///
    /// This is a success-outcome precondition failure, not a transient
    /// condition; it is fatal for the whole fetch job.
    #[error("no plan id on the authenticated user's account")]
    MissingPlanId,

    /// The caller aborted the job.
    #[error("fetch cancelled")]
    Cancelled,

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

impl FetchError {
    /// Returns true if this error classifies a non-retryable 4xx response.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::Forbidden | Self::NotFound(_) | Self::Rejected { .. }
        )
    }
}
