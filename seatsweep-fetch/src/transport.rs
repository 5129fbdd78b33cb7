//! Transport adapter: the boundary performing actual network calls.
//!
//! The fetch loop never talks to the network directly; it sends a
//! [`FetchRequest`] through a [`Transport`] and classifies the returned
//! [`FetchOutcome`]. Ordinary HTTP error statuses are outcome variants, never
//! transport failures; the failure variant is reserved for connection-level
//! errors (DNS, reset, TLS, timeout).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{self, HeaderMap};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;
use crate::request::FetchRequest;

/// User agent string for seatsweep.
const USER_AGENT: &str = concat!("seatsweep/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Fetch Outcome
// ============================================================================

/// Classification of one request attempt. Exactly one variant per attempt.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// 200-class response with its raw body.
    Success {
        /// The response body text.
        body: String,
    },
    /// 429 response, optionally carrying a `Retry-After` hint.
    RateLimited {
        /// Server-requested wait before retrying.
        retry_after: Option<Duration>,
    },
    /// 5xx response.
    ServerError {
        /// The HTTP status code.
        status: u16,
    },
    /// 4xx response other than 429.
    ClientError {
        /// The HTTP status code.
        status: u16,
    },
    /// Connection-level failure (DNS, reset, TLS, timeout).
    TransportFailure {
        /// Description of the underlying cause.
        message: String,
    },
}

impl FetchOutcome {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, retry_after: Option<Duration>) -> Self {
        match status {
            429 => Self::RateLimited { retry_after },
            500..=599 => Self::ServerError { status },
            _ => Self::ClientError { status },
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Performs one HTTP request and classifies the result.
///
/// The fetch machinery treats this as an injected capability: tests script
/// outcomes, production uses [`HttpTransport`]. Implementations must not
/// fail for ordinary HTTP error statuses; those are outcome variants.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request and returns the classified outcome.
    async fn send(&self, request: &FetchRequest) -> FetchOutcome;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// reqwest-backed [`Transport`] with bearer authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpTransport {
    /// Creates a transport for the given API base URL and bearer token.
    ///
    /// Every request is bounded by `timeout`; a hanging connection surfaces
    /// as a transport failure, never as an indefinite stall.
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self), fields(request = %request))]
    async fn send(&self, request: &FetchRequest) -> FetchOutcome {
        let url = format!("{}{}", self.base_url, request.path());

        let result = self
            .client
            .get(&url)
            .query(request.query())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                return FetchOutcome::TransportFailure {
                    message: e.to_string(),
                }
            }
        };

        let status = response.status();
        debug!(status = %status, "Response received");

        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            return FetchOutcome::from_status(status.as_u16(), retry_after);
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Success { body },
            // The connection dropped while streaming the body.
            Err(e) => FetchOutcome::TransportFailure {
                message: e.to_string(),
            },
        }
    }
}

// ============================================================================
// Retry-After Parsing
// ============================================================================

/// Extracts the `Retry-After` header as a duration.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_retry_after_value)
}

/// Parses a `Retry-After` value: either delta-seconds or an HTTP-date.
fn parse_retry_after_value(raw: &str) -> Option<Duration> {
    let raw = raw.trim();

    if let Ok(secs) = raw.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let date = DateTime::parse_from_rfc2822(raw).ok()?;
    let delta = date.with_timezone(&Utc) - Utc::now();
    // A date in the past means "retry now".
    Some(delta.to_std().unwrap_or(Duration::ZERO))
}

// ============================================================================
// Tests
// ============================================================================
