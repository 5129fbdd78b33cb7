//! API client and the page fetch loop.
//!
//! [`ApiClient`] is an explicitly constructed, immutable value bundling the
//! transport, backoff policy, settings, cancel token, and observer. One
//! logical request runs through [`ApiClient::execute`], which retries
//! transient outcomes (429, 5xx, connection failures) with backoff up to the
//! configured budget and surfaces the last observed classification once the
//! budget is spent. Non-retryable 4xx outcomes surface immediately.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::backoff::BackoffPolicy;
use crate::cancel::CancelToken;
use crate::error::FetchError;
use crate::observer::{FetchObserver, NullObserver};
use crate::request::FetchRequest;
use crate::settings::FetchSettings;
use crate::transport::{FetchOutcome, HttpTransport, Transport};

/// Client for one fetch job.
///
/// Holds no mutable state; independent jobs construct independent clients
/// (sharing a transport via `Arc` is fine, the transport itself is
/// immutable). Cloning is cheap.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    backoff: BackoffPolicy,
    settings: FetchSettings,
    cancel: CancelToken,
    observer: Arc<dyn FetchObserver>,
}

impl ApiClient {
    /// Creates a client over the given transport with default settings.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            backoff: BackoffPolicy::new(),
            settings: FetchSettings::default(),
            cancel: CancelToken::new(),
            observer: Arc::new(NullObserver),
        }
    }

    /// Creates a client over an HTTP transport for the given API.
    pub fn over_http(
        base_url: &str,
        token: &str,
        settings: FetchSettings,
    ) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(base_url, token, settings.request_timeout)?;
        Ok(Self::new(Arc::new(transport)).with_settings(settings))
    }

    /// Sets the fetch settings.
    pub fn with_settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the backoff policy.
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets the cancel token for this job.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Sets the progress observer.
    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The fetch settings in effect.
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// A handle for aborting this client's in-flight work.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub(crate) fn observer(&self) -> &dyn FetchObserver {
        self.observer.as_ref()
    }

    /// Executes one logical request to completion.
    ///
    /// Returns the decoded JSON body, or a terminal failure once the request
    /// is definitively rejected, the retry budget is exhausted, or the job
    /// is cancelled. Attempt state lives entirely in this invocation and is
    /// discarded when it returns.
    #[instrument(skip(self), fields(request = %request))]
    pub async fn execute(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            match self.transport.send(request).await {
                FetchOutcome::Success { body } => {
                    debug!(attempt, len = body.len(), "Request succeeded");
                    return Ok(serde_json::from_str(&body)?);
                }
                FetchOutcome::RateLimited { retry_after } => {
                    if attempt + 1 >= self.settings.max_attempts {
                        return Err(FetchError::RateLimitExceeded { retry_after });
                    }
                    self.back_off(attempt, retry_after, "rate limited").await?;
                }
                FetchOutcome::ServerError { status } => {
                    if attempt + 1 >= self.settings.max_attempts {
                        return Err(FetchError::ServerUnavailable(format!(
                            "server returned status {status}"
                        )));
                    }
                    self.back_off(attempt, None, "server error").await?;
                }
                FetchOutcome::TransportFailure { message } => {
                    if attempt + 1 >= self.settings.max_attempts {
                        return Err(FetchError::ServerUnavailable(message));
                    }
                    self.back_off(attempt, None, "transport failure").await?;
                }
                FetchOutcome::ClientError { status } => {
                    return Err(match status {
                        401 => FetchError::Unauthorized,
                        403 => FetchError::Forbidden,
                        404 => FetchError::NotFound(request.path().to_string()),
                        _ => FetchError::Rejected { status },
                    });
                }
            }

            attempt += 1;
        }
    }

    /// Sleeps per the backoff policy, racing the cancel token.
    async fn back_off(
        &self,
        attempt: u32,
        server_hint: Option<Duration>,
        reason: &str,
    ) -> Result<(), FetchError> {
        let wait = self.backoff.wait_for(attempt, server_hint);
        self.observer.on_retry(attempt, wait, reason);
        warn!(
            attempt,
            wait_secs = wait.as_secs(),
            reason,
            "Transient failure, backing off"
        );

        tokio::select! {
            () = tokio::time::sleep(wait) => Ok(()),
            () = self.cancel.cancelled() => Err(FetchError::Cancelled),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("settings", &self.settings)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
