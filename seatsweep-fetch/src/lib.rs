// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Seatsweep Fetch
//!
//! Resilient paginated fetching against the Smartsheet API.
//!
//! The machinery layers strictly, leaf-first:
//!
//! - [`backoff::BackoffPolicy`] - pure mapping from (attempt, server hint)
//!   to a wait duration
//! - [`transport::Transport`] - injected adapter performing one HTTP call
//!   and classifying it as a [`transport::FetchOutcome`]
//! - [`client::ApiClient::execute`] - the page fetch loop: retries transient
//!   outcomes with backoff up to a budget, rejects 4xx immediately
//! - [`paginator::fetch_all_users`] - drives the loop across pages and
//!   accumulates the full ordered roster, all-or-nothing
//! - [`plan::resolve_plan_id`] - the one-shot lookup gating pagination
//!
//! Cancellation ([`cancel::CancelToken`]) aborts a job promptly, including
//! mid-backoff; progress flows through an injected
//! [`observer::FetchObserver`] rather than direct console writes.

pub mod backoff;
pub mod cancel;
pub mod client;
pub mod error;
pub mod observer;
pub mod paginator;
pub mod plan;
pub mod request;
pub mod settings;
pub mod transport;

pub use backoff::BackoffPolicy;
pub use cancel::CancelToken;
pub use client::ApiClient;
pub use error::FetchError;
pub use observer::{FetchObserver, NullObserver};
pub use paginator::fetch_all_users;
pub use plan::resolve_plan_id;
pub use request::FetchRequest;
pub use settings::FetchSettings;
pub use transport::{FetchOutcome, HttpTransport, Transport};

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by unit tests.

    use crate::request::FetchRequest;
    use crate::transport::{FetchOutcome, Transport};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Transport returning a scripted sequence of outcomes.
    pub struct ScriptedTransport {
        outcomes: Mutex<VecDeque<FetchOutcome>>,
        requests: Mutex<Vec<FetchRequest>>,
        calls: AtomicU32,
        /// Outcome returned once the script runs dry.
        fallback: FetchOutcome,
    }

    impl ScriptedTransport {
        pub fn new(outcomes: Vec<FetchOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
                calls: AtomicU32::new(0),
                fallback: FetchOutcome::TransportFailure {
                    message: "script exhausted".to_string(),
                },
            }
        }

        /// Transport that rate-limits every attempt, without a hint.
        pub fn always_rate_limited() -> Self {
            let mut transport = Self::new(Vec::new());
            transport.fallback = FetchOutcome::RateLimited { retry_after: None };
            transport
        }

        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<FetchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: &FetchRequest) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone())
        }
    }
}
