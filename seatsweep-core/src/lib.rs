// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Seatsweep Core
//!
//! Domain models shared across the seatsweep crates.
//!
//! Seatsweep exports the complete user roster from the Smartsheet API. This
//! crate holds the types that cross crate boundaries:
//!
//! - [`PlanId`] - the account plan identifier that unlocks seat-type data
//! - [`Page`] - one decoded page of a paginated response
//! - [`Roster`] - the accumulated, ordered record set across all pages
//!
//! User records are deliberately opaque (`serde_json::Value`): seatsweep
//! collects them; interpreting individual fields is the consumer's job.

pub mod models;

pub use models::{Page, PlanId, Roster};
