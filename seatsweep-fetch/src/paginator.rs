//! Pagination driver: produces the complete ordered record set.

use seatsweep_core::{PlanId, Roster};
use tracing::{debug, info, instrument};

use crate::client::ApiClient;
use crate::error::FetchError;
use crate::request::FetchRequest;

/// Users list endpoint.
const USERS_PATH: &str = "/users";

/// Fetches every page of the user roster, in ascending page order.
///
/// Each page runs through the page fetch loop with its own retry budget.
/// Strictly all-or-nothing: any terminal failure aborts the job and
/// propagates; a truncated roster never masquerades as success.
///
/// Completion is decided solely by comparing the current page against the
/// server-reported total page count (a total of 0 or 1 means the single
/// page already fetched is the whole set). A page holding fewer records
/// than the requested page size does not end the job on its own; server-side
/// filtering makes short pages unreliable as an end-of-data signal.
#[instrument(skip(client), fields(plan_id = %plan_id))]
pub async fn fetch_all_users(client: &ApiClient, plan_id: PlanId) -> Result<Roster, FetchError> {
    let mut roster = Roster::new();
    let mut page_number: u32 = 1;

    loop {
        // Carrying planId forces the API to populate seatType on each record.
        let request = FetchRequest::new(USERS_PATH)
            .with_param("include", "lastLogin")
            .with_param("planId", plan_id)
            .with_param("pageSize", client.settings().page_size)
            .with_param("page", page_number);

        let body = client.execute(&request).await?;
        let mut page: seatsweep_core::Page = serde_json::from_value(body)?;

        debug!(
            page = page_number,
            total_pages = page.total_pages,
            records = page.data.len(),
            "Fetched page"
        );
        client
            .observer()
            .on_page(page_number, page.total_pages, page.data.len());

        let done = page.total_pages <= 1 || page_number >= page.total_pages;
        roster.extend_from_page(&mut page);

        if done {
            info!(
                records = roster.len(),
                pages = roster.pages_fetched(),
                "Roster fetch complete"
            );
            return Ok(roster);
        }
        page_number += 1;
    }
}

// ============================================================================
// Tests
// ============================================================================
