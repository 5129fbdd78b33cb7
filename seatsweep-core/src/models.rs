//! Domain models for paginated roster fetching.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

// ============================================================================
// Plan Id
// ============================================================================

/// Account plan identifier.
///
/// Smartsheet only populates `seatType` on user records when the request
/// carries the caller's plan id as a query parameter, so resolving it is a
/// precondition for a useful roster export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanId(pub u64);

impl PlanId {
    /// Returns the raw numeric id.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Page
// ============================================================================

/// One decoded page of a paginated list response.
///
/// Matches the Smartsheet list envelope:
///
/// ```json
/// {
///   "pageNumber": 1,
///   "totalPages": 4,
///   "totalCount": 342,
///   "data": [ { "email": "...", "seatType": "MEMBER" }, ... ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number reported by the server.
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    /// Total page count. 0 and 1 both mean a single page.
    #[serde(default)]
    pub total_pages: u32,
    /// Total record count across all pages, as reported by the server.
    #[serde(default)]
    pub total_count: u64,
    /// Records on this page, opaque to the fetch machinery.
    #[serde(default)]
    pub data: Vec<Value>,
}

fn default_page_number() -> u32 {
    1
}

// ============================================================================
// Roster
// ============================================================================

/// The complete ordered record set accumulated across pages.
///
/// Records are appended in ascending page order, preserving each page's
/// internal order. A `Roster` only ever represents a complete fetch; a
/// failed or cancelled job never yields one.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<Value>,
    pages_fetched: u32,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one page's records, in order.
    pub fn extend_from_page(&mut self, page: &mut Page) {
        self.records.append(&mut page.data);
        self.pages_fetched += 1;
    }

    /// Number of records collected.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of pages fetched.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Borrows the collected records.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Consumes the roster, returning the records.
    pub fn into_records(self) -> Vec<Value> {
        self.records
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_page_envelope() {
        let body = r#"{
            "pageNumber": 2,
            "totalPages": 4,
            "totalCount": 342,
            "data": [
                {"email": "a@example.com", "seatType": "MEMBER"},
                {"email": "b@example.com", "seatType": "VIEWER"}
            ]
        }"#;

        let page: Page = serde_json::from_str(body).unwrap();
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_count, 342);
        assert_eq!(page.data.len(), 2);
    }

    #[test]
    fn test_missing_pagination_fields_default_to_single_page() {
        // A non-list body still decodes; absent metadata means one page.
        let page: Page = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_roster_preserves_page_order() {
        let mut roster = Roster::new();

        let mut first = Page {
            page_number: 1,
            total_pages: 2,
            total_count: 3,
            data: vec![json!({"email": "a@example.com"}), json!({"email": "b@example.com"})],
        };
        let mut second = Page {
            page_number: 2,
            total_pages: 2,
            total_count: 3,
            data: vec![json!({"email": "c@example.com"})],
        };

        roster.extend_from_page(&mut first);
        roster.extend_from_page(&mut second);

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.pages_fetched(), 2);
        assert_eq!(roster.records()[0]["email"], "a@example.com");
        assert_eq!(roster.records()[2]["email"], "c@example.com");
    }

    #[test]
    fn test_plan_id_display() {
        let plan = PlanId(4_583_173_393_803_140);
        assert_eq!(plan.to_string(), "4583173393803140");
        assert_eq!(plan.value(), 4_583_173_393_803_140);
    }
}
