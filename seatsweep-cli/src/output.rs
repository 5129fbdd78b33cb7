//! Rendering of a fetched roster.

use seatsweep_core::Roster;
use std::fmt::Write as _;

/// How many records the text summary shows.
const SAMPLE_SIZE: usize = 5;

/// Renders a human-readable summary: total count plus a record sample.
pub fn render_text(roster: &Roster) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Retrieved {} users across {} page(s).",
        roster.len(),
        roster.pages_fetched()
    );

    if roster.is_empty() {
        return out;
    }

    let _ = writeln!(out, "\nSample (first {}):", SAMPLE_SIZE.min(roster.len()));
    for record in roster.records().iter().take(SAMPLE_SIZE) {
        let email = record["email"].as_str().unwrap_or("<no email>");
        let seat_type = record["seatType"].as_str().unwrap_or("UNKNOWN");
        let last_login = record["lastLogin"].as_str().unwrap_or("NEVER");
        let _ = writeln!(out, "- {email}: {seat_type} (Last Login: {last_login})");
    }

    out
}

/// Renders the full record list as JSON.
pub fn render_json(roster: &Roster, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(roster.records())
    } else {
        serde_json::to_string(roster.records())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use seatsweep_core::Page;
    use serde_json::json;

    fn roster_of(records: Vec<serde_json::Value>) -> Roster {
        let mut roster = Roster::new();
        let mut page = Page {
            page_number: 1,
            total_pages: 1,
            total_count: records.len() as u64,
            data: records,
        };
        roster.extend_from_page(&mut page);
        roster
    }

    #[test]
    fn test_render_text_summary() {
        let roster = roster_of(vec![
            json!({"email": "a@x.com", "seatType": "MEMBER", "lastLogin": "2026-01-15T09:30:00Z"}),
            json!({"email": "b@x.com"}),
        ]);

        let text = render_text(&roster);
        assert!(text.contains("Retrieved 2 users across 1 page(s)."));
        assert!(text.contains("- a@x.com: MEMBER (Last Login: 2026-01-15T09:30:00Z)"));
        assert!(text.contains("- b@x.com: UNKNOWN (Last Login: NEVER)"));
    }

    #[test]
    fn test_render_text_empty_roster() {
        let text = render_text(&Roster::new());
        assert!(text.contains("Retrieved 0 users"));
        assert!(!text.contains("Sample"));
    }

    #[test]
    fn test_render_text_caps_sample() {
        let records = (0..8)
            .map(|i| json!({"email": format!("u{i}@x.com"), "seatType": "VIEWER"}))
            .collect();
        let text = render_text(&roster_of(records));

        assert!(text.contains("Sample (first 5):"));
        assert!(text.contains("u4@x.com"));
        assert!(!text.contains("u5@x.com"));
    }

    #[test]
    fn test_render_json() {
        let roster = roster_of(vec![json!({"email": "a@x.com"})]);

        let compact = render_json(&roster, false).unwrap();
        assert_eq!(compact, r#"[{"email":"a@x.com"}]"#);

        let pretty = render_json(&roster, true).unwrap();
        assert!(pretty.contains("\n"));
    }
}
