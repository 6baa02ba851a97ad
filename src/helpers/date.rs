//! Date helper functions

use chrono::{DateTime, FixedOffset, Utc};

use crate::content::parse_date_string;

/// Format a post date for display, e.g. "June 1, 2021"
///
/// Unparseable input is returned unchanged.
pub fn format_post_date(raw: &str) -> String {
    parse_date_string(raw)
        .map(|date| full_date(&date))
        .unwrap_or_else(|| raw.to_string())
}

/// Format date in full format (like "January 1, 2024")
pub fn full_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a post date as RFC 2822 for RSS
pub fn rfc2822_date(raw: &str) -> Option<String> {
    parse_date_string(raw).map(|date| date.to_rfc2822())
}

/// Current time as RFC 2822
pub fn now_rfc2822() -> String {
    Utc::now().to_rfc2822()
}
