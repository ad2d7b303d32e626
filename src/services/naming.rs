//! Deterministic feed and report naming.
//!
//! Feed names double as de-duplication keys for `get_by_name`, so every
//! name is a pure function of the request parameters: re-running an
//! import over the same window resolves the same feeds instead of
//! creating new ones.

use chrono::{DateTime, Utc};

/// Feed name for part `part` of an import window.
///
/// `"my_base_name (2.0) 2022-01-27 to 2022-02-27 - Part 1"`
pub fn feed_name(
    base: &str,
    stix_version: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    part: usize,
) -> String {
    format!(
        "{base} ({stix_version}) {} to {} - Part {part}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
    )
}

/// Title prefix shared by every report in a feed; the packer appends the
/// report's sequence number.
pub fn report_title_prefix(feed_name: &str) -> String {
    format!("Report {feed_name}")
}

/// Ensure the provider URL carries a scheme; bare domains get `http://`.
pub fn normalize_provider_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
