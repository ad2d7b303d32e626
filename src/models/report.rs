//! Report value object: a capacity-bounded batch of IOCs under one feed.

use chrono::{serde::ts_seconds, DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ioc::Ioc;

/// A size-bounded batch of IOCs belonging to exactly one feed.
///
/// Reports are assembled client-side; the store never generates report
/// ids. Once built, a report is only mutated when append-mode
/// reconciliation tops up an under-capacity IOC list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Report severity, 1-10.
    pub severity: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "iocs_v2")]
    pub iocs: Vec<Ioc>,
}

impl Report {
    /// Assemble a report, filling the generated fields (id, timestamp).
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: u8,
        iocs: Vec<Ioc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            timestamp: Utc::now(),
            severity,
            tags: Vec::new(),
            iocs,
        }
    }

    /// Whether the report has reached `capacity` IOCs.
    pub fn is_full(&self, capacity: usize) -> bool {
        self.iocs.len() >= capacity
    }

    /// Remaining IOC slots before the report hits `capacity`.
    pub fn room(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.iocs.len())
    }

    /// Wire payload as submitted to the feed manager.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report::new(
            "Report My STIX Feed-1",
            "feed for stix taxii",
            5,
            vec![Ioc::query("unsigned-chrome", "process_name:chrome.exe")],
        )
    }

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(sample().id, sample().id);
    }

    #[test]
    fn room_saturates_at_zero() {
        let report = sample();
        assert_eq!(report.room(10), 9);
        assert_eq!(report.room(1), 0);
        assert_eq!(report.room(0), 0);
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let payload = sample().to_payload();
        assert_eq!(payload["title"], "Report My STIX Feed-1");
        assert_eq!(payload["severity"], 5);
        assert!(payload["iocs_v2"].is_array());
        assert!(payload["timestamp"].is_number());
        assert!(payload.get("iocs").is_none());
    }
}
