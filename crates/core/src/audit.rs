//! Audit trail and service statistics

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sealing event in the immutable audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub tender_id: String,
    pub bidder_id: String,
    pub bid_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_summary: Option<String>,

    pub status: String,

    /// ISO-8601 timestamp as sent by the service
    pub timestamp: String,
}

impl AuditEntry {
    /// Whether the entry carries a non-empty summary that can be expanded
    pub fn has_summary(&self) -> bool {
        self.bid_summary.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Parsed timestamp, if it is valid ISO-8601
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Timestamp as `Mon D, YYYY, HH:MM:SS` in UTC, or verbatim if unparsable
    pub fn display_timestamp(&self) -> String {
        match self.parsed_timestamp() {
            Some(ts) => ts.format("%b %-d, %Y, %H:%M:%S").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    // Offset-less timestamps are taken as UTC
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Aggregate counters reported by the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationStats {
    #[serde(default)]
    pub total_bids: u64,
    #[serde(default)]
    pub total_tenders: u64,
    #[serde(default)]
    pub last_24h_bids: u64,
    #[serde(default)]
    pub automation_events: u64,
}

/// Service banner returned by the API root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub automation: String,
}
