//! Plain-text rendering of flow results

use strum::IntoEnumIterator;
use tenderguard_core::{
    compliance::is_sentinel, AutomationStats, Bid, ComplianceResult, SealReceipt, ServiceInfo,
    Tender, TenderReceipt,
};
use tenderguard_flows::AuditSnapshot;

use crate::route::Route;

pub const EMPTY_AUDIT: &str = "NO SEALED BIDS YET";

/// Navigation bar, one entry per route
pub fn nav(current: Route) -> String {
    Route::iter()
        .map(|r| {
            if r == current {
                format!("[{}]", r)
            } else {
                r.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn home(info: Option<&ServiceInfo>, stats: Option<&AutomationStats>) -> String {
    let mut lines = vec![nav(Route::Home), String::new(), "AI TENDER GUARDIAN".to_string()];

    match info {
        Some(info) => {
            lines.push(format!("{} (v{})", info.message, info.version));
            if !info.features.is_empty() {
                lines.push(format!("Features: {}", info.features.join(", ")));
            }
        }
        None => lines.push("Service unreachable".to_string()),
    }
    lines.push(String::new());

    for route in Route::iter() {
        if let Some((title, description)) = route.card() {
            lines.push(format!("{:<16} tenderguard {:<8} {}", title, route.command(), description));
        }
    }

    if let Some(stats) = stats {
        lines.push(String::new());
        lines.push(stats_line(stats));
    }

    lines.join("\n")
}

pub fn stats_line(stats: &AutomationStats) -> String {
    format!(
        "Total bids: {} | Tenders: {} | Last 24h: {} | Automation events: {}",
        stats.total_bids, stats.total_tenders, stats.last_24h_bids, stats.automation_events
    )
}

pub fn tenders(tenders: &[Tender]) -> String {
    if tenders.is_empty() {
        return "No active tenders".to_string();
    }

    let mut lines = Vec::with_capacity(tenders.len() * 2);
    for tender in tenders {
        let budget = tender
            .budget
            .map(|b| b.round_dp(2).to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{}  budget: {}  status: {}",
            tender.tender_id,
            budget,
            tender.status.as_deref().unwrap_or("-")
        ));
        if let Some(description) = &tender.description {
            lines.push(format!("    {}", description));
        }
        lines.push(format!("    Requirements: {}", tender.requirements));
    }
    lines.join("\n")
}

pub fn bids(tender_id: &str, bids: &[Bid]) -> String {
    if bids.is_empty() {
        return format!("No bids sealed for {}", tender_id);
    }

    bids.iter()
        .map(|b| format!("{}  {}\n    {}", b.bidder_id, b.bid_hash, b.bid_summary))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn seal_receipt(tender_id: &str, receipt: &SealReceipt) -> String {
    let mut lines = vec![
        format!("✅ Bid sealed for {}", tender_id),
        format!("   Bidder ID: {}", receipt.bidder_id),
        format!("   Bid hash:  {}", receipt.bid_hash),
    ];
    if let Some(message) = &receipt.message {
        lines.push(format!("   {}", message));
    }
    lines.join("\n")
}

pub fn tender_receipt(tender_id: &str, receipt: &TenderReceipt) -> String {
    format!(
        "✅ Tender {} created\n   Update hash: {}\n   Timestamp:   {}",
        tender_id, receipt.update_hash, receipt.timestamp
    )
}

pub fn compliance(result: &ComplianceResult) -> String {
    let mark = if result.is_compliant() { "✅" } else { "❌" };
    let mut lines = vec![format!("{} {}", mark, result.verdict()), String::new()];

    lines.push(result.analysis.clone());

    let violations: Vec<_> = result.violations.iter().filter(|v| !is_sentinel(v)).collect();
    if !violations.is_empty() {
        lines.push(String::new());
        lines.push("Violations:".to_string());
        lines.extend(violations.iter().map(|v| format!("  - {}", v)));
    }

    lines.join("\n")
}

/// Audit table; the summary of `expanded` is shown under its row
pub fn audit(snapshot: &AuditSnapshot, expanded: Option<usize>) -> String {
    let mut lines = vec![stats_line(&snapshot.stats), String::new()];

    if snapshot.is_empty() {
        lines.push(EMPTY_AUDIT.to_string());
        return lines.join("\n");
    }

    for (index, entry) in snapshot.entries.iter().enumerate() {
        lines.push(format!(
            "{:>3}  {}  {}  {}  {}  {}",
            index,
            entry.display_timestamp(),
            entry.tender_id,
            entry.bidder_id,
            entry.status,
            entry.bid_hash
        ));
        if expanded == Some(index) {
            if let Some(summary) = &entry.bid_summary {
                lines.push(format!("     Summary: {}", summary));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tenderguard_core::{AuditEntry, NO_VIOLATIONS_SENTINEL};

    fn snapshot(entries: Vec<AuditEntry>) -> AuditSnapshot {
        AuditSnapshot {
            entries,
            stats: AutomationStats {
                total_bids: 2,
                total_tenders: 1,
                last_24h_bids: 2,
                automation_events: 4,
            },
        }
    }

    fn entry(bidder_id: &str, summary: Option<&str>) -> AuditEntry {
        AuditEntry {
            tender_id: "TENDER-1".to_string(),
            bidder_id: bidder_id.to_string(),
            bid_hash: "deadbeef".to_string(),
            bid_summary: summary.map(|s| s.to_string()),
            status: "SEALED".to_string(),
            timestamp: "2025-01-15T14:32:10+00:00".to_string(),
        }
    }

    #[test]
    fn test_nav_marks_current() {
        assert_eq!(nav(Route::Seal), "HOME  CREATE  [SEAL]  COMPLIANCE  AUDIT");
    }

    #[test]
    fn test_empty_audit_state() {
        let out = audit(&snapshot(vec![]), None);
        assert!(out.contains(EMPTY_AUDIT));
        assert!(out.contains("Automation events: 4"));
    }

    #[test]
    fn test_audit_rows_and_expansion() {
        let out = audit(
            &snapshot(vec![entry("b-1", Some("First summary")), entry("b-2", Some("Second"))]),
            Some(1),
        );

        assert!(out.contains("Jan 15, 2025, 14:32:10"));
        assert!(out.contains("Summary: Second"));
        assert!(!out.contains("First summary"));
    }

    #[test]
    fn test_compliance_verdicts() {
        let ok = compliance(&ComplianceResult {
            analysis: "All requirements met".to_string(),
            violations: vec![NO_VIOLATIONS_SENTINEL.to_string()],
        });
        assert!(ok.starts_with("✅ Compliant"));
        assert!(!ok.contains("Violations:"));

        let bad = compliance(&ComplianceResult {
            analysis: "- Missing ISO certification".to_string(),
            violations: vec!["Missing ISO certification".to_string()],
        });
        assert!(bad.starts_with("❌ Violations Detected"));
        assert!(bad.contains("  - Missing ISO certification"));
    }

    #[test]
    fn test_tender_listing() {
        assert_eq!(tenders(&[]), "No active tenders");

        let out = tenders(&[Tender::new("TENDER-1", "ISO 9001").with_budget(dec!(1000.5))]);
        assert!(out.contains("TENDER-1  budget: 1000.5"));
        assert!(out.contains("Requirements: ISO 9001"));
    }

    #[test]
    fn test_empty_bids() {
        assert_eq!(bids("TENDER-1", &[]), "No bids sealed for TENDER-1");
    }

    #[test]
    fn test_home_without_service() {
        let out = home(None, None);
        assert!(out.contains("Service unreachable"));
        assert!(out.contains("tenderguard check"));
    }
}
