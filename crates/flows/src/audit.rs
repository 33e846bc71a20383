//! Audit View - sealed bid trail with automation statistics

use std::sync::{Arc, Mutex};

use tenderguard_client::ProcurementApi;
use tenderguard_core::{AuditEntry, AutomationStats};

use crate::error::{FlowError, FlowResult};
use crate::guard::lock;

pub const AUDIT_FAILED: &str = "Failed to load audit log";

/// Audit entries and stats from one successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSnapshot {
    /// Server order
    pub entries: Vec<AuditEntry>,
    pub stats: AutomationStats,
}

impl AuditSnapshot {
    /// No sealed bids yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditPhase {
    NotLoaded,
    Loading,
    Loaded(AuditSnapshot),
    /// Nothing is rendered in this phase
    Failed(String),
}

struct AuditState {
    phase: AuditPhase,
    expanded: Option<usize>,
}

pub struct AuditView {
    api: Arc<dyn ProcurementApi>,
    state: Mutex<AuditState>,
}

impl AuditView {
    pub fn new(api: Arc<dyn ProcurementApi>) -> Self {
        Self {
            api,
            state: Mutex::new(AuditState {
                phase: AuditPhase::NotLoaded,
                expanded: None,
            }),
        }
    }

    pub fn phase(&self) -> AuditPhase {
        lock(&self.state).phase.clone()
    }

    /// Load the audit trail and the stats together
    ///
    /// Either both are shown or neither is.
    pub async fn load(&self) -> FlowResult<AuditSnapshot> {
        {
            let mut state = lock(&self.state);
            if state.phase == AuditPhase::Loading {
                tracing::warn!("Audit load ignored, a load is already in flight");
                return Err(FlowError::AlreadyInFlight);
            }
            state.phase = AuditPhase::Loading;
            state.expanded = None;
        }

        let result = tokio::try_join!(self.api.audit_log(), self.api.stats());

        let mut state = lock(&self.state);
        match result {
            Ok((entries, stats)) => {
                tracing::info!(
                    entries = entries.len(),
                    total_bids = stats.total_bids,
                    "Audit log loaded"
                );
                let snapshot = AuditSnapshot { entries, stats };
                state.phase = AuditPhase::Loaded(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!(error = %e, "Audit log load failed");
                let err = FlowError::api(e, AUDIT_FAILED);
                state.phase = AuditPhase::Failed(err.user_message());
                Err(err)
            }
        }
    }

    /// Expand or collapse the entry at `index`
    ///
    /// Expanding one entry collapses any other. Returns whether the entry is
    /// expanded afterwards; entries without a summary never expand.
    pub fn toggle_expanded(&self, index: usize) -> bool {
        let mut state = lock(&self.state);

        let expandable = match &state.phase {
            AuditPhase::Loaded(snapshot) => snapshot
                .entries
                .get(index)
                .is_some_and(AuditEntry::has_summary),
            _ => false,
        };
        if !expandable {
            return false;
        }

        if state.expanded == Some(index) {
            state.expanded = None;
            false
        } else {
            state.expanded = Some(index);
            true
        }
    }

    pub fn expanded(&self) -> Option<usize> {
        lock(&self.state).expanded
    }

    /// Summary of the expanded entry, if any
    pub fn expanded_summary(&self) -> Option<String> {
        let state = lock(&self.state);
        let index = state.expanded?;
        match &state.phase {
            AuditPhase::Loaded(snapshot) => snapshot
                .entries
                .get(index)
                .and_then(|e| e.bid_summary.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderguard_client::{Endpoint, MockApi, MockFailure};

    fn entry(tender_id: &str, summary: Option<&str>) -> AuditEntry {
        AuditEntry {
            tender_id: tender_id.to_string(),
            bidder_id: format!("bidder-{}", tender_id),
            bid_hash: "abc123".to_string(),
            bid_summary: summary.map(|s| s.to_string()),
            status: "SEALED".to_string(),
            timestamp: "2025-01-15T14:32:10+00:00".to_string(),
        }
    }

    fn setup(entries: Vec<AuditEntry>) -> (Arc<MockApi>, AuditView) {
        let api = Arc::new(MockApi::new());
        api.set_audit(entries);
        let view = AuditView::new(api.clone());
        (api, view)
    }

    #[tokio::test]
    async fn test_load_keeps_server_order() {
        let (api, view) = setup(vec![entry("T-3", Some("c")), entry("T-1", None), entry("T-2", Some("b"))]);
        api.set_stats(AutomationStats {
            total_bids: 3,
            total_tenders: 3,
            last_24h_bids: 1,
            automation_events: 7,
        });

        let snapshot = view.load().await.unwrap();

        let order: Vec<_> = snapshot.entries.iter().map(|e| e.tender_id.as_str()).collect();
        assert_eq!(order, ["T-3", "T-1", "T-2"]);
        assert_eq!(snapshot.stats.automation_events, 7);
        assert_eq!(view.phase(), AuditPhase::Loaded(snapshot));
        assert_eq!(api.calls(Endpoint::Audit), 1);
        assert_eq!(api.calls(Endpoint::Stats), 1);
    }

    #[tokio::test]
    async fn test_empty_audit_is_not_an_error() {
        let (_api, view) = setup(vec![]);
        let snapshot = view.load().await.unwrap();
        assert!(snapshot.is_empty());
        assert!(matches!(view.phase(), AuditPhase::Loaded(_)));
    }

    #[tokio::test]
    async fn test_stats_failure_leaves_nothing_rendered() {
        let (api, view) = setup(vec![entry("T-1", Some("a"))]);
        api.fail(Endpoint::Stats, MockFailure::status(503, Some("stats unavailable")));

        let err = view.load().await.unwrap_err();

        assert_eq!(err.user_message(), "stats unavailable");
        assert_eq!(view.phase(), AuditPhase::Failed("stats unavailable".to_string()));
    }

    #[tokio::test]
    async fn test_audit_failure_uses_fallback() {
        let (api, view) = setup(vec![]);
        api.fail(Endpoint::Audit, MockFailure::Transport("refused".to_string()));

        let err = view.load().await.unwrap_err();
        assert_eq!(err.user_message(), AUDIT_FAILED);
        assert_eq!(view.phase(), AuditPhase::Failed(AUDIT_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_single_expansion() {
        let (_api, view) = setup(vec![entry("T-1", Some("first")), entry("T-2", Some("second"))]);
        view.load().await.unwrap();

        assert!(view.toggle_expanded(0));
        assert_eq!(view.expanded_summary().as_deref(), Some("first"));

        assert!(view.toggle_expanded(1));
        assert_eq!(view.expanded(), Some(1));

        assert!(!view.toggle_expanded(1));
        assert_eq!(view.expanded(), None);
        assert!(view.expanded_summary().is_none());
    }

    #[tokio::test]
    async fn test_entries_without_summary_do_not_expand() {
        let (_api, view) = setup(vec![entry("T-1", Some("first")), entry("T-2", None)]);
        view.load().await.unwrap();
        view.toggle_expanded(0);

        assert!(!view.toggle_expanded(1));
        assert!(!view.toggle_expanded(5));
        assert_eq!(view.expanded(), Some(0));
    }

    #[tokio::test]
    async fn test_toggle_before_load() {
        let (_api, view) = setup(vec![entry("T-1", Some("first"))]);
        assert!(!view.toggle_expanded(0));
    }

    #[tokio::test]
    async fn test_reload_resets_expansion() {
        let (_api, view) = setup(vec![entry("T-1", Some("first"))]);
        view.load().await.unwrap();
        view.toggle_expanded(0);

        view.load().await.unwrap();
        assert_eq!(view.expanded(), None);
    }

    #[tokio::test]
    async fn test_duplicate_load_while_loading() {
        let (api, view) = setup(vec![]);
        api.pause(Endpoint::Audit);

        let (first, second) = tokio::join!(view.load(), async {
            api.paused_call_arrived().await;
            assert_eq!(view.phase(), AuditPhase::Loading);
            let second = view.load().await;
            api.resume();
            second
        });

        assert!(first.is_ok());
        assert!(second.unwrap_err().is_in_flight());
        assert_eq!(api.calls(Endpoint::Audit), 1);
    }
}
