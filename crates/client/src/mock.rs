//! Mock procurement service for testing
//!
//! Keeps tenders, bids and the audit trail in memory and behaves like the
//! real service: sealing a bid lists it under its tender and appends an audit
//! entry. Every endpoint counts its calls, can be made to fail, and can be
//! paused to hold a request in flight.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

use tenderguard_core::{
    AuditEntry, AutomationStats, Bid, ComplianceRequest, ComplianceResult, SealReceipt,
    SealRequest, ServiceInfo, Tender, TenderDraft, TenderReceipt, NO_VIOLATIONS_SENTINEL,
};

use crate::api::ProcurementApi;
use crate::error::{ApiError, ApiResult};

/// Service endpoints, for call counting and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ServiceInfo,
    ListTenders,
    CreateTender,
    Bids,
    Seal,
    Compliance,
    Audit,
    Stats,
}

/// A failure the mock answers with instead of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Non-2xx status with an optional `detail`
    Status { status: u16, detail: Option<String> },
    /// No response at all
    Transport(String),
}

impl MockFailure {
    pub fn status(status: u16, detail: Option<&str>) -> Self {
        MockFailure::Status {
            status,
            detail: detail.map(|d| d.to_string()),
        }
    }

    fn to_error(&self) -> ApiError {
        match self {
            MockFailure::Status { status, detail } => ApiError::status(*status, detail.clone()),
            MockFailure::Transport(message) => ApiError::transport(message.clone()),
        }
    }
}

/// A seal request as the mock received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSeal {
    pub tender_id: String,
    pub bid_summary: String,
    pub file_name: String,
    pub bytes: usize,
}

#[derive(Default)]
struct MockState {
    tenders: Vec<Tender>,
    bids: HashMap<String, Vec<Bid>>,
    audit: Vec<AuditEntry>,
    stats: Option<AutomationStats>,
    seal_receipt: Option<SealReceipt>,
    compliance_result: Option<ComplianceResult>,
    failures: HashMap<Endpoint, MockFailure>,
    calls: HashMap<Endpoint, usize>,
    paused: Option<Endpoint>,
    seals: Vec<RecordedSeal>,
    compliance_requests: Vec<ComplianceRequest>,
    drafts: Vec<TenderDraft>,
    automation_events: u64,
}

/// In-memory procurement service
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
    started: Notify,
    release: Notify,
}

impl MockApi {
    /// Create an empty mock service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that already lists the given tenders
    pub fn with_tenders(tenders: Vec<Tender>) -> Self {
        let api = Self::new();
        api.state().tenders = tenders;
        api
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_tenders(&self, tenders: Vec<Tender>) {
        self.state().tenders = tenders;
    }

    pub fn add_bid(&self, bid: Bid) {
        self.state()
            .bids
            .entry(bid.tender_id.clone())
            .or_default()
            .push(bid);
    }

    /// Replace the audit trail (kept in the given order)
    pub fn set_audit(&self, entries: Vec<AuditEntry>) {
        self.state().audit = entries;
    }

    /// Fix the stats instead of deriving them from the stored data
    pub fn set_stats(&self, stats: AutomationStats) {
        self.state().stats = Some(stats);
    }

    /// Answer every seal with this receipt
    pub fn set_seal_receipt(&self, receipt: SealReceipt) {
        self.state().seal_receipt = Some(receipt);
    }

    /// Answer every compliance check with this result
    pub fn set_compliance_result(&self, result: ComplianceResult) {
        self.state().compliance_result = Some(result);
    }

    /// Make an endpoint fail until [`MockApi::clear_failure`]
    pub fn fail(&self, endpoint: Endpoint, failure: MockFailure) {
        self.state().failures.insert(endpoint, failure);
    }

    pub fn clear_failure(&self, endpoint: Endpoint) {
        self.state().failures.remove(&endpoint);
    }

    /// Hold calls to `endpoint` until [`MockApi::resume`]
    pub fn pause(&self, endpoint: Endpoint) {
        self.state().paused = Some(endpoint);
    }

    /// Release one held call and stop pausing
    pub fn resume(&self) {
        self.state().paused = None;
        self.release.notify_one();
    }

    /// Wait until a paused call has arrived
    pub async fn paused_call_arrived(&self) {
        self.started.notified().await;
    }

    /// Number of calls received by an endpoint
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.state().calls.get(&endpoint).copied().unwrap_or(0)
    }

    /// Total number of calls over all endpoints
    pub fn total_calls(&self) -> usize {
        self.state().calls.values().sum()
    }

    pub fn recorded_seals(&self) -> Vec<RecordedSeal> {
        self.state().seals.clone()
    }

    pub fn recorded_compliance_requests(&self) -> Vec<ComplianceRequest> {
        self.state().compliance_requests.clone()
    }

    pub fn recorded_drafts(&self) -> Vec<TenderDraft> {
        self.state().drafts.clone()
    }

    /// Count the call, hold it if paused, then apply any injected failure
    async fn enter(&self, endpoint: Endpoint) -> ApiResult<()> {
        let paused = {
            let mut state = self.state();
            *state.calls.entry(endpoint).or_insert(0) += 1;
            state.paused == Some(endpoint)
        };

        if paused {
            self.started.notify_one();
            self.release.notified().await;
        }

        match self.state().failures.get(&endpoint) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProcurementApi for MockApi {
    async fn service_info(&self) -> ApiResult<ServiceInfo> {
        self.enter(Endpoint::ServiceInfo).await?;
        Ok(ServiceInfo {
            message: "Mock procurement service".to_string(),
            version: "mock".to_string(),
            features: Vec::new(),
            automation: String::new(),
        })
    }

    async fn list_tenders(&self) -> ApiResult<Vec<Tender>> {
        self.enter(Endpoint::ListTenders).await?;
        Ok(self.state().tenders.clone())
    }

    async fn create_tender(&self, draft: &TenderDraft) -> ApiResult<TenderReceipt> {
        self.enter(Endpoint::CreateTender).await?;

        let mut state = self.state();
        state.drafts.push(draft.clone());
        state.automation_events += 1;

        let mut tender = Tender::new(draft.tender_id.clone(), draft.requirements.clone())
            .with_description(draft.description.clone());
        tender.budget = draft.budget;
        tender.deadline = draft.deadline.clone();
        tender.status = Some("OPEN".to_string());
        state.tenders.push(tender);

        Ok(TenderReceipt {
            update_hash: format!("tender-{}", state.drafts.len()),
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
        })
    }

    async fn bids_for_tender(&self, tender_id: &str) -> ApiResult<Vec<Bid>> {
        self.enter(Endpoint::Bids).await?;
        Ok(self.state().bids.get(tender_id).cloned().unwrap_or_default())
    }

    async fn seal_bid(&self, request: &SealRequest) -> ApiResult<SealReceipt> {
        self.enter(Endpoint::Seal).await?;

        let mut state = self.state();
        let document = request.document();
        state.seals.push(RecordedSeal {
            tender_id: request.tender_id().to_string(),
            bid_summary: request.bid_summary().to_string(),
            file_name: document.file_name.clone(),
            bytes: document.len(),
        });

        let receipt = state.seal_receipt.clone().unwrap_or_else(|| SealReceipt {
            bidder_id: format!("bidder-{}", state.seals.len()),
            bid_hash: document.sha256_hex(),
            automated: true,
            message: Some("Bid sealed".to_string()),
        });

        let timestamp = format!("2025-01-01T00:00:{:02}+00:00", state.seals.len() % 60);
        state
            .bids
            .entry(request.tender_id().to_string())
            .or_default()
            .push(Bid {
                bidder_id: receipt.bidder_id.clone(),
                tender_id: request.tender_id().to_string(),
                bid_summary: request.bid_summary().to_string(),
                bid_hash: receipt.bid_hash.clone(),
                timestamp: Some(timestamp.clone()),
                status: Some("SEALED".to_string()),
            });

        // Newest first, like the service
        state.audit.insert(
            0,
            AuditEntry {
                tender_id: request.tender_id().to_string(),
                bidder_id: receipt.bidder_id.clone(),
                bid_hash: receipt.bid_hash.clone(),
                bid_summary: Some(request.bid_summary().to_string()),
                status: "SEALED".to_string(),
                timestamp,
            },
        );
        state.automation_events += 1;

        Ok(receipt)
    }

    async fn check_compliance(&self, request: &ComplianceRequest) -> ApiResult<ComplianceResult> {
        self.enter(Endpoint::Compliance).await?;

        let mut state = self.state();
        state.compliance_requests.push(request.clone());

        Ok(state.compliance_result.clone().unwrap_or_else(|| ComplianceResult {
            analysis: NO_VIOLATIONS_SENTINEL.to_string(),
            violations: vec![NO_VIOLATIONS_SENTINEL.to_string()],
        }))
    }

    async fn audit_log(&self) -> ApiResult<Vec<AuditEntry>> {
        self.enter(Endpoint::Audit).await?;
        Ok(self.state().audit.clone())
    }

    async fn stats(&self) -> ApiResult<AutomationStats> {
        self.enter(Endpoint::Stats).await?;

        let state = self.state();
        Ok(state.stats.unwrap_or_else(|| AutomationStats {
            total_bids: state.audit.len() as u64,
            total_tenders: state.tenders.len() as u64,
            last_24h_bids: state.audit.len() as u64,
            automation_events: state.automation_events,
        }))
    }
}
