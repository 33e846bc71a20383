//! Compliance Check Flow
//!
//! ```text
//! Idle ◄──blank field──► Ready ──check──► Analyzing ──ok──► Analyzed
//!                          ▲                  │
//!                          └────retry──── Failed ◄──err──┘
//! ```
//!
//! Selecting a tender or a bid copies its text into the editable fields once.
//! Nothing stays bound to the selection afterwards.

use std::sync::{Arc, Mutex};

use tenderguard_client::ProcurementApi;
use tenderguard_core::{is_blank, Bid, ComplianceRequest, ComplianceResult, Tender};

use crate::directory::TenderDirectory;
use crate::error::{FlowError, FlowResult};
use crate::guard::lock;

pub const CHECK_FAILED: &str = "Failed to check compliance";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompliancePhase {
    /// At least one field is blank
    Idle,
    /// Both fields filled in
    Ready,
    /// One check request is outstanding
    Analyzing,
    Analyzed(ComplianceResult),
    Failed(String),
}

/// Local form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceForm {
    pub requirements: String,
    pub bid_summary: String,
    pub selected_tender: Option<Tender>,
    /// Bidder ID of the picked bid
    pub selected_bid: Option<String>,
    /// Bids loaded for the selected tender
    pub bids: Vec<Bid>,
}

impl ComplianceForm {
    fn is_ready(&self) -> bool {
        !is_blank(&self.requirements) && !is_blank(&self.bid_summary)
    }
}

struct ComplianceState {
    form: ComplianceForm,
    phase: CompliancePhase,
}

impl ComplianceState {
    fn settle(&mut self) {
        self.phase = if self.form.is_ready() {
            CompliancePhase::Ready
        } else {
            CompliancePhase::Idle
        };
    }

    fn ensure_idle(&self) -> FlowResult<()> {
        if self.phase == CompliancePhase::Analyzing {
            return Err(FlowError::AlreadyInFlight);
        }
        Ok(())
    }
}

pub struct ComplianceCheckFlow {
    api: Arc<dyn ProcurementApi>,
    directory: Arc<TenderDirectory>,
    state: Mutex<ComplianceState>,
}

impl ComplianceCheckFlow {
    pub fn new(api: Arc<dyn ProcurementApi>, directory: Arc<TenderDirectory>) -> Self {
        Self {
            api,
            directory,
            state: Mutex::new(ComplianceState {
                form: ComplianceForm::default(),
                phase: CompliancePhase::Idle,
            }),
        }
    }

    /// Refresh the shared tender directory once
    pub async fn mount(&self) -> FlowResult<Vec<Tender>> {
        self.directory
            .list_tenders()
            .await
            .map_err(|e| FlowError::api(e, "Failed to load tenders"))
    }

    pub fn phase(&self) -> CompliancePhase {
        lock(&self.state).phase.clone()
    }

    pub fn form(&self) -> ComplianceForm {
        lock(&self.state).form.clone()
    }

    /// Pick a tender: copies its requirements, then loads its bids
    ///
    /// The bid list is only stored if the tender is still the selected one
    /// when the response arrives.
    pub async fn select_tender(&self, tender_id: &str) -> FlowResult<Vec<Bid>> {
        let tender = self
            .directory
            .find(tender_id)
            .ok_or_else(|| FlowError::UnknownTender(tender_id.to_string()))?;

        {
            let mut state = lock(&self.state);
            state.ensure_idle()?;
            state.form.requirements = tender.requirements.clone();
            state.form.selected_tender = Some(tender);
            state.form.selected_bid = None;
            state.form.bids.clear();
            state.settle();
        }

        let bids = self
            .directory
            .bids_for_tender(tender_id)
            .await
            .map_err(|e| {
                tracing::error!(tender_id = %tender_id, error = %e, "Loading bids failed");
                FlowError::api(e, "Failed to load bids")
            })?;

        let mut state = lock(&self.state);
        let still_selected = state
            .form
            .selected_tender
            .as_ref()
            .is_some_and(|t| t.tender_id == tender_id);
        if still_selected {
            state.form.bids = bids.clone();
        }

        Ok(bids)
    }

    /// Pick one of the loaded bids: copies its summary
    pub fn select_bid(&self, bidder_id: &str) -> FlowResult<Bid> {
        let mut state = lock(&self.state);
        state.ensure_idle()?;

        if state.form.selected_tender.is_none() {
            return Err(FlowError::NoTenderSelected);
        }

        let bid = state
            .form
            .bids
            .iter()
            .find(|b| b.bidder_id == bidder_id)
            .cloned()
            .ok_or_else(|| FlowError::UnknownBid(bidder_id.to_string()))?;

        state.form.bid_summary = bid.bid_summary.clone();
        state.form.selected_bid = Some(bid.bidder_id.clone());
        state.settle();
        Ok(bid)
    }

    pub fn set_requirements(&self, requirements: impl Into<String>) -> FlowResult<()> {
        let requirements = requirements.into();
        self.edit(|form| form.requirements = requirements)
    }

    pub fn set_bid_summary(&self, summary: impl Into<String>) -> FlowResult<()> {
        let summary = summary.into();
        self.edit(|form| form.bid_summary = summary)
    }

    fn edit(&self, apply: impl FnOnce(&mut ComplianceForm)) -> FlowResult<()> {
        let mut state = lock(&self.state);
        state.ensure_idle()?;
        apply(&mut state.form);
        state.settle();
        Ok(())
    }

    /// Run the compliance analysis on the current fields
    pub async fn check(&self) -> FlowResult<ComplianceResult> {
        let request = {
            let mut state = lock(&self.state);
            if state.phase == CompliancePhase::Analyzing {
                tracing::warn!("Compliance check ignored, a check is already in flight");
                return Err(FlowError::AlreadyInFlight);
            }

            let request =
                ComplianceRequest::new(&state.form.requirements, &state.form.bid_summary)
                    .map_err(|e| {
                        tracing::warn!(error = %e, "Compliance check rejected");
                        FlowError::Validation(e)
                    })?;

            state.phase = CompliancePhase::Analyzing;
            request
        };

        let result = self.api.check_compliance(&request).await;

        let mut state = lock(&self.state);
        match result {
            Ok(result) => {
                tracing::info!(
                    verdict = %result.verdict(),
                    violations = result.violations.len(),
                    "Compliance analyzed"
                );
                state.phase = CompliancePhase::Analyzed(result.clone());
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "Compliance check failed");
                let err = FlowError::api(e, CHECK_FAILED);
                state.phase = CompliancePhase::Failed(err.user_message());
                Err(err)
            }
        }
    }
}
