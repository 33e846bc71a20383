//! Bid Submission Flow
//!
//! ```text
//! Idle ──edit──► Filling ──submit──► Submitting ──ok──► Sealed ──edit──► Filling
//!                   ▲                     │
//!                   └──────edit────── Failed ◄──err──┘
//! ```
//!
//! Submitting is entered only with a complete form and issues exactly one
//! seal request. While it is outstanding, further submits and edits are
//! rejected. A seal clears the form; a failure keeps it for another attempt.

use std::sync::{Arc, Mutex};

use tenderguard_client::ProcurementApi;
use tenderguard_core::{BidDocument, SealReceipt, SealRequest, Tender};

use crate::directory::TenderDirectory;
use crate::error::{FlowError, FlowResult};
use crate::guard::lock;

/// Message shown when the service gives no detail
pub const SEAL_FAILED: &str = "Failed to seal bid";

/// Where the submission currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Nothing entered
    Idle,
    /// Fields are being populated
    Filling,
    /// One seal request is outstanding
    Submitting,
    /// Sealed; the form has been cleared
    Sealed(SealReceipt),
    /// The last attempt failed with this message; the form is kept
    Failed(String),
}

/// Local form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BidForm {
    pub tender_id: String,
    pub document: Option<BidDocument>,
    pub bid_summary: String,
    /// Tender picked from the directory, shown alongside the form
    pub selected_tender: Option<Tender>,
}

impl BidForm {
    pub fn is_empty(&self) -> bool {
        self.tender_id.is_empty() && self.document.is_none() && self.bid_summary.is_empty()
    }

    /// Requirements of the selected tender, for display
    pub fn requirements(&self) -> Option<&str> {
        self.selected_tender.as_ref().map(|t| t.requirements.as_str())
    }
}

struct SubmissionState {
    form: BidForm,
    phase: SubmissionPhase,
}

/// Orchestrates tender selection, document attachment and sealing
pub struct BidSubmissionFlow {
    api: Arc<dyn ProcurementApi>,
    directory: Arc<TenderDirectory>,
    state: Mutex<SubmissionState>,
}

impl BidSubmissionFlow {
    pub fn new(api: Arc<dyn ProcurementApi>, directory: Arc<TenderDirectory>) -> Self {
        Self {
            api,
            directory,
            state: Mutex::new(SubmissionState {
                form: BidForm::default(),
                phase: SubmissionPhase::Idle,
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

    pub fn phase(&self) -> SubmissionPhase {
        lock(&self.state).phase.clone()
    }

    pub fn form(&self) -> BidForm {
        lock(&self.state).form.clone()
    }

    /// Pick a tender from the directory: pre-fills the tender ID
    pub fn select_tender(&self, tender_id: &str) -> FlowResult<Tender> {
        let tender = self
            .directory
            .find(tender_id)
            .ok_or_else(|| FlowError::UnknownTender(tender_id.to_string()))?;

        let selected = tender.clone();
        self.edit(move |form| {
            form.tender_id = selected.tender_id.clone();
            form.selected_tender = Some(selected);
        })?;

        Ok(tender)
    }

    /// Type a tender ID by hand
    pub fn set_tender_id(&self, tender_id: impl Into<String>) -> FlowResult<()> {
        let tender_id = tender_id.into();
        self.edit(|form| {
            if form
                .selected_tender
                .as_ref()
                .is_some_and(|t| t.tender_id != tender_id)
            {
                form.selected_tender = None;
            }
            form.tender_id = tender_id;
        })
    }

    pub fn attach_document(&self, document: BidDocument) -> FlowResult<()> {
        tracing::debug!(file = %document.file_name, bytes = document.len(), "Document attached");
        self.edit(|form| form.document = Some(document))
    }

    pub fn detach_document(&self) -> FlowResult<()> {
        self.edit(|form| form.document = None)
    }

    pub fn set_bid_summary(&self, summary: impl Into<String>) -> FlowResult<()> {
        let summary = summary.into();
        self.edit(|form| form.bid_summary = summary)
    }

    /// Clear the form
    pub fn reset(&self) -> FlowResult<()> {
        self.edit(|form| *form = BidForm::default())
    }

    fn edit(&self, apply: impl FnOnce(&mut BidForm)) -> FlowResult<()> {
        let mut state = lock(&self.state);
        if state.phase == SubmissionPhase::Submitting {
            return Err(FlowError::AlreadyInFlight);
        }

        apply(&mut state.form);
        state.phase = if state.form.is_empty() {
            SubmissionPhase::Idle
        } else {
            SubmissionPhase::Filling
        };
        Ok(())
    }

    /// Seal the bid
    ///
    /// Validation and in-flight rejections issue no request and leave the
    /// phase untouched.
    pub async fn submit(&self) -> FlowResult<SealReceipt> {
        let request = {
            let mut state = lock(&self.state);
            if state.phase == SubmissionPhase::Submitting {
                tracing::warn!("Bid submission ignored, a seal request is already in flight");
                return Err(FlowError::AlreadyInFlight);
            }

            let form = &state.form;
            let request =
                SealRequest::new(&form.tender_id, &form.bid_summary, form.document.as_ref())
                    .map_err(|e| {
                        tracing::warn!(error = %e, "Bid submission rejected");
                        FlowError::Validation(e)
                    })?;

            state.phase = SubmissionPhase::Submitting;
            request
        };

        let result = self.api.seal_bid(&request).await;

        let mut state = lock(&self.state);
        match result {
            Ok(receipt) => {
                tracing::info!(
                    tender_id = %request.tender_id(),
                    bidder_id = %receipt.bidder_id,
                    bid_hash = %receipt.bid_hash,
                    "Bid sealed"
                );
                state.form = BidForm::default();
                state.phase = SubmissionPhase::Sealed(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!(tender_id = %request.tender_id(), error = %e, "Bid sealing failed");
                let err = FlowError::api(e, SEAL_FAILED);
                state.phase = SubmissionPhase::Failed(err.user_message());
                Err(err)
            }
        }
    }
}
