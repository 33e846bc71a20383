//! Tender Creation Flow
//!
//! `Editing → Creating → Created | Failed`. The draft is cleared only after
//! the service has acknowledged it.

use std::sync::{Arc, Mutex};

use tenderguard_client::ProcurementApi;
use tenderguard_core::{TenderDraft, TenderReceipt};

use crate::directory::TenderDirectory;
use crate::error::{FlowError, FlowResult};
use crate::guard::lock;

pub const CREATE_FAILED: &str = "Failed to create tender";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationPhase {
    Editing,
    Creating,
    Created(TenderReceipt),
    Failed(String),
}

struct CreationState {
    draft: TenderDraft,
    phase: CreationPhase,
}

pub struct TenderCreationFlow {
    api: Arc<dyn ProcurementApi>,
    directory: Option<Arc<TenderDirectory>>,
    state: Mutex<CreationState>,
}

impl TenderCreationFlow {
    pub fn new(api: Arc<dyn ProcurementApi>) -> Self {
        Self {
            api,
            directory: None,
            state: Mutex::new(CreationState {
                draft: TenderDraft::default(),
                phase: CreationPhase::Editing,
            }),
        }
    }

    /// Refresh this directory after each created tender
    pub fn with_directory(mut self, directory: Arc<TenderDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn phase(&self) -> CreationPhase {
        lock(&self.state).phase.clone()
    }

    pub fn draft(&self) -> TenderDraft {
        lock(&self.state).draft.clone()
    }

    /// Change the draft in place
    pub fn edit(&self, apply: impl FnOnce(&mut TenderDraft)) -> FlowResult<()> {
        let mut state = lock(&self.state);
        if state.phase == CreationPhase::Creating {
            return Err(FlowError::AlreadyInFlight);
        }
        apply(&mut state.draft);
        state.phase = CreationPhase::Editing;
        Ok(())
    }

    /// Publish the draft as a new tender
    pub async fn submit(&self) -> FlowResult<TenderReceipt> {
        let draft = {
            let mut state = lock(&self.state);
            if state.phase == CreationPhase::Creating {
                tracing::warn!("Tender creation ignored, a request is already in flight");
                return Err(FlowError::AlreadyInFlight);
            }

            state.draft.validate().map_err(|e| {
                tracing::warn!(error = %e, "Tender draft rejected");
                FlowError::Validation(e)
            })?;

            state.phase = CreationPhase::Creating;
            state.draft.clone().normalized()
        };

        let result = self.api.create_tender(&draft).await;

        let receipt = {
            let mut state = lock(&self.state);
            match result {
                Ok(receipt) => {
                    tracing::info!(
                        tender_id = %draft.tender_id,
                        update_hash = %receipt.update_hash,
                        "Tender created"
                    );
                    state.draft = TenderDraft::default();
                    state.phase = CreationPhase::Created(receipt.clone());
                    receipt
                }
                Err(e) => {
                    tracing::error!(tender_id = %draft.tender_id, error = %e, "Tender creation failed");
                    let err = FlowError::api(e, CREATE_FAILED);
                    state.phase = CreationPhase::Failed(err.user_message());
                    return Err(err);
                }
            }
        };

        if let Some(directory) = &self.directory {
            if let Err(e) = directory.list_tenders().await {
                tracing::warn!(error = %e, "Tender list not refreshed after creation");
            }
        }

        Ok(receipt)
    }
}
