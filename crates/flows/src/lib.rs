//! # Tender Guardian Flows
//!
//! Client-side workflows over a [`ProcurementApi`](tenderguard_client::ProcurementApi):
//!
//! - [`TenderDirectory`] - tender list shared by the flows
//! - [`BidSubmissionFlow`] - select tender, attach document, seal
//! - [`ComplianceCheckFlow`] - requirements vs. bid summary analysis
//! - [`AuditView`] - sealed bid trail with statistics
//! - [`TenderCreationFlow`] - publish a new tender
//!
//! Every flow allows one request in flight at a time. Triggers and edits
//! arriving meanwhile are rejected with [`FlowError::AlreadyInFlight`] and
//! never reach the network.

pub mod audit;
pub mod compliance;
pub mod creation;
pub mod directory;
pub mod error;
mod guard;
pub mod submission;

pub use audit::{AuditPhase, AuditSnapshot, AuditView, AUDIT_FAILED};
pub use compliance::{ComplianceCheckFlow, ComplianceForm, CompliancePhase, CHECK_FAILED};
pub use creation::{CreationPhase, TenderCreationFlow, CREATE_FAILED};
pub use directory::TenderDirectory;
pub use error::{FlowError, FlowResult};
pub use submission::{BidForm, BidSubmissionFlow, SubmissionPhase, SEAL_FAILED};
