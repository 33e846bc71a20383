//! # Tender Guardian Core
//!
//! Domain types shared by the API client and the workflow crates.
//!
//! - [`tender`] - tenders, tender drafts and creation receipts
//! - [`bid`] - bids, attached documents, seal requests and receipts
//! - [`compliance`] - compliance requests and the sentinel-based verdict
//! - [`audit`] - audit entries and automation statistics
//! - [`validation`] - client-side required-field checks

pub mod audit;
pub mod bid;
pub mod compliance;
pub mod tender;
pub mod validation;

pub use audit::{AuditEntry, AutomationStats, ServiceInfo};
pub use bid::{Bid, BidDocument, SealReceipt, SealRequest};
pub use compliance::{ComplianceRequest, ComplianceResult, Verdict, NO_VIOLATIONS_SENTINEL};
pub use tender::{Tender, TenderDraft, TenderReceipt};
pub use validation::{is_blank, Field, RequiredFields, ValidationError};
