//! Procurement API trait - interface to the external service

use async_trait::async_trait;

use tenderguard_core::{
    AuditEntry, AutomationStats, Bid, ComplianceRequest, ComplianceResult, SealReceipt,
    SealRequest, ServiceInfo, Tender, TenderDraft, TenderReceipt,
};

use crate::error::ApiResult;

/// Access to the procurement service
///
/// Implementations:
/// - [`crate::HttpApiClient`]: the real service over HTTP
/// - [`crate::MockApi`]: in-memory, for tests
///
/// No business logic lives behind this trait; it only shapes requests and
/// responses. Requests arriving here are already validated.
#[async_trait]
pub trait ProcurementApi: Send + Sync {
    /// `GET /api/`
    async fn service_info(&self) -> ApiResult<ServiceInfo>;

    /// `GET /api/tenders`
    async fn list_tenders(&self) -> ApiResult<Vec<Tender>>;

    /// `POST /api/tender`
    async fn create_tender(&self, draft: &TenderDraft) -> ApiResult<TenderReceipt>;

    /// `GET /api/bids/{tenderId}`
    async fn bids_for_tender(&self, tender_id: &str) -> ApiResult<Vec<Bid>>;

    /// `POST /api/seal` (multipart)
    async fn seal_bid(&self, request: &SealRequest) -> ApiResult<SealReceipt>;

    /// `POST /api/compliance`
    async fn check_compliance(&self, request: &ComplianceRequest) -> ApiResult<ComplianceResult>;

    /// `GET /api/audit`
    async fn audit_log(&self) -> ApiResult<Vec<AuditEntry>>;

    /// `GET /api/stats`
    async fn stats(&self) -> ApiResult<AutomationStats>;
}
