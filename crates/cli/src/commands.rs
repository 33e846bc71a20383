//! CLI commands
//!
//! Each command mounts the flow behind one route, drives it once and returns
//! the rendered text.

use std::path::Path;

use tenderguard_core::{BidDocument, TenderDraft};
use tenderguard_flows::{AuditView, BidSubmissionFlow, ComplianceCheckFlow, TenderCreationFlow};

use crate::context::AppContext;
use crate::render;

/// Inputs of the compliance check command
#[derive(Debug, Default)]
pub struct CheckInput {
    pub tender_id: Option<String>,
    pub bidder_id: Option<String>,
    pub requirements: Option<String>,
    pub bid_summary: Option<String>,
}

/// Service banner, screens and stats
pub async fn home(ctx: &AppContext) -> Result<String, anyhow::Error> {
    let api = ctx.api();
    let (info, stats) = tokio::join!(api.service_info(), api.stats());

    let info = info
        .map_err(|e| tracing::warn!(error = %e, "Service info unavailable"))
        .ok();
    let stats = stats
        .map_err(|e| tracing::warn!(error = %e, "Stats unavailable"))
        .ok();

    Ok(render::home(info.as_ref(), stats.as_ref()))
}

/// List active tenders
pub async fn tenders(ctx: &AppContext) -> Result<String, anyhow::Error> {
    let tenders = ctx.directory().list_tenders().await?;
    Ok(render::tenders(&tenders))
}

/// List sealed bids of one tender
pub async fn bids(ctx: &AppContext, tender_id: &str) -> Result<String, anyhow::Error> {
    let bids = ctx.directory().bids_for_tender(tender_id).await?;
    Ok(render::bids(tender_id, &bids))
}

/// Publish a new tender
pub async fn create(ctx: &AppContext, draft: TenderDraft) -> Result<String, anyhow::Error> {
    let tender_id = draft.tender_id.trim().to_string();
    let flow = TenderCreationFlow::new(ctx.api()).with_directory(ctx.directory());
    flow.edit(|d| *d = draft)?;

    let receipt = flow.submit().await?;
    Ok(render::tender_receipt(&tender_id, &receipt))
}

/// Read a bid document from disk
pub async fn read_document(path: &Path) -> Result<BidDocument, anyhow::Error> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("bid")
        .to_string();

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("pdf") => Some("application/pdf"),
        Some("txt") => Some("text/plain"),
        Some("doc") => Some("application/msword"),
        Some("docx") => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    };

    let document = BidDocument::new(file_name, bytes);
    Ok(match content_type {
        Some(ct) => document.with_content_type(ct),
        None => document,
    })
}

/// Seal a bid document for a tender
pub async fn seal(
    ctx: &AppContext,
    tender_id: &str,
    document: Option<BidDocument>,
    bid_summary: &str,
) -> Result<String, anyhow::Error> {
    let flow = BidSubmissionFlow::new(ctx.api(), ctx.directory());
    if let Err(e) = flow.mount().await {
        tracing::warn!(error = %e, "Tender directory unavailable, using the tender ID as typed");
    }

    let mut lines = Vec::new();
    match flow.select_tender(tender_id) {
        Ok(tender) => lines.push(format!("Requirements: {}", tender.requirements)),
        Err(_) => flow.set_tender_id(tender_id)?,
    }
    if let Some(document) = document {
        flow.attach_document(document)?;
    }
    flow.set_bid_summary(bid_summary)?;

    let receipt = flow.submit().await?;
    lines.push(render::seal_receipt(tender_id.trim(), &receipt));
    Ok(lines.join("\n"))
}

/// Run a compliance check
///
/// A tender and bid picked by ID pre-fill the fields; explicit text overrides
/// them.
pub async fn check(ctx: &AppContext, input: CheckInput) -> Result<String, anyhow::Error> {
    let flow = ComplianceCheckFlow::new(ctx.api(), ctx.directory());

    if let Some(tender_id) = &input.tender_id {
        flow.mount().await?;
        flow.select_tender(tender_id).await?;
    }
    if let Some(bidder_id) = &input.bidder_id {
        flow.select_bid(bidder_id)?;
    }
    if let Some(requirements) = input.requirements {
        flow.set_requirements(requirements)?;
    }
    if let Some(summary) = input.bid_summary {
        flow.set_bid_summary(summary)?;
    }

    let result = flow.check().await?;
    Ok(render::compliance(&result))
}

/// Show the audit log, optionally with one entry expanded
pub async fn audit(ctx: &AppContext, expand: Option<usize>) -> Result<String, anyhow::Error> {
    let view = AuditView::new(ctx.api());
    let snapshot = view.load().await?;

    if let Some(index) = expand {
        if !view.toggle_expanded(index) {
            tracing::warn!(index, "Audit entry has no summary to expand");
        }
    }

    Ok(render::audit(&snapshot, view.expanded()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use std::sync::Arc;
    use tenderguard_client::{Endpoint, MockApi, MockFailure};
    use tenderguard_core::{Bid, Tender};
    use tenderguard_flows::FlowError;

    fn context(api: &Arc<MockApi>) -> AppContext {
        AppContext::with_api(api.clone())
    }

    fn doc() -> Option<BidDocument> {
        Some(BidDocument::new("bid.pdf", b"%PDF bid".to_vec()))
    }

    #[tokio::test]
    async fn test_seal_selected_tender() {
        let api = Arc::new(MockApi::with_tenders(vec![Tender::new("TENDER-1", "ISO 9001")]));
        let out = seal(&context(&api), "TENDER-1", doc(), "Certified").await.unwrap();

        assert!(out.contains("Requirements: ISO 9001"));
        assert!(out.contains("Bidder ID: bidder-1"));
        assert_eq!(api.recorded_seals()[0].tender_id, "TENDER-1");
    }

    #[tokio::test]
    async fn test_seal_with_unlisted_tender_id() {
        let api = Arc::new(MockApi::new());
        api.fail(Endpoint::ListTenders, MockFailure::Transport("offline".to_string()));

        seal(&context(&api), "TENDER-X", doc(), "Certified").await.unwrap();
        assert_eq!(api.recorded_seals()[0].tender_id, "TENDER-X");
    }

    #[tokio::test]
    async fn test_seal_without_document_sends_nothing() {
        let api = Arc::new(MockApi::new());
        let err = seal(&context(&api), "TENDER-1", None, "Certified").await.unwrap_err();

        let flow_err = err.downcast_ref::<FlowError>().unwrap();
        assert!(flow_err.is_validation());
        assert_eq!(api.calls(Endpoint::Seal), 0);
    }

    #[tokio::test]
    async fn test_check_from_selected_bid() {
        let api = Arc::new(MockApi::with_tenders(vec![Tender::new("TENDER-1", "ISO 9001")]));
        api.add_bid(Bid {
            bidder_id: "b-1".to_string(),
            tender_id: "TENDER-1".to_string(),
            bid_summary: "We hold ISO 9001".to_string(),
            bid_hash: "aa".to_string(),
            timestamp: None,
            status: None,
        });

        let input = CheckInput {
            tender_id: Some("TENDER-1".to_string()),
            bidder_id: Some("b-1".to_string()),
            ..CheckInput::default()
        };
        let out = check(&context(&api), input).await.unwrap();

        assert!(out.starts_with("✅ Compliant"));
        let sent = api.recorded_compliance_requests();
        assert_eq!(sent[0].tender_requirements(), "ISO 9001");
        assert_eq!(sent[0].bid_summary(), "We hold ISO 9001");
    }

    #[tokio::test]
    async fn test_check_rate_limited() {
        let api = Arc::new(MockApi::new());
        api.fail(Endpoint::Compliance, MockFailure::status(429, Some("rate limited")));
        let input = CheckInput {
            requirements: Some("ISO 9001".to_string()),
            bid_summary: Some("Certified".to_string()),
            ..CheckInput::default()
        };

        let err = check(&context(&api), input).await.unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
    }

    #[tokio::test]
    async fn test_audit_empty_and_expanded() {
        let api = Arc::new(MockApi::new());
        let ctx = context(&api);

        assert!(audit(&ctx, None).await.unwrap().contains(render::EMPTY_AUDIT));

        seal(&ctx, "TENDER-1", doc(), "Sealed summary").await.unwrap();
        let out = audit(&ctx, Some(0)).await.unwrap();
        assert!(out.contains("Summary: Sealed summary"));
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let api = Arc::new(MockApi::new());
        let ctx = context(&api);
        let draft = TenderDraft {
            tender_id: "TENDER-5".to_string(),
            description: "Bridge inspection".to_string(),
            requirements: "Licensed engineers".to_string(),
            budget: Some(dec!(5000)),
            deadline: None,
        };

        let out = create(&ctx, draft).await.unwrap();
        assert!(out.contains("Tender TENDER-5 created"));

        let listing = tenders(&ctx).await.unwrap();
        assert!(listing.contains("TENDER-5  budget: 5000"));
    }

    #[tokio::test]
    async fn test_home_survives_unreachable_service() {
        let api = Arc::new(MockApi::new());
        api.fail(Endpoint::ServiceInfo, MockFailure::Transport("refused".to_string()));
        api.fail(Endpoint::Stats, MockFailure::Transport("refused".to_string()));

        let out = home(&context(&api)).await.unwrap();
        assert!(out.contains("Service unreachable"));
    }

    #[tokio::test]
    async fn test_read_document_sets_content_type() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.7").unwrap();

        let document = read_document(file.path()).await.unwrap();

        assert_eq!(document.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(document.len(), 8);
    }
}
