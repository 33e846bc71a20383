//! HTTP implementation of [`ProcurementApi`]

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use tenderguard_core::{
    AuditEntry, AutomationStats, Bid, ComplianceRequest, ComplianceResult, SealReceipt,
    SealRequest, ServiceInfo, Tender, TenderDraft, TenderReceipt,
};

use crate::api::ProcurementApi;
use crate::config::{ClientConfig, ConfigError};
use crate::error::{ApiError, ApiResult};

/// Error body sent by the service on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: serde_json::Value,
}

/// Client for the procurement service REST API
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Invalid(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.parsed_base_url()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/api/<segments...>`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest(format!("cannot extend {}", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);
            tracing::debug!(status = status.as_u16(), detail = ?detail, "Service returned error");
            return Err(ApiError::status(status.as_u16(), detail));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        tracing::debug!(method = "GET", url = %url, "Sending request");
        self.send(self.client.get(url)).await
    }
}

/// Pull a string `detail` out of an error body, if there is one
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

#[async_trait]
impl ProcurementApi for HttpApiClient {
    async fn service_info(&self) -> ApiResult<ServiceInfo> {
        self.get(&[""]).await
    }

    async fn list_tenders(&self) -> ApiResult<Vec<Tender>> {
        self.get(&["tenders"]).await
    }

    async fn create_tender(&self, draft: &TenderDraft) -> ApiResult<TenderReceipt> {
        let url = self.endpoint(&["tender"])?;
        tracing::debug!(method = "POST", url = %url, tender_id = %draft.tender_id, "Sending request");
        self.send(self.client.post(url).json(draft)).await
    }

    async fn bids_for_tender(&self, tender_id: &str) -> ApiResult<Vec<Bid>> {
        self.get(&["bids", tender_id]).await
    }

    async fn seal_bid(&self, request: &SealRequest) -> ApiResult<SealReceipt> {
        let url = self.endpoint(&["seal"])?;
        let document = request.document();

        let mut file = Part::bytes(document.bytes.clone()).file_name(document.file_name.clone());
        if let Some(content_type) = &document.content_type {
            file = file
                .mime_str(content_type)
                .map_err(|e| ApiError::InvalidRequest(format!("content type: {}", e)))?;
        }

        let form = Form::new()
            .part("file", file)
            .text("tender_id", request.tender_id().to_string())
            .text("bid_summary", request.bid_summary().to_string());

        tracing::debug!(
            method = "POST",
            url = %url,
            tender_id = %request.tender_id(),
            bytes = document.len(),
            "Sending request"
        );
        self.send(self.client.post(url).multipart(form)).await
    }

    async fn check_compliance(&self, request: &ComplianceRequest) -> ApiResult<ComplianceResult> {
        let url = self.endpoint(&["compliance"])?;
        tracing::debug!(method = "POST", url = %url, "Sending request");
        self.send(self.client.post(url).json(request)).await
    }

    async fn audit_log(&self) -> ApiResult<Vec<AuditEntry>> {
        self.get(&["audit"]).await
    }

    async fn stats(&self) -> ApiResult<AutomationStats> {
        self.get(&["stats"]).await
    }
}
