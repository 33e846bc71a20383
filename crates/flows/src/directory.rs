//! Tender Directory - cached tender list shared by the flows
//!
//! Both the bid submission and the compliance flow hold the same directory
//! and refresh it once when they mount. Neither invalidates it for the other,
//! so a list can be stale across flows. A failed refresh keeps the previous
//! list available.

use std::sync::{Arc, RwLock};

use tenderguard_client::{ApiResult, ProcurementApi};
use tenderguard_core::{Bid, Tender};

use crate::guard::{read, write};

#[derive(Default)]
struct Cache {
    tenders: Vec<Tender>,
    loaded: bool,
}

/// Cached list of active tenders
pub struct TenderDirectory {
    api: Arc<dyn ProcurementApi>,
    cache: RwLock<Cache>,
}

impl TenderDirectory {
    pub fn new(api: Arc<dyn ProcurementApi>) -> Self {
        Self {
            api,
            cache: RwLock::new(Cache::default()),
        }
    }

    /// Fetch all tenders and replace the cache
    ///
    /// On failure the error is returned and the cached list is left as is.
    pub async fn list_tenders(&self) -> ApiResult<Vec<Tender>> {
        match self.api.list_tenders().await {
            Ok(tenders) => {
                let mut cache = write(&self.cache);
                cache.tenders = tenders.clone();
                cache.loaded = true;
                tracing::debug!(count = tenders.len(), "Tender directory refreshed");
                Ok(tenders)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    cached = read(&self.cache).tenders.len(),
                    "Tender refresh failed, keeping cached list"
                );
                Err(e)
            }
        }
    }

    /// Fetch bids scoped to one tender; no bids is a valid answer
    pub async fn bids_for_tender(&self, tender_id: &str) -> ApiResult<Vec<Bid>> {
        let bids = self.api.bids_for_tender(tender_id).await?;
        tracing::debug!(tender_id = %tender_id, count = bids.len(), "Bids loaded");
        Ok(bids)
    }

    /// Cached tenders in service order
    pub fn cached(&self) -> Vec<Tender> {
        read(&self.cache).tenders.clone()
    }

    /// Look a tender up in the cache
    pub fn find(&self, tender_id: &str) -> Option<Tender> {
        read(&self.cache)
            .tenders
            .iter()
            .find(|t| t.tender_id == tender_id)
            .cloned()
    }

    /// Whether any refresh has succeeded yet
    pub fn is_loaded(&self) -> bool {
        read(&self.cache).loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderguard_client::{Endpoint, MockApi, MockFailure};

    fn setup(tenders: Vec<Tender>) -> (Arc<MockApi>, TenderDirectory) {
        let api = Arc::new(MockApi::with_tenders(tenders));
        let directory = TenderDirectory::new(api.clone());
        (api, directory)
    }

    #[tokio::test]
    async fn test_list_tenders_fills_cache() {
        let (_api, directory) = setup(vec![Tender::new("T-1", "ISO 9001"), Tender::new("T-2", "30 days")]);
        assert!(!directory.is_loaded());

        let tenders = directory.list_tenders().await.unwrap();

        assert_eq!(tenders.len(), 2);
        assert!(directory.is_loaded());
        assert_eq!(directory.cached()[1].tender_id, "T-2");
        assert_eq!(directory.find("T-1").unwrap().requirements, "ISO 9001");
        assert!(directory.find("T-3").is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_list() {
        let (api, directory) = setup(vec![Tender::new("T-1", "ISO 9001")]);
        directory.list_tenders().await.unwrap();

        api.set_tenders(vec![]);
        api.fail(Endpoint::ListTenders, MockFailure::Transport("offline".to_string()));

        assert!(directory.list_tenders().await.is_err());
        assert_eq!(directory.cached().len(), 1);
        assert!(directory.is_loaded());
    }

    #[tokio::test]
    async fn test_empty_tender_list_is_not_an_error() {
        let (_api, directory) = setup(vec![]);
        assert!(directory.list_tenders().await.unwrap().is_empty());
        assert!(directory.is_loaded());
    }

    #[tokio::test]
    async fn test_bids_for_tender_empty_is_ok() {
        let (api, directory) = setup(vec![]);
        assert!(directory.bids_for_tender("T-1").await.unwrap().is_empty());
        assert_eq!(api.calls(Endpoint::Bids), 1);
    }
}
