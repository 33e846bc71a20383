//! Application context - wires the client and the shared directory

use std::path::Path;
use std::sync::Arc;

use tenderguard_client::{ClientConfig, ConfigError, HttpApiClient, ProcurementApi};
use tenderguard_flows::TenderDirectory;

/// Resolve the client configuration
///
/// Precedence, lowest first: defaults, config file, environment, `--backend`.
pub fn load_config(path: Option<&Path>, backend: Option<String>) -> Result<ClientConfig, ConfigError> {
    let config = match path {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };

    let mut config = config.apply_env()?;
    if let Some(url) = backend {
        config.base_url = url;
    }

    config.validate()?;
    Ok(config)
}

/// Service handle plus the tender directory shared by the flows
pub struct AppContext {
    api: Arc<dyn ProcurementApi>,
    directory: Arc<TenderDirectory>,
}

impl AppContext {
    /// Context talking to the service over HTTP
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = HttpApiClient::new(config)?;
        tracing::debug!(base_url = %client.base_url(), "HTTP client ready");
        Ok(Self::with_api(Arc::new(client)))
    }

    pub fn with_api(api: Arc<dyn ProcurementApi>) -> Self {
        let directory = Arc::new(TenderDirectory::new(api.clone()));
        Self { api, directory }
    }

    pub fn api(&self) -> Arc<dyn ProcurementApi> {
        self.api.clone()
    }

    pub fn directory(&self) -> Arc<TenderDirectory> {
        self.directory.clone()
    }
}
