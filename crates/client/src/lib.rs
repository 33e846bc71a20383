//! # Tender Guardian API Client
//!
//! Typed access to the procurement service. The service does the sealing,
//! hashing, AI analysis and storage; this crate only shapes requests and
//! responses.
//!
//! - [`ProcurementApi`] - the seam the workflow crates depend on
//! - [`HttpApiClient`] - reqwest implementation of the REST contract
//! - [`MockApi`] - in-memory service for tests
//! - [`ClientConfig`] - file/env configurable settings

mod api;
mod config;
mod error;
mod http;
mod mock;

pub use api::ProcurementApi;
pub use config::{ClientConfig, ConfigError, ENV_BACKEND_URL, ENV_TIMEOUT_SECS};
pub use error::{ApiError, ApiResult};
pub use http::HttpApiClient;
pub use mock::{Endpoint, MockApi, MockFailure, RecordedSeal};
