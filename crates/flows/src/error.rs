//! Flow errors

use tenderguard_client::ApiError;
use tenderguard_core::ValidationError;
use thiserror::Error;

/// Errors surfaced at a flow boundary
#[derive(Debug, Error)]
pub enum FlowError {
    /// Required input missing or invalid; nothing was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The service call failed; `message` is what the user sees
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },

    /// The flow already has a request outstanding; nothing was sent
    #[error("A request is already in flight")]
    AlreadyInFlight,

    #[error("Tender not found: {0}")]
    UnknownTender(String),

    #[error("Bid not found: {0}")]
    UnknownBid(String),

    #[error("No tender selected")]
    NoTenderSelected,
}

/// Result type for flow operations
pub type FlowResult<T> = Result<T, FlowError>;

impl FlowError {
    /// Wrap a service error, using the server detail or `fallback` as message
    pub fn api(source: ApiError, fallback: &str) -> Self {
        FlowError::Api {
            message: source.user_message(fallback),
            source,
        }
    }

    /// Message to show the user
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether the error was caught before any request was issued
    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, FlowError::AlreadyInFlight)
    }
}
