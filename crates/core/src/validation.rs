//! Client-side validation
//!
//! Everything here runs before a request is built. A value that fails
//! validation never reaches the network.

use thiserror::Error;

/// A user-editable form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    #[strum(to_string = "tender ID", serialize = "tender_id")]
    TenderId,
    #[strum(to_string = "bid document", serialize = "document")]
    Document,
    #[strum(to_string = "bid summary", serialize = "bid_summary")]
    BidSummary,
    #[strum(to_string = "tender requirements", serialize = "requirements")]
    Requirements,
    #[strum(to_string = "description")]
    Description,
    #[strum(to_string = "budget")]
    Budget,
}

/// Validation failures, reported before any request is issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field(s): {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: Field, reason: String },
}

impl ValidationError {
    /// Create an invalid-value error
    pub fn invalid(field: Field, reason: impl Into<String>) -> Self {
        ValidationError::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Fields that were missing (empty for `Invalid`)
    pub fn missing_fields(&self) -> &[Field] {
        match self {
            ValidationError::MissingFields(fields) => fields,
            ValidationError::Invalid { .. } => &[],
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// True when the text is empty after trimming
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Collects missing required fields in declaration order
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<Field>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-blank text value
    pub fn text(self, field: Field, value: &str) -> Self {
        self.present(field, !is_blank(value))
    }

    /// Require a value whose presence the caller already determined
    pub fn present(mut self, field: Field, present: bool) -> Self {
        if !present {
            self.missing.push(field);
        }
        self
    }

    /// Finish collection
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(self.missing))
        }
    }
}
