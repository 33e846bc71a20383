//! Tender data structures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{is_blank, Field, RequiredFields, ValidationError};

/// A published tender, read-only from the client's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    /// Caller-supplied unique identifier (e.g. `TENDER-2025-001`)
    pub tender_id: String,

    /// Official requirement text, the source of truth for compliance checks
    #[serde(default)]
    pub requirements: String,

    /// Budget ceiling, transported as a JSON number
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub budget: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Tender {
    pub fn new(tender_id: impl Into<String>, requirements: impl Into<String>) -> Self {
        Self {
            tender_id: tender_id.into(),
            requirements: requirements.into(),
            budget: None,
            description: None,
            deadline: None,
            status: None,
        }
    }

    pub fn with_budget(mut self, budget: Decimal) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Payload for creating a new tender
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderDraft {
    pub tender_id: String,
    pub description: String,
    pub requirements: String,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub budget: Option<Decimal>,

    #[serde(default)]
    pub deadline: Option<String>,
}

impl TenderDraft {
    /// Check required fields and the budget range
    pub fn validate(&self) -> Result<(), ValidationError> {
        RequiredFields::new()
            .text(Field::TenderId, &self.tender_id)
            .text(Field::Description, &self.description)
            .text(Field::Requirements, &self.requirements)
            .finish()?;

        if let Some(budget) = self.budget {
            if budget < Decimal::ZERO {
                return Err(ValidationError::invalid(
                    Field::Budget,
                    "must not be negative",
                ));
            }
        }

        Ok(())
    }

    /// Blank deadlines are sent as absent
    pub fn normalized(mut self) -> Self {
        if self.deadline.as_deref().is_some_and(is_blank) {
            self.deadline = None;
        }
        self
    }
}

/// Server acknowledgement of a created tender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderReceipt {
    /// SHA-256 of the tender content, computed by the service
    pub update_hash: String,
    pub timestamp: String,
}
