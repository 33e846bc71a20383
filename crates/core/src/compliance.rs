//! Compliance check request and result
//!
//! The service answers with free-text analysis plus a violation list. The
//! verdict is read from the list alone: the sentinel below as the only
//! element means compliant, anything else means violations. This couples the
//! client to a literal string produced by the service; an explicit boolean
//! from the service would replace [`ComplianceResult::verdict`] only.

use serde::{Deserialize, Serialize};

use crate::validation::{Field, RequiredFields, ValidationError};

/// Sole-element marker of a compliant result
pub const NO_VIOLATIONS_SENTINEL: &str = "No violations detected";

/// A validated compliance check request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequest {
    tender_requirements: String,
    bid_summary: String,
}

impl ComplianceRequest {
    pub fn new(tender_requirements: &str, bid_summary: &str) -> Result<Self, ValidationError> {
        RequiredFields::new()
            .text(Field::Requirements, tender_requirements)
            .text(Field::BidSummary, bid_summary)
            .finish()?;

        Ok(Self {
            tender_requirements: tender_requirements.to_string(),
            bid_summary: bid_summary.to_string(),
        })
    }

    pub fn tender_requirements(&self) -> &str {
        &self.tender_requirements
    }

    pub fn bid_summary(&self) -> &str {
        &self.bid_summary
    }
}

/// Outcome classification of a compliance result
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Verdict {
    #[strum(to_string = "Compliant")]
    Compliant,
    #[strum(to_string = "Violations Detected")]
    ViolationsDetected,
}

/// Analysis returned by the compliance service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub analysis: String,
    #[serde(default)]
    pub violations: Vec<String>,
}

impl ComplianceResult {
    pub fn verdict(&self) -> Verdict {
        match self.violations.as_slice() {
            [only] if only == NO_VIOLATIONS_SENTINEL => Verdict::Compliant,
            _ => Verdict::ViolationsDetected,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.verdict() == Verdict::Compliant
    }
}

/// Whether a single violation line is the compliant marker
pub fn is_sentinel(violation: &str) -> bool {
    violation == NO_VIOLATIONS_SENTINEL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(violations: &[&str]) -> ComplianceResult {
        ComplianceResult {
            analysis: "analysis".to_string(),
            violations: violations.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_sentinel_only_is_compliant() {
        assert_eq!(result(&["No violations detected"]).verdict(), Verdict::Compliant);
    }

    #[test]
    fn test_any_violation_is_non_compliant() {
        assert_eq!(
            result(&["Missing ISO certification"]).verdict(),
            Verdict::ViolationsDetected
        );
        assert_eq!(
            result(&["No violations detected", "Late delivery"]).verdict(),
            Verdict::ViolationsDetected
        );
    }

    #[test]
    fn test_empty_list_is_non_compliant() {
        assert!(!result(&[]).is_compliant());
    }

    #[test]
    fn test_verdict_ignores_analysis_text() {
        let r = ComplianceResult {
            analysis: "No violations detected".to_string(),
            violations: vec!["Missing ISO certification".to_string()],
        };
        assert!(!r.is_compliant());
    }

    #[test]
    fn test_sentinel_is_case_sensitive() {
        assert!(!result(&["no violations detected"]).is_compliant());
        assert!(is_sentinel(NO_VIOLATIONS_SENTINEL));
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = ComplianceRequest::new("ISO 9001", "We hold ISO 9001").unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tenderRequirements"], "ISO 9001");
        assert_eq!(value["bidSummary"], "We hold ISO 9001");
    }

    #[test]
    fn test_request_requires_both_fields() {
        let err = ComplianceRequest::new("", "summary").unwrap_err();
        assert_eq!(err.missing_fields(), &[Field::Requirements]);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Compliant.to_string(), "Compliant");
        assert_eq!(Verdict::ViolationsDetected.to_string(), "Violations Detected");
    }
}
