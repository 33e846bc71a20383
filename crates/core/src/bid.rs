//! Bid data structures
//!
//! A bid is sealed by the service: the uploaded document is encrypted and a
//! digest is computed server-side. The client only ever sees the opaque
//! `bidderId` and the hex `bidHash`, and must display both verbatim.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::validation::{Field, RequiredFields, ValidationError};

/// A sealed bid as listed by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    /// Server-assigned opaque identifier
    pub bidder_id: String,

    /// Tender this bid answers
    pub tender_id: String,

    #[serde(default)]
    pub bid_summary: String,

    /// Hex digest computed by the service
    #[serde(default)]
    pub bid_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A document attached to a bid before sealing
#[derive(Clone, PartialEq, Eq)]
pub struct BidDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl BidDocument {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// SHA-256 of the plaintext document, for the uploader's own records
    ///
    /// This is not the sealed `bidHash`, which the service computes over the
    /// encrypted content.
    pub fn sha256_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

impl fmt::Debug for BidDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BidDocument")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A validated seal request
///
/// Can only be constructed with a non-blank tender ID, a non-empty document
/// and a non-blank summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealRequest {
    tender_id: String,
    bid_summary: String,
    document: BidDocument,
}

impl SealRequest {
    pub fn new(
        tender_id: &str,
        bid_summary: &str,
        document: Option<&BidDocument>,
    ) -> Result<Self, ValidationError> {
        RequiredFields::new()
            .text(Field::TenderId, tender_id)
            .present(Field::Document, document.is_some_and(|d| !d.is_empty()))
            .text(Field::BidSummary, bid_summary)
            .finish()?;

        let document = document
            .cloned()
            .ok_or(ValidationError::MissingFields(vec![Field::Document]))?;

        Ok(Self {
            tender_id: tender_id.trim().to_string(),
            bid_summary: bid_summary.to_string(),
            document,
        })
    }

    pub fn tender_id(&self) -> &str {
        &self.tender_id
    }

    pub fn bid_summary(&self) -> &str {
        &self.bid_summary
    }

    pub fn document(&self) -> &BidDocument {
        &self.document
    }
}

/// Result of sealing a bid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealReceipt {
    pub bidder_id: String,
    pub bid_hash: String,

    /// Whether the service scheduled its automatic notifications
    #[serde(default)]
    pub automated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> BidDocument {
        BidDocument::new("bid.pdf", b"%PDF-1.7 bid".to_vec()).with_content_type("application/pdf")
    }

    #[test]
    fn test_seal_request_valid() {
        let doc = document();
        let request = SealRequest::new(" TENDER-1 ", "We deliver in 20 days", Some(&doc)).unwrap();

        assert_eq!(request.tender_id(), "TENDER-1");
        assert_eq!(request.bid_summary(), "We deliver in 20 days");
        assert_eq!(request.document().file_name, "bid.pdf");
    }

    #[test]
    fn test_seal_request_lists_every_missing_field() {
        let err = SealRequest::new("", "", None).unwrap_err();
        assert_eq!(
            err.missing_fields(),
            &[Field::TenderId, Field::Document, Field::BidSummary]
        );
    }

    #[test]
    fn test_seal_request_rejects_empty_document() {
        let empty = BidDocument::new("empty.pdf", Vec::new());
        let err = SealRequest::new("TENDER-1", "summary", Some(&empty)).unwrap_err();
        assert_eq!(err.missing_fields(), &[Field::Document]);
    }

    #[test]
    fn test_receipt_deserialization() {
        let json = r#"{
            "success": true,
            "bidHash": "ab12cd",
            "message": "Bid sealed with AES-256 encryption. Notification sent.",
            "bidderId": "5f0c1e9e-8d7b-4f62-a3c3-1f1f0b0e9a01",
            "automated": true
        }"#;

        let receipt: SealReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.bidder_id, "5f0c1e9e-8d7b-4f62-a3c3-1f1f0b0e9a01");
        assert_eq!(receipt.bid_hash, "ab12cd");
        assert!(receipt.automated);
    }

    #[test]
    fn test_bid_listing_without_document() {
        let json = r#"[{"bidderId":"b-1","tenderId":"T-1","bidSummary":"s","bidHash":"h"}]"#;
        let bids: Vec<Bid> = serde_json::from_str(json).unwrap();
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].bid_summary, "s");
        assert!(bids[0].timestamp.is_none());
    }

    #[test]
    fn test_document_digest_and_debug() {
        let doc = BidDocument::new("a.txt", b"abc".to_vec());
        assert_eq!(
            doc.sha256_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        let debug = format!("{:?}", doc);
        assert!(debug.contains("len: 3"));
        assert!(!debug.contains("bytes"));
    }
}
