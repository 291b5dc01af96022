//! Contact field extraction from message bodies.

mod scanner;
pub mod rules;

pub use scanner::{scan, ScanReport, SignatureScanner};

use crate::markup::RawBody;
use crate::models::contact::{ExtractionResult, SenderIdentity};

/// Trait for contact field extractors.
pub trait ContactExtractor {
    /// Extract contact fields from a converted message body.
    fn extract(&self, body: &RawBody, sender: &SenderIdentity) -> ExtractionResult;

    /// Extract contact fields from plain text.
    fn extract_from_text(&self, text: &str, sender: &SenderIdentity) -> ExtractionResult;
}
