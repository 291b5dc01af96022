//! Signature scanner: markup normalization followed by field extraction.

use tracing::debug;

use crate::markup::{MarkupConverter, RawBody, RegexNormalizer};
use crate::models::config::ExtractionConfig;
use crate::models::contact::{ExtractionResult, SenderIdentity};

use super::rules::{FieldExtractor, NameGuesser, PhoneExtractor};
use super::ContactExtractor;

/// Outcome of scanning one message.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Extracted fields.
    pub result: ExtractionResult,
    /// Plain text the extractors ran on.
    pub text: String,
    /// True when markup conversion failed and the raw body was scanned.
    pub degraded: bool,
    /// Fields that could not be found, worded for the user.
    pub warnings: Vec<String>,
}

/// Scanner combining the markup converter, phone extractor and name guesser.
pub struct SignatureScanner {
    converter: Box<dyn MarkupConverter + Send + Sync>,
    phone: PhoneExtractor,
    names: NameGuesser,
}

impl SignatureScanner {
    /// Create a scanner with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a scanner from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            converter: Box::new(RegexNormalizer),
            phone: PhoneExtractor::new(),
            names: NameGuesser::from_config(config),
        }
    }

    /// Replace the markup converter.
    pub fn with_converter(mut self, converter: impl MarkupConverter + Send + Sync + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Scan a markup body and report the extracted fields.
    pub fn scan(&self, html: &str, sender: &SenderIdentity) -> ScanReport {
        let body = RawBody::convert(html, self.converter.as_ref());
        let result = self.extract(&body, sender);

        // A degraded conversion is only logged and flagged
        let mut warnings = Vec::new();
        if result.phone.is_empty() {
            warnings.push("no phone number found".to_string());
        }
        if result.full_name.is_empty() {
            warnings.push("no name found".to_string());
        }

        debug!(
            "scanned {} bytes of markup (degraded={}, {} warnings)",
            html.len(),
            body.degraded,
            warnings.len()
        );

        ScanReport {
            result,
            text: body.text,
            degraded: body.degraded,
            warnings,
        }
    }
}

impl Default for SignatureScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor for SignatureScanner {
    fn extract(&self, body: &RawBody, sender: &SenderIdentity) -> ExtractionResult {
        self.extract_from_text(&body.text, sender)
    }

    fn extract_from_text(&self, text: &str, sender: &SenderIdentity) -> ExtractionResult {
        let phone = self
            .phone
            .extract(text)
            .map(|m| m.value)
            .unwrap_or_default();

        let full_name = match self.names.extract(text) {
            Some(m) => {
                debug!("signature name found: {:?}", m.value);
                m.value
            }
            None => {
                debug!("no signature name, falling back to sender display name");
                sender.name.clone()
            }
        };

        ExtractionResult {
            full_name,
            phone,
            email: sender.email.clone(),
        }
    }
}

/// Scan a markup body with default settings.
pub fn scan(html: &str, sender: &SenderIdentity) -> ExtractionResult {
    SignatureScanner::new().scan(html, sender).result
}
