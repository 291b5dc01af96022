//! Markup-to-text conversion for message bodies.

mod normalizer;

pub use normalizer::{normalize, RegexNormalizer};

use tracing::warn;

use crate::error::NormalizeError;

/// Result type for markup conversion.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Trait for markup-to-text converters.
pub trait MarkupConverter {
    /// Convert a markup document to plain text.
    fn to_text(&self, html: &str) -> Result<String>;
}

/// A message body with its plain-text rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody {
    /// Markup as delivered by the host.
    pub html: String,
    /// Plain text used by the extractors.
    pub text: String,
    /// True when conversion failed and `text` is the raw markup.
    pub degraded: bool,
}

impl RawBody {
    /// Convert a body with the regex normalizer.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self::convert(html, &RegexNormalizer)
    }

    /// Convert a body with the given converter.
    ///
    /// A conversion failure does not abort: the raw markup is kept as the
    /// text so extraction still runs, and the body is flagged as degraded.
    pub fn convert(html: impl Into<String>, converter: &dyn MarkupConverter) -> Self {
        let html = html.into();

        match converter.to_text(&html) {
            Ok(text) => Self {
                html,
                text,
                degraded: false,
            },
            Err(e) => {
                warn!("markup conversion failed, scanning raw body: {}", e);
                Self {
                    text: html.clone(),
                    html,
                    degraded: true,
                }
            }
        }
    }
}
