//! Error types for the sigcard-core library.

use thiserror::Error;

/// Main error type for the sigcard library.
#[derive(Error, Debug)]
pub enum SigcardError {
    /// The host could not provide the message body.
    #[error("failed to retrieve message body: {0}")]
    BodyRetrieval(String),

    /// No access token could be obtained for contact creation.
    #[error(
        "failed to acquire access token: {reason} (check that the app is granted the {scopes} scope(s))"
    )]
    TokenAcquisition { scopes: String, reason: String },

    /// The contact-creation API answered with a non-success status.
    #[error("contact creation failed with status {status}: {body}")]
    RemoteCreate { status: u16, body: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SigcardError {
    /// Build a token error for the requested scopes.
    pub fn token(scopes: &[String], reason: impl Into<String>) -> Self {
        Self::TokenAcquisition {
            scopes: scopes.join(", "),
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for SigcardError {
    fn from(err: reqwest::Error) -> Self {
        SigcardError::Http(Box::new(err))
    }
}

/// Errors raised while converting markup to text.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The converter could not process the document.
    #[error("conversion failed: {0}")]
    Conversion(String),
}

/// Result type for the sigcard library.
pub type Result<T> = std::result::Result<T, SigcardError>;
