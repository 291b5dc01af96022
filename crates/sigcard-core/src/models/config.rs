//! Configuration structures for signature scanning and contact creation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SigcardError};

/// Main configuration for sigcard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SigcardConfig {
    /// Signature extraction configuration.
    pub extraction: ExtractionConfig,

    /// Contact-creation API configuration.
    pub graph: GraphConfig,
}

/// Signature extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines inspected after a signature boundary marker.
    pub boundary_window: usize,

    /// Lines inspected at the end of the text when there is no marker.
    pub tail_window: usize,

    /// Capitalized tokens a line needs to be taken as a name.
    pub min_capitalized_tokens: usize,

    /// Minimum tokens on a name line.
    pub min_name_tokens: usize,

    /// Maximum tokens on a name line.
    pub max_name_tokens: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            boundary_window: 5,
            tail_window: 6,
            min_capitalized_tokens: 2,
            min_name_tokens: 2,
            max_name_tokens: 4,
        }
    }
}

/// Contact-creation API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Base URL of the contacts API.
    pub base_url: String,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// Scopes requested from the token provider.
    pub scopes: Vec<String>,

    /// Allow an interactive sign-in prompt when acquiring a token.
    pub allow_interactive: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: "https://graph.microsoft.com/v1.0".to_string(),
            timeout_secs: 30,
            scopes: vec!["Contacts.ReadWrite".to_string()],
            allow_interactive: true,
        }
    }
}

impl SigcardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SigcardError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
