//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod create;
pub mod scan;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tracing::debug;

use sigcard_core::client::MessageBodyProvider;
use sigcard_core::{SigcardConfig, SigcardError};

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sigcard")
        .join("config.json")
}

/// Resolve the configuration file path from the global flag.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SigcardConfig> {
    if let Some(path) = config_path {
        return Ok(SigcardConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(SigcardConfig::from_file(&path)?)
    } else {
        Ok(SigcardConfig::default())
    }
}

/// Message body read from a file, or from stdin when the path is `-`.
pub struct FileBody {
    path: PathBuf,
}

impl FileBody {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MessageBodyProvider for FileBody {
    async fn get_body(&self) -> sigcard_core::Result<String> {
        let read = if self.path == Path::new("-") {
            let mut body = String::new();
            tokio::io::stdin().read_to_string(&mut body).await.map(|_| body)
        } else {
            tokio::fs::read_to_string(&self.path).await
        };

        read.map_err(|e| SigcardError::BodyRetrieval(format!("{}: {}", self.path.display(), e)))
    }
}
