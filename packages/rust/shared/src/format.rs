//! Input document formats accepted by the loaders (answers, catalogs).

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Result, ScopewiseError};

/// A structured document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Infer the format from a path's extension (`.json` or `.toml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ScopewiseError::validation(format!(
                "unsupported file type for {}: expected .json or .toml",
                path.display()
            ))),
        }
    }

    /// Parse `content` as this format.
    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        match self {
            Self::Json => serde_json::from_str(content)
                .map_err(|e| ScopewiseError::parse(format!("invalid JSON: {e}"))),
            Self::Toml => toml::from_str(content)
                .map_err(|e| ScopewiseError::parse(format!("invalid TOML: {e}"))),
        }
    }
}

/// Read and parse a JSON or TOML file, format chosen by extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| ScopewiseError::io(path, e))?;
    tracing::debug!(path = %path.display(), ?format, bytes = content.len(), "read document");
    format.parse(&content)
}
