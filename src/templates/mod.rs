//! Template store: one `<type>.txt` file per report type.
//!
//! Templates are read fresh on every request and never written back.

pub mod parser;

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::constants::TEMPLATE_EXTENSION;

pub use parser::parse_template;

/// Errors from locating, reading or parsing a template.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Report '{0}' is not supported")]
    Unsupported(String),

    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Directory-backed template lookup.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve the file path for a report type.
    ///
    /// Report types come straight from a URL path segment, so anything that
    /// is not a plain file-name token (ASCII alphanumerics, `-`, `_`) is
    /// rejected rather than joined onto the directory.
    pub fn path_for(&self, report_type: &str) -> Result<PathBuf, TemplateError> {
        let valid = !report_type.is_empty()
            && report_type
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TemplateError::Unsupported(report_type.to_string()));
        }
        Ok(self
            .dir
            .join(format!("{report_type}.{TEMPLATE_EXTENSION}")))
    }

    /// Read the raw text of a report type's template.
    ///
    /// A missing file means the report type is unsupported. Any other I/O
    /// failure is reported as a read error.
    pub async fn read(&self, report_type: &str) -> Result<String, TemplateError> {
        let path = self.path_for(report_type)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TemplateError::Unsupported(report_type.to_string()))
            }
            Err(source) => Err(TemplateError::Read { path, source }),
        }
    }

    /// Read and parse a report type's template.
    pub async fn load(&self, report_type: &str) -> Result<Value, TemplateError> {
        let content = self.read(report_type).await?;
        parse_template(&content)
    }
}
