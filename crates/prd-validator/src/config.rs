use std::path::{Path, PathBuf};

use crate::error::AppError;

const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 1024 * 1024;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for the file-based tools. `None` disables them.
    pub documents_path: Option<String>,
    /// Largest document the file-based tools will read.
    pub max_document_bytes: u64,
}

impl Config {
    /// Optional:
    /// - `PRD_DOCUMENTS_PATH`: directory holding documents to score by path
    /// - `PRD_MAX_DOCUMENT_BYTES`: file size limit (default: 1 MiB)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let documents_path = lookup("PRD_DOCUMENTS_PATH");
        if let Some(path) = documents_path.as_deref() {
            if !Path::new(path).is_dir() {
                return Err(AppError::Config(format!(
                    "PRD_DOCUMENTS_PATH is not a directory: {path}"
                )));
            }
        }

        let max_document_bytes = match lookup("PRD_MAX_DOCUMENT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "PRD_MAX_DOCUMENT_BYTES must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_MAX_DOCUMENT_BYTES,
        };

        Ok(Self {
            documents_path,
            max_document_bytes,
        })
    }

    pub fn documents_path(&self) -> Option<PathBuf> {
        self.documents_path.as_deref().map(PathBuf::from)
    }
}
