//! Error types shared across the crate

use thiserror::Error;

/// Errors raised outside the projection engine itself.
///
/// The engine is total over finite inputs; these cover input collection,
/// scenario loading and report export.
#[derive(Debug, Error)]
pub enum SwpError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("report generation failed: {0}")]
    Report(String),
}

impl SwpError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SwpError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SwpError>;
