use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for figure generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Invalid input for '{workload}': {reason}")]
    InvalidInput { workload: String, reason: String },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to write '{0}': {1}")]
    OutputError(PathBuf, #[source] std::io::Error),
}

impl PlotError {
    pub fn invalid_input(workload: &str, reason: impl Into<String>) -> Self {
        PlotError::InvalidInput {
            workload: workload.to_string(),
            reason: reason.into(),
        }
    }

    /// Wraps any plotting backend failure
    pub fn render(err: impl std::fmt::Display) -> Self {
        PlotError::RenderError(err.to_string())
    }
}

/// Type alias for Result with PlotError
pub type PlotResult<T> = Result<T, PlotError>;
