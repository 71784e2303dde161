//! Error types for the narration stage

use thiserror::Error;

/// Result type for narration operations
pub type Result<T> = std::result::Result<T, NarrateError>;

/// Failures that stop narration before a summary can be produced
///
/// Completion errors are not listed here: they turn into the fallback summary.
#[derive(Error, Debug)]
pub enum NarrateError {
    /// Price file missing or unreadable
    #[error(transparent)]
    Data(#[from] trend_data::StockError),

    /// Nothing to summarize
    #[error("No price rows available for {0}")]
    EmptyTable(String),

    /// Template rendering failed
    #[error("Failed to render prompt template: {0}")]
    Template(#[from] minijinja::Error),
}
