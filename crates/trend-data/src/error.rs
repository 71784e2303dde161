//! Error types for price ingestion and storage

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching, parsing or persisting price data
#[derive(Debug, Error)]
pub enum StockError {
    /// Quote API answered with a non-success HTTP status
    #[error("API request failed. Status code: {status}")]
    HttpStatus { status: u16 },

    /// Response parsed, but carried no daily time series
    ///
    /// Alpha Vantage reports quota and key problems this way, so the raw
    /// payload is kept for the operator.
    #[error("Response received, but no time series data found")]
    MissingTimeSeries { payload: serde_json::Value },

    /// Time series was present but not a JSON object
    #[error("Malformed time series payload: {0}")]
    MalformedPayload(String),

    /// A numeric field could not be coerced
    #[error("Invalid {field} value '{value}' on {date}")]
    InvalidField {
        date: String,
        field: &'static str,
        value: String,
    },

    /// A date key could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The same date appeared twice in one table
    #[error("Duplicate date {0} in price table")]
    DuplicateDate(NaiveDate),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Filesystem error
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for price data operations
pub type Result<T> = std::result::Result<T, StockError>;
