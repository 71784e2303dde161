//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Ticker used when nothing else is configured
pub const DEFAULT_SYMBOL: &str = "TSLA";

/// Chat model used by the narration stage
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Load variables from a local `.env` file into the process environment.
///
/// Variables already present in the environment are not overwritten. Returns
/// the loaded path, or the reason nothing was loaded (usually a missing file).
/// Runs before tracing is installed, so callers log the outcome themselves.
pub fn load_dotenv() -> std::result::Result<PathBuf, dotenvy::Error> {
    dotenvy::dotenv()
}

/// Log the outcome of [`load_dotenv`]
pub fn report_dotenv(outcome: &std::result::Result<PathBuf, dotenvy::Error>) {
    match outcome {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

/// Settings shared by the fetch, train and narrate stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ticker symbol the pipeline works on
    pub symbol: String,
    /// Directory holding `<SYMBOL>_stock_data.csv`
    pub data_dir: PathBuf,
    /// Alpha Vantage credential (`ALPHA_API_KEY`)
    ///
    /// Not validated here; an absent key surfaces as an API-side error.
    #[serde(skip_serializing)]
    pub alpha_api_key: Option<String>,
    /// Model identifier for the completion endpoint
    pub openai_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            data_dir: PathBuf::from("."),
            alpha_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables
    ///
    /// Reads `TRENDCAST_SYMBOL`, `TRENDCAST_DATA_DIR`, `ALPHA_API_KEY` and
    /// `OPENAI_MODEL`; unset variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            symbol: non_empty("TRENDCAST_SYMBOL")
                .map_or(defaults.symbol, |s| s.trim().to_uppercase()),
            data_dir: non_empty("TRENDCAST_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            alpha_api_key: lookup("ALPHA_API_KEY"),
            openai_model: non_empty("OPENAI_MODEL").unwrap_or(defaults.openai_model),
        }
    }

    /// Override the ticker symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into().trim().to_uppercase();
        self
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Override the completion model
    pub fn with_openai_model(mut self, model: impl Into<String>) -> Self {
        self.openai_model = model.into();
        self
    }
}
