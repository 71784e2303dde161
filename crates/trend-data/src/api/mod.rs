//! API clients for stock data providers

pub mod alpha_vantage;

pub use alpha_vantage::{AlphaVantageClient, TIME_SERIES_DAILY_KEY, parse_daily_payload};

use crate::{PriceTable, Result};
use async_trait::async_trait;

/// A provider of one symbol's daily price history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailySeriesSource: Send + Sync {
    /// Fetch the full daily series for `symbol`, ascending by date
    async fn fetch_daily(&self, symbol: &str) -> Result<PriceTable>;
}
