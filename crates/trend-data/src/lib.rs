//! Daily price ingestion for trendcast
//!
//! This crate covers the first pipeline stage and the shared price table:
//!
//! - [`PriceRow`] / [`PriceTable`]: one symbol's daily OHLCV rows, ascending by date
//! - [`AlphaVantageClient`]: single-shot `TIME_SERIES_DAILY` fetch
//! - [`PriceStore`]: the `<SYMBOL>_stock_data.csv` file read by later stages
//! - [`ingest`]: the fetch-then-persist stage itself

pub mod api;
pub mod display;
pub mod error;
pub mod ingest;
pub mod price;
pub mod store;

pub use api::{AlphaVantageClient, DailySeriesSource, parse_daily_payload};
pub use error::{Result, StockError};
pub use ingest::{IngestReport, ingest};
pub use price::{PriceRow, PriceTable};
pub use store::PriceStore;
