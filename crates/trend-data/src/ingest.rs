//! Ingestion stage: fetch one symbol's daily series and persist it

use crate::api::DailySeriesSource;
use crate::error::Result;
use crate::price::PriceTable;
use crate::store::PriceStore;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Number of leading rows shown after a successful fetch
pub const PREVIEW_ROWS: usize = 5;

/// What a successful ingestion wrote
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub symbol: String,
    pub path: PathBuf,
    pub table: PriceTable,
}

impl IngestReport {
    pub fn rows(&self) -> usize {
        self.table.len()
    }

    /// The first rows of the saved table, for display
    pub fn preview(&self) -> &[crate::PriceRow] {
        self.table.head(PREVIEW_ROWS)
    }
}

/// Fetch `symbol` from `source` and write it to `store`.
///
/// The file is written only after the whole payload parsed; on any error
/// nothing touches the store.
#[instrument(skip(source, store), fields(data_dir = %store.data_dir().display()))]
pub async fn ingest(
    source: &dyn DailySeriesSource,
    store: &PriceStore,
    symbol: &str,
) -> Result<IngestReport> {
    let table = source.fetch_daily(symbol).await?;
    info!("Successfully fetched stock data for {}", symbol);

    let path = store.save(&table)?;
    info!("Data saved to: {}", path.display());

    Ok(IngestReport {
        symbol: symbol.to_string(),
        path,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockDailySeriesSource, parse_daily_payload};
    use crate::error::StockError;
    use crate::price::row;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_ingest_writes_all_rows() {
        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());

        let mut source = MockDailySeriesSource::new();
        source.expect_fetch_daily().times(1).returning(|symbol| {
            PriceTable::new(
                symbol,
                vec![
                    row("2024-01-03", 2.0),
                    row("2024-01-02", 1.0),
                    row("2024-01-04", 3.0),
                ],
            )
        });

        let report = ingest(&source, &store, "TSLA").await.unwrap();
        assert_eq!(report.rows(), 3);
        assert_eq!(report.path, store.path_for("TSLA"));

        let loaded = store.load("TSLA").unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(loaded.rows().windows(2).all(|w| w[0].date < w[1].date));
    }

    #[tokio::test]
    async fn test_http_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());

        let mut source = MockDailySeriesSource::new();
        source
            .expect_fetch_daily()
            .returning(|_| Err(StockError::HttpStatus { status: 500 }));

        let err = ingest(&source, &store, "TSLA").await.unwrap_err();
        assert!(matches!(err, StockError::HttpStatus { status: 500 }));
        assert!(!store.path_for("TSLA").exists());
    }

    #[tokio::test]
    async fn test_missing_series_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());

        let mut source = MockDailySeriesSource::new();
        source.expect_fetch_daily().returning(|symbol| {
            parse_daily_payload(symbol, json!({ "Information": "rate limit" }))
        });

        let err = ingest(&source, &store, "TSLA").await.unwrap_err();
        assert!(matches!(err, StockError::MissingTimeSeries { .. }));
        assert!(!store.path_for("TSLA").exists());
    }

    #[tokio::test]
    async fn test_preview_is_first_five_rows() {
        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());

        let mut source = MockDailySeriesSource::new();
        source.expect_fetch_daily().returning(|symbol| {
            let rows = (1..=9)
                .map(|d| row(&format!("2024-01-0{d}"), f64::from(d)))
                .collect();
            PriceTable::new(symbol, rows)
        });

        let report = ingest(&source, &store, "TSLA").await.unwrap();
        assert_eq!(report.preview().len(), PREVIEW_ROWS);
        assert_eq!(report.preview()[0].close, 1.0);
    }
}
