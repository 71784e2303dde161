//! CSV persistence for price tables
//!
//! One file per symbol, `<SYMBOL>_stock_data.csv`, header
//! `date,open,high,low,close,volume`, ascending by date.

use crate::error::{Result, StockError};
use crate::price::{PriceRow, PriceTable};
use csv::{Reader, WriterBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column header of every price file
pub const CSV_HEADER: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Directory-backed store of per-symbol price files
#[derive(Debug, Clone)]
pub struct PriceStore {
    data_dir: PathBuf,
}

impl PriceStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File name used for `symbol`
    pub fn file_name(symbol: &str) -> String {
        format!("{symbol}_stock_data.csv")
    }

    /// Full path of the file for `symbol`
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(Self::file_name(symbol))
    }

    /// Write the table, replacing any previous file for the symbol
    pub fn save(&self, table: &PriceTable) -> Result<PathBuf> {
        let path = self.path_for(table.symbol());

        // Header is written up front so an empty table still yields it
        let mut writer = WriterBuilder::new().has_headers(false).from_path(&path)?;
        writer.write_record(CSV_HEADER)?;
        for row in table.rows() {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|source| StockError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} rows to {}", table.len(), path.display());
        Ok(path)
    }

    /// Read the table previously saved for `symbol`
    pub fn load(&self, symbol: &str) -> Result<PriceTable> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(StockError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: format!("{} not found, run the fetch stage first", path.display()),
            });
        }

        let mut reader = Reader::from_path(&path)?;
        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<PriceRow>, _>>()?;

        debug!("Read {} rows from {}", rows.len(), path.display());
        PriceTable::new(symbol, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::row;
    use tempfile::tempdir;

    #[test]
    fn test_file_naming() {
        let store = PriceStore::new("/data");
        assert_eq!(PriceStore::file_name("TSLA"), "TSLA_stock_data.csv");
        assert_eq!(
            store.path_for("TSLA"),
            PathBuf::from("/data/TSLA_stock_data.csv")
        );
    }

    #[test]
    fn test_saved_file_layout() {
        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());
        let table = PriceTable::new(
            "TSLA",
            vec![row("2024-01-03", 238.45), row("2024-01-02", 248.42)],
        )
        .unwrap();

        let path = store.save(&table).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "date,open,high,low,close,volume");
        assert!(lines[1].starts_with("2024-01-02,"));
        assert!(lines[2].starts_with("2024-01-03,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());
        let table = crate::parse_daily_payload(
            "TSLA",
            serde_json::json!({ "Time Series (Daily)": {} }),
        )
        .unwrap();

        let path = store.save(&table).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.trim_end(), "date,open,high,low,close,volume");

        let loaded = store.load("TSLA").unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_reads_back_table() {
        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());
        let table = PriceTable::new(
            "TSLA",
            vec![row("2024-01-02", 100.0), row("2024-01-03", 105.0)],
        )
        .unwrap();
        store.save(&table).unwrap();

        let loaded = store.load("TSLA").unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());

        let err = store.load("NOPE").unwrap_err();
        assert!(matches!(err, StockError::DataUnavailable { .. }));
    }
}
