//! Daily price rows and the per-symbol table

use crate::error::{Result, StockError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day for one symbol
///
/// Field order matches the stored CSV header `date,open,high,low,close,volume`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A symbol's daily rows, strictly ascending by date
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    symbol: String,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Build a table, sorting rows by date.
    ///
    /// Fails on a repeated date, so the result is strictly ascending.
    pub fn new(symbol: impl Into<String>, mut rows: Vec<PriceRow>) -> Result<Self> {
        rows.sort_by_key(|r| r.date);
        if let Some(pair) = rows.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(StockError::DuplicateDate(pair[0].date));
        }

        Ok(Self {
            symbol: symbol.into(),
            rows,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows (fewer if the table is shorter)
    pub fn head(&self, n: usize) -> &[PriceRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Last `n` rows (fewer if the table is shorter)
    pub fn tail(&self, n: usize) -> &[PriceRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    pub fn into_rows(self) -> Vec<PriceRow> {
        self.rows
    }
}

#[cfg(test)]
pub(crate) fn row(date: &str, close: f64) -> PriceRow {
    PriceRow {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000.0,
    }
}
