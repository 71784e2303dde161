//! Next-day direction classifier for trendcast
//!
//! The second pipeline stage: label each day by whether the following close
//! was higher, split into train/test partitions, fit a logistic regression on
//! `close` and `volume`, and report accuracy with a confusion matrix.
//!
//! ```ignore
//! use trend_model::{EvaluationConfig, evaluate};
//!
//! let table = store.load("TSLA")?;
//! let evaluation = evaluate(&table, &EvaluationConfig::default())?;
//! println!("Model Accuracy: {:.2}", evaluation.accuracy);
//! println!("{}", trend_model::render_confusion_matrix(&evaluation.confusion));
//! ```

pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod label;
pub mod logistic;
pub mod metrics;
pub mod render;
pub mod scaler;

pub use dataset::{Dataset, FEATURE_NAMES, SplitStrategy};
pub use error::{ModelError, Result};
pub use evaluate::{Evaluation, EvaluationConfig, evaluate};
pub use label::{LabeledRow, label_rows};
pub use logistic::LogisticRegression;
pub use metrics::{ConfusionMatrix, accuracy};
pub use render::render_confusion_matrix;
pub use scaler::StandardScaler;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use trend_data::PriceRow;

    pub(crate) fn price(date: &str, close: f64, volume: f64) -> PriceRow {
        PriceRow {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    /// Consecutive calendar days starting 2024-01-01
    pub(crate) fn series(closes: &[f64]) -> Vec<PriceRow> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceRow {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000.0 + i as f64,
            })
            .collect()
    }
}
