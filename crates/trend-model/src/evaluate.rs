//! Labeling and evaluation stage

use crate::dataset::{Dataset, FEATURE_NAMES, SplitStrategy};
use crate::error::{ModelError, Result};
use crate::label::label_rows;
use crate::logistic::LogisticRegression;
use crate::metrics::ConfusionMatrix;
use crate::scaler::StandardScaler;
use tracing::{info, instrument, warn};
use trend_data::PriceTable;

/// Settings for one evaluation run
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Share of labeled rows held out for testing
    pub test_ratio: f64,
    pub split: SplitStrategy,
    /// Inverse L2 regularization strength
    pub c: f64,
    pub learning_rate: f64,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            split: SplitStrategy::default(),
            c: 1.0,
            learning_rate: 0.1,
            max_iter: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Result of fitting and scoring the classifier
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Labeled rows after dropping the last day
    pub labeled_rows: usize,
    pub train_size: usize,
    pub test_size: usize,
    /// Correct predictions over the test partition, in [0, 1]
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub model: LogisticRegression,
}

impl Evaluation {
    pub fn model_summary(&self) -> String {
        self.model.summary(&FEATURE_NAMES)
    }
}

/// Label `table`, split it, fit on the train partition and score the test one.
#[instrument(skip(table, config), fields(symbol = table.symbol(), rows = table.len()))]
pub fn evaluate(table: &PriceTable, config: &EvaluationConfig) -> Result<Evaluation> {
    let labeled = label_rows(table.rows());
    if labeled.len() < 2 {
        return Err(ModelError::InsufficientData(format!(
            "{} rows give {} labeled samples, need at least 2",
            table.len(),
            labeled.len()
        )));
    }

    if matches!(config.split, SplitStrategy::Shuffled { .. }) {
        warn!("Random train/test split ignores time order; test days may precede training days");
    }

    let dataset = Dataset::from_labeled(&labeled);
    let (train, test) = dataset.train_test_split(config.test_ratio, config.split)?;
    info!(
        "Split {} labeled rows into {} train / {} test",
        labeled.len(),
        train.n_samples(),
        test.n_samples()
    );

    let scaler = StandardScaler::fit(&train.x)?;
    let x_train = scaler.transform(&train.x)?;
    let x_test = scaler.transform(&test.x)?;

    let mut model = LogisticRegression::new(
        config.c,
        config.learning_rate,
        config.max_iter,
        config.tolerance,
    );
    model.fit(&x_train, &train.y)?;

    let y_pred = model.predict(&x_test)?;
    let confusion = ConfusionMatrix::from_predictions(&test.y, &y_pred);
    let accuracy = confusion.accuracy();
    info!("Model accuracy {:.4} on {} test rows", accuracy, test.n_samples());

    Ok(Evaluation {
        labeled_rows: labeled.len(),
        train_size: train.n_samples(),
        test_size: test.n_samples(),
        accuracy,
        confusion,
        model,
    })
}
