//! Feature matrix construction and train/test splitting

use crate::error::{ModelError, Result};
use crate::label::LabeledRow;
use ndarray::{Array1, Array2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use trend_data::PriceRow;

/// Column order of the feature matrix
pub const FEATURE_NAMES: [&str; 2] = ["close", "volume"];

/// How rows are assigned to the train and test partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Seeded random permutation; ignores time order, so test rows can
    /// predate training rows
    Shuffled { seed: u64 },
    /// Oldest rows train, newest rows test
    Chronological,
}

impl Default for SplitStrategy {
    fn default() -> Self {
        Self::Shuffled { seed: 42 }
    }
}

/// Features and labels for a set of days
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature matrix (n_samples x 2), columns per [`FEATURE_NAMES`]
    pub x: Array2<f64>,
    /// Labels, 0.0 or 1.0
    pub y: Array1<f64>,
    /// Source row of each sample
    pub rows: Vec<PriceRow>,
}

impl Dataset {
    /// Build `[close, volume] -> target` samples from labeled rows
    pub fn from_labeled(labeled: &[LabeledRow]) -> Self {
        let x = Array2::from_shape_fn((labeled.len(), FEATURE_NAMES.len()), |(i, j)| {
            let row = &labeled[i].row;
            if j == 0 { row.close } else { row.volume }
        });
        let y = labeled.iter().map(|l| f64::from(l.target)).collect();
        let rows = labeled.iter().map(|l| l.row).collect();

        Self { x, y, rows }
    }

    /// Get number of samples
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Get number of features
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Copy out the samples at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            rows: indices.iter().map(|&i| self.rows[i]).collect(),
        }
    }

    /// Split into `(train, test)` partitions.
    ///
    /// The test partition gets `ceil(test_ratio * n)` samples. Both partitions
    /// must end up non-empty.
    pub fn train_test_split(
        &self,
        test_ratio: f64,
        strategy: SplitStrategy,
    ) -> Result<(Dataset, Dataset)> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(ModelError::InvalidParameter(format!(
                "test ratio must be in (0, 1), got {test_ratio}"
            )));
        }

        let n = self.n_samples();
        let n_test = (test_ratio * n as f64).ceil() as usize;
        let n_train = n.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(ModelError::InsufficientData(format!(
                "{n} labeled rows cannot fill both train and test partitions"
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let (train_idx, test_idx) = match strategy {
            SplitStrategy::Shuffled { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                indices.shuffle(&mut rng);
                let (test, train) = indices.split_at(n_test);
                (train.to_vec(), test.to_vec())
            }
            SplitStrategy::Chronological => {
                let (train, test) = indices.split_at(n_train);
                (train.to_vec(), test.to_vec())
            }
        };

        Ok((self.select(&train_idx), self.select(&test_idx)))
    }
}
