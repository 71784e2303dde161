//! Per-column standardization

use crate::error::{ModelError, Result};
use ndarray::{Array1, Array2, Axis};

/// Z-score scaler fitted on one matrix and applied to others
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Array1<f64>,
    stds: Array1<f64>,
}

impl StandardScaler {
    /// Learn column means and population standard deviations.
    ///
    /// Constant columns get a unit scale so they pass through centred.
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        let means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| ModelError::InsufficientData("cannot scale an empty matrix".into()))?;
        let stds = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > f64::EPSILON { s } else { 1.0 });

        Ok(Self { means, stds })
    }

    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.means.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.means.len(),
                got: x.ncols(),
            });
        }
        Ok((x - &self.means) / &self.stds)
    }

    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    pub fn stds(&self) -> &Array1<f64> {
        &self.stds
    }
}
