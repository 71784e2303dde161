//! Logistic regression for next-day direction
//!
//! Batch gradient descent on mean log loss with an L2 penalty. The penalty is
//! expressed through the inverse strength `C`, so the objective per sample is
//! `log_loss + ||w||² / (2·C·n)`, the scaling used by common library defaults.
//!
//! The penalty is applied as a proximal shrink `w / (1 + lr·alpha)` after each
//! loss step, which stays stable for any `C > 0`.

use crate::error::{ModelError, Result};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Binary logistic regression classifier
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Fitted coefficients
    pub coefficients: Option<Array1<f64>>,
    /// Intercept term
    pub intercept: Option<f64>,
    /// Inverse regularization strength
    c: f64,
    /// Learning rate
    learning_rate: f64,
    /// Maximum iterations
    max_iter: usize,
    /// Convergence tolerance on the change in cost
    tolerance: f64,
    /// Cost history during training
    pub cost_history: Vec<f64>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(1.0, 0.1, 1000, 1e-6)
    }
}

impl LogisticRegression {
    /// Create a new, unfitted model
    pub fn new(c: f64, learning_rate: f64, max_iter: usize, tolerance: f64) -> Self {
        Self {
            coefficients: None,
            intercept: None,
            c,
            learning_rate,
            max_iter,
            tolerance,
            cost_history: Vec::new(),
        }
    }

    /// Sigmoid activation function
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    /// Compute log loss (binary cross-entropy)
    fn log_loss(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let eps = 1e-15;
        let n = y_true.len() as f64;

        -y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&y, &p)| {
                let p = p.clamp(eps, 1.0 - eps);
                y * p.ln() + (1.0 - y) * (1.0 - p).ln()
            })
            .sum::<f64>()
            / n
    }

    /// Fit using gradient descent
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if self.c <= 0.0 || self.learning_rate <= 0.0 {
            return Err(ModelError::InvalidParameter(
                "C and learning rate must be positive".to_string(),
            ));
        }
        if x.nrows() == 0 {
            return Err(ModelError::InsufficientData(
                "cannot fit on zero samples".to_string(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(ModelError::DimensionMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }

        let n_samples = x.nrows() as f64;
        let alpha = 1.0 / (self.c * n_samples);

        let mut weights = Array1::<f64>::zeros(x.ncols());
        let mut bias = 0.0;

        self.cost_history.clear();

        for iter in 0..self.max_iter {
            let predictions = (x.dot(&weights) + bias).mapv(Self::sigmoid);

            let errors = &predictions - y;
            let dw = x.t().dot(&errors) / n_samples;
            let db = errors.sum() / n_samples;

            weights = (&weights - &(dw * self.learning_rate)) / (1.0 + self.learning_rate * alpha);
            bias -= self.learning_rate * db;

            let penalty = alpha / 2.0 * weights.dot(&weights);
            let cost = Self::log_loss(y, &predictions) + penalty;
            if !cost.is_finite() || weights.iter().any(|w| !w.is_finite()) {
                return Err(ModelError::Diverged { iteration: iter });
            }
            self.cost_history.push(cost);

            if iter > 0 && (self.cost_history[iter - 1] - cost).abs() < self.tolerance {
                debug!("Converged at iteration {}", iter);
                break;
            }
        }

        self.coefficients = Some(weights);
        self.intercept = Some(bias);

        Ok(())
    }

    /// Predict probabilities of the positive class
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let weights = self
            .coefficients
            .as_ref()
            .ok_or(ModelError::NotFitted)?;
        let bias = self.intercept.ok_or(ModelError::NotFitted)?;

        if x.ncols() != weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: weights.len(),
                got: x.ncols(),
            });
        }

        Ok((x.dot(weights) + bias).mapv(Self::sigmoid))
    }

    /// Predict class labels (0.0 or 1.0) at threshold 0.5
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba(x)?;
        Ok(proba.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }

    /// Get model summary
    pub fn summary(&self, feature_names: &[&str]) -> String {
        let Some(coef) = &self.coefficients else {
            return "Model not fitted yet.\n".to_string();
        };

        let mut s = format!("Intercept: {:.6}\n", self.intercept.unwrap_or(0.0));
        s.push_str("Coefficients (log-odds, standardized features):\n");
        for (name, &c) in feature_names.iter().zip(coef.iter()) {
            s.push_str(&format!("  {name:10}: {c:>10.6} (OR: {:.4})\n", c.exp()));
        }
        s.push_str(&format!(
            "Iterations: {}, final cost: {:.6}\n",
            self.cost_history.len(),
            self.cost_history.last().copied().unwrap_or(0.0)
        ));
        s
    }
}
