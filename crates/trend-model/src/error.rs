//! Error types for the evaluation stage

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while preparing data or fitting the classifier
#[derive(Error, Debug)]
pub enum ModelError {
    /// Too few rows to label, split or fit
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Model used before `fit`
    #[error("Model has not been fitted yet")]
    NotFitted,

    /// Feature matrix width does not match the fitted model
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Gradient descent produced a non-finite cost or weight
    #[error("Training diverged at iteration {iteration}")]
    Diverged { iteration: usize },

    /// Hyperparameter out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
