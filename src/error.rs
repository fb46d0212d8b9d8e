//! Error types in statlearn
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    /// A linear system has no unique solution
    #[error("singular matrix: pivot {pivot} of {dimension} vanished")]
    SingularMatrix { pivot: usize, dimension: usize },
    /// Prediction-time features do not match the features used for fitting
    #[error("feature schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("Expected records and targets to have same number of rows, got {0} != {1}")]
    MismatchedShapes(usize, usize),
    #[error("Not enough samples")]
    NotEnoughSamples,
    #[error("Values must be finite and not `Inf`, `-Inf` or `NaN`")]
    InvalidValues,
    #[error("algorithm not converged after {iterations} iterations")]
    NotConverged { iterations: u64 },
    #[error(transparent)]
    Linalg(#[from] linfa_linalg::LinalgError),
}
