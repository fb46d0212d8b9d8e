use thiserror::Error;

pub type Result<T, E = CoordinateDescentError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum CoordinateDescentError {
    /// The penalty is negative or not finite
    #[error("penalty should be finite and non-negative, but is {0}")]
    InvalidPenalty(f32),
    #[error("tolerance should be positive and finite, but is {0}")]
    InvalidTolerance(f32),
    #[error("max_iterations must be at least one")]
    InvalidMaxIterations,
    #[error("initial parameters have {found} entries, the feature matrix has {expected} columns")]
    InvalidInitialParametersGuessSize { expected: usize, found: usize },
    #[error(transparent)]
    BaseCrate(#[from] statlearn::Error),
}
