use thiserror::Error;

pub type Result<T, E = LogisticError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum LogisticError {
    #[error(transparent)]
    BaseCrate(#[from] statlearn::Error),
    #[error("Expected exactly two classes for logistic regression, found {0}")]
    WrongNumberOfClasses(usize),
    #[error("gradient_tolerance must be a positive, finite number")]
    InvalidGradientTolerance,
    #[error("min_weight must be in (0, 0.25], got {0}")]
    InvalidMinWeight(f32),
    #[error("max_iterations must be at least one")]
    InvalidMaxIterations,
    #[error("Size of initial parameter guess must be the same as the number of columns in the feature matrix `x`")]
    InvalidInitialParametersGuessSize,
    #[error("Initial parameter guess must be finite")]
    InvalidInitialParametersGuess,
}
