use thiserror::Error;

pub type Result<T, E = RidgeError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum RidgeError {
    /// The penalty is negative or not finite
    #[error("penalty should be finite and non-negative, but is {0}")]
    InvalidPenalty(f32),
    #[error(transparent)]
    BaseCrate(#[from] statlearn::Error),
}
