#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use statlearn::{Float, ParamGuard};

use crate::error::{Result, RidgeError};

/// A verified hyper-parameter set ready for the estimation of a ridge regression model
///
/// See [`RidgeParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct RidgeValidParams<F> {
    penalty: F,
}

impl<F: Float> RidgeValidParams<F> {
    pub fn penalty(&self) -> F {
        self.penalty
    }
}

/// A hyper-parameter set for ridge regression
///
/// Minimizes the following objective function in closed form:
/// ```ignore
/// 1 / (2 * n_samples) * ||y - Xw - b||^2_2 + 0.5 * penalty * ||w||^2_2
/// ```
/// The intercept `b` is not penalized.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [penalty](Self::penalty) | `1.0` | L2 penalty of the coefficients | `[0, inf)` |
///
/// # Errors
///
/// Returns [`InvalidPenalty`](RidgeError::InvalidPenalty) if the penalty is negative or not
/// finite.
///
/// # Example
///
/// ```rust
/// use statlearn_ridge::{RidgeError, RidgeParams};
/// use statlearn::prelude::*;
/// use ndarray::array;
///
/// let ds = Dataset::new(array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]], array![3.0, 2.0, 5.0]);
///
/// // fit model with unchecked parameter set
/// let model = RidgeParams::new().penalty(1e-3).fit(&ds)?;
///
/// // a verified parameter set only returns errors originating from the fit itself
/// let checked_params = RidgeParams::new().penalty(1e-3).check()?;
/// let model = checked_params.fit(&ds)?;
/// # Ok::<(), RidgeError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RidgeParams<F>(RidgeValidParams<F>);

impl<F: Float> Default for RidgeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> RidgeParams<F> {
    pub fn new() -> RidgeParams<F> {
        Self(RidgeValidParams { penalty: F::one() })
    }

    /// Set the L2 penalty. The penalty is scaled with the number of samples, so the same value
    /// gives comparable shrinkage for datasets of different size. A penalty of zero yields
    /// ordinary least squares.
    ///
    /// Defaults to `1.0` if not set
    pub fn penalty(mut self, penalty: F) -> Self {
        self.0.penalty = penalty;
        self
    }
}

impl<F: Float> ParamGuard for RidgeParams<F> {
    type Checked = RidgeValidParams<F>;
    type Error = RidgeError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let penalty = self.0.penalty;
        if penalty.is_negative() || !penalty.is_finite() {
            Err(RidgeError::InvalidPenalty(
                penalty.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
