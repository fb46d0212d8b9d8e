#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use ndarray::Array1;
use statlearn::{Error, Float, ParamGuard};

use crate::error::{CoordinateDescentError, Result};

/// A verified hyper-parameter set ready for coordinate descent
///
/// See [`CoordinateDescentParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateDescentValidParams<F> {
    penalty: F,
    tolerance: F,
    max_iterations: u64,
    initial_params: Option<Array1<F>>,
}

impl<F: Float> CoordinateDescentValidParams<F> {
    pub fn penalty(&self) -> F {
        self.penalty
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    pub fn initial_params(&self) -> Option<&Array1<F>> {
        self.initial_params.as_ref()
    }
}

/// A hyper-parameter set for cyclic coordinate descent
///
/// Configures and minimizes the following objective function:
/// ```ignore
/// 0.5 * ||y - Xw||^2_2 + 0.5 * penalty * ||w||^2_2
/// ```
/// A penalty of zero gives ordinary least squares. No intercept is fitted.
///
/// A sweep updates every coefficient once, in column order. The solver stops after the first
/// sweep whose largest coefficient change is at most `tolerance * max(1, max |w|)`.
///
/// The tolerance bounds the step of the last sweep, not the distance to the minimizer. On
/// strongly correlated columns the sweeps shrink slowly, so a small step can leave the
/// coefficients far from the exact solution. Tighten the tolerance and raise
/// `max_iterations` for such designs.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [penalty](Self::penalty) | `0.0` | L2 penalty of the coefficients | `[0, inf)` |
/// | [tolerance](Self::tolerance) | `1e-4` | Bound on the relative step of the last sweep | `(0, inf)` |
/// | [max_iterations](Self::max_iterations) | `1000` | Maximum number of sweeps | `[1, inf)` |
/// | [initial_params](Self::initial_params) | zeros | Starting coefficients | one finite value per feature |
///
/// # Example
///
/// ```rust
/// use statlearn::prelude::*;
/// use statlearn_coordinate_descent::{CoordinateDescentError, CoordinateDescentParams};
/// use ndarray::array;
///
/// let ds = Dataset::new(array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]], array![3.0, 2.0, 5.0]);
///
/// let model = CoordinateDescentParams::new().penalty(0.1).fit(&ds)?;
/// assert!(model.converged());
/// # Ok::<(), CoordinateDescentError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateDescentParams<F>(CoordinateDescentValidParams<F>);

impl<F: Float> Default for CoordinateDescentParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> CoordinateDescentParams<F> {
    pub fn new() -> CoordinateDescentParams<F> {
        Self(CoordinateDescentValidParams {
            penalty: F::zero(),
            tolerance: F::cast(1e-4),
            max_iterations: 1000,
            initial_params: None,
        })
    }

    /// Set the L2 penalty, defaults to `0.0`
    pub fn penalty(mut self, penalty: F) -> Self {
        self.0.penalty = penalty;
        self
    }

    /// Set the bound on the largest coefficient change of a sweep, relative to the largest
    /// coefficient once that exceeds one.
    ///
    /// This bounds the step between sweeps, not the error of the coefficients.
    ///
    /// Defaults to `1e-4` if not set
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Set the maximum number of sweeps over all coordinates.
    ///
    /// Defaults to `1000` if not set
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Start the descent from `params` instead of zeros
    pub fn initial_params(mut self, params: Array1<F>) -> Self {
        self.0.initial_params = Some(params);
        self
    }
}

impl<F: Float> ParamGuard for CoordinateDescentParams<F> {
    type Checked = CoordinateDescentValidParams<F>;
    type Error = CoordinateDescentError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let params = &self.0;
        if params.penalty.is_negative() || !params.penalty.is_finite() {
            Err(CoordinateDescentError::InvalidPenalty(
                params.penalty.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !(params.tolerance > F::zero() && params.tolerance.is_finite()) {
            Err(CoordinateDescentError::InvalidTolerance(
                params.tolerance.to_f32().unwrap_or(f32::NAN),
            ))
        } else if params.max_iterations == 0 {
            Err(CoordinateDescentError::InvalidMaxIterations)
        } else if params
            .initial_params
            .as_ref()
            .map_or(false, |p| p.iter().any(|v| !v.is_finite()))
        {
            Err(Error::InvalidValues.into())
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
