use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use ndarray::Array1;
use statlearn::{Float, ParamGuard};

use crate::error::{LogisticError, Result};

/// A verified hyper-parameter set ready for fitting a two-class logistic regression
///
/// See [`LogisticRegressionParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticRegressionValidParams<F, C> {
    max_iterations: u64,
    gradient_tolerance: F,
    initial_params: Option<Array1<F>>,
    min_weight: F,
    #[cfg_attr(feature = "serde", serde(skip))]
    phantom: PhantomData<C>,
}

impl<F: Float, C> LogisticRegressionValidParams<F, C> {
    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    pub fn gradient_tolerance(&self) -> F {
        self.gradient_tolerance
    }

    pub fn initial_params(&self) -> Option<&Array1<F>> {
        self.initial_params.as_ref()
    }

    pub fn min_weight(&self) -> F {
        self.min_weight
    }
}

/// A hyper-parameter set for two-class logistic regression
///
/// The model is fitted with Iteratively Reweighted Least Squares. No intercept is added: encode
/// one as a column of ones in the feature matrix if desired.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [max_iterations](Self::max_iterations) | `1000` | Iteration ceiling | `[1, inf)` |
/// | [gradient_tolerance](Self::gradient_tolerance) | `1e-6` | Stop once the gradient norm falls below | `(0, inf)` |
/// | [initial_params](Self::initial_params) | zeros | Starting coefficients | one finite value per feature |
/// | [min_weight](Self::min_weight) | `1e-10` | Floor of the IRLS weights `p (1 - p)` | `(0, 0.25]` |
///
/// # Errors
///
/// Returns [`InvalidMaxIterations`](LogisticError::InvalidMaxIterations),
/// [`InvalidGradientTolerance`](LogisticError::InvalidGradientTolerance),
/// [`InvalidMinWeight`](LogisticError::InvalidMinWeight) or
/// [`InvalidInitialParametersGuess`](LogisticError::InvalidInitialParametersGuess) when the
/// corresponding value is out of range.
///
/// # Example
///
/// ```rust
/// use statlearn::prelude::*;
/// use statlearn_logistic::{LogisticError, LogisticRegressionParams};
/// use ndarray::array;
///
/// let x = array![[1., -2.], [1., -1.], [1., 0.5], [1., 1.], [1., 2.], [1., -0.5]];
/// let y = array!["no", "no", "no", "yes", "yes", "yes"];
/// let ds = Dataset::new(x, y);
///
/// let model = LogisticRegressionParams::new().fit(&ds)?;
/// assert!(model.converged());
/// # Ok::<(), LogisticError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticRegressionParams<F, C>(LogisticRegressionValidParams<F, C>);

impl<F: Float, C> Default for LogisticRegressionParams<F, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, C> LogisticRegressionParams<F, C> {
    /// Creates a new parameter set with default configuration.
    pub fn new() -> LogisticRegressionParams<F, C> {
        Self(LogisticRegressionValidParams {
            max_iterations: 1000,
            gradient_tolerance: F::cast(1e-6),
            initial_params: None,
            min_weight: F::cast(1e-10),
            phantom: PhantomData,
        })
    }

    /// Configure the maximum number of IRLS iterations, defaults to `1000`.
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Configure the gradient norm below which the solver stops, defaults to `1e-6`.
    pub fn gradient_tolerance(mut self, gradient_tolerance: F) -> Self {
        self.0.gradient_tolerance = gradient_tolerance;
        self
    }

    /// Configure the initial parameters from where the optimization starts.
    /// The `params` array must have the same size as the number of columns of
    /// the feature matrix `x` passed to the `fit` method
    pub fn initial_params(mut self, params: Array1<F>) -> Self {
        self.0.initial_params = Some(params);
        self
    }

    /// Configure the lower bound of the IRLS weights, defaults to `1e-10`.
    ///
    /// Fitted probabilities close to `0` or `1` give weights close to zero, which would turn the
    /// weighted least squares step singular.
    pub fn min_weight(mut self, min_weight: F) -> Self {
        self.0.min_weight = min_weight;
        self
    }
}

impl<F: Float, C> ParamGuard for LogisticRegressionParams<F, C> {
    type Checked = LogisticRegressionValidParams<F, C>;
    type Error = LogisticError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let params = &self.0;
        if params.max_iterations == 0 {
            return Err(LogisticError::InvalidMaxIterations);
        }
        if !params.gradient_tolerance.is_finite() || params.gradient_tolerance <= F::zero() {
            return Err(LogisticError::InvalidGradientTolerance);
        }
        if !(params.min_weight > F::zero() && params.min_weight <= F::cast(0.25)) {
            return Err(LogisticError::InvalidMinWeight(
                params.min_weight.to_f32().unwrap_or(f32::NAN),
            ));
        }
        if let Some(initial_params) = &params.initial_params {
            if initial_params.iter().any(|p| !p.is_finite()) {
                return Err(LogisticError::InvalidInitialParametersGuess);
            }
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
