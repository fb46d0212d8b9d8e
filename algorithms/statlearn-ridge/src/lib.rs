//! # Ridge regression
//!
//! `statlearn-ridge` fits a linear model with an L2 penalty on the coefficients in closed form.
//!
//! The features are centred column-wise before solving, which keeps the intercept out of the
//! penalty. The coefficients solve the regularized normal equations
//! ```ignore
//! (Xcᵀ Xc + n_samples * penalty * I) w = Xcᵀ yc
//! ```
//! and the intercept is recovered from the column means as `mean(y) - Σ w_j * mean(X_j)`.
//!
//! The system is factorised with a guarded Cholesky decomposition, so a rank deficient design
//! with zero penalty yields [`SingularMatrix`](statlearn::Error::SingularMatrix) instead of
//! meaningless coefficients.
//!
//! ## Example
//!
//! ```rust
//! use statlearn::prelude::*;
//! use statlearn_ridge::RidgeParams;
//! use ndarray::array;
//!
//! let ds = Dataset::new(array![[0f64], [1.], [2.]], array![1f64, 3., 5.]);
//! let model = RidgeParams::new().penalty(0.0).fit(&ds)?;
//!
//! let slope: f64 = model.params()[0];
//! let intercept: f64 = model.intercept();
//! assert!((slope - 2.0).abs() < 1e-10);
//! assert!((intercept - 1.0).abs() < 1e-10);
//! # Ok::<(), statlearn_ridge::RidgeError>(())
//! ```

use ndarray::Array1;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use statlearn::{traits::FittedSchema, Float};

mod algorithm;
mod error;
mod hyperparams;

pub use error::{Result, RidgeError};
pub use hyperparams::{RidgeParams, RidgeValidParams};

/// Fitted ridge regression model
///
/// Holds the coefficients in training column order, the unpenalized intercept, the penalty
/// used and the names of the training features.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedRidge<F> {
    params: Array1<F>,
    intercept: F,
    penalty: F,
    feature_names: Vec<String>,
}

impl<F: Float> FittedRidge<F> {
    /// Coefficients, one per training feature
    pub fn params(&self) -> &Array1<F> {
        &self.params
    }

    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// Penalty the model was fitted with
    pub fn penalty(&self) -> F {
        self.penalty
    }
}

impl<F> FittedSchema for FittedRidge<F> {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
