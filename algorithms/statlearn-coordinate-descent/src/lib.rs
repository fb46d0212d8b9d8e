//! # Coordinate descent
//!
//! `statlearn-coordinate-descent` fits the coefficients of a linear model, optionally with a
//! ridge penalty, by cyclic coordinate descent.
//!
//! Each sweep visits the coordinates in column order and replaces `w_j` by the exact minimizer
//! of the objective along that coordinate,
//! ```ignore
//! w_j = X_jᵀ r_j / (||X_j||² + penalty),    r_j = y - X_{-j} w_{-j}
//! ```
//! using the values already updated earlier in the same sweep (Gauss-Seidel). The closed form
//! relies on the squared error and the L2 penalty both being separable along coordinates.
//!
//! ## Example
//!
//! ```rust
//! use statlearn::prelude::*;
//! use statlearn_coordinate_descent::CoordinateDescentParams;
//! use ndarray::array;
//!
//! let x = array![[1f64, 0.], [0., 1.], [1., 1.], [2., 1.]];
//! let y = x.dot(&array![2f64, -1.]);
//! let ds = Dataset::new(x, y);
//!
//! let model = CoordinateDescentParams::new().tolerance(1e-10).fit(&ds).unwrap();
//! assert!(model.converged());
//! let slope: f64 = model.params()[0];
//! assert!((slope - 2.).abs() < 1e-8);
//! ```

use ndarray::Array1;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use statlearn::traits::{FittedSchema, IterativeFit};
use statlearn::Float;

mod algorithm;
mod error;
mod hyperparams;

pub use error::{CoordinateDescentError, Result};
pub use hyperparams::{CoordinateDescentParams, CoordinateDescentValidParams};

/// Coefficients found by coordinate descent together with the state of the solver
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedCoordinateDescent<F> {
    params: Array1<F>,
    penalty: F,
    n_iterations: u64,
    converged: bool,
    max_change: F,
    feature_names: Vec<String>,
}

impl<F: Float> FittedCoordinateDescent<F> {
    pub fn params(&self) -> &Array1<F> {
        &self.params
    }

    pub fn penalty(&self) -> F {
        self.penalty
    }

    /// Largest absolute coefficient change during the last sweep
    pub fn max_change(&self) -> F {
        self.max_change
    }
}

impl<F> IterativeFit for FittedCoordinateDescent<F> {
    fn converged(&self) -> bool {
        self.converged
    }

    fn n_iterations(&self) -> u64 {
        self.n_iterations
    }
}

impl<F> FittedSchema for FittedCoordinateDescent<F> {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
