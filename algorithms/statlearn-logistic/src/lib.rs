//! # Logistic regression
//!
//! `statlearn-logistic` fits a two-class logistic regression with Iteratively Reweighted Least
//! Squares (IRLS).
//!
//! The two observed classes are sorted; the smaller one is coded as `0` and the larger one as
//! `1`. Each iteration computes the probabilities `p = 1 / (1 + exp(-X β))`, the weights
//! `w = p (1 - p)` (floored at [`min_weight`](LogisticRegressionParams::min_weight)) and the working
//! response `z = X β + (y - p) / w`, then solves the weighted least squares problem for the next
//! `β`. The solver stops once the norm of the gradient `Xᵀ (y - p)` falls below the tolerance.
//!
//! No intercept is added to the feature matrix. Add a column of ones to fit one.
//!
//! ## Example
//!
//! ```rust
//! use statlearn::prelude::*;
//! use statlearn_logistic::LogisticRegressionParams;
//! use ndarray::array;
//!
//! let x = array![[1., -2.], [1., -1.], [1., 0.5], [1., 1.], [1., 2.], [1., -0.5]];
//! let ds = Dataset::new(x, array![false, false, false, true, true, true]);
//!
//! let model = LogisticRegressionParams::new().fit(&ds).unwrap();
//! let prediction = model.predict(&array![[1., 3.], [1., -3.]]).unwrap();
//!
//! assert_eq!(prediction, array![true, false]);
//! ```

use std::convert::TryFrom;

use ndarray::{Array1, ArrayBase, ArrayView1, Data, Ix2, Zip};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use statlearn::traits::{check_nfeatures, FittedSchema, IterativeFit, PredictInplace};
use statlearn::{Error, Float};

mod error;
mod hyperparams;
mod irls;

pub use error::{LogisticError, Result};
pub use hyperparams::{LogisticRegressionParams, LogisticRegressionValidParams};

/// The logistic function, evaluated without overflow for large `|x|`
fn logistic<F: Float>(x: F) -> F {
    if x >= F::zero() {
        F::one() / (F::one() + (-x).exp())
    } else {
        let e = x.exp();
        e / (F::one() + e)
    }
}

/// Identify the two distinct classes of `y` and code them as `0.0` and `1.0`
///
/// The classes are sorted, `0.0` labels the smaller one.
fn label_classes<F: Float, C: Ord + Clone>(y: ArrayView1<C>) -> Result<([C; 2], Array1<F>)> {
    let mut classes = y.to_vec();
    classes.sort();
    classes.dedup();

    let labels = <[C; 2]>::try_from(classes)
        .map_err(|classes| LogisticError::WrongNumberOfClasses(classes.len()))?;
    let target = y.mapv(|c| if c == labels[0] { F::zero() } else { F::one() });

    Ok((labels, target))
}

/// A fitted two-class logistic regression
///
/// Besides the coefficients it records the two class labels, in sorted order, and the state of
/// the solver when it stopped.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(PartialEq, Debug, Clone)]
pub struct FittedLogisticRegression<F, C> {
    params: Array1<F>,
    labels: [C; 2],
    n_iterations: u64,
    converged: bool,
    gradient_norm: F,
    feature_names: Vec<String>,
}

impl<F: Float, C: Clone> FittedLogisticRegression<F, C> {
    pub fn params(&self) -> &Array1<F> {
        &self.params
    }

    /// The two classes seen while fitting, coded as `0` and `1` respectively
    pub fn labels(&self) -> &[C; 2] {
        &self.labels
    }

    /// Norm of the log-likelihood gradient at the returned coefficients
    pub fn gradient_norm(&self) -> F {
        self.gradient_norm
    }

    /// Given a feature matrix, predict the probabilities that a sample belongs to the second
    /// (larger) of the two classes.
    pub fn predict_probabilities<A: Data<Elem = F>>(
        &self,
        x: &ArrayBase<A, Ix2>,
    ) -> statlearn::error::Result<Array1<F>> {
        check_nfeatures(self, x.ncols())?;
        Ok(x.dot(&self.params).mapv(logistic))
    }
}

impl<F, C> IterativeFit for FittedLogisticRegression<F, C> {
    fn converged(&self) -> bool {
        self.converged
    }

    fn n_iterations(&self) -> u64 {
        self.n_iterations
    }
}

impl<F, C> FittedSchema for FittedLogisticRegression<F, C> {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

impl<C: Clone + Default, F: Float, D: Data<Elem = F>>
    PredictInplace<ArrayBase<D, Ix2>, Array1<C>> for FittedLogisticRegression<F, C>
{
    /// Given a feature matrix, predict the classes learned when the model was fitted.
    ///
    /// Samples with a non-negative log-odds `x β` get the second class, all others the first.
    fn predict_inplace(
        &self,
        x: &ArrayBase<D, Ix2>,
        y: &mut Array1<C>,
    ) -> statlearn::error::Result<()> {
        check_nfeatures(self, x.ncols())?;
        if x.nrows() != y.len() {
            return Err(Error::MismatchedShapes(x.nrows(), y.len()));
        }

        let [first, second] = &self.labels;
        Zip::from(&x.dot(&self.params))
            .and(y)
            .for_each(|log_odds, out| {
                *out = if *log_odds >= F::zero() {
                    second.clone()
                } else {
                    first.clone()
                }
            });
        Ok(())
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<C> {
        Array1::default(x.nrows())
    }
}
