//! `statlearn` provides the numerical core behind a collection of statistical learning
//! workflows: a handful of solvers whose correctness depends on convergence criteria,
//! numerical stability, tie-breaking and the handling of degenerate input.
//!
//! ## The big picture
//!
//! This crate holds the pieces every solver shares:
//! * [`DatasetBase`], a design matrix with named columns and a response vector;
//! * the [`Fit`](traits::Fit) / [`Predict`](traits::Predict) traits and the
//!   [`ParamGuard`] hyperparameter checking used by every algorithm crate;
//! * the [`Error`] type and the guarded linear solves in [`linalg`];
//! * regression and classification [`metrics`].
//!
//! The algorithms themselves live in their own crates:
//! * `statlearn-ridge`: closed-form ridge regression;
//! * `statlearn-logistic`: logistic regression via Iteratively Reweighted Least Squares;
//! * `statlearn-coordinate-descent`: cyclic coordinate descent for linear/ridge regression;
//! * `statlearn-clustering`: Lloyd's k-means with multiple restarts.
//!
//! All of them are single-threaded and side-effect free. Independent fits (different folds,
//! hyperparameters or restarts) can run concurrently as each call only borrows its input.

pub mod dataset;
pub mod error;
pub mod linalg;
mod metrics_classification;
mod metrics_regression;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for classification and regression
pub mod metrics {
    pub use crate::metrics_classification::Classification;
    pub use crate::metrics_regression::Regression;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<Dataset<f64, usize>>();
        has_autotraits::<DatasetView<'static, f64, f64>>();
        has_autotraits::<Error>();
    }

    #[test]
    fn dataset_from_tuple() {
        let dataset = Dataset::from((Array2::<f64>::zeros((3, 2)), Array1::<f64>::ones(3)));
        assert_eq!(dataset.nsamples(), 3);
        assert_eq!(dataset.nfeatures(), 2);
    }
}
