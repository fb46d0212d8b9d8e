//! Iteratively Reweighted Least Squares
//!
//! Every iteration linearises the logistic likelihood around the current coefficients and solves
//! the resulting weighted least squares problem, which is exactly a Newton step on the
//! log-likelihood.
use log::{debug, warn};
use ndarray::{Array1, ArrayBase, Axis, Data, Ix1, Ix2};

use statlearn::dataset::{AsSingleTargets, DatasetBase};
use statlearn::linalg::solve_spd;
use statlearn::traits::Fit;
use statlearn::{Error, Float};

use crate::error::{LogisticError, Result};
use crate::hyperparams::LogisticRegressionValidParams;
use crate::{label_classes, logistic, FittedLogisticRegression};

impl<F: Float, C> LogisticRegressionValidParams<F, C> {
    fn setup_init_params(&self, n_features: usize) -> Result<Array1<F>> {
        match self.initial_params() {
            Some(params) if params.len() != n_features => {
                Err(LogisticError::InvalidInitialParametersGuessSize)
            }
            Some(params) => Ok(params.clone()),
            None => Ok(Array1::zeros(n_features)),
        }
    }

    /// One IRLS update starting from the linear predictor `eta = X β`
    fn step<A: Data<Elem = F>>(
        &self,
        x: &ArrayBase<A, Ix2>,
        target: &Array1<F>,
        eta: &Array1<F>,
    ) -> Result<Array1<F>> {
        let probabilities = eta.mapv(logistic);
        let weights = probabilities.mapv(|p| (p * (F::one() - p)).max(self.min_weight()));
        let working_response = eta + &((target - &probabilities) / &weights);

        let weighted_x = x * &weights.view().insert_axis(Axis(1));
        let lhs = weighted_x.t().dot(x);
        let rhs = weighted_x.t().dot(&working_response);

        Ok(solve_spd(&lhs, &rhs)?)
    }
}

/// Score of the log-likelihood, `Xᵀ (y - p)`
fn gradient<F: Float, A: Data<Elem = F>>(
    x: &ArrayBase<A, Ix2>,
    target: &Array1<F>,
    eta: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array1<F> {
    let residuals = target - &eta.mapv(logistic);
    x.t().dot(&residuals)
}

impl<C, F, D, T> Fit<ArrayBase<D, Ix2>, T, LogisticError> for LogisticRegressionValidParams<F, C>
where
    C: Ord + Clone,
    F: Float,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = C>,
{
    type Object = FittedLogisticRegression<F, C>;

    /// Given a 2-dimensional feature matrix array `x` with shape
    /// (n_samples, n_features) and an array of target classes to predict,
    /// create a `FittedLogisticRegression` object which allows making
    /// predictions.
    ///
    /// The array of target classes `y` must have exactly two discrete values, (e.g. 0 and 1, "cat"
    /// and "dog", ...), which represent the two different classes the model is supposed to
    /// predict.
    ///
    /// Running out of iterations is not an error: the last estimate is returned with
    /// [`converged`](statlearn::traits::IterativeFit::converged) set to `false`.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_shapes()?;
        let x = dataset.records();
        let y = dataset.targets().as_single_targets();

        let n_features = x.ncols();
        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidValues.into());
        }

        let (labels, target) = label_classes(y)?;
        let mut params = self.setup_init_params(n_features)?;
        let mut eta = x.dot(&params);

        let mut gradient_norm = F::infinity();
        let mut n_iterations = 0;
        let mut converged = false;
        while n_iterations < self.max_iterations() {
            params = self.step(x, &target, &eta)?;
            eta = x.dot(&params);
            n_iterations += 1;

            let grad = gradient(x, &target, &eta);
            gradient_norm = grad.dot(&grad).sqrt();
            debug!(
                "IRLS iteration {}: gradient norm {}",
                n_iterations, gradient_norm
            );

            if gradient_norm < self.gradient_tolerance() {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                "IRLS did not converge after {} iterations, gradient norm {} (tolerance {})",
                n_iterations,
                gradient_norm,
                self.gradient_tolerance()
            );
        }

        Ok(FittedLogisticRegression {
            params,
            labels,
            n_iterations,
            converged,
            gradient_norm,
            feature_names: dataset.feature_names(),
        })
    }
}
