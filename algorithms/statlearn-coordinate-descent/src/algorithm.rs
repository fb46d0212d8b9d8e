use approx::{abs_diff_eq, abs_diff_ne};
use log::{debug, warn};
use ndarray::{Array1, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix2};

use statlearn::dataset::{AsSingleTargets, DatasetBase};
use statlearn::traits::{check_nfeatures, Fit, PredictInplace};
use statlearn::{Error, Float};

use crate::error::{CoordinateDescentError, Result};
use crate::hyperparams::CoordinateDescentValidParams;
use crate::FittedCoordinateDescent;

impl<F, D, T> Fit<ArrayBase<D, Ix2>, T, CoordinateDescentError> for CoordinateDescentValidParams<F>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = F>,
{
    type Object = FittedCoordinateDescent<F>;

    /// Fit the coefficients of a linear model without intercept
    ///
    /// Exceeding the iteration ceiling is not an error, the model is returned with
    /// [`converged`](statlearn::traits::IterativeFit::converged) set to `false`.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_shapes()?;
        let x = dataset.records();
        let y = dataset.targets().as_single_targets();

        let n_features = x.ncols();
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(Error::InvalidValues.into());
        }

        let initial_params = match self.initial_params() {
            Some(params) if params.len() != n_features => {
                return Err(CoordinateDescentError::InvalidInitialParametersGuessSize {
                    expected: n_features,
                    found: params.len(),
                })
            }
            Some(params) => params.clone(),
            None => Array1::zeros(n_features),
        };

        let (params, n_iterations, converged, max_change) = coordinate_descent(
            x.view(),
            y.view(),
            initial_params,
            self.penalty(),
            self.tolerance(),
            self.max_iterations(),
        );

        if !converged {
            warn!(
                "coordinate descent did not converge after {} sweeps, last change {}",
                n_iterations, max_change
            );
        }

        Ok(FittedCoordinateDescent {
            params,
            penalty: self.penalty(),
            n_iterations,
            converged,
            max_change,
            feature_names: dataset.feature_names(),
        })
    }
}

/// Cyclic coordinate descent for `0.5 * ||y - Xw||^2 + 0.5 * penalty * ||w||^2`
///
/// Returns the coefficients, the number of sweeps, whether the stopping criterion was met and
/// the largest coefficient change of the last sweep.
fn coordinate_descent<F: Float>(
    x: ArrayView2<F>,
    y: ArrayView1<F>,
    mut w: Array1<F>,
    penalty: F,
    tol: F,
    max_steps: u64,
) -> (Array1<F>, u64, bool, F) {
    let norm_cols_x = x.map_axis(Axis(0), |col| col.dot(&col));
    // the residuals are updated during the algorithm as the parameters change
    let mut r = &y - &x.dot(&w);
    let mut n_steps = 0u64;
    let mut d_w_max = F::infinity();

    while n_steps < max_steps {
        let mut w_max = F::zero();
        d_w_max = F::zero();
        for (ii, x_slc) in x.axis_iter(Axis(1)).enumerate() {
            let w_ii = w[ii];
            let denominator = norm_cols_x[ii] + penalty;
            // an all-zero column without penalty leaves its coefficient undetermined
            if abs_diff_eq!(denominator, F::zero()) {
                w_max = F::max(w_max, w_ii.abs());
                continue;
            }

            // X_jᵀ (y - X_{-j} w_{-j}) without forming the partial residual
            let rho = x_slc.dot(&r) + norm_cols_x[ii] * w_ii;
            w[ii] = rho / denominator;

            let d_w_ii = w[ii] - w_ii;
            if abs_diff_ne!(d_w_ii, F::zero()) {
                r.scaled_add(-d_w_ii, &x_slc);
            }
            d_w_max = F::max(d_w_max, d_w_ii.abs());
            w_max = F::max(w_max, w[ii].abs());
        }
        n_steps += 1;
        debug!(
            "coordinate descent sweep {}: max change {}, max coefficient {}",
            n_steps, d_w_max, w_max
        );

        if d_w_max <= tol * F::max(w_max, F::one()) {
            return (w, n_steps, true, d_w_max);
        }
    }

    (w, n_steps, false, d_w_max)
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>>
    for FittedCoordinateDescent<F>
{
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`, `predict` returns `X w`.
    fn predict_inplace(
        &self,
        x: &ArrayBase<D, Ix2>,
        y: &mut Array1<F>,
    ) -> statlearn::error::Result<()> {
        check_nfeatures(self, x.ncols())?;
        if x.nrows() != y.len() {
            return Err(Error::MismatchedShapes(x.nrows(), y.len()));
        }

        *y = x.dot(&self.params);
        Ok(())
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoordinateDescentParams;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use statlearn::traits::IterativeFit;
    use statlearn::{Dataset, ParamGuard};

    #[test]
    fn orthogonal_columns_are_solved_in_one_sweep() {
        let x = array![[1., 0.], [0., 2.], [-1., 0.], [0., -2.]];
        let y = array![3., 4., -3., -4.];
        let (w, n_steps, converged, _) =
            coordinate_descent(x.view(), y.view(), Array1::zeros(2), 0., 1e-10, 10);

        assert_abs_diff_eq!(w, array![3., 2.], epsilon = 1e-12);
        // the second sweep only confirms the fixed point
        assert_eq!(n_steps, 2);
        assert!(converged);
    }

    #[test]
    fn later_coordinates_see_updated_earlier_ones() {
        // correlated columns: Gauss-Seidel uses w_0 of the current sweep when updating w_1
        let x = array![[1., 1.], [1., 0.]];
        let y = array![2., 1.];
        let (w, n_steps, _, _) =
            coordinate_descent(x.view(), y.view(), Array1::zeros(2), 0., 1e-12, 1);

        // w_0 = (2 + 1) / 2, then w_1 = (2 - 1.5) / 1
        assert_eq!(n_steps, 1);
        assert_abs_diff_eq!(w, array![1.5, 0.5], epsilon = 1e-12);
    }

    #[test]
    fn orthogonal_response_keeps_zero_coefficients() {
        let x = array![[1., 1.], [-1., 1.], [1., -1.], [-1., -1.]];
        let y = array![1., -1., -1., 1.];
        let ds = Dataset::new(x, y);
        let model = CoordinateDescentParams::new()
            .penalty(0.5)
            .fit(&ds)
            .unwrap();

        assert!(model.converged());
        assert_eq!(model.n_iterations(), 1);
        assert_abs_diff_eq!(model.params(), &array![0., 0.]);
        assert_abs_diff_eq!(model.max_change(), 0.);
    }

    #[test]
    fn zero_column_without_penalty_is_left_alone() {
        let x = array![[1., 0.], [2., 0.], [3., 0.]];
        let y = array![2., 4., 6.];
        let ds = Dataset::new(x, y);
        let model = CoordinateDescentParams::new()
            .initial_params(array![0., 7.])
            .fit(&ds)
            .unwrap();

        assert!(model.params().iter().all(|w: &f64| w.is_finite()));
        assert_abs_diff_eq!(model.params(), &array![2., 7.], epsilon = 1e-10);

        let penalized = CoordinateDescentParams::new()
            .penalty(1.)
            .initial_params(array![0., 7.])
            .fit(&ds)
            .unwrap();
        assert_abs_diff_eq!(penalized.params()[1], 0.);
    }

    #[test]
    fn convergence_is_relative_for_large_coefficients() {
        let x = array![[1., 0.5], [0.5, 1.], [1., 1.], [0., 1.]];
        let y = x.dot(&array![1e6, -2e6]);
        let ds = Dataset::new(x, y);
        let model = CoordinateDescentParams::new().fit(&ds).unwrap();

        assert!(model.converged());
        let max_coefficient = model.params().fold(0f64, |acc: f64, w: &f64| acc.max(w.abs()));
        assert!(model.max_change() <= 1e-4 * max_coefficient);
    }

    #[test]
    fn rejects_invalid_params() {
        let params = CoordinateDescentParams::<f64>::new;

        assert!(matches!(
            params().penalty(-1.).check(),
            Err(CoordinateDescentError::InvalidPenalty(_))
        ));
        assert!(matches!(
            params().tolerance(0.).check(),
            Err(CoordinateDescentError::InvalidTolerance(_))
        ));
        assert!(matches!(
            params().max_iterations(0).check(),
            Err(CoordinateDescentError::InvalidMaxIterations)
        ));
        assert!(matches!(
            params().initial_params(array![f64::INFINITY]).check(),
            Err(CoordinateDescentError::BaseCrate(Error::InvalidValues))
        ));
        assert!(params().check().is_ok());
    }

    #[test]
    fn rejects_initial_params_of_wrong_size() {
        let ds = Dataset::new(array![[1., 0.], [0., 1.]], array![1., 1.]);
        let result = CoordinateDescentParams::new()
            .initial_params(array![0.])
            .fit(&ds);

        assert!(matches!(
            result,
            Err(CoordinateDescentError::InvalidInitialParametersGuessSize {
                expected: 2,
                found: 1
            })
        ));
    }
}
