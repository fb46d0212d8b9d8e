use log::debug;
use ndarray::{Array1, ArrayBase, Axis, Data, Ix2};

use statlearn::dataset::{AsSingleTargets, DatasetBase};
use statlearn::linalg::solve_spd;
use statlearn::traits::{check_nfeatures, Fit, PredictInplace};
use statlearn::{Error, Float};

use crate::error::{Result, RidgeError};
use crate::hyperparams::RidgeValidParams;
use crate::FittedRidge;

impl<F, D, T> Fit<ArrayBase<D, Ix2>, T, RidgeError> for RidgeValidParams<F>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = F>,
{
    type Object = FittedRidge<F>;

    /// Fit a ridge regression model given a feature matrix `x` and a target variable `y`.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)`
    ///
    /// The target variable `y` must have shape `(n_samples)`
    ///
    /// Returns a `FittedRidge` object which contains the fitted parameters and can be used to
    /// `predict` values of the target variable for new feature values.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_shapes()?;
        let x = dataset.records();
        let y = dataset.targets().as_single_targets();

        let (n_samples, n_features) = x.dim();
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(Error::InvalidValues.into());
        }

        let x_mean = x.mean_axis(Axis(0)).ok_or(Error::NotEnoughSamples)?;
        let y_mean = y.mean().ok_or(Error::NotEnoughSamples)?;

        let x_centered = x - &x_mean;
        let y_centered = &y - y_mean;

        let mut gram = x_centered.t().dot(&x_centered);
        let shrinkage = F::cast(n_samples) * self.penalty();
        for diagonal in gram.diag_mut() {
            *diagonal += shrinkage;
        }
        let rhs = x_centered.t().dot(&y_centered);

        debug!(
            "solving ridge system with {} features and {} samples",
            n_features, n_samples
        );
        let params = solve_spd(&gram, &rhs)?;
        let intercept = y_mean - x_mean.dot(&params);

        Ok(FittedRidge {
            params,
            intercept,
            penalty: self.penalty(),
            feature_names: dataset.feature_names(),
        })
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>>
    for FittedRidge<F>
{
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`, `predict` returns the
    /// target variable according to the fitted linear model.
    fn predict_inplace(
        &self,
        x: &ArrayBase<D, Ix2>,
        y: &mut Array1<F>,
    ) -> statlearn::error::Result<()> {
        check_nfeatures(self, x.ncols())?;
        if x.nrows() != y.len() {
            return Err(Error::MismatchedShapes(x.nrows(), y.len()));
        }

        *y = x.dot(&self.params) + self.intercept;
        Ok(())
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RidgeParams;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use statlearn::traits::Predict;
    use statlearn::{Dataset, ParamGuard};

    #[test]
    fn single_feature_matches_hand_computation() {
        // centred x = [-1, 0, 1], centred y = [-2, 0, 2]
        // w = 4 / (2 + 3 * penalty), b = 3 - w
        let ds = Dataset::new(array![[0.], [1.], [2.]], array![1., 3., 5.]);
        let model = RidgeParams::new().penalty(1. / 3.).fit(&ds).unwrap();

        assert_abs_diff_eq!(model.params(), &array![4. / 3.], epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept(), 5. / 3., epsilon = 1e-12);
        assert_abs_diff_eq!(model.penalty(), 1. / 3.);
    }

    #[test]
    fn zero_penalty_fits_a_line_exactly() {
        let ds = Dataset::new(array![[0.], [1.], [2.]], array![1., 3., 5.]);
        let model = RidgeParams::new().penalty(0.).fit(&ds).unwrap();

        assert_abs_diff_eq!(model.params(), &array![2.], epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-12);
    }

    #[test]
    fn intercept_is_not_penalized() {
        // constant response: no slope to shrink, the intercept carries everything
        let ds = Dataset::new(array![[0.], [1.], [2.], [3.]], array![7., 7., 7., 7.]);
        let model = RidgeParams::new().penalty(100.).fit(&ds).unwrap();

        assert_abs_diff_eq!(model.params(), &array![0.], epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept(), 7., epsilon = 1e-12);
    }

    #[test]
    fn larger_penalty_shrinks_coefficients() {
        let x = array![[1., 2.], [2., 1.], [3., 5.], [4., 3.], [5., 4.]];
        let y = array![3., 4., 9., 8., 10.];
        let ds = Dataset::new(x, y);

        let norms = [0.01, 0.1, 1., 10.]
            .iter()
            .map(|&penalty| {
                let model = RidgeParams::new().penalty(penalty).fit(&ds).unwrap();
                model.params().dot(model.params())
            })
            .collect::<Vec<_>>();

        for pair in norms.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn rejects_invalid_penalty() {
        assert!(matches!(
            RidgeParams::<f64>::new().penalty(-1.).check(),
            Err(RidgeError::InvalidPenalty(_))
        ));
        assert!(matches!(
            RidgeParams::<f64>::new().penalty(f64::NAN).check(),
            Err(RidgeError::InvalidPenalty(_))
        ));
        assert!(RidgeParams::<f64>::new().penalty(0.).check().is_ok());
    }

    #[test]
    fn rejects_empty_and_non_finite_input() {
        let empty = Dataset::new(ndarray::Array2::<f64>::zeros((0, 2)), Array1::zeros(0));
        assert!(matches!(
            RidgeParams::new().fit(&empty),
            Err(RidgeError::BaseCrate(Error::NotEnoughSamples))
        ));

        let ds = Dataset::new(array![[0.], [f64::NAN]], array![1., 2.]);
        assert!(matches!(
            RidgeParams::new().fit(&ds),
            Err(RidgeError::BaseCrate(Error::InvalidValues))
        ));
    }

    #[test]
    fn prediction_rejects_wrong_column_count() {
        let ds = Dataset::new(array![[0., 1.], [1., 0.], [2., 2.]], array![1., 3., 5.]);
        let model = RidgeParams::new().fit(&ds).unwrap();

        let result: statlearn::error::Result<Array1<f64>> = model.predict(&array![[1., 2., 3.]]);
        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    }
}
