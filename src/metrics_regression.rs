//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables.

use ndarray::{ArrayBase, Data, Ix1};

use crate::error::{Error, Result};
use crate::Float;

/// Regression metrices trait
pub trait Regression<F: Float, D: Data<Elem = F>> {
    /// Maximal error between two continuous variables
    fn max_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
    /// Mean error between two continuous variables
    fn mean_absolute_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    ///
    /// To evaluate the accuracy of a prediction, use
    /// ```ignore
    /// prediction.r2(&ground_truth)
    /// ```
    fn r2(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F>;
}

impl<F: Float, D: Data<Elem = F>, S: Data<Elem = F>> Regression<F, D> for ArrayBase<S, Ix1> {
    fn max_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F> {
        check_lengths(self.len(), compare_to.len())?;

        Ok((self - compare_to)
            .iter()
            .map(|x| x.abs())
            .fold(F::neg_infinity(), F::max))
    }

    fn mean_absolute_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F> {
        check_lengths(self.len(), compare_to.len())?;

        (self - compare_to)
            .mapv(|x| x.abs())
            .mean()
            .ok_or(Error::NotEnoughSamples)
    }

    fn mean_squared_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F> {
        check_lengths(self.len(), compare_to.len())?;

        (self - compare_to)
            .mapv(|x| x * x)
            .mean()
            .ok_or(Error::NotEnoughSamples)
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // the mean is of `compare_to`, the ground truth
    fn r2(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F> {
        check_lengths(self.len(), compare_to.len())?;
        let mean = compare_to.mean().ok_or(Error::NotEnoughSamples)?;

        Ok(F::one()
            - (self - compare_to).mapv(|x| x * x).sum()
                / (compare_to.mapv(|x| (x - mean) * (x - mean)).sum() + F::cast(1e-10)))
    }
}

fn check_lengths(predicted: usize, truth: usize) -> Result<()> {
    if predicted != truth {
        Err(Error::MismatchedShapes(predicted, truth))
    } else if predicted == 0 {
        Err(Error::NotEnoughSamples)
    } else {
        Ok(())
    }
}
