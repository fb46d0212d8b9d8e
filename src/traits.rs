//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Float, Records};
use crate::error::{Error, Result};
use ndarray::{ArrayBase, ArrayView2, Data, Ix2};

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in *KMeans* this would be the mean values for each class, or in *Ridge* the intercept and
/// coefficients of the hyperplane. The dataset is only borrowed: no algorithm mutates its
/// input, so a single dataset can be shared between many independent fits.
pub trait Fit<R: Records, T, E: std::error::Error + From<Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> std::result::Result<Self::Object, E>;
}

/// Predict with model into a mutable reference of targets
///
/// Implementations must reject records whose column count differs from the one seen while
/// fitting with [`Error::SchemaMismatch`].
pub trait PredictInplace<R, T> {
    /// Predict something in place
    fn predict_inplace(&self, x: &R, y: &mut T) -> Result<()>;

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
///
/// # Provided implementation
///
/// * Array2 -> targets, columns checked by count
/// * &Dataset -> targets, columns matched by feature name
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> Result<T>;
}

/// Fitted models which remember the column layout they were trained on
pub trait FittedSchema {
    /// Names of the training features, in training column order
    fn feature_names(&self) -> &[String];

    /// Number of training features
    fn nfeatures(&self) -> usize {
        self.feature_names().len()
    }
}

/// Fitted models produced by an iterative solver bounded by an iteration ceiling
///
/// Running out of iterations is not an error: the best available estimate is returned and
/// flagged. Callers that cannot accept such an estimate use [`IterativeFit::check_converged`].
pub trait IterativeFit: Sized {
    /// Whether the stopping criterion was met before the iteration ceiling
    fn converged(&self) -> bool;

    /// Number of iterations performed
    fn n_iterations(&self) -> u64;

    /// Turn a non-converged model into an [`Error::NotConverged`]
    fn check_converged(self) -> Result<Self> {
        if self.converged() {
            Ok(self)
        } else {
            Err(Error::NotConverged {
                iterations: self.n_iterations(),
            })
        }
    }
}

impl<'a, D: Data, T, O: PredictInplace<ArrayBase<D, Ix2>, T>> Predict<&'a ArrayBase<D, Ix2>, T>
    for O
{
    fn predict(&self, records: &'a ArrayBase<D, Ix2>) -> Result<T> {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets)?;
        Ok(targets)
    }
}

impl<'a, F: Float, D: Data<Elem = F>, T, S, O> Predict<&'a DatasetBase<ArrayBase<D, Ix2>, T>, S>
    for O
where
    O: for<'b> PredictInplace<ArrayView2<'b, F>, S> + FittedSchema,
{
    fn predict(&self, dataset: &'a DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<S> {
        let records = dataset.records_aligned_to(self.feature_names())?;
        let records = records.view();

        let mut targets = self.default_target(&records);
        self.predict_inplace(&records, &mut targets)?;
        Ok(targets)
    }
}

/// Check the column count of prediction records against the training schema
pub fn check_nfeatures<M: FittedSchema + ?Sized>(model: &M, nfeatures: usize) -> Result<()> {
    if model.nfeatures() == nfeatures {
        Ok(())
    } else {
        Err(Error::SchemaMismatch {
            expected: model.feature_names().to_vec(),
            found: crate::dataset::default_feature_names(nfeatures),
        })
    }
}
