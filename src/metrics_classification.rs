//! Common metrics for performance evaluation of classifier
//!
//! Predictions and ground truth are compared label by label, so any label type with equality
//! works, not only the numeric ones.
use ndarray::{ArrayBase, Data, Ix1};

use crate::error::{Error, Result};

/// Classification metrics trait
pub trait Classification<L: PartialEq, D: Data<Elem = L>> {
    /// Fraction of predictions which match the ground truth
    fn accuracy(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<f32>;

    /// Number of predictions which differ from the ground truth
    fn misclassified(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<usize>;
}

impl<L: PartialEq, D: Data<Elem = L>, S: Data<Elem = L>> Classification<L, D>
    for ArrayBase<S, Ix1>
{
    fn accuracy(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<f32> {
        let misclassified = self.misclassified(ground_truth)?;
        if self.is_empty() {
            return Err(Error::NotEnoughSamples);
        }

        Ok(1.0 - misclassified as f32 / self.len() as f32)
    }

    fn misclassified(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<usize> {
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes(self.len(), ground_truth.len()));
        }

        Ok(self
            .iter()
            .zip(ground_truth.iter())
            .filter(|(prediction, truth)| prediction != truth)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::Classification;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_accuracy_on_labels() {
        let prediction = array!["cat", "dog", "dog", "cat"];
        let truth = array!["cat", "dog", "cat", "cat"];

        assert_eq!(prediction.misclassified(&truth).unwrap(), 1);
        assert_abs_diff_eq!(prediction.accuracy(&truth).unwrap(), 0.75);
    }

    #[test]
    fn test_accuracy_rejects_empty() {
        let prediction = ndarray::Array1::<usize>::zeros(0);
        assert!(prediction.accuracy(&prediction).is_err());
    }
}
