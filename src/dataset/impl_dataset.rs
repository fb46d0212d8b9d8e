use log::warn;
use ndarray::{Array1, Array2, ArrayBase, Axis, CowArray, Data, Ix2};

use super::{default_feature_names, AsSingleTargets, DatasetBase, Float, Records};
use crate::error::{Error, Result};

impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Return references to the records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Return references to the targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Return the number of observations
    pub fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    /// Return the number of features
    pub fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// When no names were attached, `feature-0`, `feature-1`, ... are returned.
    pub fn feature_names(&self) -> Vec<String> {
        if self.feature_names.is_empty() {
            default_feature_names(self.nfeatures())
        } else {
            self.feature_names.clone()
        }
    }

    /// Updates the feature names of a dataset
    ///
    /// The names are ignored, with a warning, when their count does not match the number of
    /// columns. Use [`try_with_feature_names`](Self::try_with_feature_names) to get an error
    /// instead.
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        let names: Vec<String> = names.into_iter().map(|x| x.into()).collect();
        if names.len() == self.nfeatures() {
            self.feature_names = names;
        } else {
            warn!(
                "ignoring {} feature names for a dataset with {} columns",
                names.len(),
                self.nfeatures()
            );
        }

        self
    }

    /// Updates the feature names of a dataset
    ///
    /// Fails with `MismatchedShapes(columns, names)` when the count of names does not match
    /// the number of columns.
    pub fn try_with_feature_names<I: Into<String>>(
        mut self,
        names: Vec<I>,
    ) -> Result<DatasetBase<R, T>> {
        let names: Vec<String> = names.into_iter().map(|x| x.into()).collect();
        if names.len() != self.nfeatures() {
            return Err(Error::MismatchedShapes(self.nfeatures(), names.len()));
        }
        self.feature_names = names;

        Ok(self)
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsSingleTargets> DatasetBase<ArrayBase<D, Ix2>, T> {
    /// Verify that records and targets describe the same observations and that there is at
    /// least one of them.
    pub fn check_shapes(&self) -> Result<()> {
        let nrecords = self.records.nrows();
        let ntargets = self.targets.as_single_targets().len();
        if nrecords != ntargets {
            return Err(Error::MismatchedShapes(nrecords, ntargets));
        }
        if nrecords == 0 {
            return Err(Error::NotEnoughSamples);
        }

        Ok(())
    }
}

impl<F: Float, D: Data<Elem = F>, T> DatasetBase<ArrayBase<D, Ix2>, T> {
    /// Return the records with their columns arranged in the order of `expected`
    ///
    /// Columns are matched by name. If the dataset carries exactly the expected names the
    /// records are returned (reordered when necessary), otherwise a `SchemaMismatch` is
    /// raised.
    pub fn records_aligned_to(&self, expected: &[String]) -> Result<CowArray<'_, F, Ix2>> {
        let found = self.feature_names();
        if found.as_slice() == expected {
            return Ok(CowArray::from(self.records.view()));
        }

        let mismatch = || Error::SchemaMismatch {
            expected: expected.to_vec(),
            found: found.clone(),
        };
        if found.len() != expected.len() {
            return Err(mismatch());
        }

        let indices = expected
            .iter()
            .map(|name| found.iter().position(|other| other == name))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(mismatch)?;

        Ok(CowArray::from(self.records.select(Axis(1), &indices)))
    }
}

impl<F: Float, D: Data<Elem = F>> From<ArrayBase<D, Ix2>> for DatasetBase<ArrayBase<D, Ix2>, ()> {
    fn from(records: ArrayBase<D, Ix2>) -> Self {
        DatasetBase::new(records, ())
    }
}

impl<F: Float, L> From<(Array2<F>, Array1<L>)> for DatasetBase<Array2<F>, Array1<L>> {
    fn from(rec_tar: (Array2<F>, Array1<L>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}
