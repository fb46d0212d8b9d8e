//! Datasets
//!
//! This module implements the dataset struct and the helper traits the solvers use to read
//! records and targets from it.
use ndarray::{
    ArrayBase, ArrayView1, Data, Ix1, Ix2, NdFloat, OwnedRepr, ScalarOperand, ViewRepr,
};

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

use std::cmp::PartialOrd;
use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

mod impl_dataset;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in records of a dataset and, for
/// regression task, in the targets as well.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + NdFloat
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + num_traits::MulAdd<Output = Self>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq<Epsilon = Self>
    + 'static
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the
/// data, the targets and the names of the features. Column order is significant: the i-th
/// feature name describes the i-th column of the records.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional array with dimensionality (nsamples), or `()` for
/// unsupervised tasks
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records
/// stored as an `Array2` and a single target for each record, stored as an `Array1`.
pub type Dataset<D, T> = DatasetBase<ArrayBase<OwnedRepr<D>, Ix2>, ArrayBase<OwnedRepr<T>, Ix1>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, D, T> =
    DatasetBase<ArrayBase<ViewRepr<&'a D>, Ix2>, ArrayBase<ViewRepr<&'a T>, Ix1>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

impl<F, S: Data<Elem = F>> Records for ArrayBase<S, Ix2> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.nrows()
    }

    fn nfeatures(&self) -> usize {
        self.ncols()
    }
}

/// Return a reference to single-column targets
///
/// All solvers in this workspace predict exactly one response per observation.
pub trait AsSingleTargets {
    type Elem;

    fn as_single_targets(&self) -> ArrayView1<'_, Self::Elem>;
}

impl<L, S: Data<Elem = L>> AsSingleTargets for ArrayBase<S, Ix1> {
    type Elem = L;

    fn as_single_targets(&self) -> ArrayView1<'_, L> {
        self.view()
    }
}

/// Default name of the `index`-th feature when a dataset carries no names
pub fn default_feature_name(index: usize) -> String {
    format!("feature-{}", index)
}

/// Generate the default names for `nfeatures` columns
pub fn default_feature_names(nfeatures: usize) -> Vec<String> {
    (0..nfeatures).map(default_feature_name).collect()
}
