//! Utility functions for randomly generating datasets

use ndarray::{s, Array, Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, StandardNormal, Uniform},
    RandomExt,
};
use statlearn::Dataset;

/// Special case of `blobs_with_distribution` with a standard normal distribution.
pub fn blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    blobs_with_distribution(blob_size, blob_centroids, StandardNormal, rng)
}

/// Given an input matrix `blob_centroids`, with shape `(n_blobs, n_features)`,
/// generate `blob_size` data points (a "blob") around each of the blob centroids.
///
/// More specifically, each blob is formed by `blob_size` points sampled from a distribution
/// centered in the blob centroid.
///
/// `blobs` can be used to quickly assemble a synthetic dataset to test or
/// benchmark various clustering algorithms on a best-case scenario input.
pub fn blobs_with_distribution(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    distribution: impl Distribution<f64> + Clone,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let (n_centroids, n_features) = blob_centroids.dim();
    let mut blobs: Array2<f64> = Array2::zeros((n_centroids * blob_size, n_features));

    for (blob_index, blob_centroid) in blob_centroids.rows().into_iter().enumerate() {
        let blob = make_blob(blob_size, &blob_centroid, distribution.clone(), rng);

        let indexes = s![blob_index * blob_size..(blob_index + 1) * blob_size, ..];
        blobs.slice_mut(indexes).assign(&blob);
    }
    blobs
}

/// Generate `blob_size` data points (a "blob") around `blob_centroid` using the given distribution.
fn make_blob(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, distribution, rng);
    origin_blob + blob_centroid
}

/// Two linearly separable classes in the plane
///
/// Class `0` is drawn uniformly from the square `[-3.5, -0.5]²` and class `1` from `[0.5, 3.5]²`,
/// `n_per_class` points each. Every point of class `0` satisfies `x1 + x2 < -1`, every point of
/// class `1` satisfies `x1 + x2 > 1`, so the line `x1 + x2 = 0` separates them with a margin.
///
/// The features are named `x1` and `x2`; the rows of class `0` come first.
pub fn separable_classes(n_per_class: usize, rng: &mut impl Rng) -> Dataset<f64, usize> {
    let noise = Uniform::new(-1.5, 1.5);
    let centroids = ndarray::array![[-2., -2.], [2., 2.]];
    let records = blobs_with_distribution(n_per_class, &centroids, noise, rng);

    let targets = (0..2 * n_per_class)
        .map(|i| i / n_per_class.max(1))
        .collect::<Array1<_>>();

    Dataset::new(records, targets).with_feature_names(vec!["x1", "x2"])
}

/// A noisy linear response
///
/// Draws `n_samples` rows of features uniformly from `[-1, 1]` (one column per coefficient) and
/// returns `y = X β + intercept + noise · ε` with standard normal `ε`.
pub fn linear_response(
    n_samples: usize,
    coefficients: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    intercept: f64,
    noise: f64,
    rng: &mut impl Rng,
) -> Dataset<f64, f64> {
    let records: Array2<f64> = Array::random_using(
        (n_samples, coefficients.len()),
        Uniform::new(-1., 1.),
        rng,
    );
    let epsilon: Array1<f64> = Array::random_using(n_samples, StandardNormal, rng);
    let targets = records.dot(coefficients) + intercept + epsilon * noise;

    Dataset::new(records, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Axis};
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn blobs_have_expected_shape() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let centroids = array![[0., 1.], [-10., 20.], [-1., 10.]];
        let data = blobs(50, &centroids, &mut rng);

        assert_eq!(data.dim(), (150, 2));
        let first = data.slice(s![..50, ..]).mean_axis(Axis(0)).unwrap();
        assert_abs_diff_eq!(first, array![0., 1.], epsilon = 0.5);
    }

    #[test]
    fn separable_classes_respect_margin() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let dataset = separable_classes(50, &mut rng);

        assert_eq!(dataset.nsamples(), 100);
        assert_eq!(dataset.feature_names(), vec!["x1", "x2"]);
        for (row, &class) in dataset.records().rows().into_iter().zip(dataset.targets()) {
            let side = row[0] + row[1];
            if class == 0 {
                assert!(side < -1.);
            } else {
                assert!(side > 1.);
            }
        }
    }

    #[test]
    fn linear_response_without_noise_is_exact() {
        let mut rng = Xoshiro256Plus::seed_from_u64(7);
        let coefficients = array![1.5, -2.0];
        let dataset = linear_response(20, &coefficients, 0.5, 0.0, &mut rng);

        let expected = dataset.records().dot(&coefficients) + 0.5;
        assert_abs_diff_eq!(dataset.targets(), &expected, epsilon = 1e-12);
    }
}
