use ndarray::{Array2, ArrayView2, Axis};
use ndarray_rand::rand;
use ndarray_rand::rand::Rng;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use statlearn::Float;

/// Strategy used to place the centroids at the start of a run
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum KMeansInit<F: Float> {
    /// Pick `n_clusters` distinct observations uniformly at random, without replacement.
    Random,
    /// Start every run from the given centroids, one row per cluster.
    ///
    /// All runs start from the same place, so only a single run is performed.
    Precomputed(Array2<F>),
}

impl<F: Float> KMeansInit<F> {
    pub(crate) fn run(
        &self,
        n_clusters: usize,
        observations: ArrayView2<F>,
        rng: &mut impl Rng,
    ) -> Array2<F> {
        match self {
            Self::Random => random_init(n_clusters, observations, rng),
            Self::Precomputed(centroids) => centroids.clone(),
        }
    }

    /// Whether two runs can start from different centroids
    pub(crate) fn is_randomized(&self) -> bool {
        matches!(self, Self::Random)
    }
}

fn random_init<F: Float>(
    n_clusters: usize,
    observations: ArrayView2<F>,
    rng: &mut impl Rng,
) -> Array2<F> {
    let (n_samples, _) = observations.dim();
    let indices = rand::seq::index::sample(rng, n_samples, n_clusters).into_vec();
    observations.select(Axis(0), &indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn random_init_picks_distinct_observations() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let observations = Array::from_shape_fn((20, 2), |(i, j)| (i * 2 + j) as f64);

        let centroids = KMeansInit::Random.run(5, observations.view(), &mut rng);
        assert_eq!(centroids.dim(), (5, 2));

        let mut rows: Vec<usize> = centroids
            .rows()
            .into_iter()
            .map(|c| {
                observations
                    .rows()
                    .into_iter()
                    .position(|o| o == c)
                    .unwrap()
            })
            .collect();
        rows.sort_unstable();
        rows.dedup();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn random_init_can_take_every_observation() {
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let observations = array![[0., 0.], [1., 1.], [2., 2.]];
        let centroids = KMeansInit::Random.run(3, observations.view(), &mut rng);

        let mut firsts = centroids.column(0).to_vec();
        firsts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(firsts, vec![0., 1., 2.]);
    }

    #[test]
    fn precomputed_init_is_returned_unchanged() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let given = array![[1., 2.], [3., 4.]];
        let init = KMeansInit::Precomputed(given.clone());

        assert_eq!(init.run(2, array![[0., 0.]].view(), &mut rng), given);
        assert!(!init.is_randomized());
        assert!(KMeansInit::<f64>::Random.is_randomized());
    }
}
