use crate::k_means::errors::{KMeansError, Result};
use crate::k_means::{EmptyClusterPolicy, KMeansInit, KMeansParams, KMeansValidParams};
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Axis, Data, DataMut, Ix1, Ix2, Zip};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use statlearn::traits::{check_nfeatures, FittedSchema, IterativeFit};
use statlearn::{prelude::*, DatasetBase, Float};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
/// K-means clustering aims to partition a set of unlabeled observations into clusters,
/// where each observation belongs to the cluster with the nearest mean.
///
/// The mean of the points within a cluster is called *centroid*.
///
/// Given the set of centroids, you can assign an observation to a cluster
/// choosing the nearest centroid.
///
/// More details on the algorithm can be found in the next section or
/// [here](https://en.wikipedia.org/wiki/K-means_clustering).
///
/// ## Standard algorithm
///
/// K-means is an iterative algorithm: it progressively refines the choice of centroids.
///
/// It's guaranteed to converge, even though it might not find the optimal set of centroids
/// (unfortunately it can get stuck in a local minimum, finding the optimal minimum if NP-hard!).
///
/// There are three steps in the standard algorithm (Lloyd's algorithm):
/// - initialisation step: pick `n_clusters` distinct observations as initial centroids;
/// - assignment step: assign each observation to the nearest cluster
///                    (minimum squared euclidean distance between the observation and the
///                    cluster's centroid, the lowest cluster index wins ties);
/// - update step: recompute the centroid of each cluster as the mean of its observations.
///
/// The initialisation step is a one-off, done at the very beginning.
/// Assignment and update are repeated in a loop until an assignment step leaves every
/// membership unchanged, or until `max_n_iterations` assignment steps were performed.
/// The cost, the sum of squared distances of the observations to their centroid, never
/// increases from one assignment step to the next.
///
/// A single cluster needs no iteration: its centroid is the mean of all observations.
///
/// ## Empty clusters
///
/// A cluster left without observations by an assignment step has no mean, the run fails.
/// Depending on the [`EmptyClusterPolicy`] the failed run is skipped or the fit is aborted.
///
/// ## Restarts
///
/// Lloyd's algorithm only finds a local minimum, so the whole procedure is run `n_runs` times
/// from independent random initial centroids. The run with the lowest cost is kept; a later run
/// only replaces the best one when its cost is strictly lower.
///
/// ## Tutorial
///
/// ```
/// use statlearn::prelude::*;
/// use statlearn::DatasetBase;
/// use statlearn_clustering::KMeans;
/// use statlearn_datasets::generate;
/// use ndarray::{Axis, array};
/// use ndarray_rand::rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256Plus;
/// use approx::assert_abs_diff_eq;
///
/// // Our random number generator, seeded for reproducibility
/// let mut rng = Xoshiro256Plus::seed_from_u64(42);
///
/// // `expected_centroids` has shape `(n_centroids, n_features)`
/// // i.e. three points in the 2-dimensional plane
/// let expected_centroids = array![[0., 1.], [-10., 20.], [-1., 10.]];
/// // Let's generate a synthetic dataset: three blobs of observations
/// // (100 points each) centered around our `expected_centroids`
/// let data = generate::blobs(100, &expected_centroids, &mut rng);
/// let n_clusters = expected_centroids.len_of(Axis(0));
///
/// let observations = DatasetBase::from(data);
/// // `n_clusters` is the only mandatory parameter.
/// let model = KMeans::params_with_rng(n_clusters, rng.clone())
///     .fit(&observations)
///     .expect("KMeans fitted");
/// assert!(model.converged());
///
/// // Predict returns the **index** of the nearest cluster
/// let new_observation = array![[-9., 20.5]];
/// let memberships: ndarray::Array1<usize> = model.predict(&new_observation).unwrap();
/// let closest_centroid = &model.centroids().index_axis(Axis(0), memberships[0]);
/// assert_abs_diff_eq!(closest_centroid.to_owned(), &array![-10., 20.], epsilon = 0.5);
/// ```
pub struct KMeans<F: Float> {
    centroids: Array2<F>,
    memberships: Array1<usize>,
    cluster_sizes: Array1<usize>,
    cost: F,
    cost_history: Vec<F>,
    n_iterations: u64,
    converged: bool,
    feature_names: Vec<String>,
}

impl<F: Float> KMeans<F> {
    pub fn params(nclusters: usize) -> KMeansParams<F, Xoshiro256Plus> {
        KMeansParams::new(nclusters, Xoshiro256Plus::seed_from_u64(42))
    }

    pub fn params_with_rng<R: Rng + Clone>(nclusters: usize, rng: R) -> KMeansParams<F, R> {
        KMeansParams::new(nclusters, rng)
    }

    /// Return the set of centroids as a 2-dimensional matrix with shape
    /// `(n_centroids, n_features)`.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    /// Return the cluster index of every training observation
    pub fn memberships(&self) -> &Array1<usize> {
        &self.memberships
    }

    /// Return the number of training points belonging to each cluster
    pub fn cluster_sizes(&self) -> &Array1<usize> {
        &self.cluster_sizes
    }

    /// Return the sum of squared distances between each training point and its centroid
    pub fn cost(&self) -> F {
        self.cost
    }

    /// Return the cost after every assignment step of the kept run
    pub fn cost_history(&self) -> &[F] {
        &self.cost_history
    }
}

impl<F: Float> IterativeFit for KMeans<F> {
    fn converged(&self) -> bool {
        self.converged
    }

    fn n_iterations(&self) -> u64 {
        self.n_iterations
    }
}

impl<F: Float> FittedSchema for KMeans<F> {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

/// Outcome of a single run of Lloyd's algorithm
struct LloydRun<F> {
    centroids: Array2<F>,
    memberships: Array1<usize>,
    cluster_sizes: Array1<usize>,
    cost: F,
    cost_history: Vec<F>,
    n_iterations: u64,
    converged: bool,
}

impl<F: Float> LloydRun<F> {
    fn into_model(self, feature_names: Vec<String>) -> KMeans<F> {
        KMeans {
            centroids: self.centroids,
            memberships: self.memberships,
            cluster_sizes: self.cluster_sizes,
            cost: self.cost,
            cost_history: self.cost_history,
            n_iterations: self.n_iterations,
            converged: self.converged,
            feature_names,
        }
    }
}

impl<F: Float, R: Rng + Clone, DA: Data<Elem = F>, T> Fit<ArrayBase<DA, Ix2>, T, KMeansError>
    for KMeansValidParams<F, R>
{
    type Object = KMeans<F>;

    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `fit` identifies `n_clusters` centroids based on the training data distribution.
    ///
    /// An instance of `KMeans` is returned.
    ///
    fn fit(&self, dataset: &DatasetBase<ArrayBase<DA, Ix2>, T>) -> Result<Self::Object> {
        let observations = dataset.records().view();
        let (n_samples, n_features) = observations.dim();
        let n_clusters = self.n_clusters();

        if n_samples < n_clusters {
            return Err(KMeansError::TooFewSamples {
                n_samples,
                n_clusters,
            });
        }
        if observations.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidValues.into());
        }
        if let KMeansInit::Precomputed(centroids) = self.init_method() {
            if centroids.ncols() != n_features {
                return Err(Error::MismatchedShapes(n_features, centroids.ncols()).into());
            }
            if centroids.iter().any(|v| !v.is_finite()) {
                return Err(Error::InvalidValues.into());
            }
        }

        if n_clusters == 1 {
            let run = single_cluster(observations).ok_or(Error::NotEnoughSamples)?;
            return Ok(run.into_model(dataset.feature_names()));
        }

        // every run would start from the same centroids
        let n_runs = if self.init_method().is_randomized() {
            self.n_runs()
        } else {
            1
        };

        let mut rng = self.rng().clone();
        let mut best: Option<LloydRun<F>> = None;
        for run in 0..n_runs {
            let centroids = self.init_method().run(n_clusters, observations, &mut rng);
            match lloyd(observations, centroids, self.max_n_iterations()) {
                Some(candidate) => {
                    debug!(
                        "k-means run {} stopped after {} iterations with cost {}",
                        run, candidate.n_iterations, candidate.cost
                    );
                    // We keep the run which minimizes the cost, ties go to the earlier run
                    if best.as_ref().map_or(true, |b| candidate.cost < b.cost) {
                        best = Some(candidate);
                    }
                }
                None => match self.empty_cluster_policy() {
                    EmptyClusterPolicy::Abort => return Err(KMeansError::EmptyCluster { run }),
                    EmptyClusterPolicy::SkipRun => {
                        warn!("k-means run {} produced an empty cluster, skipping it", run)
                    }
                },
            }
        }

        let best = best.ok_or(KMeansError::AllRunsFailed { n_runs })?;
        if !best.converged {
            warn!(
                "k-means did not reach a fixed point after {} iterations",
                best.n_iterations
            );
        }
        Ok(best.into_model(dataset.feature_names()))
    }
}

/// The single cluster holds every observation and is centered on their mean
fn single_cluster<F: Float>(observations: ArrayView2<F>) -> Option<LloydRun<F>> {
    let n_samples = observations.nrows();
    let centroids = observations.mean_axis(Axis(0))?.insert_axis(Axis(0));
    let memberships = Array1::zeros(n_samples);
    let mut dists = Array1::zeros(n_samples);
    update_min_dists(&centroids, &observations, &mut dists);
    let cost = dists.sum();

    Some(LloydRun {
        centroids,
        memberships,
        cluster_sizes: Array1::from_elem(1, n_samples),
        cost,
        cost_history: vec![cost],
        n_iterations: 0,
        converged: true,
    })
}

/// Alternate assignment and update steps, starting from `centroids`, until the memberships
/// stop changing or `max_n_iterations` assignment steps were performed.
///
/// Returns `None` as soon as an assignment step leaves a cluster empty.
fn lloyd<F: Float>(
    observations: ArrayView2<F>,
    mut centroids: Array2<F>,
    max_n_iterations: u64,
) -> Option<LloydRun<F>> {
    let n_samples = observations.nrows();
    let n_clusters = centroids.nrows();
    let mut memberships = Array1::zeros(n_samples);
    let mut dists = Array1::zeros(n_samples);

    update_memberships_and_dists(&centroids, &observations, &mut memberships, &mut dists);
    let mut cluster_sizes = count_members(&memberships, n_clusters)?;
    let mut cost_history = vec![dists.sum()];
    let mut n_iterations = 1;
    let mut converged = false;

    while n_iterations < max_n_iterations {
        centroids = compute_centroids(&observations, &memberships, &cluster_sizes);
        let n_changed =
            update_memberships_and_dists(&centroids, &observations, &mut memberships, &mut dists);
        n_iterations += 1;
        let cost = dists.sum();
        cost_history.push(cost);
        debug!(
            "k-means iteration {}: cost {}, {} memberships changed",
            n_iterations, cost, n_changed
        );

        cluster_sizes = count_members(&memberships, n_clusters)?;
        if n_changed == 0 {
            converged = true;
            break;
        }
    }

    Some(LloydRun {
        centroids,
        memberships,
        cluster_sizes,
        cost: dists.sum(),
        cost_history,
        n_iterations,
        converged,
    })
}

/// Number of observations in each cluster, `None` if any cluster is empty
fn count_members(memberships: &Array1<usize>, n_clusters: usize) -> Option<Array1<usize>> {
    let mut sizes = Array1::zeros(n_clusters);
    memberships.iter().for_each(|&c| sizes[c] += 1);
    if sizes.iter().any(|&size| size == 0) {
        None
    } else {
        Some(sizes)
    }
}

/// Compute the mean of the observations of each cluster
///
/// Every cluster must hold at least one observation.
fn compute_centroids<F: Float>(
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    cluster_memberships: &ArrayBase<impl Data<Elem = usize>, Ix1>,
    cluster_sizes: &Array1<usize>,
) -> Array2<F> {
    let mut centroids = Array2::zeros((cluster_sizes.len(), observations.ncols()));

    Zip::from(observations.axis_iter(Axis(0)))
        .and(cluster_memberships)
        .for_each(|observation, &cluster_membership| {
            let mut centroid = centroids.row_mut(cluster_membership);
            centroid += &observation;
        });

    Zip::from(centroids.axis_iter_mut(Axis(0)))
        .and(cluster_sizes)
        .for_each(|mut centroid, &size| centroid /= F::cast(size));

    centroids
}

/// Assign each observation to its closest centroid and store the squared distance to it.
///
/// Returns the number of memberships which changed.
fn update_memberships_and_dists<F: Float>(
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    cluster_memberships: &mut ArrayBase<impl DataMut<Elem = usize>, Ix1>,
    dists: &mut ArrayBase<impl DataMut<Elem = F>, Ix1>,
) -> usize {
    let mut n_changed = 0;
    Zip::from(observations.axis_iter(Axis(0)))
        .and(cluster_memberships)
        .and(dists)
        .for_each(|observation, cluster_membership, dist| {
            let (m, d) = closest_centroid(centroids, &observation);
            if m != *cluster_membership {
                n_changed += 1;
            }
            *cluster_membership = m;
            *dist = d;
        });
    n_changed
}

/// Store, for each observation, the squared distance to its closest centroid
fn update_min_dists<F: Float>(
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    dists: &mut ArrayBase<impl DataMut<Elem = F>, Ix1>,
) {
    Zip::from(observations.axis_iter(Axis(0)))
        .and(dists)
        .for_each(|observation, dist| *dist = closest_centroid(centroids, &observation).1);
}

/// Given a matrix of centroids with shape (n_centroids, n_features) and an observation,
/// return the index of the closest centroid (the index of the corresponding row in `centroids`)
/// together with the squared euclidean distance to it. The lowest index wins ties.
fn closest_centroid<F: Float>(
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    observation: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> (usize, F) {
    let mut closest_index = 0;
    let mut minimum_distance = F::infinity();

    for (centroid_index, centroid) in centroids.axis_iter(Axis(0)).enumerate() {
        let distance = squared_distance(&centroid, observation);
        if distance < minimum_distance {
            closest_index = centroid_index;
            minimum_distance = distance;
        }
    }
    (closest_index, minimum_distance)
}

fn squared_distance<F: Float>(
    a: &ArrayBase<impl Data<Elem = F>, Ix1>,
    b: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    Zip::from(a).and(b).fold(F::zero(), |acc, &x, &y| {
        let diff = x - y;
        acc + diff * diff
    })
}

impl<F: Float, DA: Data<Elem = F>> PredictInplace<ArrayBase<DA, Ix2>, Array1<usize>> for KMeans<F> {
    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `predict` returns, for each observation, the index of the closest cluster/centroid.
    ///
    /// You can retrieve the centroid associated to an index using the
    /// [`centroids` method](KMeans::centroids).
    fn predict_inplace(
        &self,
        observations: &ArrayBase<DA, Ix2>,
        memberships: &mut Array1<usize>,
    ) -> statlearn::error::Result<()> {
        check_nfeatures(self, observations.ncols())?;
        if observations.nrows() != memberships.len() {
            return Err(Error::MismatchedShapes(
                observations.nrows(),
                memberships.len(),
            ));
        }

        Zip::from(observations.axis_iter(Axis(0)))
            .and(memberships)
            .for_each(|observation, membership| {
                *membership = closest_centroid(&self.centroids, &observation).0
            });
        Ok(())
    }

    fn default_target(&self, observations: &ArrayBase<DA, Ix2>) -> Array1<usize> {
        Array1::zeros(observations.nrows())
    }
}
