use ndarray_rand::rand::Rng;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use statlearn::{Float, ParamGuard};

use super::errors::KMeansParamsError;
use super::init::KMeansInit;

/// What to do when an assignment step leaves a cluster without observations
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Log the failed run and continue with the next one.
    SkipRun,
    /// Stop immediately with [`KMeansError::EmptyCluster`](crate::KMeansError::EmptyCluster).
    Abort,
}

impl Default for EmptyClusterPolicy {
    fn default() -> Self {
        Self::SkipRun
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for the execution of
/// the [K-means algorithm](crate::KMeans).
pub struct KMeansValidParams<F: Float, R: Rng> {
    /// Number of times the k-means algorithm will be run with different centroid seeds.
    n_runs: usize,
    /// We exit the training loop when the number of assignment steps
    /// reaches `max_n_iterations` even if the memberships are still changing.
    max_n_iterations: u64,
    /// The number of clusters we will be looking for in the training dataset.
    n_clusters: usize,
    /// The initialization strategy used to initialize the centroids.
    init: KMeansInit<F>,
    /// Handling of runs which end up with an empty cluster.
    empty_cluster_policy: EmptyClusterPolicy,
    /// The random number generator
    rng: R,
}

#[derive(Clone, Debug, PartialEq)]
/// An helper struct used to construct a set of [valid hyperparameters](KMeansValidParams) for
/// the [K-means algorithm](crate::KMeans) (using the builder pattern).
pub struct KMeansParams<F: Float, R: Rng>(KMeansValidParams<F, R>);

impl<F: Float, R: Rng + Clone> KMeansParams<F, R> {
    /// `new` lets us configure our training algorithm parameters:
    /// * we will be looking for `n_clusters` in the training dataset;
    /// * a run ends once an assignment step leaves every membership unchanged;
    /// * we exit the training loop when the number of assignment steps
    ///   reaches `max_n_iterations` even if the memberships are still changing;
    /// * as KMeans convergence depends on centroids initialization
    ///   we run the algorithm `n_runs` times and keep the run with the lowest
    ///   cost, the sum of squared euclidean distances of the observations to
    ///   their centroid. An earlier run wins ties.
    ///
    /// Defaults are provided if optional parameters are not specified:
    /// * `max_n_iterations = 300`
    /// * `n_runs = 10`
    /// * `init = Random`
    /// * `empty_cluster_policy = SkipRun`
    pub fn new(n_clusters: usize, rng: R) -> Self {
        Self(KMeansValidParams {
            n_runs: 10,
            max_n_iterations: 300,
            n_clusters,
            init: KMeansInit::Random,
            empty_cluster_policy: EmptyClusterPolicy::SkipRun,
            rng,
        })
    }

    /// Change the value of `n_runs`
    pub fn n_runs(mut self, n_runs: usize) -> Self {
        self.0.n_runs = n_runs;
        self
    }

    /// Change the value of `max_n_iterations`
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.0.max_n_iterations = max_n_iterations;
        self
    }

    /// Change the value of `init`
    pub fn init_method(mut self, init: KMeansInit<F>) -> Self {
        self.0.init = init;
        self
    }

    /// Change the handling of runs ending with an empty cluster
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.0.empty_cluster_policy = policy;
        self
    }
}

impl<F: Float, R: Rng> ParamGuard for KMeansParams<F, R> {
    type Checked = KMeansValidParams<F, R>;
    type Error = KMeansParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.n_clusters == 0 {
            Err(KMeansParamsError::NClusters)
        } else if self.0.n_runs == 0 {
            Err(KMeansParamsError::NRuns)
        } else if self.0.max_n_iterations == 0 {
            Err(KMeansParamsError::MaxIterations)
        } else {
            match &self.0.init {
                KMeansInit::Precomputed(centroids) if centroids.nrows() != self.0.n_clusters => {
                    Err(KMeansParamsError::PrecomputedCentroids {
                        expected: self.0.n_clusters,
                        found: centroids.nrows(),
                    })
                }
                _ => Ok(&self.0),
            }
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, R: Rng> KMeansValidParams<F, R> {
    /// The final results will be the best output of n_runs consecutive runs in terms of cost.
    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    /// We exit the training loop when the number of assignment steps
    /// reaches `max_n_iterations` even if the memberships are still changing.
    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    /// The number of clusters we will be looking for in the training dataset.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Cluster initialization strategy
    pub fn init_method(&self) -> &KMeansInit<F> {
        &self.init
    }

    pub fn empty_cluster_policy(&self) -> EmptyClusterPolicy {
        self.empty_cluster_policy
    }

    /// Returns the random generator
    pub fn rng(&self) -> &R {
        &self.rng
    }
}
