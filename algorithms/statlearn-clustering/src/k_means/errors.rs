use thiserror::Error;

/// An error when fitting with an invalid hyperparameter
#[derive(Error, Debug)]
pub enum KMeansParamsError {
    #[error("n_clusters cannot be 0")]
    NClusters,
    #[error("n_runs cannot be 0")]
    NRuns,
    #[error("max_n_iterations cannot be 0")]
    MaxIterations,
    #[error("precomputed centroids have {found} rows, expected one per cluster ({expected})")]
    PrecomputedCentroids { expected: usize, found: usize },
}

/// An error when modeling a KMeans algorithm
#[derive(Error, Debug)]
pub enum KMeansError {
    /// When any of the hyperparameters are set the wrong value
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] KMeansParamsError),
    /// When there are fewer observations than clusters to find
    #[error("cannot find {n_clusters} clusters in {n_samples} observations")]
    TooFewSamples { n_samples: usize, n_clusters: usize },
    /// When an assignment step leaves a cluster without observations
    #[error("run {run} produced an empty cluster")]
    EmptyCluster { run: usize },
    /// When every run ended with an empty cluster
    #[error("all {n_runs} runs produced an empty cluster")]
    AllRunsFailed { n_runs: usize },
    #[error(transparent)]
    BaseCrate(#[from] statlearn::Error),
}

pub type Result<T, E = KMeansError> = std::result::Result<T, E>;
