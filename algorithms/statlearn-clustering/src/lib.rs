//! `statlearn-clustering` provides a pure Rust implementation of Lloyd's k-means.
//!
//! ## The big picture
//!
//! `statlearn-clustering` is a crate in the `statlearn` workspace. Like every algorithm crate
//! of the workspace it builds on the dataset, [`Fit`](statlearn::traits::Fit) and
//! [`Predict`](statlearn::traits::Predict) abstractions of the `statlearn` crate.
//!
//! ## Current state
//!
//! Right now `statlearn-clustering` provides the following clustering algorithms:
//! * [K-Means](KMeans), with random or precomputed initial centroids and multiple restarts
//!
//! Implementation choices, algorithmic details and tutorials can be found in the page dedicated to the specific algorithms.
#[allow(clippy::new_ret_no_self)]
mod k_means;

pub use k_means::*;
