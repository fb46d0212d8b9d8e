//! `statlearn-datasets` provides synthetic datasets ready to be used in tests and benchmarks.
//!
//! ## Current State
//!
//! Every generator takes a random number generator so results are reproducible when it is
//! seeded:
//!
//! * [`generate::blobs`]: isotropic clusters around given centroids
//! * [`generate::separable_classes`]: two linearly separable classes in the plane
//! * [`generate::linear_response`]: a noisy linear response to uniformly drawn features

pub mod generate;
