use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{concatenate, Array1, Array2, Axis};
use ndarray_rand::rand::{Rng, SeedableRng};
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;
use statlearn::prelude::*;
use statlearn_logistic::{FittedLogisticRegression, LogisticRegressionParams};

fn train_model(dataset: &Dataset<f64, bool>) -> FittedLogisticRegression<f64, bool> {
    LogisticRegressionParams::new().fit(dataset).unwrap()
}

fn generate_noisy_classes(nfeatures: usize, nsamples: usize) -> Dataset<f64, bool> {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let features: Array2<f64> = Array2::random_using((nsamples, nfeatures), StandardNormal, &mut rng);
    let records = concatenate![Axis(1), Array2::ones((nsamples, 1)), features];
    let coefficients = Array1::linspace(-1., 1., nfeatures + 1);

    let targets = records
        .dot(&coefficients)
        .mapv(|eta| rng.gen::<f64>() < 1. / (1. + (-eta).exp()));

    Dataset::new(records, targets)
}

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("IRLS logistic regression");
    group.sample_size(10);
    for nfeatures in [5, 50] {
        for nsamples in [1_000, 10_000, 100_000] {
            let input = generate_noisy_classes(nfeatures, nsamples);
            group.bench_with_input(
                BenchmarkId::new("train_model", format!("{}x{}", nfeatures, nsamples)),
                &input,
                |b, dataset| {
                    b.iter(|| train_model(dataset));
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
