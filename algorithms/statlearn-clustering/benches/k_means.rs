use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use ndarray::Array2;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;
use statlearn::traits::Fit;
use statlearn::DatasetBase;
use statlearn_clustering::KMeans;
use statlearn_datasets::generate;

fn k_means_bench(c: &mut Criterion) {
    let mut rng = Xoshiro256Plus::seed_from_u64(40);
    let cluster_sizes = vec![(100, 4), (400, 10), (3000, 10)];

    let mut benchmark = c.benchmark_group("lloyd_k_means");
    benchmark.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    for (cluster_size, n_clusters) in cluster_sizes {
        let rng = &mut rng;
        let n_features = 3;
        let centroids =
            Array2::random_using((n_clusters, n_features), Uniform::new(-30., 30.), rng);
        let dataset = DatasetBase::from(generate::blobs(cluster_size, &centroids, rng));
        benchmark.bench_function(BenchmarkId::new("lloyd_k_means", cluster_size), |bencher| {
            bencher.iter(|| {
                KMeans::params_with_rng(black_box(n_clusters), black_box(rng.clone()))
                    .max_n_iterations(black_box(1000))
                    .fit(&dataset)
                    .unwrap()
            });
        });
    }

    benchmark.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = k_means_bench
}
criterion_main!(benches);
