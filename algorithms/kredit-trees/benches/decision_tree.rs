use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kredit::prelude::*;
use kredit_datasets::generate;
use kredit_trees::DecisionTree;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

fn decision_tree_bench(c: &mut Criterion) {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);

    let training_set_sizes = &[100, 1000, 10000, 50000];

    // Use the default configuration
    let hyperparams = DecisionTree::params();

    let mut group = c.benchmark_group("decision_tree");
    group.sample_size(10);

    for n in training_set_sizes.iter() {
        let dataset = generate::credit_applications(*n, &mut rng)
            .and_then(|dataset| dataset.encode())
            .unwrap();

        group.bench_with_input(BenchmarkId::new("fit", n), &dataset, |b, d| {
            b.iter(|| hyperparams.fit(d))
        });

        let tree = hyperparams.fit(&dataset).unwrap();
        group.bench_with_input(BenchmarkId::new("predict", n), &dataset, |b, d| {
            b.iter(|| tree.predict(d))
        });
    }

    group.finish();
}

criterion_group!(benches, decision_tree_bench);
criterion_main!(benches);
