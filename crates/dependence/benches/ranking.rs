//! Component benchmarks: interaction ranking and panel selection.

mod common;

use std::num::NonZeroUsize;

use common::criterion_config::default_criterion;
use common::matrix::{RANKING_SHAPES, THREAD_COUNTS};

use dependence::testing::{interaction_tensor_fixture, random_features};
use dependence::{
	Attributions, Coloring, DependenceConfig, FeatureMatrix, InteractionRanker, PanelData,
	PanelSelector, Target,
};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_rank_shapes(c: &mut Criterion) {
	let config = DependenceConfig::builder().seed(42).build().unwrap();
	let ranker = InteractionRanker::new(&config);

	let mut group = c.benchmark_group("component/rank/shapes");
	for shape in RANKING_SHAPES {
		let features = random_features(shape.rows, shape.cols, 1, -1.0, 1.0);
		let shap = random_features(shape.rows, shape.cols, 2, -0.5, 0.5);
		group.throughput(Throughput::Elements((shape.rows * shape.cols) as u64));
		group.bench_function(BenchmarkId::new("rank", shape.name), |b| {
			b.iter(|| {
				black_box(
					ranker
						.rank(0, FeatureMatrix::new(black_box(features.view())), black_box(shap.view()))
						.unwrap(),
				)
			})
		});
	}
	group.finish();
}

fn bench_rank_thread_scaling(c: &mut Criterion) {
	let (rows, cols) = (10_000, 200);
	let features = random_features(rows, cols, 3, -1.0, 1.0);
	let shap = random_features(rows, cols, 4, -0.5, 0.5);

	let mut group = c.benchmark_group("component/rank/thread_scaling");
	group.throughput(Throughput::Elements((rows * cols) as u64));
	for &n_threads in THREAD_COUNTS {
		let config = DependenceConfig::builder()
			.seed(42)
			.maybe_n_threads(NonZeroUsize::new(n_threads))
			.build()
			.unwrap();
		group.bench_with_input(BenchmarkId::new("rank", n_threads), &config, |b, config| {
			let ranker = InteractionRanker::new(config);
			b.iter(|| black_box(ranker.rank(0, FeatureMatrix::new(features.view()), shap.view()).unwrap()))
		});
	}
	group.finish();
}

fn bench_tensor_panels(c: &mut Criterion) {
	let (features, tensor) = interaction_tensor_fixture(5_000, 7);
	let config = DependenceConfig::default();
	let data = PanelData::new(FeatureMatrix::new(features.view()), Attributions::Tensor(tensor.view())).unwrap();
	let selector = PanelSelector::new(&config);
	let target = Target::pair(0usize, 0usize);

	let mut group = c.benchmark_group("component/panels/tensor");
	group.throughput(Throughput::Elements(5_000));
	group.bench_function("select_all", |b| {
		b.iter(|| black_box(selector.select_panels(&target, &Coloring::Auto, 3, black_box(&data)).unwrap()))
	});
	group.finish();
}

criterion_group! {
	name = benches;
	config = default_criterion();
	targets = bench_rank_shapes, bench_rank_thread_scaling, bench_tensor_panels
}
criterion_main!(benches);
