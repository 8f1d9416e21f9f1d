use std::time::Duration;

use criterion::Criterion;

/// Criterion settings for component benchmarks.
pub fn default_criterion() -> Criterion {
	Criterion::default()
		.sample_size(30)
		.warm_up_time(Duration::from_secs(1))
		.measurement_time(Duration::from_secs(5))
		.noise_threshold(0.02)
}
