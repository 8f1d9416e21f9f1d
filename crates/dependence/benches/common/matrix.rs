/// Dataset shapes used across benchmarks.

#[derive(Debug, Clone, Copy)]
pub struct DatasetShape {
	pub name: &'static str,
	pub rows: usize,
	pub cols: usize,
}

pub const RANKING_SHAPES: &[DatasetShape] = &[
	DatasetShape {
		name: "small",
		rows: 1_000,
		cols: 20,
	},
	DatasetShape {
		name: "capped",
		rows: 50_000,
		cols: 20,
	},
	DatasetShape {
		name: "wide",
		rows: 10_000,
		cols: 500,
	},
];

pub const THREAD_COUNTS: &[usize] = &[1, 2, 4, 8];
