//! Measure classifying the default 100x100 grid against a boundary and a
//! handful of obstacles
//!

use bevy::math::Vec2;
use bevy_wavefront_planner::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Boundary filling most of the window with a row of square obstacles
fn prepare_contours() -> (Contour, Vec<Contour>) {
	let boundary = Contour::rectangle(Vec2::new(-450.0, -450.0), Vec2::new(450.0, 450.0));
	let obstacles = (0..5)
		.map(|i| {
			let x = -350.0 + 150.0 * i as f32;
			Contour::rectangle(Vec2::new(x, -50.0), Vec2::new(x + 80.0, 50.0))
		})
		.collect();
	(boundary, obstacles)
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let dimensions = GridDimensions::default();
	let (boundary, obstacles) = prepare_contours();
	group.bench_function("classify_grid", |b| {
		b.iter(|| {
			ClassificationField::classify(
				black_box(&dimensions),
				black_box(&boundary),
				black_box(&obstacles),
			)
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
