//! Frame rendering and coordinate mapping benchmarks

use std::hint::black_box;

use compass_overlay_core::{
    CoordinateMapper, GridTopology, HeatmapDataset, Marker, TransformState, Viewport,
};
use compass_overlay_render::{render_frame, RenderInputs, RenderStyle, SceneState};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point2;

fn markers(count: usize) -> Vec<Marker> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count.max(1) as f64;
            Marker::new(format!("m{i}"), Point2::new(3.0 * t, 1.5 + (t * 6.0).sin()))
        })
        .collect()
}

fn benchmark_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render Frame");
    let data = HeatmapDataset::from_matrix([[0.9, 0.4, 0.3], [0.2, 1.0, 0.6], [0.7, 0.15, 0.5]])
        .expect("valid matrix");
    let style = RenderStyle::default();
    let transform = TransformState {
        rotation: 0.3,
        ..TransformState::default()
    };

    for count in [0usize, 10, 100] {
        let m = markers(count);
        for topology in [GridTopology::Rectangular, GridTopology::Radial] {
            let scene = SceneState {
                viewport: Viewport::default(),
                transform,
                topology,
                opacity: 0.8,
                markers: &m,
                active_marker: None,
            };
            let inputs = RenderInputs {
                facing_angle_deg: 135.0,
                heatmap: Some(&data),
                background: None,
            };
            let id = BenchmarkId::new(format!("{topology:?}"), count);
            group.bench_with_input(id, &scene, |b, scene| {
                b.iter(|| render_frame(black_box(scene), &inputs, &style))
            });
        }
    }

    group.finish();
}

fn benchmark_mapping(c: &mut Criterion) {
    let state = TransformState {
        translation_x: 312.0,
        translation_y: 288.0,
        scale: 240.0,
        rotation: -0.7,
    };
    let points: Vec<Point2<f64>> = (0..1000)
        .map(|i| Point2::new((i % 600) as f64, (i / 2) as f64))
        .collect();

    c.bench_function("inverse_then_forward_1000", |b| {
        b.iter(|| {
            let mapper = CoordinateMapper::new(&state);
            points
                .iter()
                .map(|p| mapper.forward_point(mapper.inverse_point(*p)))
                .fold(0.0, |acc, p| acc + p.x)
        })
    });
}

fn benchmark_svg_export(c: &mut Criterion) {
    let m = markers(20);
    let scene = SceneState {
        viewport: Viewport::default(),
        transform: TransformState::default(),
        topology: GridTopology::Radial,
        opacity: 1.0,
        markers: &m,
        active_marker: None,
    };
    let frame = render_frame(&scene, &RenderInputs::default(), &RenderStyle::default());
    c.bench_function("to_svg", |b| b.iter(|| black_box(&frame).to_svg()));
}

criterion_group!(
    benches,
    benchmark_render_frame,
    benchmark_mapping,
    benchmark_svg_export
);
criterion_main!(benches);
