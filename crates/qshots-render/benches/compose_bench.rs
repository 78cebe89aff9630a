//! Benchmarks for frame compositing and GIF encoding
//!
//! Run with: cargo bench -p qshots-render

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qshots_device::{BackdropKind, DeviceLayoutRegistry};
use qshots_render::{
    AnimationAssembler, BitOrder, CountsTable, FrameCompositor, PulseStyle, ShotEvent,
    ShotSequenceBuilder,
};

/// Benchmark a single frame with every qubit pulsed
fn bench_single_frame(c: &mut Criterion) {
    let registry = DeviceLayoutRegistry::builtin();
    let mut group = c.benchmark_group("single_frame");

    for (name, kind) in [
        ("sparrow", BackdropKind::Gate),
        ("sparrow", BackdropKind::Xray),
        ("albatross", BackdropKind::Gate),
        ("unknown53a", BackdropKind::Gate),
    ] {
        let layout = registry.resolve(name).unwrap().layout(kind).unwrap();
        let event = ShotEvent::from_bits(vec![true; layout.capacity()]);
        let style = PulseStyle::default();
        let compositor = FrameCompositor::new();

        group.bench_with_input(
            BenchmarkId::new(kind.as_str(), name),
            &event,
            |b, event| {
                b.iter(|| compositor.render(black_box(event), layout, &style).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark expansion of a 1024-shot table
fn bench_expand(c: &mut Criterion) {
    let counts = CountsTable::from_pairs([("000", 510), ("111", 514)]).unwrap();
    let builder = ShotSequenceBuilder::new().with_seed(7);

    c.bench_function("expand_1024", |b| {
        b.iter(|| builder.expand(black_box(&counts)).unwrap());
    });
}

/// Benchmark rendering a batch, parallel vs sequential
fn bench_render_all(c: &mut Criterion) {
    let registry = DeviceLayoutRegistry::builtin();
    let layout = registry
        .resolve("sparrow")
        .unwrap()
        .layout(BackdropKind::Gate)
        .unwrap();
    let events: Vec<ShotEvent> = (0..128u32)
        .map(|i| ShotEvent::from_key(&format!("{:05b}", i % 32), BitOrder::LittleEndian))
        .collect();
    let style = PulseStyle::default();

    let mut group = c.benchmark_group("render_all_128");
    for parallel in [true, false] {
        let compositor = FrameCompositor::new().with_parallel(parallel);
        group.bench_function(if parallel { "parallel" } else { "sequential" }, |b| {
            b.iter(|| compositor.render_all(black_box(&events), layout, &style).unwrap());
        });
    }
    group.finish();
}

/// Benchmark GIF encoding of a short animation
fn bench_encode(c: &mut Criterion) {
    let registry = DeviceLayoutRegistry::builtin();
    let layout = registry
        .resolve("sparrow")
        .unwrap()
        .layout(BackdropKind::Gate)
        .unwrap();
    let events: Vec<ShotEvent> = (0..32u32)
        .map(|i| ShotEvent::from_key(&format!("{:05b}", i), BitOrder::LittleEndian))
        .collect();
    let frames = FrameCompositor::new()
        .render_all(&events, layout, &PulseStyle::default())
        .unwrap();
    let artifact = AnimationAssembler::new().assemble(frames, 3).unwrap();

    c.bench_function("encode_gif_32", |b| {
        b.iter(|| artifact.to_gif_bytes().unwrap());
    });
}

criterion_group!(
    benches,
    bench_single_frame,
    bench_expand,
    bench_render_all,
    bench_encode
);
criterion_main!(benches);
