//! End-to-end tests: counts in, GIF out.

use std::io::{BufReader, Cursor};
use std::time::Duration;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use qshots_device::{BackdropKind, BackendDescriptor, DeviceError, DeviceLayoutRegistry};
use qshots_render::{
    AnimError, AnimationAssembler, AnimationOptions, Animator, CountsTable, ErrorCategory,
    FrameCompositor, SampleSelector, ShotOrder, save_quantum_animation,
    try_save_quantum_animation,
};

fn ghz_counts() -> CountsTable {
    CountsTable::from_json(r#"{"000": 510, "111": 514}"#).unwrap()
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[test]
fn ghz_on_sparrow_gate_map() {
    let registry = DeviceLayoutRegistry::builtin();
    let animator = Animator::new(&registry);
    let options = AnimationOptions {
        order: ShotOrder::Shuffled { seed: Some(2019) },
        ..AnimationOptions::default()
    };

    let plan = animator
        .plan("gate", 3, &ghz_counts(), &"sparrow".into(), &options)
        .unwrap();
    let artifact = animator
        .render(&plan, &FrameCompositor::new(), &|| {})
        .unwrap();

    assert_eq!(artifact.frame_count(), 1024);
    assert_eq!(artifact.gif_delay_centis(), 33);
    assert!((artifact.frame_delay().as_secs_f64() - 1.0 / 3.0).abs() < 1e-9);

    let layout = plan.layout();
    let mut empty = 0;
    let mut full = 0;
    for frame in artifact.frames() {
        match frame.pulse_count() {
            0 => empty += 1,
            3 => {
                full += 1;
                for (q, mark) in frame.pulses().iter().enumerate() {
                    assert_eq!(mark.qubit, q);
                    assert_eq!(Some(mark.center), layout.coordinate(q));
                }
            }
            n => panic!("unexpected overlay count {n}"),
        }
    }
    assert_eq!((empty, full), (510, 514));
}

#[test]
fn save_writes_looping_gif() {
    let registry = DeviceLayoutRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ghz.gif");
    let counts = CountsTable::from_pairs([("000", 5), ("111", 7)]).unwrap();

    let report = try_save_quantum_animation(
        &registry,
        &path,
        "gate",
        3,
        &counts,
        &"sparrow".into(),
        &AnimationOptions::default(),
    )
    .unwrap();

    assert_eq!(report.frames, 12);
    assert_eq!(report.pulses, 21);
    assert_eq!(report.sample, "sparrow");
    assert_eq!(report.kind, BackdropKind::Gate);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), report.bytes);
    let frames = GifDecoder::new(BufReader::new(Cursor::new(bytes)))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 12);
    for frame in &frames {
        let (numer, denom) = frame.delay().numer_denom_ms();
        assert_eq!(Duration::from_millis(u64::from(numer / denom)), Duration::from_millis(330));
    }
}

#[test]
fn labeled_xray_animation() {
    let registry = DeviceLayoutRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xray.gif");
    let counts = CountsTable::from_pairs([("10101", 2), ("01010", 2)]).unwrap();
    let options = AnimationOptions {
        labeled: true,
        color: "cyan".into(),
        intensity: 0.9,
        ..AnimationOptions::default()
    };

    let report = try_save_quantum_animation(
        &registry,
        &path,
        "x-ray",
        5,
        &counts,
        &"ibmq_yorktown".into(),
        &options,
    )
    .unwrap();
    assert_eq!(report.kind, BackdropKind::Xray);
    assert_eq!(report.frames, 4);
    assert_eq!(report.pulses, 10);
}

#[test]
fn auto_selected_sample() {
    let registry = DeviceLayoutRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auto.gif");
    let counts = CountsTable::from_pairs([("0".repeat(16), 1), ("1".repeat(16), 1)]).unwrap();
    let selector = SampleSelector::from(BackendDescriptor::simulator("qasm_simulator"));

    let report = try_save_quantum_animation(
        &registry,
        &path,
        "gate",
        2,
        &counts,
        &selector,
        &AnimationOptions::default(),
    )
    .unwrap();
    assert_eq!(report.sample, "unknown20a");
    assert_eq!(report.pulses, 16);
}

#[test]
fn sequential_and_parallel_agree() {
    let registry = DeviceLayoutRegistry::builtin();
    let animator = Animator::new(&registry);
    let counts = CountsTable::from_pairs([("00", 3), ("01", 3), ("11", 4)]).unwrap();
    let options = AnimationOptions {
        order: ShotOrder::Grouped,
        ..AnimationOptions::default()
    };
    let plan = animator
        .plan("gate", 4, &counts, &"giraffe".into(), &options)
        .unwrap();

    let parallel = animator
        .render(&plan, &FrameCompositor::new(), &|| {})
        .unwrap();
    let sequential = animator
        .render(&plan, &FrameCompositor::new().with_parallel(false), &|| {})
        .unwrap();
    for (p, s) in parallel.frames().iter().zip(sequential.frames()) {
        assert_eq!(p.image(), s.image());
    }
}

// ---------------------------------------------------------------------------
// Failures leave no file behind
// ---------------------------------------------------------------------------

fn assert_fails_without_file(
    kind: &str,
    fps: u32,
    counts: &CountsTable,
    sample: &str,
    options: &AnimationOptions,
) -> AnimError {
    let registry = DeviceLayoutRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.gif");

    assert!(!save_quantum_animation(
        &registry,
        &path,
        kind,
        fps,
        counts,
        &sample.into(),
        options
    ));
    assert!(!path.exists());

    let err = try_save_quantum_animation(
        &registry,
        &path,
        kind,
        fps,
        counts,
        &sample.into(),
        options,
    )
    .unwrap_err();
    assert!(!path.exists());
    err
}

#[test]
fn twenty_qubits_on_five_qubit_device() {
    let counts = CountsTable::from_pairs([("0".repeat(20), 10), ("1".repeat(20), 10)]).unwrap();
    let err = assert_fails_without_file("gate", 3, &counts, "sparrow", &AnimationOptions::default());
    assert!(matches!(
        err,
        AnimError::Device(DeviceError::InsufficientCapacity {
            capacity: 5,
            required: 20,
            ..
        })
    ));
    assert_eq!(err.category(), ErrorCategory::Capacity);
}

#[test]
fn intensity_out_of_range() {
    let options = AnimationOptions {
        intensity: 1.5,
        ..AnimationOptions::default()
    };
    let err = assert_fails_without_file("gate", 3, &ghz_counts(), "sparrow", &options);
    assert!(matches!(err, AnimError::OutOfRange(v) if v == 1.5));
}

#[test]
fn unknown_color() {
    let options = AnimationOptions {
        color: "ultraviolet".into(),
        ..AnimationOptions::default()
    };
    let err = assert_fails_without_file("gate", 3, &ghz_counts(), "sparrow", &options);
    assert!(matches!(err, AnimError::UnknownColor { ref name, .. } if name == "ultraviolet"));
}

#[test]
fn unknown_kind_sample_and_rate() {
    let options = AnimationOptions::default();
    let counts = ghz_counts();

    let err = assert_fails_without_file("movie", 3, &counts, "sparrow", &options);
    assert_eq!(err.category(), ErrorCategory::InputValidation);

    let err = assert_fails_without_file("gate", 3, &counts, "osprey", &options);
    assert_eq!(err.category(), ErrorCategory::Lookup);

    let err = assert_fails_without_file("gate", 0, &counts, "sparrow", &options);
    assert!(matches!(err, AnimError::InvalidRate(0)));
}

#[test]
fn all_zero_counts() {
    let counts = CountsTable::from_pairs([("000", 0)]).unwrap();
    let err = assert_fails_without_file("gate", 3, &counts, "sparrow", &AnimationOptions::default());
    assert!(matches!(err, AnimError::EmptyInput));
}

#[test]
fn overflowing_counts_rejected() {
    let err = CountsTable::from_json(r#"{"0": 18446744073709551615, "1": 1}"#).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InputValidation);

    let counts = CountsTable::from_pairs([("1", u64::MAX)]).unwrap();
    let err = assert_fails_without_file("gate", 3, &counts, "sparrow", &AnimationOptions::default());
    assert!(matches!(err, AnimError::MalformedCounts(_)));
}

// ---------------------------------------------------------------------------
// Assembly timing
// ---------------------------------------------------------------------------

#[test]
fn total_duration_is_frames_over_fps() {
    let registry = DeviceLayoutRegistry::builtin();
    let animator = Animator::new(&registry);
    let counts = CountsTable::from_pairs([("00000", 4), ("11111", 5)]).unwrap();
    let plan = animator
        .plan("gate", 3, &counts, &"snake".into(), &AnimationOptions::default())
        .unwrap();
    let frames = FrameCompositor::new()
        .render_all(plan.events(), plan.layout(), plan.style())
        .unwrap();

    let artifact = AnimationAssembler::new().assemble(frames, 3).unwrap();
    assert_eq!(artifact.total_duration(), Duration::from_secs(3));
}
