//! The built-in device catalog.
//!
//! Entries are listed in priority order; auto-selection breaks capacity ties
//! by position in this table. Pixel positions refer to the backdrop sizes
//! declared alongside them.

/// Radius of the gate-map pulse disc.
pub(crate) const GATE_PULSE_RADIUS: f32 = 14.0;
/// Padding around an x-ray resonator box.
pub(crate) const XRAY_PAD: f32 = 5.0;
/// Corner radius of an x-ray resonator box.
pub(crate) const XRAY_ROUNDING: f32 = 20.0;

/// Static description of one device sample.
#[derive(Debug)]
pub(crate) struct SampleSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub gate_size: (u32, u32),
    /// Gate-map qubit centres, indexed by qubit.
    pub gate_qubits: &'static [(f32, f32)],
    pub xray: Option<XraySpec>,
}

/// Static description of a chip photograph.
#[derive(Debug)]
pub(crate) struct XraySpec {
    pub size: (u32, u32),
    /// Resonator boxes as `(left, top, width, height)`, indexed by qubit.
    pub boxes: &'static [(f32, f32, f32, f32)],
}

// q0 left, q1 top, q2 centre, q3 right, q4 bottom
const BOWTIE_5: &[(f32, f32)] = &[
    (30.0, 100.0),
    (100.0, 31.0),
    (100.0, 100.0),
    (170.0, 100.0),
    (100.0, 169.0),
];

// Top row q0..q6 left to right, bottom row q7..q14 right to left.
const LADDER_15: &[(f32, f32)] = &[
    (55.0, 22.0),
    (111.0, 22.0),
    (167.0, 22.0),
    (222.0, 22.0),
    (278.0, 22.0),
    (334.0, 22.0),
    (390.0, 22.0),
    (446.0, 76.0),
    (390.0, 76.0),
    (334.0, 76.0),
    (278.0, 76.0),
    (222.0, 76.0),
    (167.0, 76.0),
    (111.0, 76.0),
    (55.0, 76.0),
];

const GRID_20: &[(f32, f32)] = &[
    (20.0, 32.0),
    (69.0, 32.0),
    (121.0, 32.0),
    (173.0, 32.0),
    (225.0, 32.0),
    (20.0, 92.0),
    (69.0, 92.0),
    (121.0, 92.0),
    (173.0, 92.0),
    (225.0, 92.0),
    (20.0, 154.0),
    (69.0, 154.0),
    (121.0, 154.0),
    (173.0, 154.0),
    (225.0, 154.0),
    (20.0, 217.0),
    (69.0, 217.0),
    (121.0, 217.0),
    (173.0, 217.0),
    (225.0, 217.0),
];

const HEAVY_HEX_53: &[(f32, f32)] = &[
    (85.0, 18.0),
    (117.0, 18.0),
    (149.0, 18.0),
    (181.0, 18.0),
    (213.0, 18.0),
    (85.0, 46.0),
    (213.0, 46.0),
    (19.0, 75.0),
    (52.0, 75.0),
    (85.0, 75.0),
    (117.0, 75.0),
    (149.0, 75.0),
    (181.0, 75.0),
    (213.0, 75.0),
    (246.0, 75.0),
    (279.0, 75.0),
    (19.0, 106.0),
    (149.0, 106.0),
    (279.0, 106.0),
    (19.0, 135.0),
    (52.0, 135.0),
    (85.0, 135.0),
    (117.0, 135.0),
    (149.0, 135.0),
    (181.0, 135.0),
    (213.0, 135.0),
    (246.0, 135.0),
    (279.0, 135.0),
    (85.0, 165.0),
    (213.0, 165.0),
    (19.0, 195.0),
    (52.0, 195.0),
    (85.0, 195.0),
    (117.0, 195.0),
    (149.0, 195.0),
    (181.0, 195.0),
    (213.0, 195.0),
    (246.0, 195.0),
    (279.0, 195.0),
    (19.0, 224.0),
    (149.0, 224.0),
    (279.0, 224.0),
    (19.0, 253.0),
    (52.0, 253.0),
    (85.0, 253.0),
    (117.0, 253.0),
    (149.0, 253.0),
    (181.0, 253.0),
    (213.0, 253.0),
    (246.0, 253.0),
    (279.0, 253.0),
    (85.0, 283.0),
    (213.0, 283.0),
];

// Readout resonators r0..r4 on the 5-qubit chip photograph.
const SPARROW_RESONATORS: &[(f32, f32, f32, f32)] = &[
    (141.0, 245.0, 134.0, 27.0),
    (27.0, 226.0, 91.0, 45.0),
    (37.0, 97.0, 37.0, 103.0),
    (27.0, 27.0, 91.0, 44.0),
    (141.0, 27.0, 134.0, 26.0),
];

pub(crate) const CATALOG: &[SampleSpec] = &[
    SampleSpec {
        name: "sparrow",
        aliases: &["ibmqx2", "ibmq_yorktown", "ibmq_tenerife"],
        gate_size: (200, 200),
        gate_qubits: BOWTIE_5,
        xray: Some(XraySpec {
            size: (300, 300),
            boxes: SPARROW_RESONATORS,
        }),
    },
    SampleSpec {
        name: "snake",
        aliases: &["ibmq_athens", "ibmq_santiago"],
        gate_size: (200, 200),
        gate_qubits: BOWTIE_5,
        xray: None,
    },
    SampleSpec {
        name: "giraffe",
        aliases: &["ibmq_vigo", "ibmq_ourense", "ibmq_valencia"],
        gate_size: (200, 200),
        gate_qubits: BOWTIE_5,
        xray: None,
    },
    SampleSpec {
        name: "albatross",
        aliases: &["ibmq_16_melbourne", "ibmq_melbourne"],
        gate_size: (500, 100),
        gate_qubits: LADDER_15,
        xray: None,
    },
    SampleSpec {
        name: "unknown20a",
        aliases: &["ibmq_johannesburg", "ibmq_poughkeepsie"],
        gate_size: (250, 250),
        gate_qubits: GRID_20,
        xray: None,
    },
    SampleSpec {
        name: "unknown20b",
        aliases: &["ibmq_almaden", "ibmq_boeblingen", "ibmq_singapore"],
        gate_size: (250, 250),
        gate_qubits: GRID_20,
        xray: None,
    },
    SampleSpec {
        name: "unknown53a",
        aliases: &["ibmq_rochester"],
        gate_size: (300, 300),
        gate_qubits: HEAVY_HEX_53,
        xray: None,
    },
];
