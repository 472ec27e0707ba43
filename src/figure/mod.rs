//! Figure description: axes, capability lines, regions and annotations

pub mod render;
pub mod scene;
pub mod style;

use plotters::style::RGBColor;

use crate::workload::WorkloadTable;
use style::{Emphasis, LineStyle};

/// Canvas size of every figure, in pixels
pub const FIGURE_SIZE: (u32, u32) = (1000, 1000);

/// Log-log axis configuration
#[derive(Clone, Debug)]
pub struct Axes {
    /// Latency range [s]
    pub x_range: (f64, f64),
    /// Bandwidth range [B/s]
    pub y_range: (f64, f64),
    pub x_desc: String,
    pub y_desc: String,
    /// Right-hand axis sharing the y range
    pub secondary_y_desc: Option<String>,
    pub grid: bool,
}

/// Free text at literal data coordinates.
/// `\n` starts a new line below the previous one.
#[derive(Clone, Debug)]
pub struct Annotation {
    pub text: String,
    pub at: (f64, f64),
    pub color: RGBColor,
    pub size: f64,
    pub emphasis: Emphasis,
}

impl Annotation {
    pub fn new(text: &str, at: (f64, f64), color: RGBColor, size: f64) -> Self {
        Self {
            text: text.to_string(),
            at,
            color,
            size,
            emphasis: Emphasis::Normal,
        }
    }

    pub fn italic(mut self) -> Self {
        self.emphasis = Emphasis::Italic;
        self
    }

    pub fn bold(mut self) -> Self {
        self.emphasis = Emphasis::Bold;
        self
    }
}

/// Horizontal hardware capability line spanning the whole x range
#[derive(Clone, Debug)]
pub struct CapabilityLine {
    /// Capability in B/s or Op/s
    pub y: f64,
    pub color: RGBColor,
    pub line: LineStyle,
    pub label: Option<Annotation>,
}

/// Constant model-size curve: bandwidth = bytes / latency
#[derive(Clone, Debug)]
pub struct ModelSizeCurve {
    pub bytes: f64,
    /// Latencies the curve passes through
    pub latencies: Vec<f64>,
    pub color: RGBColor,
    pub label: Option<Annotation>,
}

impl ModelSizeCurve {
    pub fn bandwidth_at(&self, latency: f64) -> f64 {
        self.bytes / latency
    }
}

/// Translucent filled area
#[derive(Clone, Debug)]
pub enum RegionShape {
    /// Axis-aligned box
    Rect { x: (f64, f64), y: (f64, f64) },
    /// Area between a model-size curve and a constant floor,
    /// over the given latencies
    BelowCurve {
        bytes: f64,
        latencies: Vec<f64>,
        floor: f64,
    },
}

#[derive(Clone, Debug)]
pub struct ShadedRegion {
    pub shape: RegionShape,
    pub color: RGBColor,
    pub opacity: f64,
    pub legend: Option<String>,
}

/// Position of a point label relative to its point.
/// Offsets are multiplicative since both axes are logarithmic.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlacement {
    pub x_factor: f64,
    pub y_factor: f64,
    /// Replaces the workload name when set
    pub text: Option<String>,
}

impl Default for LabelPlacement {
    fn default() -> Self {
        Self {
            x_factor: 1.0,
            y_factor: 1.0,
            text: None,
        }
    }
}

/// How workloads are identified on the figure
#[derive(Clone, Debug)]
pub enum PointLabels {
    /// Text next to each point
    Inline {
        size: f64,
        placements: Vec<(String, LabelPlacement)>,
    },
    /// Legend entries only
    Legend,
}

impl PointLabels {
    /// Placement and font size of a named workload's label.
    /// Unknown names sit on their point.
    pub fn placement(&self, name: &str) -> Option<(LabelPlacement, f64)> {
        match self {
            PointLabels::Inline { size, placements } => Some((
                placements
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, p)| p.clone())
                    .unwrap_or_default(),
                *size,
            )),
            PointLabels::Legend => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Everything drawn on a figure apart from the workload points
#[derive(Clone, Debug)]
pub struct FigureSpec {
    /// Output file stem
    pub stem: String,
    pub axes: Axes,
    pub capability_lines: Vec<CapabilityLine>,
    pub model_curves: Vec<ModelSizeCurve>,
    pub regions: Vec<ShadedRegion>,
    pub annotations: Vec<Annotation>,
    pub labels: PointLabels,
    pub legend: Option<LegendPosition>,
}

/// A figure spec paired with the workloads it plots
#[derive(Clone, Debug)]
pub struct Figure {
    pub spec: FigureSpec,
    pub table: WorkloadTable,
}

impl Figure {
    pub fn with_table(mut self, table: WorkloadTable) -> Self {
        self.table = table;
        self
    }
}
