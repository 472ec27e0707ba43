//! Built-in figures and their workload tables

use crate::error::PlotResult;
use crate::figure::style::{self, LineStyle};
use crate::figure::{
    Annotation, Axes, CapabilityLine, Figure, FigureSpec, LabelPlacement,
    LegendPosition, ModelSizeCurve, PointLabels, RegionShape, ShadedRegion,
};
use crate::workload::{WorkloadEntry, WorkloadTable};

/// LHC bunch crossing rate [Hz]
const LHC_CROSSING_RATE: f64 = 40e6;
/// DDR bandwidth of the evaluation boards [B/s]
const DRAM_BANDWIDTH: f64 = 20e9;
const BRAM_BANDWIDTH: f64 = 10e12;
const FF_BANDWIDTH: f64 = 300e12;
/// 400 AI-engine tiles, 128 MACs each, at 1 GHz [Op/s]
const AIE_COMPUTE: f64 = 400.0 * 128.0 * 1e9;
const ZCU104_COMPUTE: f64 = 1.2e12;
/// On-chip memory of the AI-engine device [B]
const AIE_MEMORY: f64 = 32e6;

const LINE_LABEL_SIZE: f64 = 18.0;
const POINT_LABEL_SIZE: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FigureKind {
    /// Data rate vs computation time of the benchmark tasks
    Xdr,
    /// Model bandwidth vs latency against on-chip capabilities
    Onchip,
}

impl FigureKind {
    pub const ALL: [FigureKind; 2] = [FigureKind::Xdr, FigureKind::Onchip];

    pub fn figure(self) -> PlotResult<Figure> {
        match self {
            FigureKind::Xdr => xdr(),
            FigureKind::Onchip => onchip(),
        }
    }
}

fn placement(name: &str, x_factor: f64, y_factor: f64) -> (String, LabelPlacement) {
    (
        name.to_string(),
        LabelPlacement {
            x_factor,
            y_factor,
            text: None,
        },
    )
}

pub fn xdr_workloads() -> PlotResult<WorkloadTable> {
    WorkloadTable::make(vec![
        WorkloadEntry::new("LHC sensor", (25e12, 100e12), (10e-9, 25e-9)),
        WorkloadEntry::new(
            "LHC trigger",
            (32.0 * LHC_CROSSING_RATE, 32.0 * LHC_CROSSING_RATE),
            (100e-9, 5e-6),
        ),
        // Booster control
        WorkloadEntry::new("Beam control", (3e3 * 15.0, 3e3 * 15.0), (100e-6, 5e-3)),
        WorkloadEntry::new("Magnet quench", (3e6, 3e6), (100e-6, 100e-6)),
        WorkloadEntry::new("DUNE readout", (0.8e9, 0.8e9), (1e-6, 1e-6)),
        WorkloadEntry::new("Qubit Readout", (9e9, 9e9), (100e-9, 100e-9)),
        WorkloadEntry::new("EIC trigger", (7.5e9, 7.5e9), (500e-9, 500e-9)),
        WorkloadEntry::new("X-ray diffraction", (10e6, 100e6), (1e-6, 20e-6)),
        WorkloadEntry::new("Electron microscopy", (0.6e9, 0.6e9), (50e-6, 50e-6)),
        WorkloadEntry::new("Plasma control", (3e9, 3e9), (5e-6, 20e-6)),
        WorkloadEntry::new("Neuro", (5e6, 5e6), (1e-3, 1e-3)),
        WorkloadEntry::new(
            "Internet-of-things",
            (3e3 / 100e-3, 3e3 / 1e-3),
            (1e-3, 100e-3),
        ),
        WorkloadEntry::new(
            "Mobile devices",
            (1e3 / 100e-3, 1e3 / 40e-3),
            (40e-3, 100e-3),
        ),
    ])
}

/// Data rate and computation time of the Fast ML for Science benchmark tasks
pub fn xdr() -> PlotResult<Figure> {
    let (x_min, x_max) = (1e-9, 1e5);
    let (y_min, y_max) = (1e2, 2e14);

    let spec = FigureSpec {
        stem: "sciml_graph".to_string(),
        axes: Axes {
            x_range: (x_min, x_max),
            y_range: (y_min, y_max),
            x_desc: "Computation time [s]".to_string(),
            y_desc: "Data rate [B/s]".to_string(),
            secondary_y_desc: None,
            grid: false,
        },
        capability_lines: vec![],
        model_curves: vec![],
        // Envelope of the benchmark tasks
        regions: vec![ShadedRegion {
            shape: RegionShape::Rect {
                x: (x_min, 5e-3),
                y: (3e3 * 15.0, y_max),
            },
            color: style::GRAY,
            opacity: 0.2,
            legend: None,
        }],
        annotations: vec![
            Annotation::new("Fast ML for Science", (2e-2, 2e13), style::GRAY, 24.0)
                .bold(),
            Annotation::new("benchmark tasks", (2e-2, 5e12), style::GRAY, 22.0)
                .italic(),
        ],
        labels: PointLabels::Inline {
            size: POINT_LABEL_SIZE,
            placements: vec![
                placement("Internet-of-things", 5.0, 2.0),
                placement("Mobile devices", 2.0, 2.0),
                placement("Beam control", 1.0 / 5e3, 2.0),
                placement("LHC sensor", 3.0, 1.0 / 2.0),
                placement("X-ray diffraction", 3.0, 1.6),
                placement("EIC trigger", 1.0 / 100.0, 1.0 / 3.0),
                placement("Qubit Readout", 1.0 / 10.0, 1.9),
                placement("Plasma control", 3.0, 1.0),
                placement("DUNE readout", 1.0 / 5e2, 1.0 / 3.0),
                placement("LHC trigger", 10.0, 1.0 / 1.2),
                placement("Magnet quench", 1.0 / 1e3, 1.0 / 4.0),
                placement("Electron microscopy", 1.5, 1.0 / 2.0),
                placement("Neuro", 1.0 / 5.0, 1.7),
            ],
        },
        legend: None,
    };

    Ok(Figure {
        spec,
        table: xdr_workloads()?,
    })
}

/// Bandwidth needed to stream the model weights within the latency budget
pub fn onchip_workloads() -> PlotResult<WorkloadTable> {
    WorkloadTable::make(vec![
        // 2k weights / 25 ns
        WorkloadEntry::new("LHC sensor", (80e9, 100e9), (10e-9, 25e-9)),
        // 4k weights / 150 ns
        WorkloadEntry::new("LHC trigger", (26e9, 30e9), (150e-9, 200e-9)),
        // 35k weights / 4 us
        WorkloadEntry::new("Beam control", (9e9, 25e9), (1e-6, 7e-6)),
        // 13k weights / 7 us
        WorkloadEntry::new("Plasma control", (2e9, 2e9), (5e-6, 10e-6)),
        WorkloadEntry::new("Keyword Spotting", (9e9, 17e9), (17e-6, 33e-6)),
        WorkloadEntry::new("Anomaly Detection", (4e8, 1e9), (19e-6, 45e-6)),
    ])
}

/// Model bandwidth of the workloads against DRAM, on-chip memory
/// and compute capabilities
pub fn onchip() -> PlotResult<Figure> {
    let capability = |y: f64, color, line, label: Annotation| CapabilityLine {
        y,
        color,
        line,
        label: Some(label),
    };
    let aie_latencies = vec![1e-9, 1e-3, 1.5e-3, 1e-1];

    let spec = FigureSpec {
        stem: "sciml_onchip_aie_graph".to_string(),
        axes: Axes {
            x_range: (1e-9, 1e-1),
            y_range: (5e7, 5e14),
            x_desc: "Model Latency [s]".to_string(),
            y_desc: "Memory bandwidth [B/s]".to_string(),
            secondary_y_desc: Some("Compute Performance [Op/s]".to_string()),
            grid: true,
        },
        capability_lines: vec![
            capability(
                DRAM_BANDWIDTH,
                style::GREEN,
                LineStyle::Dashed,
                Annotation::new("DRAM", (2e-9, 1.1e10), style::GREEN, LINE_LABEL_SIZE)
                    .italic(),
            ),
            capability(
                BRAM_BANDWIDTH,
                style::RED,
                LineStyle::Dashed,
                Annotation::new("BRAM", (2e-9, 5e12), style::RED, LINE_LABEL_SIZE)
                    .italic(),
            ),
            capability(
                FF_BANDWIDTH,
                style::BLUE,
                LineStyle::Dashed,
                Annotation::new("FF", (2e-9, 150e12), style::BLUE, LINE_LABEL_SIZE)
                    .italic(),
            ),
            capability(
                AIE_COMPUTE,
                style::TAB_BLUE,
                LineStyle::Dotted,
                Annotation::new(
                    "AIE compute",
                    (1e-3, AIE_COMPUTE * 1.15),
                    style::TAB_BLUE,
                    LINE_LABEL_SIZE,
                )
                .italic(),
            ),
            capability(
                ZCU104_COMPUTE,
                style::TAB_ORANGE,
                LineStyle::Dotted,
                Annotation::new(
                    "ZCU104 compute",
                    (5e-4, ZCU104_COMPUTE * 1.15),
                    style::TAB_ORANGE,
                    LINE_LABEL_SIZE,
                )
                .italic(),
            ),
        ],
        // A fully-connected layer of N bytes needs N x N operations,
        // so a fixed model size is a line of slope -1
        model_curves: vec![
            ModelSizeCurve {
                bytes: 100e3,
                latencies: vec![1e-9, 1e-6, 1e-5, 10e-3, 10.0, 1e3],
                color: style::PURPLE,
                label: Some(Annotation::new(
                    "100 KB model size",
                    (0.5e-4, 0.75e8),
                    style::PURPLE,
                    LINE_LABEL_SIZE,
                )),
            },
            ModelSizeCurve {
                bytes: 5e6,
                latencies: vec![1e-9, 1e-5, 1e-1],
                color: style::MAGENTA,
                label: Some(Annotation::new(
                    "ZCU104 (5 MB)",
                    (0.65e-3, 5e8),
                    style::MAGENTA,
                    LINE_LABEL_SIZE,
                )),
            },
            ModelSizeCurve {
                bytes: AIE_MEMORY,
                latencies: aie_latencies.clone(),
                color: style::RED,
                label: Some(Annotation::new(
                    "AIE (32 MB)",
                    (6e-3, 7e8),
                    style::RED,
                    LINE_LABEL_SIZE,
                )),
            },
        ],
        regions: vec![ShadedRegion {
            shape: RegionShape::BelowCurve {
                bytes: AIE_MEMORY,
                latencies: aie_latencies[..3].to_vec(),
                floor: DRAM_BANDWIDTH,
            },
            color: style::RED,
            opacity: 0.15,
            legend: Some("On-chip inference\nrequired".to_string()),
        }],
        annotations: vec![],
        labels: PointLabels::Legend,
        legend: Some(LegendPosition::LowerLeft),
    };

    Ok(Figure {
        spec,
        table: onchip_workloads()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::scene::Scene;

    #[test]
    fn test_presets_build() {
        for kind in FigureKind::ALL {
            let figure = kind.figure().unwrap();
            let scene = Scene::build(&figure).unwrap();
            assert_eq!(scene.markers.len(), figure.table.len());
        }
    }

    #[test]
    fn test_xdr_layout() {
        let figure = xdr().unwrap();
        assert_eq!(figure.table.len(), 13);
        let scene = Scene::build(&figure).unwrap();
        // One label per workload plus the two title lines
        assert_eq!(scene.texts.len(), 15);
        assert_eq!(scene.polygons.len(), 1);
        assert!(scene.polylines.is_empty());
        assert!(scene.legend.is_none());
    }

    #[test]
    fn test_onchip_layout() {
        let figure = onchip().unwrap();
        assert_eq!(figure.table.len(), 6);
        let scene = Scene::build(&figure).unwrap();
        // Five capability lines and three model-size curves
        assert_eq!(scene.polylines.len(), 8);
        assert_eq!(scene.texts.len(), 8);
        assert_eq!(scene.legend, Some(LegendPosition::LowerLeft));

        // The on-chip region sits above the DRAM line
        let region = &scene.polygons[0].points;
        assert!(region.iter().all(|&(_, y)| y >= DRAM_BANDWIDTH));
    }

    fn near((x, y): (f64, f64), (ex, ey): (f64, f64)) -> bool {
        (x / ex - 1.0).abs() < 1e-9 && (y / ey - 1.0).abs() < 1e-9
    }

    #[test]
    fn test_onchip_shapes_follow_axes() {
        let scene = Scene::build(&onchip().unwrap()).unwrap();

        // The 32 MB region keeps its corner under the top of the axes
        let region = &scene.polygons[0].points;
        assert!(region.iter().any(|&p| near(p, (1e-9, 5e14))));
        assert!(region.iter().any(|&p| near(p, (6.4e-8, 5e14))));
        assert!(region.iter().all(|&(_, y)| y <= 5e14 * (1.0 + 1e-9)));

        // The 100 KB curve leaves through the bottom at 2 ms
        let curve = scene
            .polylines
            .iter()
            .find(|l| l.color == style::PURPLE)
            .unwrap();
        assert!(near(*curve.points.last().unwrap(), (2e-3, 5e7)));
        assert!(curve.points.iter().all(|&(x, y)| x <= 2e-3 * (1.0 + 1e-9) && y >= 5e7 / (1.0 + 1e-9)));
    }

    #[test]
    fn test_beam_control_point() {
        let table = onchip_workloads().unwrap();
        let points = table.points().unwrap();
        let beam = table
            .entries()
            .iter()
            .position(|e| e.name == "Beam control")
            .unwrap();
        assert!((points[beam].y.value - 1.5e10).abs() < 1.0);
        assert!((points[beam].y.err_lo - 6e9).abs() < 1.0);
        assert!((points[beam].y.err_hi - 1e10).abs() < 1.0);
    }

    #[test]
    fn test_aie_compute() {
        assert_eq!(AIE_COMPUTE, 5.12e13);
    }
}
