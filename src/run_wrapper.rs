//! A figure generation wrapper: table -> points -> scene -> files

use std::path::{Path, PathBuf};

use log::info;

use crate::error::PlotResult;
use crate::figure::scene::Scene;
use crate::figure::Figure;
use crate::output::{self, OutputPaths};
use crate::presets::FigureKind;
use crate::workload::WorkloadTable;

/// Run policy
#[derive(Clone, Debug)]
pub struct RunPolicy {
    /// Directory receiving the figures
    pub output_dir: PathBuf,
    /// Replaces the built-in workload table when set
    pub workloads: Option<PathBuf>,
    /// Derived points CSV
    pub points: Option<PathBuf>,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            workloads: None,
            points: None,
        }
    }
}

/// Points file of one figure; `tagged` appends the figure stem
/// so that several figures do not overwrite each other
fn points_path(base: &Path, stem: &str, tagged: bool) -> PathBuf {
    if !tagged {
        return base.to_path_buf();
    }
    let base_stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    base.with_file_name(format!("{}_{}.{}", base_stem, stem, extension))
}

/// Generates one figure and returns the written image paths
pub fn run_figure(
    figure: &Figure,
    policy: &RunPolicy,
    points: Option<&Path>,
) -> PlotResult<OutputPaths> {
    info!(
        "Generating {} with {} workloads",
        figure.spec.stem,
        figure.table.len()
    );

    // Invalid bounds fail here, before anything is drawn
    let scene = Scene::build(figure)?;

    if let Some(path) = points {
        output::write_points(path, &scene.markers)?;
    }

    output::write_figure(&scene, &policy.output_dir, &figure.spec.stem)
}

/// Generates the given built-in figures
pub fn run(kinds: &[FigureKind], policy: &RunPolicy) -> PlotResult<Vec<OutputPaths>> {
    let table = match &policy.workloads {
        Some(path) => {
            let table = WorkloadTable::from_csv(path)?;
            info!("Loaded {} workloads from {}", table.len(), path.display());
            Some(table)
        }
        None => None,
    };

    let mut written = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let mut figure = kind.figure()?;
        if let Some(table) = &table {
            figure = figure.with_table(table.clone());
        }
        let points = policy
            .points
            .as_deref()
            .map(|p| points_path(p, &figure.spec.stem, kinds.len() > 1));
        written.push(run_figure(&figure, policy, points.as_deref())?);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;

    #[test]
    fn test_points_path() {
        let base = Path::new("out/points.csv");
        assert_eq!(points_path(base, "sciml_graph", false), base);
        assert_eq!(
            points_path(base, "sciml_graph", true),
            PathBuf::from("out/points_sciml_graph.csv")
        );
        assert_eq!(
            points_path(Path::new("points"), "sciml_graph", true),
            PathBuf::from("points_sciml_graph.csv")
        );
    }

    #[test]
    fn test_invalid_workloads_abort_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("workloads.csv");
        std::fs::write(
            &csv,
            "name,bandwidth_lo,bandwidth_hi,latency_lo,latency_hi\n\
             Broken,0,5e6,1e-3,1e-3\n",
        )
        .unwrap();

        let out = dir.path().join("figures");
        let policy = RunPolicy {
            output_dir: out.clone(),
            workloads: Some(csv),
            points: None,
        };
        let err = run(&[FigureKind::Onchip], &policy).unwrap_err();
        assert!(matches!(err, PlotError::InvalidInput { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_points_follow_table() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("workloads.csv");
        std::fs::write(
            &csv,
            "name,bandwidth_lo,bandwidth_hi,latency_lo,latency_hi\n\
             Beam control,9e9,25e9,1e-6,7e-6\n\
             Reversed,4e9,1e9,4e-6,1e-6\n",
        )
        .unwrap();

        let points = dir.path().join("points.csv");
        let policy = RunPolicy {
            output_dir: dir.path().join("figures"),
            workloads: Some(csv),
            points: Some(points.clone()),
        };
        let written = run(&[FigureKind::Xdr], &policy).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].svg.exists());
        assert!(written[0].png.exists());

        let content = std::fs::read_to_string(&points).unwrap();
        let names: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(names, vec!["Beam control", "Reversed"]);
        // Reversed bounds are swapped once, giving the 2e9 mean
        let reversed: Vec<&str> = content.lines().nth(2).unwrap().split(',').collect();
        assert_eq!(reversed[4], "2.000000e9");
        assert_eq!(reversed[5], "1.000000e9");
    }

    #[test]
    fn test_missing_workloads_file() {
        let dir = tempfile::tempdir().unwrap();
        let policy = RunPolicy {
            output_dir: dir.path().to_path_buf(),
            workloads: Some(dir.path().join("missing.csv")),
            points: None,
        };
        let err = run(&[FigureKind::Xdr], &policy).unwrap_err();
        assert!(matches!(err, PlotError::CsvError(_)));
    }
}
