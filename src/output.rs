//! Writes rendered figures and derived points to disk

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use plotters::prelude::*;

use crate::error::{PlotError, PlotResult};
use crate::figure::render;
use crate::figure::scene::{Marker, Scene};
use crate::figure::FIGURE_SIZE;

/// The vector and raster files of one figure
#[derive(Debug, PartialEq)]
pub struct OutputPaths {
    pub svg: PathBuf,
    pub png: PathBuf,
}

impl OutputPaths {
    pub fn make(dir: &Path, stem: &str) -> Self {
        Self {
            svg: dir.join(format!("{}.svg", stem)),
            png: dir.join(format!("{}.png", stem)),
        }
    }
}

/// Renders the scene into `<stem>.svg` and `<stem>.png` under `dir`,
/// overwriting existing files. Both images are rendered before either
/// target is touched, so a failed render leaves earlier files intact.
pub fn write_figure(
    scene: &Scene,
    dir: &Path,
    stem: &str,
) -> PlotResult<OutputPaths> {
    fs::create_dir_all(dir)
        .map_err(|e| PlotError::OutputError(dir.to_path_buf(), e))?;
    let paths = OutputPaths::make(dir, stem);

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, FIGURE_SIZE).into_drawing_area();
        render::draw(&root, scene)?;
    }

    // The bitmap backend only writes to a path; it gets a scratch
    // file next to the target that is renamed into place afterwards
    let png = tempfile::Builder::new()
        .prefix(&format!(".{}", stem))
        .suffix(".png")
        .tempfile_in(dir)
        .map_err(|e| PlotError::OutputError(dir.to_path_buf(), e))?;
    {
        let root =
            BitMapBackend::new(png.path(), FIGURE_SIZE).into_drawing_area();
        render::draw(&root, scene)?;
    }

    fs::write(&paths.svg, svg)
        .map_err(|e| PlotError::OutputError(paths.svg.clone(), e))?;
    info!("Wrote {}", paths.svg.display());
    png.persist(&paths.png)
        .map_err(|e| PlotError::OutputError(paths.png.clone(), e.error))?;
    info!("Wrote {}", paths.png.display());

    Ok(paths)
}

/// Dumps the derived points of the markers as CSV, one row per workload
pub fn write_points(path: &Path, markers: &[Marker]) -> PlotResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Workload",
        "Latency [s]",
        "Latency err lo",
        "Latency err hi",
        "Bandwidth [B/s]",
        "Bandwidth err lo",
        "Bandwidth err hi",
    ])?;

    for Marker { name, point, .. } in markers {
        writer.write_record([
            name.as_str(),
            &format!("{:.6e}", point.x.value),
            &format!("{:.6e}", point.x.err_lo),
            &format!("{:.6e}", point.x.err_hi),
            &format!("{:.6e}", point.y.value),
            &format!("{:.6e}", point.y.err_lo),
            &format!("{:.6e}", point.y.err_hi),
        ])?;
    }
    writer.flush()?;
    info!("Wrote {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Figure;
    use crate::presets::FigureKind;
    use crate::workload::{WorkloadEntry, WorkloadTable};

    const PNG_MAGIC: &[u8] = b"\x89PNG";

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::make(Path::new("out"), "sciml_graph");
        assert_eq!(paths.svg, PathBuf::from("out/sciml_graph.svg"));
        assert_eq!(paths.png, PathBuf::from("out/sciml_graph.png"));
    }

    #[test]
    fn test_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("figures");
        fs::write(&blocker, b"").unwrap();

        let figure = crate::presets::FigureKind::Xdr.figure().unwrap();
        let scene = Scene::build(&figure).unwrap();
        let err = write_figure(&scene, &blocker, "sciml_graph").unwrap_err();
        assert!(matches!(err, PlotError::OutputError(..)));
    }

    #[test]
    fn test_render_presets() {
        let dir = tempfile::tempdir().unwrap();
        for kind in FigureKind::ALL {
            let figure = kind.figure().unwrap();
            let scene = Scene::build(&figure).unwrap();
            let paths = OutputPaths::make(dir.path(), &figure.spec.stem);
            fs::write(&paths.svg, "stale").unwrap();
            fs::write(&paths.png, "stale").unwrap();

            let written =
                write_figure(&scene, dir.path(), &figure.spec.stem).unwrap();
            assert_eq!(written, paths);

            let svg = fs::read_to_string(&paths.svg).unwrap();
            assert!(svg.starts_with("<svg"));
            // Markers are bare error bars
            assert!(!svg.contains("<circle"));
            assert!(svg.contains("<polyline"));

            let png = fs::read(&paths.png).unwrap();
            assert!(png.starts_with(PNG_MAGIC));
        }

        // No scratch files left behind
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2 * FigureKind::ALL.len());
        assert!(names.iter().all(|n| !n.starts_with('.')));
    }

    #[test]
    fn test_failed_render_keeps_old_files() {
        let dir = tempfile::tempdir().unwrap();
        let figure: Figure = FigureKind::Onchip.figure().unwrap();
        let mut scene = Scene::build(&figure).unwrap();
        scene.axes.x_range = (1e-1, 1e-9);

        let paths = OutputPaths::make(dir.path(), "sciml_graph");
        fs::write(&paths.svg, "old svg").unwrap();
        fs::write(&paths.png, "old png").unwrap();

        let err = write_figure(&scene, dir.path(), "sciml_graph").unwrap_err();
        assert!(matches!(err, PlotError::RenderError(_)));
        assert_eq!(fs::read_to_string(&paths.svg).unwrap(), "old svg");
        assert_eq!(fs::read_to_string(&paths.png).unwrap(), "old png");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_write_points() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        let table = WorkloadTable::make(vec![WorkloadEntry::new(
            "Beam control",
            (9e9, 25e9),
            (1e-6, 7e-6),
        )])
        .unwrap();
        let figure = FigureKind::Onchip.figure().unwrap().with_table(table);
        let scene = Scene::build(&figure).unwrap();
        write_points(&path, &scene.markers).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("Workload,Latency [s]"));
        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(row[0], "Beam control");
        assert_eq!(row[4], "1.500000e10");
        assert_eq!(row[5], "6.000000e9");
        assert_eq!(row[6], "1.000000e10");
        assert!(lines.next().is_none());
    }
}
