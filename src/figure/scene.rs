//! Lowers a figure into drawable primitives in data coordinates
//! and checks that each of them fits on the log-log axes

use log::{debug, warn};
use plotters::style::RGBColor;

use super::style::{self, Emphasis, LineStyle};
use super::{Annotation, Axes, Figure, LegendPosition, RegionShape};
use crate::error::{PlotError, PlotResult};
use crate::estimator::PlotPoint;

/// A workload marker with its error bars
#[derive(Clone, Debug)]
pub struct Marker {
    pub name: String,
    pub color: RGBColor,
    pub point: PlotPoint,
}

#[derive(Clone, Debug)]
pub struct Polyline {
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub line: LineStyle,
}

#[derive(Clone, Debug)]
pub struct Polygon {
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub opacity: f64,
    pub legend: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub at: (f64, f64),
    pub color: RGBColor,
    pub size: f64,
    pub emphasis: Emphasis,
}

impl From<&Annotation> for TextBlock {
    fn from(a: &Annotation) -> Self {
        Self {
            lines: a.text.lines().map(str::to_string).collect(),
            at: a.at,
            color: a.color,
            size: a.size,
            emphasis: a.emphasis,
        }
    }
}

/// All primitives of one figure, in drawing order:
/// polygons, polylines, markers, texts
#[derive(Clone, Debug)]
pub struct Scene {
    pub axes: Axes,
    pub polygons: Vec<Polygon>,
    pub polylines: Vec<Polyline>,
    pub markers: Vec<Marker>,
    pub texts: Vec<TextBlock>,
    pub legend: Option<LegendPosition>,
}

fn check_coord(what: &str, (x, y): (f64, f64)) -> PlotResult<()> {
    if x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0 {
        Ok(())
    } else {
        Err(PlotError::RenderError(format!(
            "{} has coordinate ({}, {}) which cannot be placed on a log axis",
            what, x, y
        )))
    }
}

fn check_range(what: &str, (lo, hi): (f64, f64)) -> PlotResult<()> {
    if lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi {
        Ok(())
    } else {
        Err(PlotError::RenderError(format!(
            "{} range [{}, {}] is not a positive increasing interval",
            what, lo, hi
        )))
    }
}

type Point = (f64, f64);

/// The plot area in log10 space. Clipping happens here because
/// plotters pins off-canvas vertices to the border instead of
/// cutting the shape, which bends lines and regions.
#[derive(Clone, Copy, Debug)]
struct ClipBox {
    x: (f64, f64),
    y: (f64, f64),
}

fn to_log((x, y): Point) -> Point {
    (x.log10(), y.log10())
}

fn from_log((x, y): Point) -> Point {
    (10f64.powf(x), 10f64.powf(y))
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1))
}

impl ClipBox {
    fn new(axes: &Axes) -> Self {
        Self {
            x: (axes.x_range.0.log10(), axes.x_range.1.log10()),
            y: (axes.y_range.0.log10(), axes.y_range.1.log10()),
        }
    }

    /// Liang-Barsky on one segment. Endpoints that need no cut are
    /// returned as given, so adjacent segments still share them.
    fn clip_segment(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let (la, lb) = (to_log(a), to_log(b));
        let (dx, dy) = (lb.0 - la.0, lb.1 - la.1);
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [
            (-dx, la.0 - self.x.0),
            (dx, self.x.1 - la.0),
            (-dy, la.1 - self.y.0),
            (dy, self.y.1 - la.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        let start = if t0 == 0.0 { a } else { from_log(lerp(la, lb, t0)) };
        let end = if t1 == 1.0 { b } else { from_log(lerp(la, lb, t1)) };
        Some((start, end))
    }

    /// Cuts a polyline into the runs that lie inside the box
    fn clip_polyline(&self, points: &[Point]) -> Vec<Vec<Point>> {
        let mut runs = Vec::new();
        let mut run: Vec<Point> = Vec::new();
        for pair in points.windows(2) {
            match self.clip_segment(pair[0], pair[1]) {
                Some((start, end)) => {
                    if run.last() != Some(&start) {
                        if run.len() > 1 {
                            runs.push(std::mem::take(&mut run));
                        }
                        run = vec![start];
                    }
                    run.push(end);
                }
                None => {
                    if run.len() > 1 {
                        runs.push(std::mem::take(&mut run));
                    }
                    run.clear();
                }
            }
        }
        if run.len() > 1 {
            runs.push(run);
        }
        runs
    }

    /// Sutherland-Hodgman against the four box edges
    fn clip_polygon(&self, points: &[Point]) -> Vec<Point> {
        // (axis, bound, keep values above the bound)
        let edges = [
            (0, self.x.0, true),
            (0, self.x.1, false),
            (1, self.y.0, true),
            (1, self.y.1, false),
        ];
        let coord = |p: Point, axis: usize| if axis == 0 { p.0 } else { p.1 };

        // Vertices carry their data and log forms so that uncut
        // vertices come out unchanged
        let mut polygon: Vec<(Point, Point)> =
            points.iter().map(|&p| (p, to_log(p))).collect();
        for (axis, bound, above) in edges {
            let inside = |l: Point| {
                let v = coord(l, axis);
                if above {
                    v >= bound
                } else {
                    v <= bound
                }
            };
            let input = std::mem::take(&mut polygon);
            let Some(&last) = input.last() else {
                break;
            };
            let mut prev = last;
            for current in input {
                let (cur_in, prev_in) = (inside(current.1), inside(prev.1));
                if cur_in != prev_in {
                    let t = (bound - coord(prev.1, axis))
                        / (coord(current.1, axis) - coord(prev.1, axis));
                    let mut cut = lerp(prev.1, current.1, t);
                    if axis == 0 {
                        cut.0 = bound;
                    } else {
                        cut.1 = bound;
                    }
                    polygon.push((from_log(cut), cut));
                }
                if cur_in {
                    polygon.push(current);
                }
                prev = current;
            }
        }
        polygon.into_iter().map(|(p, _)| p).collect()
    }
}

impl Scene {
    /// Fails with `RenderError` unless both axis ranges are
    /// positive increasing intervals
    pub fn check_axes(&self) -> PlotResult<()> {
        check_range("x axis", self.axes.x_range)?;
        check_range("y axis", self.axes.y_range)
    }

    /// Derives the workload points and lays out every primitive.
    /// Invalid workload bounds fail with `InvalidInput` before any
    /// coordinate is checked.
    pub fn build(figure: &Figure) -> PlotResult<Self> {
        let spec = &figure.spec;
        let points = figure.table.points()?;

        check_range("x axis", spec.axes.x_range)?;
        check_range("y axis", spec.axes.y_range)?;

        if figure.table.is_empty() {
            warn!("{}: no workloads to plot", spec.stem);
        }

        let mut markers = Vec::new();
        let mut texts = Vec::new();
        for (i, (entry, point)) in
            figure.table.entries().iter().zip(points).enumerate()
        {
            let color = match &entry.color {
                Some(hex) => style::parse_hex_color(hex)?,
                None => style::workload_color(i),
            };
            debug!(
                "{}: latency {:.3e} (-{:.3e}/+{:.3e}) s, bandwidth {:.3e} (-{:.3e}/+{:.3e}) B/s",
                entry.name,
                point.x.value,
                point.x.err_lo,
                point.x.err_hi,
                point.y.value,
                point.y.err_lo,
                point.y.err_hi,
            );

            if let Some((placement, size)) = spec.labels.placement(&entry.name)
            {
                let text = placement.text.as_deref().unwrap_or(&entry.name);
                let at = (
                    point.x.value * placement.x_factor,
                    point.y.value * placement.y_factor,
                );
                check_coord(&format!("Label of '{}'", entry.name), at)?;
                texts.push(TextBlock {
                    lines: text.lines().map(str::to_string).collect(),
                    at,
                    color,
                    size,
                    emphasis: Emphasis::Normal,
                });
            }

            markers.push(Marker {
                name: entry.name.clone(),
                color,
                point,
            });
        }

        let clip = ClipBox::new(&spec.axes);
        let (x_min, x_max) = spec.axes.x_range;
        let mut polylines = Vec::new();
        for line in &spec.capability_lines {
            let points = vec![(x_min, line.y), (x_max, line.y)];
            for p in &points {
                check_coord("Capability line", *p)?;
            }
            let runs = clip.clip_polyline(&points);
            if runs.is_empty() {
                warn!("{}: capability line at {:e} is off the axes", spec.stem, line.y);
            }
            polylines.extend(runs.into_iter().map(|points| Polyline {
                points,
                color: line.color,
                line: line.line,
            }));
            if let Some(label) = &line.label {
                check_coord("Capability label", label.at)?;
                texts.push(label.into());
            }
        }

        for curve in &spec.model_curves {
            let mut latencies = curve.latencies.clone();
            latencies.sort_by(f64::total_cmp);
            let mut points = Vec::with_capacity(latencies.len());
            for x in latencies {
                let p = (x, curve.bandwidth_at(x));
                check_coord("Model-size curve", p)?;
                points.push(p);
            }
            let runs = clip.clip_polyline(&points);
            if runs.is_empty() {
                warn!("{}: {:e} B curve is off the axes", spec.stem, curve.bytes);
            }
            polylines.extend(runs.into_iter().map(|points| Polyline {
                points,
                color: curve.color,
                line: LineStyle::Solid,
            }));
            if let Some(label) = &curve.label {
                check_coord("Model-size label", label.at)?;
                texts.push(label.into());
            }
        }

        let mut polygons = Vec::new();
        for region in &spec.regions {
            let points = match &region.shape {
                RegionShape::Rect { x, y } => {
                    vec![(x.0, y.0), (x.1, y.0), (x.1, y.1), (x.0, y.1)]
                }
                RegionShape::BelowCurve {
                    bytes,
                    latencies,
                    floor,
                } => {
                    // Upper edge left to right, then back along the floor
                    let mut points: Vec<(f64, f64)> =
                        latencies.iter().map(|&x| (x, bytes / x)).collect();
                    points.extend(latencies.iter().rev().map(|&x| (x, *floor)));
                    points
                }
            };
            for p in &points {
                check_coord("Shaded region", *p)?;
            }
            let points = clip.clip_polygon(&points);
            if points.len() < 3 {
                warn!("{}: shaded region is off the axes", spec.stem);
                continue;
            }
            polygons.push(Polygon {
                points,
                color: region.color,
                opacity: region.opacity,
                legend: region.legend.clone(),
            });
        }

        for annotation in &spec.annotations {
            check_coord("Annotation", annotation.at)?;
            texts.push(annotation.into());
        }

        debug!(
            "{}: {} markers, {} polylines, {} polygons, {} texts",
            spec.stem,
            markers.len(),
            polylines.len(),
            polygons.len(),
            texts.len()
        );

        Ok(Self {
            axes: spec.axes.clone(),
            polygons,
            polylines,
            markers,
            texts,
            legend: spec.legend,
        })
    }
}
