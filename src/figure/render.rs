//! Draws a scene on any plotters backend

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontStyle;

use super::scene::Scene;
use super::style::Emphasis;
use super::LegendPosition;
use crate::error::{PlotError, PlotResult};

const FONT: &str = "sans-serif";
const AXIS_DESC_SIZE: f64 = 28.0;
const TICK_LABEL_SIZE: f64 = 22.0;
const LEGEND_SIZE: f64 = 18.0;
const STROKE_WIDTH: u32 = 2;
const CAP_WIDTH: u32 = 12;

fn log_tick(value: &f64) -> String {
    format!("{:.0e}", value)
}

impl From<Emphasis> for FontStyle {
    fn from(val: Emphasis) -> Self {
        match val {
            Emphasis::Normal => FontStyle::Normal,
            Emphasis::Italic => FontStyle::Italic,
            Emphasis::Bold => FontStyle::Bold,
        }
    }
}

impl From<LegendPosition> for SeriesLabelPosition {
    fn from(val: LegendPosition) -> Self {
        match val {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// Draws the scene onto `root` and presents it.
/// Nothing reaches the backend when the axis ranges are unusable.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene,
) -> PlotResult<()> {
    scene.check_axes()?;
    root.fill(&WHITE).map_err(PlotError::render)?;

    let axes = &scene.axes;
    let (x_min, x_max) = axes.x_range;
    let (y_min, y_max) = axes.y_range;
    let right_area = if axes.secondary_y_desc.is_some() { 100 } else { 30 };

    // The secondary coordinate mirrors the primary one and only
    // carries the right-hand axis description
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(110)
        .right_y_label_area_size(right_area)
        .build_cartesian_2d(
            (x_min..x_max).log_scale(),
            (y_min..y_max).log_scale(),
        )
        .map_err(PlotError::render)?
        .set_secondary_coord(
            (x_min..x_max).log_scale(),
            (y_min..y_max).log_scale(),
        );

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(axes.x_desc.as_str())
            .y_desc(axes.y_desc.as_str())
            .axis_desc_style((FONT, AXIS_DESC_SIZE))
            .label_style((FONT, TICK_LABEL_SIZE))
            .x_label_formatter(&log_tick)
            .y_label_formatter(&log_tick);
        if !axes.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(PlotError::render)?;
    }

    if let Some(desc) = &axes.secondary_y_desc {
        chart
            .configure_secondary_axes()
            .y_desc(desc.as_str())
            .axis_desc_style((FONT, AXIS_DESC_SIZE))
            .label_style((FONT, TICK_LABEL_SIZE))
            .y_label_formatter(&log_tick)
            .draw()
            .map_err(PlotError::render)?;
    }

    for polygon in &scene.polygons {
        let fill = polygon.color.mix(polygon.opacity).filled();
        let anno = chart
            .draw_series(std::iter::once(Polygon::new(
                polygon.points.clone(),
                fill,
            )))
            .map_err(PlotError::render)?;
        if let Some(legend) = &polygon.legend {
            anno.label(legend.replace('\n', " ")).legend(move |(x, y)| {
                Rectangle::new([(x - 10, y - 6), (x + 10, y + 6)], fill)
            });
        }
    }

    for line in &scene.polylines {
        let style = line.color.stroke_width(STROKE_WIDTH);
        let points = line.points.iter().copied();
        match line.line.dash_pattern() {
            None => {
                chart
                    .draw_series(LineSeries::new(points, style))
                    .map_err(PlotError::render)?;
            }
            Some((dash, gap)) => {
                chart
                    .draw_series(DashedLineSeries::new(points, dash, gap, style))
                    .map_err(PlotError::render)?;
            }
        }
    }

    // Bare error bars: no center symbol, caps sized in pixels
    let half_cap = (CAP_WIDTH / 2) as i32;
    for marker in &scene.markers {
        let style = marker.color.stroke_width(STROKE_WIDTH);
        let (x, y) = (marker.point.x, marker.point.y);
        let caps = [
            ((x.lo(), y.value), [(0, -half_cap), (0, half_cap)]),
            ((x.hi(), y.value), [(0, -half_cap), (0, half_cap)]),
            ((x.value, y.lo()), [(-half_cap, 0), (half_cap, 0)]),
            ((x.value, y.hi()), [(-half_cap, 0), (half_cap, 0)]),
        ];
        chart
            .draw_series(caps.into_iter().map(|(at, cap)| {
                EmptyElement::at(at) + PathElement::new(cap.to_vec(), style)
            }))
            .map_err(PlotError::render)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x.lo(), y.value), (x.hi(), y.value)],
                style,
            )))
            .map_err(PlotError::render)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x.value, y.lo()), (x.value, y.hi())],
                style,
            )))
            .map_err(PlotError::render)?
            .label(marker.name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x - 10, y), (x + 10, y)], style)
            });
    }

    for text in &scene.texts {
        let font = (FONT, text.size)
            .into_font()
            .style(text.emphasis.into())
            .color(&text.color);
        let line_height = (text.size * 1.2) as i32;
        // Anchor the bottom of the last line at the text position
        let n = text.lines.len() as i32;
        chart
            .draw_series(text.lines.iter().enumerate().map(|(i, line)| {
                EmptyElement::at(text.at)
                    + Text::new(
                        line.clone(),
                        (0, (i as i32 - n) * line_height),
                        font.clone(),
                    )
            }))
            .map_err(PlotError::render)?;
    }

    if let Some(position) = scene.legend {
        chart
            .configure_series_labels()
            .position(position.into())
            .label_font((FONT, LEGEND_SIZE))
            .background_style(&WHITE.mix(0.9))
            .border_style(&BLACK)
            .draw()
            .map_err(PlotError::render)?;
    }

    root.present().map_err(PlotError::render)?;
    Ok(())
}
