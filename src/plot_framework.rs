// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::IntoDrawingArea;
use plotters::element::{Circle, EmptyElement, PathElement, Rectangle};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, RGBColor};

use std::ops::Range;
use std::path::Path;

use crate::constants::{
    DASH_COUNT, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, LINE_WIDTH_LEGEND,
    MARKER_SIZE_PX, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::error::{LabError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
}

/// How a series is rendered: matplotlib-style `'-'`, `'--'`, `'o'`, `'o-'`, `'o--'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Dashed,
    Markers(MarkerShape),
    LineWithMarkers(MarkerShape),
    DashedWithMarkers(MarkerShape),
}

impl SeriesStyle {
    fn marker(self) -> Option<MarkerShape> {
        match self {
            SeriesStyle::Markers(m)
            | SeriesStyle::LineWithMarkers(m)
            | SeriesStyle::DashedWithMarkers(m) => Some(m),
            SeriesStyle::Line | SeriesStyle::Dashed => None,
        }
    }
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub style: SeriesStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A dashed line spanning the whole chart at a fixed x or y.
#[derive(Clone)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    pub value: f64,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub reference_lines: Vec<ReferenceLine>,
    pub x_label: String,
    pub y_label: String,
    pub show_grid: bool,
}

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Padded x and y ranges covering every finite point.
pub fn padded_bounds<I>(points: I) -> Option<(Range<f64>, Range<f64>)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut any = false;

    for (x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        any = true;
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !any {
        return None;
    }

    let (x0, x1) = calculate_range(x_min, x_max);
    let (y0, y1) = calculate_range(y_min, y_max);
    Some((x0..x1, y0..y1))
}

/// Tick label text: k/M notation for large values, more decimals for small ones.
pub fn format_axis_value(v: f64) -> String {
    let a = v.abs();
    if a >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if a >= 1000.0 {
        format!("{:.1}k", v / 1000.0)
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else if a >= 10.0 {
        format!("{:.1}", v)
    } else if a >= 1.0 {
        format!("{:.2}", v)
    } else {
        format!("{:.3}", v)
    }
}

/// Splits a polyline into the "on" pieces of a dash pattern.
///
/// Lengths are measured after normalising each axis by its range, so dashes
/// come out roughly even on screen regardless of the data units.
pub fn dashed_segments(
    points: &[(f64, f64)],
    x_range: &Range<f64>,
    y_range: &Range<f64>,
    dash_count: usize,
) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 || dash_count == 0 {
        return Vec::new();
    }
    let x_span = (x_range.end - x_range.start).abs().max(f64::EPSILON);
    let y_span = (y_range.end - y_range.start).abs().max(f64::EPSILON);
    let norm_len = |a: (f64, f64), b: (f64, f64)| {
        (((b.0 - a.0) / x_span).powi(2) + ((b.1 - a.1) / y_span).powi(2)).sqrt()
    };

    let total: f64 = points.windows(2).map(|w| norm_len(w[0], w[1])).sum();
    if !(total > 0.0) {
        return Vec::new();
    }
    let dash = total / (2 * dash_count) as f64;

    let mut segments = Vec::new();
    let mut current = vec![points[0]];
    let mut drawing = true;
    let mut remaining = dash;

    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let seg_len = norm_len(a, b);
        let mut t = 0.0;
        while seg_len - t > remaining {
            t += remaining;
            let f = t / seg_len;
            let p = (a.0 + (b.0 - a.0) * f, a.1 + (b.1 - a.1) * f);
            if drawing {
                current.push(p);
                segments.push(std::mem::take(&mut current));
            } else {
                current = vec![p];
            }
            drawing = !drawing;
            remaining = dash;
        }
        remaining -= seg_len - t;
        if drawing {
            current.push(b);
        }
    }
    if drawing && current.len() >= 2 {
        segments.push(current);
    }
    segments
}

/// Fails with `OutputDirectory` when the image's parent directory is missing.
pub fn ensure_output_dir(output_path: &Path) -> Result<()> {
    match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            Err(LabError::OutputDirectory {
                path: dir.to_path_buf(),
            })
        }
        _ => Ok(()),
    }
}

fn plot_err<E: std::error::Error>(e: E) -> LabError {
    LabError::Plot(e.to_string())
}

/// Renders one chart to `output_path`. The image format follows the file
/// extension (`.png`, `.jpeg`, ...).
pub fn draw_chart(output_path: &Path, config: &PlotConfig) -> Result<()> {
    ensure_output_dir(output_path)?;
    if !(config.x_range.end > config.x_range.start && config.y_range.end > config.y_range.start) {
        return Err(LabError::Plot(format!(
            "invalid ranges for '{}': x {:?}, y {:?}",
            config.title, config.x_range, config.y_range
        )));
    }

    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(&config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(config.x_range.clone(), config.y_range.clone())
        .map_err(plot_err)?;

    let tick_formatter = |v: &f64| format_axis_value(*v);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&tick_formatter)
        .y_label_formatter(&tick_formatter)
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL));
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(plot_err)?;

    let mut legend_series_count = 0;

    for s in &config.series {
        if s.data.is_empty() {
            continue;
        }
        let line_style = s.color.stroke_width(s.stroke_width);
        let color = s.color;
        let has_label = !s.label.is_empty();

        // Lines first, markers on top.
        match s.style {
            SeriesStyle::Line | SeriesStyle::LineWithMarkers(_) => {
                let drawn = chart
                    .draw_series(LineSeries::new(s.data.iter().cloned(), line_style))
                    .map_err(plot_err)?;
                if has_label && s.style == SeriesStyle::Line {
                    drawn.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    legend_series_count += 1;
                }
            }
            SeriesStyle::Dashed | SeriesStyle::DashedWithMarkers(_) => {
                let dashes =
                    dashed_segments(&s.data, &config.x_range, &config.y_range, DASH_COUNT);
                let drawn = chart
                    .draw_series(dashes.into_iter().map(|d| PathElement::new(d, line_style)))
                    .map_err(plot_err)?;
                if has_label && s.style == SeriesStyle::Dashed {
                    drawn.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 8, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    legend_series_count += 1;
                }
            }
            SeriesStyle::Markers(_) => {}
        }

        match s.style.marker() {
            Some(MarkerShape::Circle) => {
                let drawn = chart
                    .draw_series(
                        s.data
                            .iter()
                            .map(|&p| Circle::new(p, MARKER_SIZE_PX, color.filled())),
                    )
                    .map_err(plot_err)?;
                if has_label {
                    let with_line = s.style != SeriesStyle::Markers(MarkerShape::Circle);
                    drawn.label(&s.label).legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(
                                if with_line { vec![(0, 0), (20, 0)] } else { vec![] },
                                color.stroke_width(LINE_WIDTH_LEGEND),
                            )
                            + Circle::new((10, 0), MARKER_SIZE_PX, color.filled())
                    });
                    legend_series_count += 1;
                }
            }
            Some(MarkerShape::Square) => {
                let drawn = chart
                    .draw_series(s.data.iter().map(|&p| {
                        EmptyElement::at(p)
                            + Rectangle::new(
                                [
                                    (-MARKER_SIZE_PX, -MARKER_SIZE_PX),
                                    (MARKER_SIZE_PX, MARKER_SIZE_PX),
                                ],
                                color.filled(),
                            )
                    }))
                    .map_err(plot_err)?;
                if has_label {
                    drawn.label(&s.label).legend(move |(x, y)| {
                        Rectangle::new(
                            [
                                (x + 10 - MARKER_SIZE_PX, y - MARKER_SIZE_PX),
                                (x + 10 + MARKER_SIZE_PX, y + MARKER_SIZE_PX),
                            ],
                            color.filled(),
                        )
                    });
                    legend_series_count += 1;
                }
            }
            None => {}
        }
    }

    for line in &config.reference_lines {
        let endpoints = match line.orientation {
            Orientation::Horizontal => vec![
                (config.x_range.start, line.value),
                (config.x_range.end, line.value),
            ],
            Orientation::Vertical => vec![
                (line.value, config.y_range.start),
                (line.value, config.y_range.end),
            ],
        };
        let style = line.color.stroke_width(line.stroke_width);
        let color = line.color;
        let dashes = dashed_segments(&endpoints, &config.x_range, &config.y_range, DASH_COUNT);
        let drawn = chart
            .draw_series(dashes.into_iter().map(|d| PathElement::new(d, style)))
            .map_err(plot_err)?;
        if !line.label.is_empty() {
            drawn.label(&line.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 8, y)],
                    color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()
            .map_err(plot_err)?;
    }

    root_area.present().map_err(plot_err)?;
    log::info!("Plot saved as '{}'.", output_path.display());
    Ok(())
}
