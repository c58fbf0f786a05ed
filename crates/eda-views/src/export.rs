//! Artifact export
//!
//! Figures are written as SVG through plotters, the summary table as CSV and
//! the overview as the full dataset in CSV plus a plain-text report.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use eda_core::{ExportSettings, Selection};
use eda_data::Dataset;
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::colors::Rgb;
use crate::figure::{marker_outline, Artifact, DescribeTable, Figure, Mark, OverviewReport, Panel};

/// Rows shown in the head of the overview report
const REPORT_HEAD_ROWS: usize = 10;

/// Height of the legend strip under a figure
const LEGEND_HEIGHT: u32 = 32;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Drawing error: {0}")]
    Drawing(String),
}

fn drawing<E: std::fmt::Display>(error: E) -> ExportError {
    ExportError::Drawing(error.to_string())
}

/// Pixel size of exported figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportSettings::default().into()
    }
}

impl From<ExportSettings> for ExportOptions {
    fn from(settings: ExportSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
        }
    }
}

/// File name stem for the artifact of `selection`, e.g. `joint_sepal_length_petal_length_hex`
pub fn export_stem(selection: &Selection) -> String {
    let mode = selection.mode().slug();
    match *selection {
        Selection::Distribution { column } => format!("{}_{}", mode, column.name()),
        Selection::JointPlot { x, y, kind } => format!("{}_{}_{}_{}", mode, x.name(), y.name(), kind.name()),
        Selection::BoxenPlot { x, y } | Selection::StripPlot { x, y } | Selection::SwarmPlot { x, y } => {
            format!("{}_{}_{}", mode, x.name(), y.name())
        }
        Selection::Overview | Selection::StatisticalSummary | Selection::PairPlot => mode.to_string(),
    }
}

/// Write `artifact` into `dir`, file names starting with `stem`.
///
/// Returns the paths written.
pub fn export_artifact(
    artifact: &Artifact,
    dataset: &Dataset,
    dir: &Path,
    stem: &str,
    options: ExportOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;

    let written = match artifact {
        Artifact::Figure(figure) => {
            let path = dir.join(format!("{}.svg", stem));
            std::fs::write(&path, figure_to_svg(figure, options)?)?;
            vec![path]
        }
        Artifact::Summary(table) => {
            let path = dir.join(format!("{}.csv", stem));
            write_summary_csv(table, &path)?;
            vec![path]
        }
        Artifact::Overview(report) => {
            let data_path = dir.join(format!("{}.csv", stem));
            write_dataset_csv(dataset, &data_path)?;
            let report_path = dir.join(format!("{}.txt", stem));
            std::fs::write(&report_path, overview_report_text(report, dataset)?)?;
            vec![data_path, report_path]
        }
    };

    for path in &written {
        info!("Exported {} to {:?}", artifact.kind_name(), path);
    }
    Ok(written)
}

/// Descriptive statistics as CSV, one row per statistic
pub fn write_summary_csv(table: &DescribeTable, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["statistic".to_string()];
    header.extend(table.columns.iter().cloned());
    writer.write_record(&header)?;

    for (label, values) in &table.rows {
        let mut record = vec![label.clone()];
        record.extend(values.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// The full table through arrow's CSV writer
pub fn write_dataset_csv(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = arrow::csv::Writer::new(file);
    writer.write(dataset.batch())?;
    Ok(())
}

/// Metrics, column types and the first rows as text
pub fn overview_report_text(report: &OverviewReport, dataset: &Dataset) -> Result<String, ExportError> {
    let mut text = String::new();
    text.push_str(&format!("Dataset: {}\n\n", dataset.name()));
    for (label, value) in report.metrics() {
        text.push_str(&format!("{:<16}{}\n", label, value));
    }

    text.push_str("\nColumn Info\n");
    for (name, dtype) in &report.dtypes {
        text.push_str(&format!("{:<16}{}\n", name, dtype));
    }

    let head = dataset.batch().slice(0, REPORT_HEAD_ROWS.min(dataset.row_count()));
    let table = arrow::util::pretty::pretty_format_batches(&[head])?;
    text.push_str(&format!("\nFirst {} rows\n{}\n", REPORT_HEAD_ROWS.min(dataset.row_count()), table));
    Ok(text)
}

/// Render a figure as an SVG document
pub fn figure_to_svg(figure: &Figure, options: ExportOptions) -> Result<String, ExportError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;
        let titled = root.titled(&figure.title, ("sans-serif", 20)).map_err(drawing)?;

        let body = if figure.legend.is_empty() {
            titled
        } else {
            let (_, height) = titled.dim_in_pixel();
            let (body, legend) = titled.split_vertically(height.saturating_sub(LEGEND_HEIGHT) as i32);
            draw_legend(&legend, figure)?;
            body
        };

        let (width, height) = body.dim_in_pixel();
        let xs = breakpoints(&figure.col_weights, width);
        let ys = breakpoints(&figure.row_weights, height);
        let areas = body.split_by_breakpoints(xs, ys);

        for (area, cell) in areas.iter().zip(&figure.cells) {
            if let Some(panel) = cell {
                draw_panel(area, panel)?;
            }
        }
        root.present().map_err(drawing)?;
    }
    Ok(svg)
}

/// Interior split positions for cells sized by `weights`
fn breakpoints(weights: &[f32], total: u32) -> Vec<i32> {
    let sum: f32 = weights.iter().sum();
    if sum <= 0.0 {
        return Vec::new();
    }
    let mut acc = 0.0;
    weights
        .iter()
        .take(weights.len().saturating_sub(1))
        .map(|w| {
            acc += w;
            (acc / sum * total as f32).round() as i32
        })
        .collect()
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn draw_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<(), ExportError> {
    let mut x = 20;
    for entry in &figure.legend {
        area.draw(&Rectangle::new([(x, 10), (x + 12, 22)], rgb(entry.color).filled()))
            .map_err(drawing)?;
        area.draw(&Text::new(entry.label.clone(), (x + 18, 10), ("sans-serif", 14)))
            .map_err(drawing)?;
        x += 40 + 8 * entry.label.len() as i32;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> Result<(), ExportError> {
    let [x0, x1] = panel.x.range;
    let [y0, y1] = panel.y.range;
    let mut chart = ChartBuilder::on(area)
        .margin(6)
        .x_label_area_size(if panel.x.label.is_empty() { 18 } else { 36 })
        .y_label_area_size(if panel.y.label.is_empty() { 30 } else { 48 })
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(drawing)?;

    let categories = panel.x.categories.clone().unwrap_or_default();
    let category_label = |v: &f64| {
        let nearest = v.round();
        if (v - nearest).abs() > 1e-6 || nearest < 0.0 {
            return String::new();
        }
        categories.get(nearest as usize).cloned().unwrap_or_default()
    };
    let number_label = |v: &f64| format!("{:.1}", v);

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh().x_desc(panel.x.label.as_str()).y_desc(panel.y.label.as_str());
    if panel.x.is_categorical() {
        mesh.x_labels(categories.len().max(1)).x_label_formatter(&category_label);
    } else {
        mesh.x_label_formatter(&number_label);
    }
    mesh.draw().map_err(drawing)?;

    for mark in &panel.marks {
        match mark {
            Mark::Bars { bars, color, horizontal } => {
                let style = rgb(*color).mix(0.8).filled();
                chart
                    .draw_series(bars.iter().map(|bar| {
                        let (lo, hi) = (bar.center - bar.width / 2.0, bar.center + bar.width / 2.0);
                        let corners = if *horizontal {
                            [(0.0, lo), (bar.height, hi)]
                        } else {
                            [(lo, 0.0), (hi, bar.height)]
                        };
                        Rectangle::new(corners, style)
                    }))
                    .map_err(drawing)?;
            }
            Mark::Line { points, color, width } => {
                let path: Vec<(f64, f64)> = points.iter().map(|p| (p[0], p[1])).collect();
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        path,
                        rgb(*color).stroke_width(width.round().max(1.0) as u32),
                    )))
                    .map_err(drawing)?;
            }
            Mark::Points { points, color, radius } => {
                let size = radius.round().max(1.0) as u32;
                let style = rgb(*color).mix(0.8).filled();
                chart
                    .draw_series(points.iter().map(|p| Circle::new((p[0], p[1]), size, style)))
                    .map_err(drawing)?;
            }
            Mark::Polygon { vertices, fill, opacity, stroke } => {
                let outline: Vec<(f64, f64)> = vertices.iter().map(|v| (v[0], v[1])).collect();
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        outline.clone(),
                        rgb(*fill).mix(*opacity as f64).filled(),
                    )))
                    .map_err(drawing)?;
                if let (Some(stroke), Some(first)) = (stroke, outline.first().copied()) {
                    let mut closed = outline;
                    closed.push(first);
                    chart
                        .draw_series(std::iter::once(PathElement::new(closed, rgb(*stroke).stroke_width(1))))
                        .map_err(drawing)?;
                }
            }
            Mark::Markers { centers, size, color } => {
                let style = rgb(*color).mix(0.85).filled();
                chart
                    .draw_series(centers.iter().map(|&center| {
                        let outline: Vec<(f64, f64)> =
                            marker_outline(center, *size).into_iter().map(|p| (p[0], p[1])).collect();
                        Polygon::new(outline, style)
                    }))
                    .map_err(drawing)?;
            }
            Mark::Cells { cells } => {
                chart
                    .draw_series(cells.iter().map(|cell| {
                        Rectangle::new(
                            [(cell.min[0], cell.min[1]), (cell.max[0], cell.max[1])],
                            rgb(cell.color).filled(),
                        )
                    }))
                    .map_err(drawing)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render;
    use eda_core::{Mode, Selection};
    use eda_data::DatasetProvider;

    #[test]
    fn test_export_stem() {
        use eda_core::{JointKind, NumericColumn};
        let joint = Selection::JointPlot {
            x: NumericColumn::SepalLength,
            y: NumericColumn::PetalLength,
            kind: JointKind::Hex,
        };
        assert_eq!(export_stem(&joint), "joint_sepal_length_petal_length_hex");
        assert_eq!(export_stem(&Selection::PairPlot), "pair");
    }

    #[test]
    fn test_breakpoints() {
        assert_eq!(breakpoints(&[1.0], 100), Vec::<i32>::new());
        assert_eq!(breakpoints(&[4.0, 1.0], 100), vec![80]);
        assert_eq!(breakpoints(&[1.0, 1.0, 1.0, 1.0], 400), vec![100, 200, 300]);
    }

    #[test]
    fn test_summary_csv() {
        let data = DatasetProvider::iris().load().unwrap();
        let Artifact::Summary(table) = render(Mode::StatisticalSummary, &Selection::StatisticalSummary, &data).unwrap() else {
            panic!("expected a summary");
        };
        let dir = std::env::temp_dir().join(format!("eda-export-summary-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("summary.csv");
        write_summary_csv(&table, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("statistic,sepal_length,sepal_width,petal_length,petal_width")
        );
        assert!(lines.next().unwrap().starts_with("count,150,150"));
        assert_eq!(text.lines().count(), 9);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_overview_report() {
        let data = DatasetProvider::iris().load().unwrap();
        let Artifact::Overview(report) = render(Mode::Overview, &Selection::Overview, &data).unwrap() else {
            panic!("expected an overview");
        };
        let text = overview_report_text(&report, &data).unwrap();
        assert!(text.contains("Missing Values  0"));
        assert!(text.contains("species         object"));
        assert!(text.contains("| sepal_length |"));
    }

    #[test]
    fn test_pair_plot_svg_has_legend() {
        let data = DatasetProvider::iris().load().unwrap();
        let artifact = render(Mode::PairPlot, &Selection::PairPlot, &data).unwrap();
        let svg = figure_to_svg(artifact.as_figure().unwrap(), ExportOptions::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("versicolor"));
    }
}
