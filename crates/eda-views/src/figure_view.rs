//! Interactive drawing of a [`Figure`] with egui_plot
//!
//! Each panel becomes one `Plot`, placed on the figure grid according to the
//! row and column weights. Categorical axes get their tick labels as plot
//! text under the baseline.

use egui::{Align2, Color32, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoint, PlotPoints, PlotUi, Points, Polygon, Text};
use eda_ui::WidgetId;

use crate::colors::Rgb;
use crate::figure::{marker_outline, Axis, Figure, LegendEntry, Mark, Panel};

const GAP: f32 = 6.0;
const MIN_HEIGHT: f32 = 320.0;

impl From<Rgb> for Color32 {
    fn from(color: Rgb) -> Self {
        Color32::from_rgb(color.r, color.g, color.b)
    }
}

fn with_opacity(color: Rgb, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

/// Split `total` pixels between tracks in proportion to `weights`
pub fn track_sizes(weights: &[f32], total: f32) -> Vec<f32> {
    let gaps = GAP * weights.len().saturating_sub(1) as f32;
    let usable = (total - gaps).max(0.0);
    let sum: f32 = weights.iter().sum();
    if sum <= 0.0 {
        return vec![usable / weights.len().max(1) as f32; weights.len()];
    }
    weights.iter().map(|w| usable * w / sum).collect()
}

pub fn show_figure(ui: &mut Ui, figure: &Figure) {
    ui.label(RichText::new(&figure.title).strong());

    let width = ui.available_width();
    let aspect = if figure.rows == figure.cols && figure.rows > 1 { 1.0 } else { 0.6 };
    let legend_space = if figure.legend.is_empty() { 0.0 } else { 28.0 };
    let height = (width * aspect).min((ui.available_height() - legend_space).max(MIN_HEIGHT));

    let widths = track_sizes(&figure.col_weights, width);
    let heights = track_sizes(&figure.row_weights, height);
    let base = WidgetId::new("figure").with(&figure.title);

    ui.spacing_mut().item_spacing = Vec2::splat(GAP);
    for (row, &cell_height) in heights.iter().enumerate() {
        ui.horizontal(|ui| {
            for (col, &cell_width) in widths.iter().enumerate() {
                let size = Vec2::new(cell_width, cell_height);
                match figure.cell(row, col) {
                    Some(panel) => {
                        let id = base.clone().index(row * figure.cols + col);
                        show_panel(ui, id, panel, size);
                    }
                    None => {
                        ui.allocate_exact_size(size, Sense::hover());
                    }
                }
            }
        });
    }

    if !figure.legend.is_empty() {
        show_legend(ui, &figure.legend);
    }
}

fn show_panel(ui: &mut Ui, id: WidgetId, panel: &Panel, size: Vec2) {
    let mut plot = Plot::new(id.id())
        .width(size.x)
        .height(size.y)
        .allow_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .include_x(panel.x.range[0])
        .include_x(panel.x.range[1])
        .include_y(panel.y.range[0])
        .include_y(panel.y.range[1]);
    if !panel.x.label.is_empty() {
        plot = plot.x_axis_label(panel.x.label.clone());
    }
    if !panel.y.label.is_empty() {
        plot = plot.y_axis_label(panel.y.label.clone());
    }

    plot.show(ui, |plot_ui| {
        for mark in &panel.marks {
            draw_mark(plot_ui, mark);
        }
        category_labels(plot_ui, &panel.x, &panel.y);
    });
}

fn draw_mark(plot_ui: &mut PlotUi, mark: &Mark) {
    match mark {
        Mark::Bars { bars, color, horizontal } => {
            let fill = with_opacity(*color, 0.75);
            let bars: Vec<Bar> = bars
                .iter()
                .map(|bar| {
                    Bar::new(bar.center, bar.height)
                        .width(bar.width)
                        .fill(fill)
                        .stroke(Stroke::new(0.5, Color32::from(Rgb::WHITE)))
                })
                .collect();
            let mut chart = BarChart::new(bars).color(*color);
            if *horizontal {
                chart = chart.horizontal();
            }
            plot_ui.bar_chart(chart);
        }
        Mark::Line { points, color, width } => {
            plot_ui.line(Line::new(PlotPoints::new(points.clone())).color(*color).width(*width));
        }
        Mark::Points { points, color, radius } => {
            plot_ui.points(
                Points::new(PlotPoints::new(points.clone()))
                    .color(with_opacity(*color, 0.85))
                    .radius(*radius)
                    .filled(true),
            );
        }
        Mark::Polygon { vertices, fill, opacity, stroke } => {
            let stroke = match stroke {
                Some(color) => Stroke::new(1.0, Color32::from(*color)),
                None => Stroke::NONE,
            };
            plot_ui.polygon(
                Polygon::new(PlotPoints::new(vertices.clone()))
                    .fill_color(with_opacity(*fill, *opacity))
                    .stroke(stroke),
            );
        }
        Mark::Markers { centers, size, color } => {
            let fill = with_opacity(*color, 0.85);
            for &center in centers {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(marker_outline(center, *size)))
                        .fill_color(fill)
                        .stroke(Stroke::NONE),
                );
            }
        }
        Mark::Cells { cells } => {
            for cell in cells {
                let [x0, y0] = cell.min;
                let [x1, y1] = cell.max;
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]))
                        .fill_color(Color32::from(cell.color))
                        .stroke(Stroke::NONE),
                );
            }
        }
    }
}

fn category_labels(plot_ui: &mut PlotUi, x: &Axis, y: &Axis) {
    let Some(categories) = &x.categories else {
        return;
    };
    // Thin out labels on crowded axes
    let step = (categories.len() / 12).max(1);
    for (i, label) in categories.iter().enumerate().step_by(step) {
        plot_ui.text(
            Text::new(PlotPoint::new(i as f64, y.range[0]), RichText::new(label).small())
                .anchor(Align2::CENTER_TOP),
        );
    }
}

fn show_legend(ui: &mut Ui, entries: &[LegendEntry]) {
    ui.horizontal(|ui| {
        for entry in entries {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, Color32::from(entry.color));
            ui.label(&entry.label);
            ui.add_space(8.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_sizes_follow_weights() {
        let sizes = track_sizes(&[4.0, 1.0], 500.0 + GAP);
        assert!((sizes[0] - 400.0).abs() < 1e-3);
        assert!((sizes[1] - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_track_sizes_without_weights() {
        let sizes = track_sizes(&[0.0, 0.0], 100.0 + GAP);
        assert_eq!(sizes, vec![50.0, 50.0]);
    }

    #[test]
    fn test_rgb_into_color32() {
        assert_eq!(Color32::from(Rgb::new(76, 114, 176)), Color32::from_rgb(76, 114, 176));
        assert_eq!(with_opacity(Rgb::BLACK, 0.5).a(), 128);
    }
}
