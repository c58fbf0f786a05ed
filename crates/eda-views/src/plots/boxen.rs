//! Letter-value (boxen) plot of y grouped by distinct x values

use eda_core::{EdaError, Mode, Selection};
use eda_data::Dataset;

use crate::colors::{darken, light_ramp, primary_color};
use crate::figure::{Artifact, Figure, Mark, Panel};
use crate::stats::letter_values;

/// Width of the innermost box, in category widths
const BOX_WIDTH: f64 = 0.8;

pub fn render(selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    let Selection::BoxenPlot { x, y } = *selection else {
        return Err(super::mismatch(Mode::BoxenPlot, selection));
    };

    let groups = super::grouped(dataset, x, y)?;
    let (x_axis, y_axis) = super::categorical_axes(&groups, x, y);
    let mut panel = Panel::new(x_axis, y_axis);

    let color = primary_color();
    let edge = darken(color, 0.4);
    let mut outliers = Vec::new();
    let mut observations = 0;

    for (i, group) in groups.iter().enumerate() {
        let lv = letter_values(&group.values)?;
        let center = i as f64;
        let depth = lv.depth() as f64;
        observations += lv.count;

        // Outermost first so the inner boxes are drawn on top
        for (level, &(lo, hi)) in lv.boxes.iter().enumerate().rev() {
            let half = BOX_WIDTH * (depth - level as f64) / depth / 2.0;
            panel.push(Mark::Polygon {
                vertices: vec![[center - half, lo], [center + half, lo], [center + half, hi], [center - half, hi]],
                fill: light_ramp(color, 1.0 - level as f64 / (depth + 1.0)),
                opacity: 1.0,
                stroke: Some(edge),
            });
        }

        let half = BOX_WIDTH / 2.0;
        panel.push(Mark::Line {
            points: vec![[center - half, lv.median], [center + half, lv.median]],
            color: edge,
            width: 1.5,
        });
        outliers.extend(lv.outliers.iter().map(|&v| [center, v]));
    }

    if !outliers.is_empty() {
        panel.push(Mark::Points {
            points: outliers,
            color: edge,
            radius: 2.0,
        });
    }

    Ok(Artifact::Figure(Figure::single(
        format!("{} by {}", y, x),
        panel,
        observations,
    )))
}
