//! Pair plot: every numeric column against every other, colored by species

use eda_core::{EdaError, Mode, NumericColumn, Selection};
use eda_data::Dataset;

use crate::colors::categorical_color;
use crate::figure::{padded_range, Artifact, Axis, Figure, LegendEntry, Mark, Panel};
use crate::stats::kde_curve;

const DENSITY_CUT: f64 = 3.0;

pub fn render(selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    if *selection != Selection::PairPlot {
        return Err(super::mismatch(Mode::PairPlot, selection));
    }

    let species = dataset.species_labels();
    if species.is_empty() {
        return Err(EdaError::Render("no species labels to color by".to_string()));
    }
    let columns = NumericColumn::ALL;
    let n = columns.len();

    let mut cells = Vec::with_capacity(n * n);
    for (row, &y) in columns.iter().enumerate() {
        for (col, &x) in columns.iter().enumerate() {
            // Axis titles only along the outer edges
            let x_label = if row == n - 1 { x.name() } else { "" };
            let y_label = if col == 0 { y.name() } else { "" };
            let x_axis = Axis::continuous(x_label, padded_range(dataset.numeric(x), 0.05));

            let panel = if row == col {
                density_panel(dataset, x, x_axis, y_label)
            } else {
                let y_axis = Axis::continuous(y_label, padded_range(dataset.numeric(y), 0.05));
                scatter_panel(dataset, x, y, x_axis, y_axis)
            };
            cells.push(Some(panel));
        }
    }

    let legend = species
        .iter()
        .enumerate()
        .map(|(i, label)| LegendEntry {
            label: label.clone(),
            color: categorical_color(i),
        })
        .collect();

    Ok(Artifact::Figure(Figure {
        title: "Pair plot".to_string(),
        rows: n,
        cols: n,
        row_weights: vec![1.0; n],
        col_weights: vec![1.0; n],
        cells,
        legend,
        observations: dataset.row_count(),
    }))
}

fn scatter_panel(dataset: &Dataset, x: NumericColumn, y: NumericColumn, x_axis: Axis, y_axis: Axis) -> Panel {
    let mut panel = Panel::new(x_axis, y_axis);
    for (i, (_, points)) in dataset.pairs_by_species(x, y).into_iter().enumerate() {
        panel.push(Mark::Points {
            points,
            color: categorical_color(i),
            radius: 2.0,
        });
    }
    panel
}

/// Per-species density of one column on the diagonal
fn density_panel(dataset: &Dataset, column: NumericColumn, x_axis: Axis, y_label: &str) -> Panel {
    let curves: Vec<Vec<[f64; 2]>> = dataset
        .numeric_by_species(column)
        .iter()
        .map(|(_, values)| kde_curve(values, DENSITY_CUT).unwrap_or_default())
        .collect();
    let peak = curves.iter().flatten().map(|p| p[1]).fold(0.0, f64::max);

    let all = curves.iter().flatten().map(|p| p[0]);
    let x_range = padded_range(all.chain(x_axis.range), 0.0);
    let mut panel = Panel::new(
        Axis::continuous(x_axis.label, x_range),
        Axis::continuous(y_label, super::zero_based(peak)),
    );

    for (i, curve) in curves.into_iter().enumerate() {
        if curve.is_empty() {
            continue;
        }
        let color = categorical_color(i);
        panel.push(Mark::Polygon {
            vertices: super::area_under(&curve),
            fill: color,
            opacity: 0.25,
            stroke: None,
        });
        panel.push(Mark::Line {
            points: curve,
            color,
            width: 1.5,
        });
    }
    panel
}
