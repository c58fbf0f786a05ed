//! Histogram with an overlaid density curve

use eda_core::{EdaError, Mode, Selection};
use eda_data::Dataset;

use crate::colors::{darken, primary_color};
use crate::figure::{Artifact, Axis, Figure, Mark, Panel};
use crate::stats::histogram;

pub fn render(selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    let Selection::Distribution { column } = *selection else {
        return Err(super::mismatch(Mode::Distribution, selection));
    };

    let values = dataset.numeric(column);
    let hist = histogram(&values)?;
    let color = primary_color();

    let density = super::count_scaled_kde(&values, hist.bin_width());
    let tallest = density
        .iter()
        .flatten()
        .map(|p| p[1])
        .fold(hist.max_count() as f64, f64::max);

    let x_range = [hist.edges[0], hist.edges[hist.edges.len() - 1]];
    let mut panel = Panel::new(
        Axis::continuous(column.name(), x_range),
        Axis::continuous("Count", super::zero_based(tallest)),
    )
    .with_mark(super::histogram_bars(&hist, color, false));

    if let Some(points) = density {
        panel.push(Mark::Line {
            points,
            color: darken(color, 0.2),
            width: 2.0,
        });
    }

    Ok(Artifact::Figure(Figure::single(
        format!("Distribution of {}", column),
        panel,
        values.len(),
    )))
}
