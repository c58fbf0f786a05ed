//! Strip plot: jittered categorical scatter

use eda_core::{EdaError, Mode, Selection};
use eda_data::Dataset;

use crate::colors::primary_color;
use crate::figure::{Artifact, Figure, Mark, Panel};
use crate::stats::jitter_offsets;

pub fn render(selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    let Selection::StripPlot { x, y } = *selection else {
        return Err(super::mismatch(Mode::StripPlot, selection));
    };

    let groups = super::grouped(dataset, x, y)?;
    let (x_axis, y_axis) = super::categorical_axes(&groups, x, y);

    let total: usize = groups.iter().map(|group| group.values.len()).sum();
    let mut jitter = jitter_offsets(total).into_iter();
    let points: Vec<[f64; 2]> = groups
        .iter()
        .enumerate()
        .flat_map(|(i, group)| group.values.iter().map(move |&v| (i as f64, v)))
        .map(|(center, v)| [center + jitter.next().unwrap_or(0.0), v])
        .collect();

    let panel = Panel::new(x_axis, y_axis).with_mark(Mark::Points {
        points,
        color: primary_color(),
        radius: 3.0,
    });

    Ok(Artifact::Figure(Figure::single(format!("{} by {}", y, x), panel, total)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eda_core::NumericColumn;
    use eda_data::DatasetProvider;

    #[test]
    fn test_points_stay_near_their_category() {
        let data = DatasetProvider::iris().load().unwrap();
        let selection = Selection::StripPlot {
            x: NumericColumn::SepalLength,
            y: NumericColumn::SepalWidth,
        };
        let Artifact::Figure(figure) = render(&selection, &data).unwrap() else {
            panic!("expected a figure");
        };
        let panel = figure.cell(0, 0).unwrap();
        assert_eq!(panel.x.categories.as_ref().unwrap().len(), 35);

        let Mark::Points { points, .. } = &panel.marks[0] else {
            panic!("expected points");
        };
        assert_eq!(points.len(), 150);
        assert!(points.iter().all(|p| (p[0] - p[0].round()).abs() <= 0.1 + 1e-12));
    }
}
