//! Swarm plot: categorical scatter without overlapping markers
//!
//! Markers are ellipses sized in data units. They are round when the panel
//! is drawn at the reference size and stretch with the axes otherwise, so the
//! spacing computed here holds at any zoom or window size.

use eda_core::{EdaError, Mode, Selection};
use eda_data::Dataset;

use crate::colors::primary_color;
use crate::figure::{Artifact, Figure, Mark, Panel};
use crate::stats::categorical::SWARM_LIMIT;
use crate::stats::{swarm_offsets, CategoryGroup};

/// Plot area, in pixels, at which markers come out round
const REFERENCE_PLOT_PX: [f64; 2] = [900.0, 540.0];

/// Marker diameter at the reference size
const MARKER_PX: f64 = 6.0;

/// Widest marker, in category widths
const MAX_MARKER_WIDTH: f64 = 0.1;

/// Shrink rounds before falling back to the guaranteed fit
const FIT_ATTEMPTS: usize = 8;

/// Marker size and per-point x offsets of a swarm
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmLayout {
    /// Marker diameter along x, in category widths
    pub marker_width: f64,
    /// Marker diameter along y, in data units
    pub marker_height: f64,
    /// Offsets from the category center, in category widths, parallel to
    /// each group's values
    pub offsets: Vec<Vec<f64>>,
}

impl SwarmLayout {
    /// Largest distance of any point from its category center
    pub fn reach(&self) -> f64 {
        self.offsets.iter().flatten().fold(0.0, |acc, offset| acc.max(offset.abs()))
    }
}

fn place(groups: &[CategoryGroup], marker_width: f64, marker_height: f64, limit: f64) -> SwarmLayout {
    let offsets = groups
        .iter()
        .map(|group| {
            let scaled: Vec<f64> = group.values.iter().map(|v| v / marker_height).collect();
            swarm_offsets(&scaled, limit)
                .into_iter()
                .map(|offset| offset * marker_width)
                .collect()
        })
        .collect();

    SwarmLayout {
        marker_width,
        marker_height,
        offsets,
    }
}

/// Place every group's points so that no markers overlap and no point
/// leaves its category.
///
/// Markers start at their reference size and shrink until the widest swarm
/// fits within ±0.4 category widths. A point of a group with `n` members
/// never lands more than `n - 1` diameters from the center, which bounds the
/// last resort size.
pub fn swarm_layout(groups: &[CategoryGroup], y_range: [f64; 2]) -> SwarmLayout {
    let x_per_px = groups.len().max(1) as f64 / REFERENCE_PLOT_PX[0];
    let y_per_px = (y_range[1] - y_range[0]).abs().max(f64::MIN_POSITIVE) / REFERENCE_PLOT_PX[1];
    let mut diameter_px = MARKER_PX.min(MAX_MARKER_WIDTH / x_per_px);

    for _ in 0..FIT_ATTEMPTS {
        let layout = place(groups, diameter_px * x_per_px, diameter_px * y_per_px, f64::INFINITY);
        let reach = layout.reach();
        if reach <= SWARM_LIMIT {
            return layout;
        }
        diameter_px *= SWARM_LIMIT / reach;
    }

    let largest = groups.iter().map(|group| group.values.len()).max().unwrap_or(1).max(1);
    diameter_px = diameter_px.min(SWARM_LIMIT / largest as f64 / x_per_px);
    let marker_width = diameter_px * x_per_px;
    place(groups, marker_width, diameter_px * y_per_px, SWARM_LIMIT / marker_width)
}

pub fn render(selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    let Selection::SwarmPlot { x, y } = *selection else {
        return Err(super::mismatch(Mode::SwarmPlot, selection));
    };

    let groups = super::grouped(dataset, x, y)?;
    let (x_axis, y_axis) = super::categorical_axes(&groups, x, y);
    let layout = swarm_layout(&groups, y_axis.range);

    let centers: Vec<[f64; 2]> = groups
        .iter()
        .zip(&layout.offsets)
        .enumerate()
        .flat_map(|(i, (group, offsets))| {
            group
                .values
                .iter()
                .zip(offsets)
                .map(move |(&v, &offset)| [i as f64 + offset, v])
        })
        .collect();
    let total = centers.len();

    let panel = Panel::new(x_axis, y_axis).with_mark(Mark::Markers {
        centers,
        size: [layout.marker_width, layout.marker_height],
        color: primary_color(),
    });

    Ok(Artifact::Figure(Figure::single(format!("{} by {}", y, x), panel, total)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::group_by_category;
    use eda_core::NumericColumn;
    use eda_data::DatasetProvider;

    #[test]
    fn test_identical_values_fit_in_category() {
        let pairs: Vec<(f64, f64)> = (0..29).map(|_| (0.2, 1.4)).collect();
        let groups = group_by_category(&pairs);
        let layout = swarm_layout(&groups, [1.0, 2.0]);
        let offsets = &layout.offsets[0];
        assert!(layout.reach() <= SWARM_LIMIT + 1e-12);

        let mut sorted = offsets.clone();
        sorted.sort_by(f64::total_cmp);
        for pair in sorted.windows(2) {
            assert!(pair[1] - pair[0] >= layout.marker_width - 1e-9);
        }
    }

    #[test]
    fn test_sparse_swarm_keeps_reference_size() {
        let pairs = [(1.0, 1.0), (1.0, 5.0), (2.0, 3.0)];
        let groups = group_by_category(&pairs);
        let layout = swarm_layout(&groups, [0.0, 6.0]);
        assert!((layout.marker_width - MARKER_PX * 2.0 / REFERENCE_PLOT_PX[0]).abs() < 1e-12);
        assert!((layout.marker_height - MARKER_PX * 6.0 / REFERENCE_PLOT_PX[1]).abs() < 1e-12);
        assert_eq!(layout.reach(), 0.0);
    }

    #[test]
    fn test_drawn_markers_do_not_overlap() {
        let data = DatasetProvider::iris().load().unwrap();
        let selection = Selection::SwarmPlot {
            x: NumericColumn::SepalLength,
            y: NumericColumn::SepalWidth,
        };
        let Artifact::Figure(figure) = render(&selection, &data).unwrap() else {
            panic!("expected a figure");
        };
        let Some(Mark::Markers { centers, size, .. }) = figure.marks().next() else {
            panic!("expected markers");
        };
        assert_eq!(centers.len(), 150);

        for (i, a) in centers.iter().enumerate() {
            assert!((a[0] - a[0].round()).abs() <= SWARM_LIMIT + 1e-12);
            for b in &centers[i + 1..] {
                let dx = (a[0] - b[0]) / size[0];
                let dy = (a[1] - b[1]) / size[1];
                assert!(dx.hypot(dy) >= 1.0 - 1e-9, "{a:?} and {b:?} overlap");
            }
        }
    }
}
