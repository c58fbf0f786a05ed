//! The render branches, one per analysis mode
//!
//! Every branch has the same shape: it reads what it needs from the
//! selection and the dataset and returns one artifact. Branches never mutate
//! the dataset and keep no state between calls.

pub mod boxen;
pub mod distribution;
pub mod joint;
pub mod overview;
pub mod pair;
pub mod strip;
pub mod summary;
pub mod swarm;

use eda_core::{EdaError, Mode, NumericColumn, Selection};
use eda_data::Dataset;

use crate::colors::Rgb;
use crate::figure::{padded_range, Axis, BarSpec, Mark};
use crate::stats::{kde_curve, CategoryGroup, Histogram};

/// Error for a branch handed another mode's selection
pub(crate) fn mismatch(expected: Mode, selection: &Selection) -> EdaError {
    EdaError::InvalidSelection(format!(
        "{} cannot render a selection for {}",
        expected,
        selection.mode()
    ))
}

/// Bars of a histogram; `horizontal` bars grow along x
pub(crate) fn histogram_bars(hist: &Histogram, color: Rgb, horizontal: bool) -> Mark {
    let width = hist.bin_width();
    let bars = hist
        .centers()
        .zip(hist.counts.iter())
        .map(|(center, &count)| BarSpec {
            center,
            width,
            height: count as f64,
        })
        .collect();
    Mark::Bars {
        bars,
        color,
        horizontal,
    }
}

/// Density curve scaled to histogram counts (density * n * bin width)
pub(crate) fn count_scaled_kde(values: &[f64], bin_width: f64) -> Option<Vec<[f64; 2]>> {
    let scale = values.len() as f64 * bin_width;
    kde_curve(values, 0.0).map(|curve| curve.into_iter().map(|[x, d]| [x, d * scale]).collect())
}

/// Swap the coordinates of a curve so it runs along the y axis
pub(crate) fn transpose(points: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
    points.into_iter().map(|[a, b]| [b, a]).collect()
}

/// Closed area between a curve and zero, for filled densities
pub(crate) fn area_under(curve: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut vertices = Vec::with_capacity(curve.len() + 2);
    if let (Some(first), Some(last)) = (curve.first(), curve.last()) {
        vertices.push([first[0], 0.0]);
        vertices.extend_from_slice(curve);
        vertices.push([last[0], 0.0]);
    }
    vertices
}

/// Value range from zero to the tallest value plus headroom
pub(crate) fn zero_based(max: f64) -> [f64; 2] {
    if max > 0.0 {
        [0.0, max * 1.05]
    } else {
        [0.0, 1.0]
    }
}

/// Rows with both columns present, grouped by distinct x
pub(crate) fn grouped(dataset: &Dataset, x: NumericColumn, y: NumericColumn) -> Result<Vec<CategoryGroup>, EdaError> {
    let pairs = dataset.numeric_pairs(x, y);
    if pairs.is_empty() {
        return Err(EdaError::Render(format!("no rows with both {} and {}", x, y)));
    }
    Ok(crate::stats::group_by_category(&pairs))
}

/// Categorical x axis over the groups and a padded continuous y axis
pub(crate) fn categorical_axes(groups: &[CategoryGroup], x: NumericColumn, y: NumericColumn) -> (Axis, Axis) {
    let labels = groups.iter().map(|group| group.label.clone()).collect();
    let ys = groups.iter().flat_map(|group| group.values.iter().copied());
    (
        Axis::categorical(x.name(), labels),
        Axis::continuous(y.name(), padded_range(ys, 0.05)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::histogram_with_bins;

    #[test]
    fn test_histogram_bars_follow_bins() {
        let hist = histogram_with_bins(&[0.0, 1.0, 1.0, 2.0], 2).unwrap();
        match histogram_bars(&hist, Rgb::BLACK, false) {
            Mark::Bars { bars, horizontal, .. } => {
                assert!(!horizontal);
                assert_eq!(bars.len(), 2);
                assert_eq!(bars[0].center, 0.5);
                assert_eq!(bars[1].height, 3.0);
            }
            other => panic!("unexpected mark {other:?}"),
        }
    }

    #[test]
    fn test_area_under_closes_curve() {
        let area = area_under(&[[1.0, 2.0], [2.0, 3.0]]);
        assert_eq!(area, vec![[1.0, 0.0], [1.0, 2.0], [2.0, 3.0], [2.0, 0.0]]);
        assert!(area_under(&[]).is_empty());
    }

    #[test]
    fn test_mismatch_names_both_modes() {
        let err = mismatch(Mode::PairPlot, &Selection::Overview);
        assert!(err.to_string().contains("Pair Plot"));
        assert!(err.to_string().contains("Dataset Overview"));
    }
}
