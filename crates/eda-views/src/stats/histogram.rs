//! Histogram binning

use eda_core::EdaError;

use super::{iqr, linspace, sorted};

/// Equal-width bins with counts
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn centers(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.windows(2).map(|edge| (edge[0] + edge[1]) / 2.0)
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Number of bins chosen by the "auto" rule: the smaller of the Sturges and
/// Freedman-Diaconis bin widths
pub fn auto_bin_count(values: &[f64]) -> usize {
    if values.len() < 2 {
        return 1;
    }
    let sorted = sorted(values);
    let n = sorted.len() as f64;
    let range = sorted[sorted.len() - 1] - sorted[0];
    if range == 0.0 {
        return 1;
    }

    let sturges = range / (n.log2() + 1.0);
    let fd = 2.0 * iqr(&sorted) * n.powf(-1.0 / 3.0);
    let width = if fd > 0.0 { sturges.min(fd) } else { sturges };

    ((range / width).ceil() as usize).max(1)
}

/// Histogram with the automatic bin count
pub fn histogram(values: &[f64]) -> Result<Histogram, EdaError> {
    histogram_with_bins(values, auto_bin_count(values))
}

/// Histogram over the data range with `bins` equal-width bins.
///
/// The last bin is closed on the right so the maximum is counted.
pub fn histogram_with_bins(values: &[f64], bins: usize) -> Result<Histogram, EdaError> {
    if values.is_empty() {
        return Err(EdaError::Render("cannot bin an empty column".to_string()));
    }
    let bins = bins.max(1);

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let edges = linspace(lo, hi, bins + 1);
    let mut counts = vec![0usize; bins];
    let scale = bins as f64 / (hi - lo);

    for &value in values {
        let mut idx = (((value - lo) * scale) as usize).min(bins - 1);
        // Correct for rounding at the edges
        if value < edges[idx] && idx > 0 {
            idx -= 1;
        } else if idx + 1 < bins && value >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}
