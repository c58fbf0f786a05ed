//! Statistics behind the tables and charts
//!
//! Pure functions over `f64` slices. Nothing here knows about the dataset or
//! about drawing.

pub mod categorical;
pub mod density;
pub mod hexbin;
pub mod histogram;
pub mod letter_values;
pub mod regression;

pub use categorical::{group_by_category, jitter_offsets, swarm_offsets, CategoryGroup};
pub use density::{kde_curve, kde_grid, scott_bandwidth, DensityGrid};
pub use hexbin::{hexbin, joint_gridsize, HexBin, HexGrid};
pub use histogram::{auto_bin_count, histogram, histogram_with_bins, Histogram};
pub use letter_values::{letter_values, LetterValues};
pub use regression::{fit_line, LinearFit};

use eda_core::EdaError;

/// Copy of `values` sorted ascending
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator)
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Quantile of already sorted data using linear interpolation
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let idx = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    interpolate(sorted, idx)
}

/// Interquartile range
pub fn iqr(sorted: &[f64]) -> f64 {
    quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25)
}

fn interpolate(sorted: &[f64], idx: f64) -> f64 {
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper || upper >= sorted.len() {
        sorted[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Descriptive statistics of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// NaN for a single observation
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Describe {
    /// Row labels in display order
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Values in the order of [`Describe::LABELS`]
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q1,
            self.median,
            self.q3,
            self.max,
        ]
    }
}

pub fn describe(values: &[f64]) -> Result<Describe, EdaError> {
    if values.is_empty() {
        return Err(EdaError::Render("cannot describe an empty column".to_string()));
    }
    let sorted = sorted(values);
    Ok(Describe {
        count: sorted.len(),
        mean: mean(&sorted).unwrap_or(f64::NAN),
        std: std_dev(&sorted).unwrap_or(f64::NAN),
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// `count` evenly spaced values from `lo` to `hi` inclusive
pub fn linspace(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (count - 1) as f64;
            (0..count).map(|i| lo + step * i as f64).collect()
        }
    }
}
