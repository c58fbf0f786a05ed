//! Letter-value summaries for boxen plots

use eda_core::EdaError;

use super::{quantile_sorted, sorted};

/// Nested quantile boxes of one group
#[derive(Debug, Clone, PartialEq)]
pub struct LetterValues {
    /// Box `i` spans the tail probabilities 2^-(i+2) .. 1 - 2^-(i+2),
    /// innermost (the quartiles) first
    pub boxes: Vec<(f64, f64)>,
    pub median: f64,
    /// Values outside the outermost box
    pub outliers: Vec<f64>,
    pub count: usize,
}

impl LetterValues {
    pub fn depth(&self) -> usize {
        self.boxes.len()
    }
}

/// Tukey depth rule: max(floor(log2 n) - 3, 1)
pub fn tukey_depth(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let k = (n as f64).log2().floor() as i64 - 3;
    k.max(1) as usize
}

pub fn letter_values(values: &[f64]) -> Result<LetterValues, EdaError> {
    if values.is_empty() {
        return Err(EdaError::Render("cannot compute letter values of an empty group".to_string()));
    }
    let sorted = sorted(values);
    let depth = tukey_depth(sorted.len());

    let boxes: Vec<(f64, f64)> = (1..=depth)
        .map(|level| {
            let tail = 0.5f64.powi(level as i32 + 1);
            (quantile_sorted(&sorted, tail), quantile_sorted(&sorted, 1.0 - tail))
        })
        .collect();

    let (lo, hi) = boxes[boxes.len() - 1];
    let outliers = sorted.iter().copied().filter(|&v| v < lo || v > hi).collect();

    Ok(LetterValues {
        boxes,
        median: quantile_sorted(&sorted, 0.5),
        outliers,
        count: sorted.len(),
    })
}
