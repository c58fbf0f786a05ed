//! Gaussian kernel density estimation

use std::f64::consts::PI;

use eda_core::EdaError;

use super::{linspace, mean, std_dev};

/// Points along a 1D density curve
pub const CURVE_POINTS: usize = 200;

/// Grid resolution of a 2D density per axis
pub const GRID_POINTS: usize = 60;

/// Scott's rule: sample std scaled by n^(-1/5)
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = std_dev(values)?;
    let bandwidth = std * (values.len() as f64).powf(-0.2);
    (bandwidth > 0.0 && bandwidth.is_finite()).then_some(bandwidth)
}

/// Density curve over the data range widened by `cut` bandwidths.
///
/// Returns `None` when the data has no spread; there is no meaningful
/// density to draw in that case.
pub fn kde_curve(values: &[f64], cut: f64) -> Option<Vec<[f64; 2]>> {
    let bandwidth = scott_bandwidth(values)?;
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let norm = values.len() as f64 * bandwidth * (2.0 * PI).sqrt();

    let curve = linspace(lo - cut * bandwidth, hi + cut * bandwidth, CURVE_POINTS)
        .into_iter()
        .map(|x| {
            let density: f64 = values
                .iter()
                .map(|&value| {
                    let u = (x - value) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum();
            [x, density / norm]
        })
        .collect();
    Some(curve)
}

/// Density evaluated on a regular grid
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    /// Row-major by y: `values[j * xs.len() + i]` is the density at (xs[i], ys[j])
    pub values: Vec<f64>,
}

impl DensityGrid {
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.xs.len() + i]
    }

    pub fn x_step(&self) -> f64 {
        self.xs[1] - self.xs[0]
    }

    pub fn y_step(&self) -> f64 {
        self.ys[1] - self.ys[0]
    }

    /// Density thresholds for `count` iso-proportion levels.
    ///
    /// Level `k` encloses all but `thresh + k * (1 - thresh) / count` of the
    /// total mass, so the lowest level drops the faintest `thresh` share.
    pub fn levels(&self, count: usize, thresh: f64) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        let total: f64 = sorted.iter().sum();
        if total <= 0.0 || count == 0 {
            return Vec::new();
        }

        let mut levels = Vec::with_capacity(count);
        let mut cumulative = 0.0;
        let mut idx = 0;
        for k in 0..count {
            let target = (thresh + k as f64 * (1.0 - thresh) / count as f64) * total;
            while idx < sorted.len() && cumulative + sorted[idx] <= target {
                cumulative += sorted[idx];
                idx += 1;
            }
            levels.push(sorted.get(idx).copied().unwrap_or(sorted[sorted.len() - 1]));
        }
        levels
    }
}

/// Bivariate Gaussian KDE with a full covariance bandwidth (Scott's rule,
/// factor n^(-1/6)), evaluated over the data range widened by `cut`
/// bandwidths on each axis.
pub fn kde_grid(points: &[(f64, f64)], cut: f64) -> Result<DensityGrid, EdaError> {
    let n = points.len();
    if n < 3 {
        return Err(EdaError::Render(format!("need at least 3 points for a density estimate, got {}", n)));
    }
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (mx, my) = (mean(&xs).unwrap_or(0.0), mean(&ys).unwrap_or(0.0));

    let denom = (n - 1) as f64;
    let sxx = xs.iter().map(|x| (x - mx).powi(2)).sum::<f64>() / denom;
    let syy = ys.iter().map(|y| (y - my).powi(2)).sum::<f64>() / denom;
    let sxy = points.iter().map(|(x, y)| (x - mx) * (y - my)).sum::<f64>() / denom;

    let factor2 = (n as f64).powf(-1.0 / 3.0);
    let (cxx, cyy, mut cxy) = (sxx * factor2, syy * factor2, sxy * factor2);
    if cxx <= 0.0 || cyy <= 0.0 {
        return Err(EdaError::Render("density estimate needs spread in both variables".to_string()));
    }

    // Identical columns give a singular covariance; shrink the correlation
    // slightly so the kernel stays invertible
    let max_cxy = 0.999 * (cxx * cyy).sqrt();
    cxy = cxy.clamp(-max_cxy, max_cxy);
    let det = cxx * cyy - cxy * cxy;
    let (ixx, iyy, ixy) = (cyy / det, cxx / det, -cxy / det);
    let norm = n as f64 * 2.0 * PI * det.sqrt();

    let (bx, by) = (cxx.sqrt(), cyy.sqrt());
    let range = |values: &[f64], bw: f64| {
        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        linspace(lo - cut * bw, hi + cut * bw, GRID_POINTS)
    };
    let grid_x = range(&xs, bx);
    let grid_y = range(&ys, by);

    let mut values = Vec::with_capacity(GRID_POINTS * GRID_POINTS);
    for &gy in &grid_y {
        for &gx in &grid_x {
            let density: f64 = points
                .iter()
                .map(|&(x, y)| {
                    let (dx, dy) = (gx - x, gy - y);
                    (-0.5 * (ixx * dx * dx + 2.0 * ixy * dx * dy + iyy * dy * dy)).exp()
                })
                .sum();
            values.push(density / norm);
        }
    }

    Ok(DensityGrid {
        xs: grid_x,
        ys: grid_y,
        values,
    })
}
