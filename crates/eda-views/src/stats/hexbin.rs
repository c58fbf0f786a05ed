//! Hexagonal binning

use std::collections::BTreeMap;

use eda_core::EdaError;

use super::{iqr, sorted};

/// Upper bound on the per-axis bin count used to size the hexagons
const MAX_AXIS_BINS: usize = 50;

/// One occupied hexagon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexBin {
    pub center: [f64; 2],
    pub count: usize,
}

/// Occupied hexagons and the shape shared by all of them
#[derive(Debug, Clone, PartialEq)]
pub struct HexGrid {
    pub bins: Vec<HexBin>,
    /// Vertex offsets from a hexagon center
    pub shape: [[f64; 2]; 6],
}

impl HexGrid {
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    pub fn vertices(&self, bin: &HexBin) -> Vec<[f64; 2]> {
        self.shape
            .iter()
            .map(|[dx, dy]| [bin.center[0] + dx, bin.center[1] + dy])
            .collect()
    }
}

/// Freedman-Diaconis bin count, falling back to sqrt(n) when the IQR is zero
fn fd_bins(values: &[f64]) -> usize {
    let sorted = sorted(values);
    let n = sorted.len();
    if n == 0 {
        return 1;
    }
    let h = 2.0 * iqr(&sorted) / (n as f64).cbrt();
    if h == 0.0 {
        return ((n as f64).sqrt() as usize).max(1);
    }
    (((sorted[n - 1] - sorted[0]) / h).ceil() as usize).max(1)
}

/// Hexagons across the x axis for a joint plot of `xs` and `ys`
pub fn joint_gridsize(xs: &[f64], ys: &[f64]) -> usize {
    let x_bins = fd_bins(xs).min(MAX_AXIS_BINS);
    let y_bins = fd_bins(ys).min(MAX_AXIS_BINS);
    ((x_bins + y_bins) / 2).max(1)
}

/// Count points into a hexagonal lattice with `gridsize` hexagons across x.
///
/// Two rectangular lattices offset by half a cell are overlaid; each point
/// goes to the nearer center, with y distances weighted by 3 so the cells
/// come out hexagonal. Only occupied hexagons are returned.
pub fn hexbin(points: &[(f64, f64)], gridsize: usize) -> Result<HexGrid, EdaError> {
    if points.is_empty() {
        return Err(EdaError::Render("cannot bin an empty set of points".to_string()));
    }
    let nx = gridsize.max(1) as f64;
    let ny = ((nx / 3f64.sqrt()) as usize).max(1) as f64;

    let bounds = |values: &mut dyn Iterator<Item = f64>| {
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let pad = if hi > lo { (hi - lo) * 1e-9 } else { 0.5 };
        (lo - pad, hi + pad)
    };
    let (xmin, xmax) = bounds(&mut points.iter().map(|p| p.0));
    let (ymin, ymax) = bounds(&mut points.iter().map(|p| p.1));
    let sx = (xmax - xmin) / nx;
    let sy = (ymax - ymin) / ny;

    // (lattice, column, row) -> count
    let mut counts: BTreeMap<(u8, i64, i64), usize> = BTreeMap::new();
    for &(x, y) in points {
        let ix = (x - xmin) / sx;
        let iy = (y - ymin) / sy;
        let (ix1, iy1) = (ix.round(), iy.round());
        let (ix2, iy2) = (ix.floor(), iy.floor());
        let d1 = (ix - ix1).powi(2) + 3.0 * (iy - iy1).powi(2);
        let d2 = (ix - ix2 - 0.5).powi(2) + 3.0 * (iy - iy2 - 0.5).powi(2);

        let key = if d1 < d2 {
            (0, ix1 as i64, iy1 as i64)
        } else {
            (1, ix2 as i64, iy2 as i64)
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    let bins = counts
        .into_iter()
        .map(|((lattice, i, j), count)| {
            let offset = if lattice == 0 { 0.0 } else { 0.5 };
            HexBin {
                center: [xmin + (i as f64 + offset) * sx, ymin + (j as f64 + offset) * sy],
                count,
            }
        })
        .collect();

    let shape = [
        [0.5 * sx, -sy / 6.0],
        [0.5 * sx, sy / 6.0],
        [0.0, sy / 3.0],
        [-0.5 * sx, sy / 6.0],
        [-0.5 * sx, -sy / 6.0],
        [0.0, -sy / 3.0],
    ];

    Ok(HexGrid { bins, shape })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_point_lands_in_a_bin() {
        let points: Vec<(f64, f64)> = (0..200)
            .map(|i| {
                let t = i as f64 / 10.0;
                (t.cos() * t, t.sin() * t)
            })
            .collect();
        let grid = hexbin(&points, 12).unwrap();
        assert_eq!(grid.bins.iter().map(|bin| bin.count).sum::<usize>(), 200);
        assert!(grid.bins.iter().all(|bin| bin.count > 0));
        assert_eq!(grid.vertices(&grid.bins[0]).len(), 6);
    }

    #[test]
    fn test_coincident_points_share_a_bin() {
        let grid = hexbin(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)], 10).unwrap();
        assert_eq!(grid.bins.len(), 1);
        assert_eq!(grid.max_count(), 3);
    }

    #[test]
    fn test_joint_gridsize_is_mean_of_axis_bins() {
        let xs: Vec<f64> = (0..100).map(|i| i as f64).collect();
        // FD: h = 2 * 49.5 / 100^(1/3) = 21.33 -> ceil(99 / 21.33) = 5
        assert_eq!(joint_gridsize(&xs, &xs), 5);
        assert_eq!(joint_gridsize(&[1.0; 16], &xs), (4 + 5) / 2);
    }

    #[test]
    fn test_empty_points() {
        assert!(hexbin(&[], 10).is_err());
    }
}
