//! Joint plot: a bivariate panel with marginal distributions
//!
//! Laid out on a 2x2 grid: the x marginal on top, the main panel bottom
//! left and the y marginal on the right. The top right cell stays empty.

use eda_core::{EdaError, JointKind, Mode, NumericColumn, Selection};
use eda_data::Dataset;

use crate::colors::{darken, light_ramp, primary_color, Rgb};
use crate::figure::{padded_range, Artifact, Axis, Cell, Figure, Mark, Panel};
use crate::stats::{fit_line, hexbin, histogram, joint_gridsize, kde_curve, kde_grid, Histogram};

/// Density levels drawn for the kde kind
const KDE_LEVELS: usize = 10;

/// Share of the density mass left undrawn below the lowest level
const KDE_THRESH: f64 = 0.05;

/// Bandwidths the kde kind extends past the data
const KDE_CUT: f64 = 3.0;

pub fn render(selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    let Selection::JointPlot { x, y, kind } = *selection else {
        return Err(super::mismatch(Mode::JointPlot, selection));
    };

    let pairs = dataset.numeric_pairs(x, y);
    if pairs.is_empty() {
        return Err(EdaError::Render(format!("no rows with both {} and {}", x, y)));
    }
    let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let color = primary_color();

    let (main, top, right) = match kind {
        JointKind::Scatter => {
            let main = main_panel(x, y, &xs, &ys).with_mark(scatter(&pairs, color));
            let (top, right) = marginal_histograms(&xs, &ys, &main, color, false)?;
            (main, top, right)
        }
        JointKind::Reg => {
            let mut main = main_panel(x, y, &xs, &ys);
            regression_marks(&mut main, &pairs, color)?;
            let (top, right) = marginal_histograms(&xs, &ys, &main, color, true)?;
            (main, top, right)
        }
        JointKind::Hex => {
            let mut main = main_panel(x, y, &xs, &ys);
            hex_marks(&mut main, &pairs, &xs, &ys, color)?;
            let (top, right) = marginal_histograms(&xs, &ys, &main, color, false)?;
            (main, top, right)
        }
        JointKind::Kde => {
            let grid = kde_grid(&pairs, KDE_CUT)?;
            let x_range = [grid.xs[0], grid.xs[grid.xs.len() - 1]];
            let y_range = [grid.ys[0], grid.ys[grid.ys.len() - 1]];
            let mut main = Panel::new(Axis::continuous(x.name(), x_range), Axis::continuous(y.name(), y_range));
            main.push(density_cells(&grid, color));
            let (top, right) = marginal_densities(&xs, &ys, &main, color);
            (main, top, right)
        }
    };

    Ok(Artifact::Figure(Figure {
        title: format!("{} vs {} ({})", y, x, kind),
        rows: 2,
        cols: 2,
        row_weights: vec![1.0, 4.0],
        col_weights: vec![4.0, 1.0],
        cells: vec![Some(top), None, Some(main), Some(right)],
        legend: Vec::new(),
        observations: pairs.len(),
    }))
}

fn main_panel(x: NumericColumn, y: NumericColumn, xs: &[f64], ys: &[f64]) -> Panel {
    Panel::new(
        Axis::continuous(x.name(), padded_range(xs.iter().copied(), 0.05)),
        Axis::continuous(y.name(), padded_range(ys.iter().copied(), 0.05)),
    )
}

fn scatter(pairs: &[(f64, f64)], color: Rgb) -> Mark {
    Mark::Points {
        points: pairs.iter().map(|&(x, y)| [x, y]).collect(),
        color,
        radius: 3.0,
    }
}

fn regression_marks(panel: &mut Panel, pairs: &[(f64, f64)], color: Rgb) -> Result<(), EdaError> {
    let fit = fit_line(pairs)?;
    let [lo, hi] = panel.x.range;
    let (line, lower, mut upper) = fit.sample(lo, hi, 100);

    panel.push(scatter(pairs, color));
    upper.reverse();
    panel.push(Mark::Polygon {
        vertices: lower.into_iter().chain(upper).collect(),
        fill: color,
        opacity: 0.2,
        stroke: None,
    });
    panel.push(Mark::Line {
        points: line,
        color: darken(color, 0.2),
        width: 2.0,
    });
    Ok(())
}

fn hex_marks(panel: &mut Panel, pairs: &[(f64, f64)], xs: &[f64], ys: &[f64], color: Rgb) -> Result<(), EdaError> {
    let grid = hexbin(pairs, joint_gridsize(xs, ys))?;
    let max = grid.max_count().max(1) as f64;
    for bin in &grid.bins {
        panel.push(Mark::Polygon {
            vertices: grid.vertices(bin),
            fill: light_ramp(color, bin.count as f64 / max),
            opacity: 1.0,
            stroke: None,
        });
    }
    Ok(())
}

fn density_cells(grid: &crate::stats::DensityGrid, color: Rgb) -> Mark {
    let levels = grid.levels(KDE_LEVELS, KDE_THRESH);
    let (hx, hy) = (grid.x_step() / 2.0, grid.y_step() / 2.0);
    let mut cells = Vec::new();

    for (j, &gy) in grid.ys.iter().enumerate() {
        for (i, &gx) in grid.xs.iter().enumerate() {
            let density = grid.at(i, j);
            let level = levels.iter().take_while(|&&threshold| density >= threshold).count();
            if level == 0 {
                continue;
            }
            cells.push(Cell {
                min: [gx - hx, gy - hy],
                max: [gx + hx, gy + hy],
                color: light_ramp(color, level as f64 / KDE_LEVELS as f64),
            });
        }
    }
    Mark::Cells { cells }
}

/// Top (x) and right (y) histograms sharing the main panel's ranges
fn marginal_histograms(xs: &[f64], ys: &[f64], main: &Panel, color: Rgb, with_density: bool) -> Result<(Panel, Panel), EdaError> {
    let x_hist = histogram(xs)?;
    let y_hist = histogram(ys)?;

    let mut top = Panel::new(Axis::unlabeled(main.x.range), Axis::unlabeled(tallest(&x_hist, None)));
    top.push(super::histogram_bars(&x_hist, color, false));

    let mut right = Panel::new(Axis::unlabeled(tallest(&y_hist, None)), Axis::unlabeled(main.y.range));
    right.push(super::histogram_bars(&y_hist, color, true));

    if with_density {
        if let Some(curve) = super::count_scaled_kde(xs, x_hist.bin_width()) {
            top.y.range = tallest(&x_hist, Some(&curve));
            top.push(Mark::Line {
                points: curve,
                color: darken(color, 0.2),
                width: 1.5,
            });
        }
        if let Some(curve) = super::count_scaled_kde(ys, y_hist.bin_width()) {
            right.x.range = tallest(&y_hist, Some(&curve));
            right.push(Mark::Line {
                points: super::transpose(curve),
                color: darken(color, 0.2),
                width: 1.5,
            });
        }
    }

    Ok((top, right))
}

fn tallest(hist: &Histogram, curve: Option<&Vec<[f64; 2]>>) -> [f64; 2] {
    let max = curve
        .into_iter()
        .flatten()
        .map(|p| p[1])
        .fold(hist.max_count() as f64, f64::max);
    super::zero_based(max)
}

/// Filled marginal density curves for the kde kind
fn marginal_densities(xs: &[f64], ys: &[f64], main: &Panel, color: Rgb) -> (Panel, Panel) {
    let x_curve = kde_curve(xs, KDE_CUT).unwrap_or_default();
    let y_curve = kde_curve(ys, KDE_CUT).unwrap_or_default();
    let peak = |curve: &[[f64; 2]]| super::zero_based(curve.iter().map(|p| p[1]).fold(0.0, f64::max));

    let mut top = Panel::new(Axis::unlabeled(main.x.range), Axis::unlabeled(peak(&x_curve)));
    let mut right = Panel::new(Axis::unlabeled(peak(&y_curve)), Axis::unlabeled(main.y.range));

    if !x_curve.is_empty() {
        top.push(filled(super::area_under(&x_curve), color));
        top.push(Mark::Line {
            points: x_curve,
            color,
            width: 1.5,
        });
    }
    if !y_curve.is_empty() {
        right.push(filled(super::transpose(super::area_under(&y_curve)), color));
        right.push(Mark::Line {
            points: super::transpose(y_curve),
            color,
            width: 1.5,
        });
    }
    (top, right)
}

fn filled(vertices: Vec<[f64; 2]>, color: Rgb) -> Mark {
    Mark::Polygon {
        vertices,
        fill: color,
        opacity: 0.25,
        stroke: None,
    }
}
