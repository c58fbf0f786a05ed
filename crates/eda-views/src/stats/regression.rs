//! Ordinary least squares with a confidence band for the mean

use eda_core::EdaError;
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::linspace;

/// Confidence level of the band around the fitted line
pub const CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    n: usize,
    x_mean: f64,
    sxx: f64,
    residual_se: f64,
    t_critical: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Half width of the confidence interval of the mean response at `x`
    pub fn half_width(&self, x: f64) -> f64 {
        let leverage = 1.0 / self.n as f64 + (x - self.x_mean).powi(2) / self.sxx;
        self.t_critical * self.residual_se * leverage.sqrt()
    }

    /// Fitted line and lower/upper band sampled at `count` points over [lo, hi]
    pub fn sample(&self, lo: f64, hi: f64, count: usize) -> (Vec<[f64; 2]>, Vec<[f64; 2]>, Vec<[f64; 2]>) {
        let xs = linspace(lo, hi, count);
        let line = xs.iter().map(|&x| [x, self.predict(x)]).collect();
        let lower = xs.iter().map(|&x| [x, self.predict(x) - self.half_width(x)]).collect();
        let upper = xs.iter().map(|&x| [x, self.predict(x) + self.half_width(x)]).collect();
        (line, lower, upper)
    }
}

/// Least squares fit of y on x
pub fn fit_line(points: &[(f64, f64)]) -> Result<LinearFit, EdaError> {
    let n = points.len();
    if n < 3 {
        return Err(EdaError::Render(format!("regression needs at least 3 points, got {}", n)));
    }
    let nf = n as f64;
    let x_mean = points.iter().map(|p| p.0).sum::<f64>() / nf;
    let y_mean = points.iter().map(|p| p.1).sum::<f64>() / nf;

    let sxx: f64 = points.iter().map(|(x, _)| (x - x_mean).powi(2)).sum();
    let sxy: f64 = points.iter().map(|(x, y)| (x - x_mean) * (y - y_mean)).sum();
    if sxx == 0.0 {
        return Err(EdaError::Render("regression needs more than one distinct x value".to_string()));
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let sse: f64 = points
        .iter()
        .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
        .sum();
    let df = nf - 2.0;
    let residual_se = (sse / df).sqrt();

    let t_critical = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| EdaError::Render(format!("t distribution: {}", e)))?
        .inverse_cdf(1.0 - (1.0 - CONFIDENCE) / 2.0);

    Ok(LinearFit {
        slope,
        intercept,
        n,
        x_mean,
        sxx,
        residual_se,
        t_critical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 3.0 * i as f64 + 1.0)).collect();
        let fit = fit_line(&points).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!(fit.half_width(4.5).abs() < 1e-9);
    }

    #[test]
    fn test_band_is_narrowest_at_mean() {
        let points = vec![(1.0, 1.1), (2.0, 1.9), (3.0, 3.2), (4.0, 3.9), (5.0, 5.3)];
        let fit = fit_line(&points).unwrap();
        assert!(fit.half_width(3.0) < fit.half_width(1.0));
        assert!(fit.half_width(3.0) < fit.half_width(5.0));

        // t(0.975, df = 3)
        assert!((fit.t_critical - 3.182446).abs() < 1e-4);

        let (line, lower, upper) = fit.sample(1.0, 5.0, 5);
        assert_eq!(line.len(), 5);
        assert!(lower.iter().zip(&upper).all(|(lo, hi)| lo[1] <= hi[1]));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(fit_line(&[(1.0, 1.0), (2.0, 2.0)]).is_err());
        assert!(fit_line(&[(1.0, 1.0), (1.0, 2.0), (1.0, 3.0)]).is_err());
    }
}
