//! Streaming statistics: running means, least-squares fits and residual error.

use crate::error::{Error, Result};
use crate::series::{Timeseries, TimeseriesView, check_len};
use serde::{Deserialize, Serialize};

/// Weighted running mean and variance.
///
/// Uses West's incremental update, which reduces to Welford's algorithm for
/// unit weights. Zero weights are ignored.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    weight_sum: f64,
    mean: f64,
    diff_2_sum: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorReport {
    pub mean: f64,
    pub std_dev: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, val: f64) {
        self.add_weighted(val, 1.0);
    }

    pub fn add_weighted(&mut self, val: f64, weight: f64) {
        if weight == 0.0 {
            return;
        }
        self.weight_sum += weight;

        let diff_a = val - self.mean;
        self.mean += weight / self.weight_sum * diff_a;

        let diff_b = val - self.mean;
        self.diff_2_sum += weight * diff_a * diff_b;
    }

    /// Weighted mean, NaN when no weight has been added.
    pub fn mean(&self) -> f64 {
        if self.weight_sum == 0.0 {
            f64::NAN
        } else {
            self.mean
        }
    }

    /// Sample standard deviation, NaN for total weights up to one.
    pub fn std_dev(&self) -> f64 {
        if self.weight_sum > 1.0 {
            (self.diff_2_sum / (self.weight_sum - 1.0)).sqrt()
        } else {
            f64::NAN
        }
    }

    pub fn report(&self) -> AccumulatorReport {
        AccumulatorReport {
            mean: self.mean(),
            std_dev: self.std_dev(),
        }
    }
}

/// Running means, x-variance and xy co-moment of paired samples.
#[derive(Debug, Clone, Default)]
pub struct CoAccumulator {
    n_vals: usize,
    mean_x: f64,
    mean_y: f64,
    diff_2_sum_x: f64,
    co_diff_sum: f64,
}

impl CoAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: f64, y: f64) {
        self.n_vals += 1;
        let n_vals = self.n_vals as f64;

        let diff_x_a = x - self.mean_x;
        self.mean_x += diff_x_a / n_vals;
        self.mean_y += (y - self.mean_y) / n_vals;

        let diff_x_b = x - self.mean_x;
        let diff_y_b = y - self.mean_y;
        self.diff_2_sum_x += diff_x_a * diff_x_b;
        self.co_diff_sum += diff_x_a * diff_y_b;
    }

    pub fn n_vals(&self) -> usize {
        self.n_vals
    }

    /// Least-squares `(alpha, beta)`, NaN when the x-values have no spread.
    pub fn fit(&self) -> (f64, f64) {
        if self.n_vals == 0 || self.diff_2_sum_x == 0.0 {
            return (f64::NAN, f64::NAN);
        }
        let beta = self.co_diff_sum / self.diff_2_sum_x;
        let alpha = self.mean_y - beta * self.mean_x;
        (alpha, beta)
    }
}

/// Fitted line `y = alpha + beta * x` with its root mean squared residual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub alpha: f64,
    pub beta: f64,
    pub rmse: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.alpha + self.beta * x
    }
}

impl TimeseriesView<'_> {
    /// Ordinary least-squares fit of `y = alpha + beta * x`.
    ///
    /// When all x-values coincide (including the single-point case) the slope
    /// is undefined and every field of the result is NaN.
    ///
    /// # Errors
    /// [`Error::EmptySeries`] if the series has no points.
    pub fn simple_linear_regression(&self) -> Result<Regression> {
        let len = self.len()?;
        if len == 0 {
            return Err(Error::EmptySeries);
        }

        let mut co_acc = CoAccumulator::new();
        for (&x, &y) in self.xs.iter().zip(self.ys) {
            co_acc.add(x, y);
        }

        let (alpha, beta) = co_acc.fit();
        if beta.is_nan() {
            log::debug!("x-values of {len} points have no spread, slope is undefined");
            return Ok(Regression {
                alpha,
                beta,
                rmse: f64::NAN,
            });
        }

        let mse = mean_squared_error(self.xs, self.ys, None, alpha, beta)?;
        Ok(Regression {
            alpha,
            beta,
            rmse: mse.sqrt(),
        })
    }
}

impl Timeseries {
    pub fn simple_linear_regression(&self) -> Result<Regression> {
        self.view().simple_linear_regression()
    }
}

/// Weighted mean squared residual of the line `alpha + beta * x`:
/// `Σ w (alpha + beta x - y)² / Σ w`.
///
/// `None` weights every point equally. A zero total weight gives NaN.
///
/// # Errors
/// [`Error::LengthMismatch`] if `xs`, `ys` and `weights` differ in length,
/// [`Error::EmptySeries`] if there are no points.
pub fn mean_squared_error(
    xs: &[f64],
    ys: &[f64],
    weights: Option<&[f64]>,
    alpha: f64,
    beta: f64,
) -> Result<f64> {
    let len = check_len(xs, ys)?;
    if let Some(weights) = weights {
        check_len(xs, weights)?;
    }
    if len == 0 {
        return Err(Error::EmptySeries);
    }

    // Partial weight sums may pass through zero.
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for i_pt in 0..len {
        let residual = alpha + beta * xs[i_pt] - ys[i_pt];
        let weight = weights.map_or(1.0, |weights| weights[i_pt]);
        weighted_sum += weight * residual * residual;
        weight_sum += weight;
    }

    if weight_sum == 0.0 {
        log::debug!("total weight of {len} points is zero");
        return Ok(f64::NAN);
    }
    Ok(weighted_sum / weight_sum)
}
