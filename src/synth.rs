//! Synthetic series: a straight line plus Gaussian noise.

use crate::error::{Error, Result};
use crate::series::Timeseries;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Shape of a generated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthParams {
    /// Number of points.
    pub n_points: usize,
    /// Distance between consecutive x-values.
    pub x_step: f64,
    /// Intercept of the underlying line.
    pub alpha: f64,
    /// Slope of the underlying line.
    pub beta: f64,
    /// Standard deviation of the additive noise.
    pub noise_std_dev: f64,
}

/// Generate a sorted series with `x_i = i * x_step` and
/// `y_i = alpha + beta * x_i + noise`.
///
/// # Errors
/// [`Error::InvalidParameter`] if `noise_std_dev` is negative or not finite.
pub fn generate<R: Rng + ?Sized>(params: &SynthParams, rng: &mut R) -> Result<Timeseries> {
    let noise_std_dev = params.noise_std_dev;
    if !(noise_std_dev.is_finite() && noise_std_dev >= 0.0) {
        return Err(Error::InvalidParameter {
            name: "noise_std_dev",
            value: noise_std_dev,
        });
    }
    let noise_dist = Normal::new(0.0, noise_std_dev).map_err(|_| Error::InvalidParameter {
        name: "noise_std_dev",
        value: noise_std_dev,
    })?;

    let mut series = Timeseries::with_capacity(params.n_points);
    for i_pt in 0..params.n_points {
        let x = i_pt as f64 * params.x_step;
        let y = params.alpha + params.beta * x + noise_dist.sample(rng);
        series.append(x, y);
    }

    log::debug!("generated {} points", params.n_points);
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn params(noise_std_dev: f64) -> SynthParams {
        SynthParams {
            n_points: 64,
            x_step: 0.5,
            alpha: 3.0,
            beta: -2.0,
            noise_std_dev,
        }
    }

    #[test]
    fn noiseless_series_is_a_line() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        let ts = generate(&params(0.0), &mut rng).unwrap();

        assert_eq!(ts.len(), Ok(64));
        assert_eq!(ts.last().unwrap().x, 31.5);

        let fit = ts.simple_linear_regression().unwrap();
        assert!((fit.alpha - 3.0).abs() < 1e-9);
        assert!((fit.beta + 2.0).abs() < 1e-9);
        assert!(fit.rmse < 1e-9);
    }

    #[test]
    fn same_seed_same_series() {
        let a = generate(&params(1.0), &mut ChaCha12Rng::seed_from_u64(42)).unwrap();
        let b = generate(&params(1.0), &mut ChaCha12Rng::seed_from_u64(42)).unwrap();
        let c = generate(&params(1.0), &mut ChaCha12Rng::seed_from_u64(43)).unwrap();

        assert!(a.equal(&b).unwrap());
        assert!(!a.equal(&c).unwrap());
    }

    #[test]
    fn noisy_fit_is_close() {
        let mut params = params(0.1);
        params.n_points = 4096;
        let ts = generate(&params, &mut ChaCha12Rng::seed_from_u64(1)).unwrap();

        let fit = ts.simple_linear_regression().unwrap();
        assert!((fit.beta + 2.0).abs() < 1e-2);
        assert!((fit.rmse - 0.1).abs() < 1e-2);
    }

    #[test]
    fn invalid_noise_is_rejected() {
        let mut rng = ChaCha12Rng::seed_from_u64(0);
        for noise_std_dev in [-1.0, f64::INFINITY] {
            assert_eq!(
                generate(&params(noise_std_dev), &mut rng),
                Err(Error::InvalidParameter {
                    name: "noise_std_dev",
                    value: noise_std_dev,
                })
            );
        }

        let nan = generate(&params(f64::NAN), &mut rng);
        assert!(matches!(nan, Err(Error::InvalidParameter { .. })));
    }
}
