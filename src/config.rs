use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    ops::{Bound, RangeBounds},
    path::Path,
};
use timeseries::synth::SynthParams;

/// Configuration of the data directory.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Synthetic series generation.
    pub synth: SynthConfig,
    /// Series analysis.
    pub analysis: AnalysisConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Number of points per series.
    pub n_points: usize,
    /// Distance between consecutive x-values.
    pub x_step: f64,
    /// Intercept of the underlying line.
    pub alpha: f64,
    /// Slope of the underlying line.
    pub beta: f64,
    /// Standard deviation of the additive noise.
    pub noise_std_dev: f64,
    /// Base seed; OS entropy is used when absent.
    pub seed: Option<u64>,
}

impl SynthConfig {
    pub fn params(&self) -> SynthParams {
        SynthParams {
            n_points: self.n_points,
            x_step: self.x_step,
            alpha: self.alpha,
            beta: self.beta,
            noise_std_dev: self.noise_std_dev,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Moving average window.
    pub window: usize,
    /// Inclusive start of the analyzed range; unbounded when absent.
    pub from: Option<f64>,
    /// Exclusive end of the analyzed range; unbounded when absent.
    pub to: Option<f64>,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let synth = &self.synth;
        check_num(synth.n_points, 1..1_000_000).context("invalid number of points")?;
        check_num(synth.x_step, (Bound::Excluded(0.0), Bound::Included(f64::MAX)))
            .context("invalid x step")?;
        check_num(synth.alpha, f64::MIN..=f64::MAX).context("invalid intercept")?;
        check_num(synth.beta, f64::MIN..=f64::MAX).context("invalid slope")?;
        check_num(synth.noise_std_dev, 0.0..1e6).context("invalid noise standard deviation")?;

        let analysis = &self.analysis;
        check_num(analysis.window, 1..100_000).context("invalid moving average window")?;
        if let (Some(from), Some(to)) = (analysis.from, analysis.to) {
            if from >= to {
                bail!("range start {from} must be less than range end {to}");
            }
        }

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[synth]
n_points = 128
x_step = 0.5
alpha = 1.0
beta = 2.0
noise_std_dev = 0.1
seed = 3

[analysis]
window = 4
from = 8.0
"#;

    #[test]
    fn parses_valid_config() {
        let cfg = Config::from_toml(VALID).unwrap();
        assert_eq!(cfg.synth.n_points, 128);
        assert_eq!(cfg.synth.seed, Some(3));
        assert_eq!(cfg.analysis.from, Some(8.0));
        assert_eq!(cfg.analysis.to, None);
        assert_eq!(cfg.synth.params().x_step, 0.5);
    }

    #[test]
    fn rejects_invalid_values() {
        let zero_step = VALID.replace("x_step = 0.5", "x_step = 0.0");
        assert!(Config::from_toml(&zero_step).is_err());

        let zero_window = VALID.replace("window = 4", "window = 0");
        assert!(Config::from_toml(&zero_window).is_err());

        let inverted = VALID.replace("from = 8.0", "from = 8.0\nto = 2.0");
        assert!(Config::from_toml(&inverted).is_err());

        let missing = VALID.replace("n_points = 128\n", "");
        assert!(Config::from_toml(&missing).is_err());
    }
}
