use crate::config::AnalysisConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use timeseries::{
    Error, Regression, Timeseries,
    stats::{Accumulator, AccumulatorReport},
};

/// Summary of one series over the configured range.
#[derive(Debug, Serialize)]
pub struct Report {
    pub n_points: usize,
    pub n_in_range: usize,
    pub from: f64,
    pub to: f64,
    pub values: AccumulatorReport,
    pub increments: AccumulatorReport,
    pub regression: Option<Regression>,
    pub moving_average: Timeseries,
}

pub fn analyze(mut series: Timeseries, cfg: &AnalysisConfig) -> Result<Report> {
    series.sort().context("failed to sort series")?;
    let n_points = series.len()?;

    let from = cfg.from.unwrap_or(f64::NEG_INFINITY);
    let to = cfg.to.unwrap_or(f64::INFINITY);
    let in_range = series
        .between(from, to)
        .context("failed to select range")?;
    let n_in_range = in_range.len()?;

    let mut values = Accumulator::new();
    in_range.ys.iter().for_each(|&y| values.add(y));

    let diff = in_range
        .difference()
        .context("failed to difference series")?;
    let mut increments = Accumulator::new();
    diff.ys.iter().for_each(|&dy| increments.add(dy));

    let moving_average = in_range
        .moving_average(cfg.window)
        .context("failed to compute moving average")?;

    let regression = match in_range.simple_linear_regression() {
        Ok(regression) => Some(regression),
        Err(Error::EmptySeries) => {
            log::warn!("no points in [{from}, {to}), skipping regression");
            None
        }
        Err(error) => return Err(error).context("failed to fit regression"),
    };

    Ok(Report {
        n_points,
        n_in_range,
        from,
        to,
        values: values.report(),
        increments: increments.report(),
        regression,
        moving_average,
    })
}
