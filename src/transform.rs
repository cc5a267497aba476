//! Series transforms producing new owned series.

use crate::error::{Error, Result};
use crate::series::{Timeseries, TimeseriesView};

impl TimeseriesView<'_> {
    /// First differences.
    ///
    /// Point `i` of the result is `(x_{i+1}, y_{i+1} - y_i)`, so a series of
    /// length `n` yields `n - 1` points. Fewer than two points yield an empty
    /// series.
    pub fn difference(&self) -> Result<Timeseries> {
        let len = self.len()?;
        if len < 2 {
            return Ok(Timeseries::default());
        }

        let xs = self.xs[1..].to_vec();
        let ys = self.ys.windows(2).map(|pair| pair[1] - pair[0]).collect();
        Ok(Timeseries { xs, ys })
    }

    /// Trailing moving average over `window` points.
    ///
    /// Point `i` of the result is `x_{i+window-1}` paired with the mean of
    /// `y_i..=y_{i+window-1}`, giving `n - window + 1` points. Each window is
    /// summed on its own so the outputs do not accumulate rounding drift and a
    /// window of one reproduces the input exactly. A window longer than the
    /// series yields an empty series.
    ///
    /// # Errors
    /// [`Error::InvalidWindow`] if `window` is zero.
    pub fn moving_average(&self, window: usize) -> Result<Timeseries> {
        let len = self.len()?;
        if window == 0 {
            return Err(Error::InvalidWindow);
        }
        if window > len {
            log::debug!("window {window} exceeds series length {len}");
            return Ok(Timeseries::default());
        }

        let xs = self.xs[window - 1..].to_vec();
        let ys = self
            .ys
            .windows(window)
            .map(|win| win.iter().sum::<f64>() / window as f64)
            .collect();
        Ok(Timeseries { xs, ys })
    }
}

impl Timeseries {
    pub fn difference(&self) -> Result<Timeseries> {
        self.view().difference()
    }

    pub fn moving_average(&self, window: usize) -> Result<Timeseries> {
        self.view().moving_average(window)
    }
}
