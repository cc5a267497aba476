//! Ordered numeric time series.
//!
//! A [`Timeseries`] pairs x-values (time or index) with y-values and supports
//! range queries, differencing, moving averages and least-squares regression.
//! Sub-ranges are returned as borrowed [`TimeseriesView`]s sharing the
//! parent's storage.
//!
//! ```
//! use timeseries::Timeseries;
//!
//! let ts = Timeseries::new(vec![1.0, 2.0, 3.0], vec![100.0, 50.0, 100.0])?;
//! let window = ts.between(1.0, 3.0)?;
//! assert_eq!(window.ys, &[100.0, 50.0]);
//! # Ok::<(), timeseries::Error>(())
//! ```

pub mod error;
pub mod range;
pub mod series;
pub mod stats;
pub mod synth;
pub mod transform;

pub use error::{Error, Result};
pub use series::{Point, Timeseries, TimeseriesView};
pub use stats::{Regression, mean_squared_error};
