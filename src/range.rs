//! Range queries over sorted series.
//!
//! Every query assumes non-decreasing x-values and returns a view into the
//! source without copying. Results on unsorted input are meaningless but
//! never panic.

use crate::error::Result;
use crate::series::{Timeseries, TimeseriesView};

impl<'a> TimeseriesView<'a> {
    /// Index of the first point with `x_i >= x`, or `len` if there is none.
    pub fn find_pivot(&self, x: f64) -> Result<usize> {
        self.len()?;
        Ok(self.xs.partition_point(|&x_i| x_i < x))
    }

    /// Points with `x_i >= x`.
    pub fn after(&self, x: f64) -> Result<TimeseriesView<'a>> {
        let len = self.len()?;
        let i_pivot = self.find_pivot(x)?;
        self.slice(i_pivot, len)
    }

    /// Points with `x_i < x`.
    pub fn before(&self, x: f64) -> Result<TimeseriesView<'a>> {
        let i_pivot = self.find_pivot(x)?;
        self.slice(0, i_pivot)
    }

    /// Points in the half-open range `[from, to)`.
    pub fn between(&self, from: f64, to: f64) -> Result<TimeseriesView<'a>> {
        self.after(from)?.before(to)
    }
}

impl Timeseries {
    pub fn find_pivot(&self, x: f64) -> Result<usize> {
        self.view().find_pivot(x)
    }

    pub fn after(&self, x: f64) -> Result<TimeseriesView<'_>> {
        self.view().after(x)
    }

    pub fn before(&self, x: f64) -> Result<TimeseriesView<'_>> {
        self.view().before(x)
    }

    pub fn between(&self, from: f64, to: f64) -> Result<TimeseriesView<'_>> {
        self.view().between(from, to)
    }
}
