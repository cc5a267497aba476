//! Series data types.
//!
//! A [`Timeseries`] owns two parallel sequences of x-values and y-values.
//! A [`TimeseriesView`] borrows a contiguous range of them: slicing and range
//! queries never copy, and the borrow keeps the parent from being mutated
//! while the view is alive. Use [`TimeseriesView::to_series`] to get an owned,
//! independent copy.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single `(x, y)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Owned series stored as parallel arrays.
///
/// `xs` and `ys` must always have the same length. Every operation checks
/// this and returns [`Error::LengthMismatch`] instead of truncating.
/// Range queries additionally require `xs` to be non-decreasing, which is
/// not checked: call [`Timeseries::sort`] after out-of-order appends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeseries {
    /// Sample positions (time or index).
    pub xs: Vec<f64>,
    /// Sample values.
    pub ys: Vec<f64>,
}

/// Borrowed, read-only range of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeseriesView<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
}

pub(crate) fn check_len(xs: &[f64], ys: &[f64]) -> Result<usize> {
    if xs.len() != ys.len() {
        return Err(Error::LengthMismatch {
            expected: xs.len(),
            actual: ys.len(),
        });
    }
    Ok(xs.len())
}

impl<'a> TimeseriesView<'a> {
    /// Empty view.
    pub fn empty() -> Self {
        Self { xs: &[], ys: &[] }
    }

    /// Number of points.
    pub fn len(&self) -> Result<usize> {
        check_len(self.xs, self.ys)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Exact pairwise comparison, no tolerance.
    pub fn equal<'b>(&self, other: impl Into<TimeseriesView<'b>>) -> Result<bool> {
        let other = other.into();
        let len = self.len()?;
        let other_len = other.len()?;
        if len != other_len {
            return Ok(false);
        }
        Ok(self.xs == other.xs && self.ys == other.ys)
    }

    /// Sub-view over the index range `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeseriesView<'a>> {
        let len = self.len()?;
        if end > len {
            return Err(Error::IndexOutOfRange { index: end, len });
        }
        if start > end {
            return Err(Error::IndexOutOfRange { index: start, len });
        }
        Ok(TimeseriesView {
            xs: &self.xs[start..end],
            ys: &self.ys[start..end],
        })
    }

    /// Point at `index`.
    ///
    /// # Errors
    /// [`Error::EmptySeries`] if there are no points,
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<Point> {
        let len = self.len()?;
        if len == 0 {
            return Err(Error::EmptySeries);
        }
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(Point::new(self.xs[index], self.ys[index]))
    }

    pub fn first(&self) -> Result<Point> {
        self.at(0)
    }

    pub fn last(&self) -> Result<Point> {
        let len = self.len()?;
        let index = len.checked_sub(1).ok_or(Error::EmptySeries)?;
        self.at(index)
    }

    /// Iterate over the points in order.
    pub fn points(self) -> Result<impl Iterator<Item = Point> + 'a> {
        self.len()?;
        Ok(self.xs.iter().zip(self.ys).map(|(&x, &y)| Point::new(x, y)))
    }

    /// Copy the viewed points into an owned series.
    pub fn to_series(&self) -> Result<Timeseries> {
        self.len()?;
        Ok(Timeseries {
            xs: self.xs.to_vec(),
            ys: self.ys.to_vec(),
        })
    }
}

impl<'a> From<&'a Timeseries> for TimeseriesView<'a> {
    fn from(series: &'a Timeseries) -> Self {
        series.view()
    }
}

impl Timeseries {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        check_len(&xs, &ys)?;
        Ok(Self { xs, ys })
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    /// Build a series from record-style points.
    pub fn from_points(points: &[Point]) -> Self {
        points.iter().copied().collect()
    }

    /// Borrow the whole series as a view.
    pub fn view(&self) -> TimeseriesView<'_> {
        TimeseriesView {
            xs: &self.xs,
            ys: &self.ys,
        }
    }

    pub fn len(&self) -> Result<usize> {
        self.view().len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.view().is_empty()
    }

    pub fn equal<'b>(&self, other: impl Into<TimeseriesView<'b>>) -> Result<bool> {
        self.view().equal(other)
    }

    pub fn slice(&self, start: usize, end: usize) -> Result<TimeseriesView<'_>> {
        self.view().slice(start, end)
    }

    pub fn at(&self, index: usize) -> Result<Point> {
        self.view().at(index)
    }

    pub fn first(&self) -> Result<Point> {
        self.view().first()
    }

    pub fn last(&self) -> Result<Point> {
        self.view().last()
    }

    pub fn points(&self) -> Result<impl Iterator<Item = Point> + '_> {
        self.view().points()
    }

    pub fn to_points(&self) -> Result<Vec<Point>> {
        Ok(self.points()?.collect())
    }

    /// Append `y` at `x` to the end of the series.
    ///
    /// Does not re-sort: call [`Timeseries::sort`] if `x` is smaller than the
    /// last x-value and range queries are needed.
    pub fn append(&mut self, x: f64, y: f64) {
        self.xs.push(x);
        self.ys.push(y);
    }

    pub fn append_point(&mut self, point: Point) {
        self.append(point.x, point.y);
    }

    /// Sort the points by x-value in place.
    ///
    /// The sort is stable, so points with equal x-values keep their insertion
    /// order. x-values are ordered with [`f64::total_cmp`].
    pub fn sort(&mut self) -> Result<()> {
        let len = self.len()?;

        let mut points: Vec<_> = self.points()?.collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        for (i_pt, pt) in points.into_iter().enumerate() {
            self.xs[i_pt] = pt.x;
            self.ys[i_pt] = pt.y;
        }

        log::trace!("sorted {len} points");
        Ok(())
    }
}

impl FromIterator<Point> for Timeseries {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut series = Timeseries::default();
        series.extend(iter);
        series
    }
}

impl Extend<Point> for Timeseries {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for pt in iter {
            self.append_point(pt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timeseries {
        Timeseries {
            xs: vec![1.0, 2.0, 3.0],
            ys: vec![100.0, 50.0, 100.0],
        }
    }

    fn broken() -> Timeseries {
        Timeseries {
            xs: vec![1.0, 2.0, 3.0],
            ys: vec![100.0, 50.0],
        }
    }

    #[test]
    fn append() {
        let expected = Timeseries {
            xs: vec![1.0, 2.0],
            ys: vec![123.4, 456.7],
        };

        let mut actual = Timeseries::default();
        actual.append(expected.xs[0], expected.ys[0]);
        actual.append(expected.xs[1], expected.ys[1]);

        assert!(actual.equal(&expected).unwrap());
    }

    #[test]
    fn length_mismatch_is_reported() {
        let ts = broken();
        let mismatch = Error::LengthMismatch {
            expected: 3,
            actual: 2,
        };

        assert_eq!(ts.len(), Err(mismatch.clone()));
        assert_eq!(ts.equal(&sample()), Err(mismatch.clone()));
        assert_eq!(sample().equal(&ts), Err(mismatch.clone()));
        assert_eq!(ts.first(), Err(mismatch));
        assert!(ts.clone().sort().is_err());
        assert!(Timeseries::new(vec![1.0], vec![]).is_err());
    }

    #[test]
    fn equality() {
        let ts = sample();
        assert!(ts.equal(&ts).unwrap());
        assert!(!ts.equal(ts.slice(0, 2).unwrap()).unwrap());
        assert!(!ts.slice(0, 2).unwrap().equal(&ts).unwrap());

        let mut other = sample();
        other.ys[1] = 50.5;
        assert!(!ts.equal(&other).unwrap());

        let mut nan = sample();
        nan.ys[0] = f64::NAN;
        assert!(!nan.equal(&nan).unwrap());
    }

    #[test]
    fn equal_after_sort() {
        let mut a = Timeseries::default();
        a.append(3.0, 30.0);
        a.append(1.0, 10.0);
        a.append(2.0, 20.0);

        let mut b = Timeseries::default();
        b.append(2.0, 20.0);
        b.append(3.0, 30.0);
        b.append(1.0, 10.0);

        assert!(!a.equal(&b).unwrap());
        a.sort().unwrap();
        b.sort().unwrap();
        assert!(a.equal(&b).unwrap());
        assert_eq!(a.xs, vec![1.0, 2.0, 3.0]);
        assert_eq!(a.ys, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn sort_keeps_pairs_and_is_stable() {
        let mut ts = Timeseries::default();
        ts.append(2.0, 1.0);
        ts.append(1.0, 2.0);
        ts.append(2.0, 3.0);
        ts.append(0.0, 4.0);
        ts.sort().unwrap();

        assert_eq!(ts.xs, vec![0.0, 1.0, 2.0, 2.0]);
        assert_eq!(ts.ys, vec![4.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn slice() {
        let ts = sample();
        let view = ts.slice(1, 3).unwrap();
        assert_eq!(view.xs, &[2.0, 3.0]);
        assert_eq!(view.ys, &[50.0, 100.0]);

        assert!(ts.slice(3, 3).unwrap().is_empty().unwrap());
        assert_eq!(
            ts.slice(0, 4),
            Err(Error::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_eq!(
            ts.slice(2, 1),
            Err(Error::IndexOutOfRange { index: 2, len: 3 })
        );
    }

    #[test]
    fn view_copy_is_independent() {
        let ts = sample();
        let mut copy = ts.slice(0, 2).unwrap().to_series().unwrap();
        copy.append(10.0, 10.0);
        copy.ys[0] = -1.0;

        assert_eq!(copy.len(), Ok(3));
        assert_eq!(ts.len(), Ok(3));
        assert_eq!(ts.ys[0], 100.0);
    }

    #[test]
    fn indexed_access() {
        let ts = sample();
        assert_eq!(ts.first(), Ok(Point::new(1.0, 100.0)));
        assert_eq!(ts.last(), Ok(Point::new(3.0, 100.0)));
        assert_eq!(ts.at(1), Ok(Point::new(2.0, 50.0)));
        assert_eq!(ts.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));

        let empty = Timeseries::default();
        assert_eq!(empty.first(), Err(Error::EmptySeries));
        assert_eq!(empty.last(), Err(Error::EmptySeries));
        assert_eq!(empty.at(0), Err(Error::EmptySeries));
    }

    #[test]
    fn point_conversions() {
        let ts = sample();
        let points = ts.to_points().unwrap();
        assert_eq!(points[1], Point::new(2.0, 50.0));
        assert_eq!(Timeseries::from_points(&points), ts);

        let mut grown: Timeseries = points[..1].iter().copied().collect();
        grown.extend(points[1..].iter().copied());
        assert!(grown.equal(&ts).unwrap());
    }
}
