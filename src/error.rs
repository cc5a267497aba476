//! Error types.

use thiserror::Error;

/// Errors returned by series operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Parallel sequences (x, y or weights) differ in length.
    #[error("length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The operation requires at least one element.
    #[error("series is empty")]
    EmptySeries,

    /// An index or slice bound lies outside the valid range.
    #[error("index {index} out of range for series of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Moving-average window of zero.
    #[error("moving average window must be at least 1")]
    InvalidWindow,

    /// A generation parameter is negative, NaN or infinite.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
