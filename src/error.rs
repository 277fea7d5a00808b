use crate::Timestamp;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the batch engine and the input converters.
///
/// An input too short for the longest window is not an error: the engine
/// returns an empty [`IchimokuSeries`](crate::IchimokuSeries) instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input series cannot be processed as given. Retrying with the same
    /// input fails the same way.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// Reason an input series was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    /// The series has no rows.
    #[error("series is empty")]
    Empty,

    /// A raw row ends before a required column.
    #[error("row {row} is missing the `{field}` column")]
    MissingField { row: usize, field: &'static str },

    /// A raw row carries a timestamp that is not a non-negative integer.
    #[error("row {row} has an invalid timestamp {value}")]
    InvalidTimestamp { row: usize, value: f64 },

    /// Bars are not strictly ascending by `open_time`.
    #[error(
        "bar at position {position} is out of order: open_time {current} follows {previous}"
    )]
    NotAscending {
        position: usize,
        previous: Timestamp,
        current: Timestamp,
    },
}
