//! Error types for awis.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::ResponseGroupParseError;

/// Result type alias for awis operations.
pub type Result<T> = std::result::Result<T, AwisError>;

/// Errors that can occur while building, sending and parsing requests.
#[derive(Error, Debug)]
pub enum AwisError {
    /// A response group outside the valid set was supplied.
    #[error(transparent)]
    InvalidResponseGroup(#[from] ResponseGroupParseError),

    /// The requested traffic history span is invalid.
    #[error(transparent)]
    InvalidSearchRange(#[from] SearchRangeError),

    /// A request failed at the network or HTTP level.
    #[error("Transport error in request {index}: {message}")]
    Transport {
        /// Position of the failed request within its batch.
        index: usize,
        /// Description of the failure.
        message: String,
    },

    /// A response payload did not have the expected shape.
    #[error("Parse error in response {index}: {message}")]
    Parse {
        /// Position of the offending response within its batch.
        index: usize,
        /// Description of the failure.
        message: String,
    },

    /// A request was still in flight when its batch deadline passed.
    #[error("Batch deadline of {0:?} exceeded")]
    Deadline(Duration),

    /// The configured service endpoint is not a usable URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Error for invalid traffic history spans.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchRangeError {
    /// The span must cover at least one day.
    #[error("search range must be at least 1 day (got {0}); use search_reverse to search backwards")]
    TooShort(u32),

    /// The span reaches today or a future date, for which there is no data.
    #[error("search window {start} to {end} reaches past today ({today})")]
    PastToday {
        /// First day of the computed window.
        start: NaiveDate,
        /// Last day of the computed window (inclusive).
        end: NaiveDate,
        /// The reference date the window was checked against.
        today: NaiveDate,
    },

    /// The start date lies outside the representable calendar.
    #[error("search window starting {0} is out of range")]
    OutOfRange(NaiveDate),
}
