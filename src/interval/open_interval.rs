use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 0-based, half-open interval `[start, end)`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "RawOpenInterval")]
pub struct OpenInterval {
    start: i64,
    end: i64,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid interval: [{start}, {end})")]
pub struct InvalidIntervalError {
    pub start: i64,
    pub end: i64,
}

impl OpenInterval {
    /// Creates an interval `[start, end)`.
    ///
    /// Fails if `end` is before `start` or the length does not fit in an `i64`.
    pub fn new(start: i64, end: i64) -> Result<Self, InvalidIntervalError> {
        if end < start || end.checked_sub(start).is_none() {
            Err(InvalidIntervalError { start, end })
        } else {
            Ok(Self { start, end })
        }
    }

    pub(crate) fn new_unchecked(start: i64, end: i64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the intersection of the two intervals, or `None` if they share no bases.
    pub fn overlap(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);

        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

impl fmt::Display for OpenInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[derive(Deserialize)]
struct RawOpenInterval {
    start: i64,
    end: i64,
}

impl TryFrom<RawOpenInterval> for OpenInterval {
    type Error = InvalidIntervalError;

    fn try_from(raw: RawOpenInterval) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}
