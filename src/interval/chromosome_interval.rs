use std::{fmt, num, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{InvalidIntervalError, OpenInterval};

/// A 0-based, half-open interval on a named chromosome.
///
/// Intervals on different chromosomes never overlap.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "RawChromosomeInterval", try_from = "RawChromosomeInterval")]
pub struct ChromosomeInterval {
    chr: String,
    interval: OpenInterval,
}

impl ChromosomeInterval {
    pub fn new<N>(chr: N, start: i64, end: i64) -> Result<Self, InvalidIntervalError>
    where
        N: Into<String>,
    {
        OpenInterval::new(start, end).map(|interval| Self {
            chr: chr.into(),
            interval,
        })
    }

    pub(crate) fn from_interval<N>(chr: N, interval: OpenInterval) -> Self
    where
        N: Into<String>,
    {
        Self {
            chr: chr.into(),
            interval,
        }
    }

    pub fn chr(&self) -> &str {
        &self.chr
    }

    pub fn start(&self) -> i64 {
        self.interval.start()
    }

    pub fn end(&self) -> i64 {
        self.interval.end()
    }

    pub fn len(&self) -> i64 {
        self.interval.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interval.is_empty()
    }

    pub fn as_open_interval(&self) -> OpenInterval {
        self.interval
    }

    pub fn overlap(&self, other: &Self) -> Option<Self> {
        if self.chr != other.chr {
            return None;
        }

        self.interval
            .overlap(&other.interval)
            .map(|interval| Self::from_interval(self.chr.clone(), interval))
    }

    /// Merges overlapping and abutting intervals on each chromosome.
    ///
    /// Chromosomes are emitted in order of first appearance; intervals within a chromosome are
    /// sorted by start.
    pub fn merge_overlaps(intervals: &[Self]) -> Vec<Self> {
        let mut chrs: Vec<&str> = Vec::new();

        for interval in intervals {
            if !chrs.contains(&interval.chr()) {
                chrs.push(interval.chr());
            }
        }

        let mut merged_intervals = Vec::with_capacity(intervals.len());

        for chr in chrs {
            let mut group: Vec<_> = intervals.iter().filter(|i| i.chr() == chr).collect();
            group.sort_by_key(|i| i.start());

            let mut merged: Vec<Self> = Vec::with_capacity(group.len());

            for b in group {
                if let Some(a) = merged.last_mut() {
                    if b.start() <= a.end() {
                        if a.end() < b.end() {
                            a.interval = OpenInterval::new_unchecked(a.start(), b.end());
                        }

                        continue;
                    }
                }

                merged.push(b.clone());
            }

            merged_intervals.extend(merged);
        }

        merged_intervals
    }
}

impl fmt::Display for ChromosomeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start(), self.end())
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseChromosomeIntervalError {
    #[error("missing chromosome delimiter")]
    MissingChromosomeDelimiter,
    #[error("missing range delimiter")]
    MissingRangeDelimiter,
    #[error("invalid position")]
    InvalidPosition(#[source] num::ParseIntError),
    #[error("invalid interval")]
    InvalidInterval(#[source] InvalidIntervalError),
}

impl FromStr for ChromosomeInterval {
    type Err = ParseChromosomeIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const CHROMOSOME_DELIMITER: char = ':';
        const RANGE_DELIMITER: char = '-';

        let (chr, range) = s
            .rsplit_once(CHROMOSOME_DELIMITER)
            .ok_or(ParseChromosomeIntervalError::MissingChromosomeDelimiter)?;

        let (raw_start, raw_end) = range
            .split_once(RANGE_DELIMITER)
            .ok_or(ParseChromosomeIntervalError::MissingRangeDelimiter)?;

        let start = raw_start
            .parse()
            .map_err(ParseChromosomeIntervalError::InvalidPosition)?;
        let end = raw_end
            .parse()
            .map_err(ParseChromosomeIntervalError::InvalidPosition)?;

        Self::new(chr, start, end).map_err(ParseChromosomeIntervalError::InvalidInterval)
    }
}

#[derive(Clone, Deserialize, Serialize)]
struct RawChromosomeInterval {
    chr: String,
    start: i64,
    end: i64,
}

impl From<ChromosomeInterval> for RawChromosomeInterval {
    fn from(interval: ChromosomeInterval) -> Self {
        Self {
            start: interval.start(),
            end: interval.end(),
            chr: interval.chr,
        }
    }
}

impl TryFrom<RawChromosomeInterval> for ChromosomeInterval {
    type Error = InvalidIntervalError;

    fn try_from(raw: RawChromosomeInterval) -> Result<Self, Self::Error> {
        Self::new(raw.chr, raw.start, raw.end)
    }
}
