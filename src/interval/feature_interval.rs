use std::fmt;

use super::{ChromosomeInterval, InvalidIntervalError, OpenInterval};
use crate::feature::Feature;

/// A 0-based, half-open interval relative to the start of a feature.
///
/// Relative coordinates always count from the feature's leftmost base, regardless of strand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeatureInterval<'a> {
    feature: &'a Feature,
    relative_start: i64,
    relative_end: i64,
}

impl<'a> FeatureInterval<'a> {
    /// Creates a feature interval, clipped to the bounds of the feature.
    pub fn new(
        feature: &'a Feature,
        relative_start: i64,
        relative_end: i64,
    ) -> Result<Self, InvalidIntervalError> {
        let interval = OpenInterval::new(relative_start, relative_end)?;
        let bounds = OpenInterval::new_unchecked(0, feature.len());

        let clipped = interval
            .overlap(&bounds)
            .unwrap_or_else(|| OpenInterval::new_unchecked(0, 0));

        Ok(Self::new_unchecked(feature, clipped.start(), clipped.end()))
    }

    /// Creates an interval covering the entire feature.
    pub fn whole(feature: &'a Feature) -> Self {
        Self::new_unchecked(feature, 0, feature.len())
    }

    pub(crate) fn new_unchecked(feature: &'a Feature, relative_start: i64, relative_end: i64) -> Self {
        debug_assert!(relative_start <= relative_end);

        Self {
            feature,
            relative_start,
            relative_end,
        }
    }

    pub fn feature(&self) -> &'a Feature {
        self.feature
    }

    pub fn name(&self) -> &'a str {
        self.feature.name()
    }

    pub fn relative_start(&self) -> i64 {
        self.relative_start
    }

    pub fn relative_end(&self) -> i64 {
        self.relative_end
    }

    pub fn len(&self) -> i64 {
        self.relative_end - self.relative_start
    }

    pub fn is_empty(&self) -> bool {
        self.relative_start == self.relative_end
    }

    /// Returns the genomic locus this interval covers.
    pub fn genome_coordinates(&self) -> ChromosomeInterval {
        let locus = self.feature.locus();
        let start = locus.start() + self.relative_start;
        let end = locus.start() + self.relative_end;
        ChromosomeInterval::from_interval(locus.chr(), OpenInterval::new_unchecked(start, end))
    }

    /// Intersects this interval with a genomic locus.
    ///
    /// The result is relative to the same feature. Returns `None` if the two do not share a
    /// chromosome or any bases.
    pub fn overlap(&self, interval: &ChromosomeInterval) -> Option<Self> {
        let overlap = self.genome_coordinates().overlap(interval)?;
        let feature_start = self.feature.locus().start();

        Some(Self::new_unchecked(
            self.feature,
            overlap.start() - feature_start,
            overlap.end() - feature_start,
        ))
    }
}

impl fmt::Display for FeatureInterval<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.name(),
            self.relative_start,
            self.relative_end
        )
    }
}
