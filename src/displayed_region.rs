//! The view window over a navigation context.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    interval::{ChromosomeInterval, FeatureInterval, OpenInterval},
    navigation_context::{NavigationContext, ParseError},
};

const MIN_ABSOLUTE_BASE: i64 = 0;
const MIN_WIDTH: i64 = 1;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("region bounds must be finite")]
    NonFinite,
    #[error("region end ({end}) is before its start ({start})")]
    EndBeforeStart { start: f64, end: f64 },
    #[error("invalid zoom factor: {0}")]
    InvalidZoomFactor(f64),
}

/// A view region, stored as absolute bases, in a navigation context.
///
/// The region is always inside the context and at least one base wide. Every mutator either
/// applies in full or leaves the region as it was.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayedRegionModel {
    context: Arc<NavigationContext>,
    start: i64,
    end: i64,
}

impl DisplayedRegionModel {
    /// Creates a model that views the entire context.
    pub fn new(context: Arc<NavigationContext>) -> Self {
        let end = context.total_bases();

        Self {
            context,
            start: MIN_ABSOLUTE_BASE,
            end,
        }
    }

    /// Creates a model with an initial region, clamped to the context.
    pub fn with_region(
        context: Arc<NavigationContext>,
        start: i64,
        end: i64,
    ) -> Result<Self, RangeError> {
        let mut model = Self::new(context);
        model.set_region(start as f64, end as f64)?;
        Ok(model)
    }

    pub fn navigation_context(&self) -> &Arc<NavigationContext> {
        &self.context
    }

    pub fn absolute_region(&self) -> OpenInterval {
        OpenInterval::new_unchecked(self.start, self.end)
    }

    pub fn width(&self) -> i64 {
        self.end - self.start
    }

    pub fn feature_intervals(&self) -> Vec<FeatureInterval<'_>> {
        self.context.features_overlapping(self.start, self.end)
    }

    /// Returns the genomic loci in view, merged so that none overlap.
    pub fn genome_intervals(&self) -> Vec<ChromosomeInterval> {
        self.context.loci_in_interval(self.start, self.end)
    }

    /// Sets the region `[start, end)`, keeping it inside the context.
    ///
    /// A region hanging off either edge is shifted back inside with its width intact. It is only
    /// truncated when it is wider than the whole context.
    pub fn set_region(&mut self, start: f64, end: f64) -> Result<(), RangeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RangeError::NonFinite);
        }

        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }

        let (start, end) = self.clamp(start, end);
        self.start = start;
        self.end = end;

        Ok(())
    }

    /// Parses and sets a region string, e.g., `chr7:27144350-27167097`.
    pub fn set_region_string(&mut self, s: &str) -> Result<(), ParseError> {
        let interval = self.context.parse_region_string(s)?;
        let (start, end) = self.clamp(interval.start() as f64, interval.end() as f64);
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Moves the region by a number of bases.
    ///
    /// Positive values move toward the end of the context.
    pub fn pan(&mut self, delta: i64) {
        let width = self.width();
        let max_start = self.context.total_bases() - width;

        self.start = self
            .start
            .saturating_add(delta)
            .clamp(MIN_ABSOLUTE_BASE, max_start);
        self.end = self.start + width;
    }

    /// Multiplies the width of the region by `factor`.
    ///
    /// `focal_point` is the fraction of the width, from the left edge, that stays fixed; `0.5`
    /// zooms around the center. Rounding to whole bases means a zoom followed by its inverse may
    /// move the region by a base or so.
    pub fn zoom(&mut self, factor: f64, focal_point: f64) -> Result<(), RangeError> {
        // This also rejects NaN.
        if !(factor > 0.0) {
            return Err(RangeError::InvalidZoomFactor(factor));
        }

        let width = self.width() as f64;
        let start = self.start as f64;

        let new_width = width * factor;
        let absolute_focal_point = width * focal_point + start;
        let new_absolute_focal_point = new_width * focal_point + start;
        let pan = absolute_focal_point - new_absolute_focal_point;

        let raw_start = start + pan;
        let raw_end = start + new_width + pan;

        self.set_region(raw_start, raw_end)
    }

    fn clamp(&self, mut start: f64, mut end: f64) -> (i64, i64) {
        let total_bases = self.context.total_bases();
        let max = total_bases as f64;
        let min = MIN_ABSOLUTE_BASE as f64;
        let len = end - start;

        if start < min {
            end = min + len;
        } else if end > max {
            start = max - len;
        }

        let mut start = start.max(min).round() as i64;
        let mut end = end.min(max).round() as i64;

        if end - start < MIN_WIDTH {
            end = start + MIN_WIDTH;

            if end > total_bases {
                end = total_bases;
                start = total_bases - MIN_WIDTH;
            }
        }

        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        feature::{Feature, Strand},
        navigation_context::ContextError,
    };

    fn build_context() -> Result<Arc<NavigationContext>, ContextError> {
        let features = ["chr1", "chr2", "chr3"]
            .into_iter()
            .map(|name| {
                let locus = ChromosomeInterval::from_interval(name, OpenInterval::new_unchecked(0, 10));
                Feature::new(name, locus, Strand::Forward)
            })
            .collect();

        NavigationContext::new("sq", features).map(Arc::new)
    }

    fn region(model: &DisplayedRegionModel) -> (i64, i64) {
        let interval = model.absolute_region();
        (interval.start(), interval.end())
    }

    #[test]
    fn test_new() -> Result<(), ContextError> {
        let model = DisplayedRegionModel::new(build_context()?);
        assert_eq!(region(&model), (0, 30));
        assert_eq!(model.width(), 30);
        Ok(())
    }

    #[test]
    fn test_with_region() -> Result<(), Box<dyn std::error::Error>> {
        let model = DisplayedRegionModel::with_region(build_context()?, 25, 35)?;
        assert_eq!(region(&model), (20, 30));

        assert_eq!(
            DisplayedRegionModel::with_region(build_context()?, 10, 5),
            Err(RangeError::EndBeforeStart {
                start: 10.0,
                end: 5.0
            })
        );

        Ok(())
    }

    #[test]
    fn test_set_region() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);

        model.set_region(-5.0, 10.0)?;
        assert_eq!(region(&model), (0, 15));

        model.set_region(25.0, 35.0)?;
        assert_eq!(region(&model), (20, 30));

        model.set_region(-10.0, 50.0)?;
        assert_eq!(region(&model), (0, 30));

        model.set_region(2.4, 7.6)?;
        assert_eq!(region(&model), (2, 8));

        model.set_region(5.0, 5.0)?;
        assert_eq!(region(&model), (5, 6));

        model.set_region(30.0, 30.0)?;
        assert_eq!(region(&model), (29, 30));

        Ok(())
    }

    #[test]
    fn test_set_region_with_invalid_bounds() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);
        model.set_region(10.0, 20.0)?;

        assert_eq!(
            model.set_region(20.0, 10.0),
            Err(RangeError::EndBeforeStart {
                start: 20.0,
                end: 10.0
            })
        );
        assert_eq!(model.set_region(f64::NAN, 10.0), Err(RangeError::NonFinite));
        assert_eq!(
            model.set_region(0.0, f64::INFINITY),
            Err(RangeError::NonFinite)
        );

        assert_eq!(region(&model), (10, 20));

        Ok(())
    }

    #[test]
    fn test_set_region_string() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);

        model.set_region_string("chr2:1-5")?;
        assert_eq!(region(&model), (10, 15));

        assert!(model.set_region_string("chr4:1-5").is_err());
        assert!(model.set_region_string("chr2:5-1").is_err());
        assert_eq!(region(&model), (10, 15));

        Ok(())
    }

    #[test]
    fn test_pan() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);
        model.set_region(10.0, 20.0)?;

        model.pan(5);
        assert_eq!(region(&model), (15, 25));

        model.pan(15);
        assert_eq!(region(&model), (20, 30));

        model.pan(-100);
        assert_eq!(region(&model), (0, 10));

        model.pan(i64::MAX);
        assert_eq!(region(&model), (20, 30));

        model.pan(i64::MIN);
        assert_eq!(region(&model), (0, 10));

        model.set_region(10.0, 20.0)?;
        model.pan(1 << 60);
        assert_eq!(region(&model), (20, 30));

        model.pan(-(1 << 60));
        assert_eq!(region(&model), (0, 10));

        Ok(())
    }

    #[test]
    fn test_zoom() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);
        model.set_region(10.0, 20.0)?;

        model.zoom(2.0, 0.5)?;
        assert_eq!(region(&model), (5, 25));

        model.zoom(0.5, 0.5)?;
        assert_eq!(region(&model), (10, 20));

        model.zoom(2.0, 0.0)?;
        assert_eq!(region(&model), (10, 30));

        model.zoom(10.0, 0.5)?;
        assert_eq!(region(&model), (0, 30));

        Ok(())
    }

    #[test]
    fn test_zoom_keeps_minimum_width() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);
        model.set_region(10.0, 20.0)?;

        model.zoom(0.001, 0.0)?;
        assert!(model.width() >= 1);

        model.set_region(20.0, 30.0)?;
        model.zoom(0.001, 1.0)?;
        assert!(model.width() >= 1);
        assert!(model.absolute_region().end() <= 30);

        Ok(())
    }

    #[test]
    fn test_zoom_round_trip_is_approximate() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);
        model.set_region(7.0, 18.0)?;

        model.zoom(1.5, 0.5)?;
        model.zoom(1.0 / 1.5, 0.5)?;

        let (start, end) = region(&model);
        assert!((start - 7).abs() <= 1);
        assert!((end - 18).abs() <= 1);

        Ok(())
    }

    #[test]
    fn test_zoom_with_invalid_factor() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);
        model.set_region(10.0, 20.0)?;

        assert_eq!(
            model.zoom(0.0, 0.5),
            Err(RangeError::InvalidZoomFactor(0.0))
        );
        assert_eq!(
            model.zoom(-2.0, 0.5),
            Err(RangeError::InvalidZoomFactor(-2.0))
        );
        assert!(model.zoom(f64::NAN, 0.5).is_err());
        assert_eq!(model.zoom(2.0, f64::NAN), Err(RangeError::NonFinite));

        assert_eq!(region(&model), (10, 20));

        Ok(())
    }

    #[test]
    fn test_feature_intervals() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = DisplayedRegionModel::new(build_context()?);
        model.set_region(8.0, 12.0)?;

        let intervals: Vec<_> = model
            .feature_intervals()
            .iter()
            .map(|interval| interval.to_string())
            .collect();

        assert_eq!(intervals, ["chr1:8-10", "chr2:0-2"]);

        assert_eq!(
            model.genome_intervals(),
            [
                ChromosomeInterval::new("chr1", 8, 10)?,
                ChromosomeInterval::new("chr2", 0, 2)?,
            ]
        );

        Ok(())
    }
}
