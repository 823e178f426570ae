//! The concatenated coordinate space of an ordered feature list.
//!
//! A navigation context lays its features end to end, so every base has two addresses:
//!
//!   1. an _absolute_ coordinate, a 0-based offset into the concatenation; and
//!   2. a _feature_ coordinate, a feature name and a 1-based position within that feature.

mod region_string;

use std::collections::HashMap;

use noodles::core::Position;
use thiserror::Error;

use self::region_string::Range;
use crate::{
    feature::Feature,
    interval::{ChromosomeInterval, FeatureInterval, OpenInterval},
};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ContextError {
    #[error("empty feature list")]
    EmptyFeatureList,
    #[error("unnamed feature at index {0}")]
    UnnamedFeature(usize),
    #[error("duplicate feature name: {0}")]
    DuplicateName(String),
    #[error("zero-length feature: {0}")]
    ZeroLengthFeature(String),
    #[error("total length overflows at feature: {0}")]
    TooManyBases(String),
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LookupError {
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
    #[error("base {base} is not in feature {name}")]
    BaseOutOfRange { name: String, base: usize },
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("absolute base {0} is not in the context")]
pub struct OutOfRangeError(pub i64);

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("malformed region: {0:?}")]
    Malformed(String),
    #[error("unknown segment")]
    UnknownSegment(#[source] LookupError),
    #[error("region end ({end}) is before its start ({start})")]
    EndBeforeStart { start: i64, end: i64 },
}

/// A base addressed by feature and 1-based position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeatureCoordinate<'c> {
    feature: &'c Feature,
    position: Position,
}

impl<'c> FeatureCoordinate<'c> {
    pub fn feature(&self) -> &'c Feature {
        self.feature
    }

    pub fn name(&self) -> &'c str {
        self.feature.name()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the single-base genomic locus at this coordinate.
    pub fn genome_coordinates(&self) -> ChromosomeInterval {
        let locus = self.feature.locus();
        // `position` is at most the feature length, which fits in an i64.
        let offset = usize::from(self.position) as i64 - 1;
        let start = locus.start() + offset;
        ChromosomeInterval::from_interval(locus.chr(), OpenInterval::new_unchecked(start, start + 1))
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct NavigationContext {
    name: String,
    features: Vec<Feature>,
    feature_starts: Vec<i64>,
    name_to_index: HashMap<String, usize>,
    chr_to_indices: HashMap<String, Vec<usize>>,
    total_bases: i64,
}

impl NavigationContext {
    pub fn new<N>(name: N, features: Vec<Feature>) -> Result<Self, ContextError>
    where
        N: Into<String>,
    {
        if features.is_empty() {
            return Err(ContextError::EmptyFeatureList);
        }

        let mut feature_starts = Vec::with_capacity(features.len());
        let mut name_to_index = HashMap::with_capacity(features.len());
        let mut chr_to_indices: HashMap<String, Vec<usize>> = HashMap::new();
        let mut total_bases: i64 = 0;

        for (i, feature) in features.iter().enumerate() {
            if feature.name().is_empty() {
                return Err(ContextError::UnnamedFeature(i));
            }

            if feature.len() <= 0 {
                return Err(ContextError::ZeroLengthFeature(feature.name().into()));
            }

            if name_to_index.insert(feature.name().to_string(), i).is_some() {
                return Err(ContextError::DuplicateName(feature.name().into()));
            }

            chr_to_indices
                .entry(feature.locus().chr().into())
                .or_default()
                .push(i);

            feature_starts.push(total_bases);

            total_bases = total_bases
                .checked_add(feature.len())
                .ok_or_else(|| ContextError::TooManyBases(feature.name().into()))?;
        }

        Ok(Self {
            name: name.into(),
            features,
            feature_starts,
            name_to_index,
            chr_to_indices,
            total_bases,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Returns the absolute start of each feature, in context order.
    pub fn feature_starts(&self) -> &[i64] {
        &self.feature_starts
    }

    pub fn total_bases(&self) -> i64 {
        self.total_bases
    }

    pub fn is_valid_absolute_base(&self, base: i64) -> bool {
        (0..self.total_bases).contains(&base)
    }

    pub fn feature_start(&self, name: &str) -> Result<i64, LookupError> {
        self.feature_index(name).map(|i| self.feature_starts[i])
    }

    fn feature_index(&self, name: &str) -> Result<usize, LookupError> {
        self.name_to_index
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::UnknownFeature(name.into()))
    }

    pub fn absolute_to_feature_coordinate(
        &self,
        base: i64,
    ) -> Result<FeatureCoordinate<'_>, OutOfRangeError> {
        if !self.is_valid_absolute_base(base) {
            return Err(OutOfRangeError(base));
        }

        // The first start is always 0, so at least one start is <= base.
        let i = self.feature_starts.partition_point(|&start| start <= base) - 1;

        let position = usize::try_from(base - self.feature_starts[i] + 1)
            .ok()
            .and_then(Position::new)
            .ok_or(OutOfRangeError(base))?;

        Ok(FeatureCoordinate {
            feature: &self.features[i],
            position,
        })
    }

    pub fn feature_coordinate_to_absolute(
        &self,
        name: &str,
        position: Position,
    ) -> Result<i64, LookupError> {
        let i = self.feature_index(name)?;
        let feature = &self.features[i];

        let base_out_of_range = || LookupError::BaseOutOfRange {
            name: name.into(),
            base: usize::from(position),
        };

        let base = i64::try_from(usize::from(position)).map_err(|_| base_out_of_range())?;

        if base > feature.len() {
            return Err(base_out_of_range());
        }

        Ok(self.feature_starts[i] + base - 1)
    }

    fn resolve(&self, name: &str, base: usize) -> Result<i64, LookupError> {
        self.feature_index(name)?;

        let position = Position::new(base).ok_or_else(|| LookupError::BaseOutOfRange {
            name: name.into(),
            base,
        })?;

        self.feature_coordinate_to_absolute(name, position)
    }

    /// Parses a region string into an absolute interval.
    ///
    /// Accepted forms are `NAME:START-END`, `NAME1:START-NAME2:END`, and a bare `NAME` for a
    /// whole feature. Positions are 1-based and closed; the result is 0-based and half-open.
    ///
    /// Feature names may contain `:`. An exact feature name always selects the whole feature.
    /// Otherwise, each way of splitting the string into names and positions is tried, shortest
    /// start name first, and the first whose names are features in this context is used.
    pub fn parse_region_string(&self, s: &str) -> Result<OpenInterval, ParseError> {
        let s = s.trim();

        if let Ok(i) = self.feature_index(s) {
            let start = self.feature_starts[i];
            let end = start + self.features[i].len();
            return Ok(OpenInterval::new_unchecked(start, end));
        }

        let ranges = region_string::parse_ranges(s);

        let Some(first) = ranges.first() else {
            return if region_string::is_name(s) {
                Err(ParseError::UnknownSegment(LookupError::UnknownFeature(
                    s.into(),
                )))
            } else {
                Err(ParseError::Malformed(s.into()))
            };
        };

        let range = ranges
            .iter()
            .find(|range| {
                self.name_to_index.contains_key(range.start_name)
                    && self.name_to_index.contains_key(range.end_name)
            })
            .unwrap_or(first);

        self.resolve_range(range)
    }

    fn resolve_range(&self, range: &Range<'_>) -> Result<OpenInterval, ParseError> {
        let start = self
            .resolve(range.start_name, range.start)
            .map_err(ParseError::UnknownSegment)?;

        let end = self
            .resolve(range.end_name, range.end)
            .map_err(ParseError::UnknownSegment)?
            + 1;

        OpenInterval::new(start, end)
            .map_err(|e| ParseError::EndBeforeStart { start: e.start, end: e.end })
    }

    /// Formats an absolute interval as a 1-based, closed region string.
    ///
    /// This is the inverse of [`Self::parse_region_string`] for the range forms, including for
    /// feature names that contain `:`.
    pub fn format_region(&self, interval: &OpenInterval) -> Result<String, OutOfRangeError> {
        let start = self.absolute_to_feature_coordinate(interval.start())?;
        let end = self.absolute_to_feature_coordinate(interval.end() - 1)?;

        if start.name() == end.name() {
            Ok(format!(
                "{}:{}-{}",
                start.name(),
                start.position(),
                end.position()
            ))
        } else {
            Ok(format!(
                "{}:{}-{}:{}",
                start.name(),
                start.position(),
                end.name(),
                end.position()
            ))
        }
    }

    /// Returns the parts of each feature that overlap the absolute interval `[start, end)`, in
    /// context order.
    pub fn features_overlapping(&self, start: i64, end: i64) -> Vec<FeatureInterval<'_>> {
        let Ok(query) = OpenInterval::new(start, end) else {
            return Vec::new();
        };

        let first = self
            .feature_starts
            .partition_point(|&s| s <= start)
            .saturating_sub(1);

        let mut intervals = Vec::new();

        for (feature, &feature_start) in self.features[first..]
            .iter()
            .zip(&self.feature_starts[first..])
        {
            if feature_start >= end {
                break;
            }

            let bounds = OpenInterval::new_unchecked(feature_start, feature_start + feature.len());

            if let Some(overlap) = bounds.overlap(&query) {
                intervals.push(FeatureInterval::new_unchecked(
                    feature,
                    overlap.start() - feature_start,
                    overlap.end() - feature_start,
                ));
            }
        }

        intervals
    }

    /// Returns every absolute interval at which a genomic locus appears.
    ///
    /// Features may overlap on the genome, so a locus can appear in several places, or nowhere.
    pub fn convert_genome_interval_to_bases(
        &self,
        interval: &ChromosomeInterval,
    ) -> Vec<OpenInterval> {
        let Some(indices) = self.chr_to_indices.get(interval.chr()) else {
            return Vec::new();
        };

        indices
            .iter()
            .filter_map(|&i| {
                let feature = &self.features[i];
                let overlap = FeatureInterval::whole(feature).overlap(interval)?;
                let feature_start = self.feature_starts[i];

                Some(OpenInterval::new_unchecked(
                    feature_start + overlap.relative_start(),
                    feature_start + overlap.relative_end(),
                ))
            })
            .collect()
    }

    /// Returns the genomic loci under the absolute interval `[start, end)`, merged so that none
    /// overlap.
    pub fn loci_in_interval(&self, start: i64, end: i64) -> Vec<ChromosomeInterval> {
        let loci: Vec<_> = self
            .features_overlapping(start, end)
            .iter()
            .map(|interval| interval.genome_coordinates())
            .collect();

        ChromosomeInterval::merge_overlaps(&loci)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Strand;

    fn feature(name: &str, chr: &str, start: i64, end: i64) -> Feature {
        let locus = ChromosomeInterval::new(chr, start, end).expect("invalid locus");
        Feature::new(name, locus, Strand::Forward)
    }

    fn build_chromosome_context() -> Result<NavigationContext, ContextError> {
        NavigationContext::new(
            "sq",
            vec![
                feature("chr1", "chr1", 0, 10),
                feature("chr2", "chr2", 0, 10),
                feature("chr3", "chr3", 0, 10),
            ],
        )
    }

    // f2 and f3 overlap on chr2.
    fn build_overlapping_context() -> Result<NavigationContext, ContextError> {
        NavigationContext::new(
            "overlapping",
            vec![
                feature("f1", "chr1", 0, 10),
                feature("f2", "chr2", 0, 10),
                feature("f3", "chr2", 5, 15),
            ],
        )
    }

    fn position(n: usize) -> Position {
        Position::new(n).expect("invalid position")
    }

    #[test]
    fn test_new() {
        assert_eq!(
            NavigationContext::new("sq", Vec::new()),
            Err(ContextError::EmptyFeatureList)
        );

        assert_eq!(
            NavigationContext::new(
                "sq",
                vec![feature("chr1", "chr1", 0, 10), feature("chr1", "chr2", 0, 10)]
            ),
            Err(ContextError::DuplicateName(String::from("chr1")))
        );

        assert_eq!(
            NavigationContext::new(
                "sq",
                vec![feature("chr1", "chr1", 0, 10), feature("chr2", "chr2", 5, 5)]
            ),
            Err(ContextError::ZeroLengthFeature(String::from("chr2")))
        );

        assert_eq!(
            NavigationContext::new(
                "sq",
                vec![feature("chr1", "chr1", 0, 10), feature("", "chr2", 0, 5)]
            ),
            Err(ContextError::UnnamedFeature(1))
        );

        assert_eq!(
            NavigationContext::new(
                "sq",
                vec![
                    feature("chr1", "chr1", 0, i64::MAX),
                    feature("chr2", "chr2", 0, 1)
                ]
            ),
            Err(ContextError::TooManyBases(String::from("chr2")))
        );
    }

    #[test]
    fn test_total_bases() -> Result<(), ContextError> {
        let context = build_chromosome_context()?;
        assert_eq!(context.name(), "sq");
        assert_eq!(context.total_bases(), 30);
        Ok(())
    }

    #[test]
    fn test_feature_starts_are_dense() -> Result<(), ContextError> {
        let context = NavigationContext::new(
            "sq",
            vec![
                feature("a", "chr1", 3, 10),
                feature("b", "chr1", 100, 250),
                feature("c", "chr2", 0, 1),
                feature("d", "chr3", 40, 45),
            ],
        )?;

        let features = context.features();
        let starts = context.feature_starts();

        assert_eq!(starts[0], 0);

        for i in 0..features.len() - 1 {
            assert_eq!(starts[i] + features[i].len(), starts[i + 1]);
        }

        assert_eq!(
            starts[features.len() - 1] + features[features.len() - 1].len(),
            context.total_bases()
        );

        Ok(())
    }

    #[test]
    fn test_is_valid_absolute_base() -> Result<(), ContextError> {
        let context = build_chromosome_context()?;

        assert!(context.is_valid_absolute_base(0));
        assert!(context.is_valid_absolute_base(29));
        assert!(!context.is_valid_absolute_base(-1));
        assert!(!context.is_valid_absolute_base(30));

        Ok(())
    }

    #[test]
    fn test_feature_start() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_overlapping_context()?;

        assert_eq!(context.feature_start("f1")?, 0);
        assert_eq!(context.feature_start("f3")?, 20);
        assert_eq!(
            context.feature_start("f4"),
            Err(LookupError::UnknownFeature(String::from("f4")))
        );

        Ok(())
    }

    #[test]
    fn test_absolute_to_feature_coordinate() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_overlapping_context()?;

        let coordinate = context.absolute_to_feature_coordinate(0)?;
        assert_eq!(coordinate.name(), "f1");
        assert_eq!(coordinate.position(), position(1));

        let coordinate = context.absolute_to_feature_coordinate(10)?;
        assert_eq!(coordinate.name(), "f2");
        assert_eq!(coordinate.position(), position(1));

        let coordinate = context.absolute_to_feature_coordinate(29)?;
        assert_eq!(coordinate.name(), "f3");
        assert_eq!(coordinate.position(), position(10));

        assert_eq!(
            context.absolute_to_feature_coordinate(-1),
            Err(OutOfRangeError(-1))
        );
        assert_eq!(
            context.absolute_to_feature_coordinate(30),
            Err(OutOfRangeError(30))
        );

        Ok(())
    }

    #[test]
    fn test_feature_coordinate_to_absolute() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_chromosome_context()?;

        assert_eq!(context.feature_coordinate_to_absolute("chr1", position(1))?, 0);
        assert_eq!(context.feature_coordinate_to_absolute("chr2", position(10))?, 19);

        assert_eq!(
            context.feature_coordinate_to_absolute("chr2", position(11)),
            Err(LookupError::BaseOutOfRange {
                name: String::from("chr2"),
                base: 11
            })
        );

        assert_eq!(
            context.feature_coordinate_to_absolute("chr4", position(1)),
            Err(LookupError::UnknownFeature(String::from("chr4")))
        );

        Ok(())
    }

    #[test]
    fn test_coordinate_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_overlapping_context()?;

        for base in 0..context.total_bases() {
            let coordinate = context.absolute_to_feature_coordinate(base)?;
            let actual =
                context.feature_coordinate_to_absolute(coordinate.name(), coordinate.position())?;
            assert_eq!(actual, base);
        }

        Ok(())
    }

    #[test]
    fn test_parse_region_string() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_chromosome_context()?;

        assert_eq!(
            context.parse_region_string("chr1:1-10")?,
            OpenInterval::new(0, 10)?
        );
        assert_eq!(
            context.parse_region_string("chr1:10-chr3:1")?,
            OpenInterval::new(9, 21)?
        );
        assert_eq!(
            context.parse_region_string("chr2:3-3")?,
            OpenInterval::new(12, 13)?
        );
        assert_eq!(context.parse_region_string("chr2")?, OpenInterval::new(10, 20)?);

        Ok(())
    }

    #[test]
    fn test_parse_region_string_with_invalid_input() -> Result<(), ContextError> {
        let context = build_chromosome_context()?;

        assert_eq!(
            context.parse_region_string("chr1:10-1"),
            Err(ParseError::EndBeforeStart { start: 9, end: 1 })
        );

        assert_eq!(
            context.parse_region_string("chr4:1-10"),
            Err(ParseError::UnknownSegment(LookupError::UnknownFeature(
                String::from("chr4")
            )))
        );

        assert_eq!(
            context.parse_region_string("chr1:1-11"),
            Err(ParseError::UnknownSegment(LookupError::BaseOutOfRange {
                name: String::from("chr1"),
                base: 11
            }))
        );

        assert_eq!(
            context.parse_region_string("chr1:0-10"),
            Err(ParseError::UnknownSegment(LookupError::BaseOutOfRange {
                name: String::from("chr1"),
                base: 0
            }))
        );

        assert_eq!(
            context.parse_region_string("chr1:1"),
            Err(ParseError::UnknownSegment(LookupError::UnknownFeature(
                String::from("chr1:1")
            )))
        );

        assert_eq!(
            context.parse_region_string("chr 1:1-10"),
            Err(ParseError::Malformed(String::from("chr 1:1-10")))
        );

        assert_eq!(
            context.parse_region_string(""),
            Err(ParseError::Malformed(String::new()))
        );

        assert!(matches!(
            context.parse_region_string("meow"),
            Err(ParseError::UnknownSegment(LookupError::UnknownFeature(_)))
        ));

        Ok(())
    }

    #[test]
    fn test_format_region() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_chromosome_context()?;

        assert_eq!(context.format_region(&OpenInterval::new(0, 10)?)?, "chr1:1-10");
        assert_eq!(
            context.format_region(&OpenInterval::new(9, 21)?)?,
            "chr1:10-chr3:1"
        );
        assert_eq!(
            context.format_region(&OpenInterval::new(25, 31)?),
            Err(OutOfRangeError(30))
        );

        for s in ["chr1:4-7", "chr2:1-chr3:10", "chr1:1-chr3:10"] {
            let interval = context.parse_region_string(s)?;
            assert_eq!(context.format_region(&interval)?, s);
        }

        Ok(())
    }

    // Features named after their loci, plus a chromosome-named feature whose name prefixes one.
    fn build_locus_named_context() -> Result<NavigationContext, Box<dyn std::error::Error>> {
        let features = vec![
            Feature::from_locus(ChromosomeInterval::new("sq0", 100, 300)?, Strand::Forward),
            Feature::from_locus(ChromosomeInterval::new("sq2", 1900, 2100)?, Strand::Reverse),
            Feature::new("sq2", ChromosomeInterval::new("sq2", 0, 2000)?, Strand::None),
        ];

        Ok(NavigationContext::new("loci", features)?)
    }

    #[test]
    fn test_parse_region_string_with_delimited_names() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_locus_named_context()?;

        assert_eq!(
            context.parse_region_string("sq2:1900-2100")?,
            OpenInterval::new(200, 400)?
        );
        assert_eq!(
            context.parse_region_string("sq2:1900-2100:76-150")?,
            OpenInterval::new(275, 350)?
        );
        assert_eq!(
            context.parse_region_string("sq0:100-300:5-sq2:1900-2100:150")?,
            OpenInterval::new(4, 350)?
        );
        assert_eq!(
            context.parse_region_string("sq2:1-10")?,
            OpenInterval::new(400, 410)?
        );
        assert_eq!(
            context.parse_region_string("sq2:1900-2100:1-sq2:10")?,
            OpenInterval::new(200, 410)?
        );

        assert_eq!(
            context.parse_region_string("sq2:1900-2100:76-250"),
            Err(ParseError::UnknownSegment(LookupError::BaseOutOfRange {
                name: String::from("sq2:1900-2100"),
                base: 250
            }))
        );

        Ok(())
    }

    #[test]
    fn test_format_region_with_delimited_names() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_locus_named_context()?;

        assert_eq!(
            context.format_region(&OpenInterval::new(275, 350)?)?,
            "sq2:1900-2100:76-150"
        );
        assert_eq!(
            context.format_region(&OpenInterval::new(150, 450)?)?,
            "sq0:100-300:151-sq2:50"
        );

        for (start, end) in [(275, 350), (4, 350), (150, 450), (0, 2400), (399, 401)] {
            let interval = OpenInterval::new(start, end)?;
            let s = context.format_region(&interval)?;
            assert_eq!(context.parse_region_string(&s)?, interval);
        }

        Ok(())
    }

    #[test]
    fn test_features_overlapping() -> Result<(), ContextError> {
        let context = build_overlapping_context()?;

        fn t(context: &NavigationContext, start: i64, end: i64, expected: &[&str]) {
            let actual: Vec<_> = context
                .features_overlapping(start, end)
                .iter()
                .map(|interval| interval.to_string())
                .collect();

            assert_eq!(actual, expected);
        }

        // one feature
        t(&context, 10, 20, &["f2:0-10"]);
        t(&context, 12, 15, &["f2:2-5"]);
        // two features, across a boundary
        t(&context, 8, 12, &["f1:8-10", "f2:0-2"]);
        // all features
        t(&context, 4, 22, &["f1:4-10", "f2:0-10", "f3:0-2"]);
        t(&context, -5, 100, &["f1:0-10", "f2:0-10", "f3:0-10"]);
        // none
        t(&context, 30, 40, &[]);
        t(&context, 15, 15, &[]);
        t(&context, 15, 10, &[]);

        Ok(())
    }

    #[test]
    fn test_convert_genome_interval_to_bases() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_overlapping_context()?;

        let interval = ChromosomeInterval::new("chr1", 5, 10)?;
        assert_eq!(
            context.convert_genome_interval_to_bases(&interval),
            [OpenInterval::new(5, 10)?]
        );

        let interval = ChromosomeInterval::new("chr2", 5, 10)?;
        assert_eq!(
            context.convert_genome_interval_to_bases(&interval),
            [OpenInterval::new(15, 20)?, OpenInterval::new(20, 25)?]
        );

        let interval = ChromosomeInterval::new("chr1", -1, -1)?;
        assert!(context.convert_genome_interval_to_bases(&interval).is_empty());

        let interval = ChromosomeInterval::new("chrX", 0, 0)?;
        assert!(context.convert_genome_interval_to_bases(&interval).is_empty());

        Ok(())
    }

    #[test]
    fn test_loci_in_interval() -> Result<(), Box<dyn std::error::Error>> {
        let context = build_overlapping_context()?;

        assert_eq!(
            context.loci_in_interval(4, 30),
            [
                ChromosomeInterval::new("chr1", 4, 10)?,
                ChromosomeInterval::new("chr2", 0, 15)?,
            ]
        );

        Ok(())
    }
}
