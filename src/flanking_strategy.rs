//! Strand-aware widening and narrowing of feature loci.

use std::{error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    feature::Feature,
    genome::Genome,
    interval::{ChromosomeInterval, OpenInterval},
};

/// The part of a feature a flanked locus surrounds.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlankingType {
    /// The entire feature
    #[default]
    SurroundAll,
    /// The transcription start
    SurroundStart,
    /// The transcription end
    SurroundEnd,
}

impl FlankingType {
    /// Collapses `(transcription start, transcription end)` to the boundaries to flank.
    fn select(self, transcription_start: i64, transcription_end: i64) -> (i64, i64) {
        match self {
            Self::SurroundAll => (transcription_start, transcription_end),
            Self::SurroundStart => (transcription_start, transcription_start),
            Self::SurroundEnd => (transcription_end, transcription_end),
        }
    }
}

impl fmt::Display for FlankingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurroundAll => f.write_str("surround-all"),
            Self::SurroundStart => f.write_str("surround-start"),
            Self::SurroundEnd => f.write_str("surround-end"),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct ParseFlankingTypeError(String);

impl fmt::Display for ParseFlankingTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid flanking type: {}", self.0)
    }
}

impl error::Error for ParseFlankingTypeError {}

impl FromStr for FlankingType {
    type Err = ParseFlankingTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surround-all" => Ok(Self::SurroundAll),
            "surround-start" => Ok(Self::SurroundStart),
            "surround-end" => Ok(Self::SurroundEnd),
            _ => Err(ParseFlankingTypeError(s.into())),
        }
    }
}

/// Derives a new locus for a feature by extending upstream and downstream of its transcription
/// start and/or end.
///
/// Upstream and downstream follow the feature's strand; unstranded features are treated as
/// forward.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FlankingStrategy {
    #[serde(rename = "type")]
    ty: FlankingType,
    upstream: u64,
    downstream: u64,
}

impl FlankingStrategy {
    pub fn new(ty: FlankingType, upstream: u64, downstream: u64) -> Self {
        Self {
            ty,
            upstream,
            downstream,
        }
    }

    pub fn ty(&self) -> FlankingType {
        self.ty
    }

    pub fn upstream(&self) -> u64 {
        self.upstream
    }

    pub fn downstream(&self) -> u64 {
        self.downstream
    }

    pub fn with_type(self, ty: FlankingType) -> Self {
        Self { ty, ..self }
    }

    pub fn with_upstream(self, upstream: u64) -> Self {
        Self { upstream, ..self }
    }

    pub fn with_downstream(self, downstream: u64) -> Self {
        Self { downstream, ..self }
    }

    /// Returns a copy of the feature at its flanked locus, truncated to the genome.
    ///
    /// Returns `None` if the flanked locus does not overlap the genome.
    pub fn make_flanked_feature(&self, feature: &Feature, genome: &Genome) -> Option<Feature> {
        let locus = self.make_flanked_coordinates(feature.locus(), feature.is_forward_strand());
        let locus = genome.intersect_interval(&locus)?;
        Some(feature.with_locus(locus))
    }

    // The result is not checked against the genome.
    fn make_flanked_coordinates(
        &self,
        locus: &ChromosomeInterval,
        is_forward_strand: bool,
    ) -> ChromosomeInterval {
        let upstream = i64::try_from(self.upstream).unwrap_or(i64::MAX);
        let downstream = i64::try_from(self.downstream).unwrap_or(i64::MAX);

        let (start, end) = if is_forward_strand {
            let (start, end) = self.ty.select(locus.start(), locus.end());
            (start.saturating_sub(upstream), end.saturating_add(downstream))
        } else {
            let (start, end) = self.ty.select(locus.end(), locus.start());
            (start.saturating_add(upstream), end.saturating_sub(downstream))
        };

        let interval = if start <= end {
            OpenInterval::new_unchecked(start, end)
        } else {
            OpenInterval::new_unchecked(end, start)
        };

        ChromosomeInterval::from_interval(locus.chr(), interval)
    }
}
