//! Named genomic intervals.

mod details;
mod strand;

pub use self::{
    details::{Details, GeneAnnotation, UserRegion},
    strand::Strand,
};

use serde::{Deserialize, Serialize};

use crate::interval::{ChromosomeInterval, InvalidIntervalError};

/// A named, stranded genomic interval, e.g., a chromosome, gene, or user region.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "Record", try_from = "Record")]
pub struct Feature {
    name: String,
    locus: ChromosomeInterval,
    strand: Strand,
    details: Details,
}

impl Feature {
    pub fn new<N>(name: N, locus: ChromosomeInterval, strand: Strand) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            locus,
            strand,
            details: Details::None,
        }
    }

    /// Creates a feature named after its locus.
    pub fn from_locus(locus: ChromosomeInterval, strand: Strand) -> Self {
        let name = locus.to_string();
        Self::new(name, locus, strand)
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locus(&self) -> &ChromosomeInterval {
        &self.locus
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    /// Returns whether the feature is read 5' to 3' left to right.
    ///
    /// Unstranded features are treated as forward.
    pub fn is_forward_strand(&self) -> bool {
        self.strand != Strand::Reverse
    }

    pub fn len(&self) -> i64 {
        self.locus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locus.is_empty()
    }

    /// Returns a copy of this feature at a different locus, keeping everything else.
    pub fn with_locus(&self, locus: ChromosomeInterval) -> Self {
        Self {
            name: self.name.clone(),
            locus,
            strand: self.strand,
            details: self.details.clone(),
        }
    }

    pub fn to_record(&self) -> Record {
        Record::from(self.clone())
    }

    pub fn from_record(record: Record) -> Result<Self, InvalidIntervalError> {
        Self::try_from(record)
    }
}

/// The plain-data form of a [`Feature`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    pub chr: String,
    pub start: i64,
    pub end: i64,
    pub strand: Strand,
    #[serde(default, skip_serializing_if = "Details::is_none")]
    pub details: Details,
}

impl From<Feature> for Record {
    fn from(feature: Feature) -> Self {
        Self {
            name: feature.name,
            chr: feature.locus.chr().into(),
            start: feature.locus.start(),
            end: feature.locus.end(),
            strand: feature.strand,
            details: feature.details,
        }
    }
}

impl TryFrom<Record> for Feature {
    type Error = InvalidIntervalError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let locus = ChromosomeInterval::new(record.chr, record.start, record.end)?;

        Ok(Self {
            name: record.name,
            locus,
            strand: record.strand,
            details: record.details,
        })
    }
}
