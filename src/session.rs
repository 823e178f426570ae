//! Serializable view state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    displayed_region::{DisplayedRegionModel, RangeError},
    genome::Registry,
    interval::OpenInterval,
    region_set::{self, FromRecordError, MakeNavContextError, RegionSet},
};

/// What a navigation context was built from.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContextSource {
    /// The whole-genome context of a registered genome
    #[serde(rename_all = "camelCase")]
    Genome { genome_name: String },
    /// The context of a region set
    RegionSet(region_set::Record),
}

impl From<&RegionSet> for ContextSource {
    fn from(region_set: &RegionSet) -> Self {
        Self::RegionSet(region_set.to_record())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RestoreError {
    #[error("unknown genome: {0}")]
    UnknownGenome(String),
    #[error("invalid region set")]
    InvalidRegionSet(#[source] FromRecordError),
    #[error("invalid region set context")]
    InvalidContext(#[source] MakeNavContextError),
    #[error("invalid region")]
    InvalidRegion(#[source] RangeError),
}

/// A view region plus enough to rebuild the context it is in.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    source: ContextSource,
    region: OpenInterval,
}

impl Session {
    pub fn new(source: ContextSource, region: OpenInterval) -> Self {
        Self { source, region }
    }

    /// Captures the current region of a view.
    ///
    /// `source` must describe the context the view was built against.
    pub fn capture(source: ContextSource, view_region: &DisplayedRegionModel) -> Self {
        Self::new(source, view_region.absolute_region())
    }

    pub fn source(&self) -> &ContextSource {
        &self.source
    }

    pub fn region(&self) -> OpenInterval {
        self.region
    }

    /// Rebuilds the view, clamping the saved region to the rebuilt context.
    pub fn restore(&self, registry: &Registry) -> Result<DisplayedRegionModel, RestoreError> {
        let context = match &self.source {
            ContextSource::Genome { genome_name } => registry
                .context(genome_name)
                .cloned()
                .ok_or_else(|| RestoreError::UnknownGenome(genome_name.clone()))?,
            ContextSource::RegionSet(record) => {
                let region_set = RegionSet::from_record(record.clone(), registry)
                    .map_err(RestoreError::InvalidRegionSet)?;

                region_set
                    .make_nav_context()
                    .map(Arc::new)
                    .map_err(RestoreError::InvalidContext)?
            }
        };

        DisplayedRegionModel::with_region(context, self.region.start(), self.region.end())
            .map_err(RestoreError::InvalidRegion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        feature::{Feature, Strand},
        flanking_strategy::{FlankingStrategy, FlankingType},
        genome::{Chromosome, Genome},
        interval::ChromosomeInterval,
    };

    fn build_registry() -> Result<Registry, Box<dyn std::error::Error>> {
        let mut registry = Registry::new();

        registry.insert(Genome::new(
            "sq",
            vec![Chromosome::new("chr1", 1000), Chromosome::new("chr2", 500)],
        )?)?;

        Ok(registry)
    }

    #[test]
    fn test_restore_genome_session() -> Result<(), Box<dyn std::error::Error>> {
        let registry = build_registry()?;
        let context = registry.context("sq").cloned().ok_or("missing context")?;
        let view_region = DisplayedRegionModel::with_region(context, 900, 1100)?;

        let source = ContextSource::Genome {
            genome_name: String::from("sq"),
        };
        let session = Session::capture(source, &view_region);

        let s = serde_json::to_string(&session)?;
        assert_eq!(
            s,
            r#"{"source":{"type":"genome","genomeName":"sq"},"region":{"start":900,"end":1100}}"#
        );

        let session: Session = serde_json::from_str(&s)?;
        assert_eq!(session.restore(&registry)?, view_region);

        Ok(())
    }

    #[test]
    fn test_restore_region_set_session() -> Result<(), Box<dyn std::error::Error>> {
        let registry = build_registry()?;
        let genome = registry.genome("sq").cloned().ok_or("missing genome")?;

        let region_set = RegionSet::new(
            "promoters",
            Vec::new(),
            genome,
            FlankingStrategy::new(FlankingType::SurroundStart, 100, 50),
        )
        .clone_and_add_feature(Feature::new(
            "a",
            ChromosomeInterval::new("chr1", 200, 400)?,
            Strand::Reverse,
        ))?
        .clone_and_add_feature(Feature::new(
            "b",
            ChromosomeInterval::new("chr2", 0, 300)?,
            Strand::Forward,
        ))?;

        let context = Arc::new(region_set.make_nav_context()?);
        let view_region = DisplayedRegionModel::with_region(context, 100, 200)?;
        let session = Session::capture(ContextSource::from(&region_set), &view_region);

        let s = serde_json::to_string(&session)?;
        let session: Session = serde_json::from_str(&s)?;
        let restored = session.restore(&registry)?;

        assert_eq!(restored, view_region);
        assert_eq!(restored.navigation_context().name(), "promoters");

        Ok(())
    }

    #[test]
    fn test_restore_with_unknown_genome() -> Result<(), Box<dyn std::error::Error>> {
        let registry = build_registry()?;

        let session = Session::new(
            ContextSource::Genome {
                genome_name: String::from("hg19"),
            },
            OpenInterval::new(0, 10)?,
        );

        assert_eq!(
            session.restore(&registry),
            Err(RestoreError::UnknownGenome(String::from("hg19")))
        );

        Ok(())
    }

    #[test]
    fn test_restore_clamps_region() -> Result<(), Box<dyn std::error::Error>> {
        let registry = build_registry()?;

        let session = Session::new(
            ContextSource::Genome {
                genome_name: String::from("sq"),
            },
            OpenInterval::new(1400, 1600)?,
        );

        let view_region = session.restore(&registry)?;
        assert_eq!(view_region.absolute_region(), OpenInterval::new(1300, 1500)?);

        Ok(())
    }
}
