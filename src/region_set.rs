//! User-curated feature lists that become navigation contexts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    feature::{self, Feature},
    flanking_strategy::FlankingStrategy,
    genome::{Genome, Registry},
    interval::InvalidIntervalError,
    navigation_context::{ContextError, NavigationContext},
};

/// The minimum number of bases a feature must share with the genome to join a region set.
pub const MIN_REGION_LENGTH: i64 = 100;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RegionSetError {
    #[error("feature has no name")]
    EmptyName,
    #[error("duplicate feature name: {0}")]
    DuplicateName(String),
    #[error("feature {0} is not in the genome or is shorter than {} bases", MIN_REGION_LENGTH)]
    NotInGenome(String),
    #[error("feature index out of range: {index} (len = {len})")]
    FeatureIndexOutOfRange { index: usize, len: usize },
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MakeNavContextError {
    #[error("flanked feature {0} is outside of the genome")]
    FlankedFeatureOutsideGenome(String),
    #[error("invalid context")]
    InvalidContext(#[source] ContextError),
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum FromRecordError {
    #[error("unknown genome: {0}")]
    UnknownGenome(String),
    #[error("invalid feature")]
    InvalidFeature(#[source] InvalidIntervalError),
}

/// A named list of features in a genome, plus the flanking applied when viewing them.
///
/// Region sets are values: every edit returns a new set and leaves the original untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionSet {
    name: String,
    features: Vec<Feature>,
    genome: Arc<Genome>,
    flanking_strategy: FlankingStrategy,
}

impl RegionSet {
    /// Creates a region set.
    ///
    /// The features are taken as given. Use [`Self::clone_and_add_feature`] to add features with
    /// validation.
    pub fn new<N>(
        name: N,
        features: Vec<Feature>,
        genome: Arc<Genome>,
        flanking_strategy: FlankingStrategy,
    ) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            features,
            genome,
            flanking_strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn genome(&self) -> &Arc<Genome> {
        &self.genome
    }

    pub fn flanking_strategy(&self) -> FlankingStrategy {
        self.flanking_strategy
    }

    pub fn with_name<N>(&self, name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_flanking_strategy(&self, flanking_strategy: FlankingStrategy) -> Self {
        Self {
            flanking_strategy,
            ..self.clone()
        }
    }

    /// Returns a copy of this set with a feature appended.
    ///
    /// The feature must be named, its name must be new to the set, and at least
    /// [`MIN_REGION_LENGTH`] of its bases must be in the genome.
    pub fn clone_and_add_feature(&self, feature: Feature) -> Result<Self, RegionSetError> {
        if feature.name().is_empty() {
            return Err(RegionSetError::EmptyName);
        }

        if self.features.iter().any(|f| f.name() == feature.name()) {
            return Err(RegionSetError::DuplicateName(feature.name().into()));
        }

        match self.genome.intersect_interval(feature.locus()) {
            Some(intersection) if intersection.len() >= MIN_REGION_LENGTH => {}
            _ => return Err(RegionSetError::NotInGenome(feature.name().into())),
        }

        let mut features = self.features.clone();
        features.push(feature);

        Ok(Self {
            features,
            ..self.clone()
        })
    }

    /// Returns a copy of this set without the feature at `index`.
    pub fn clone_and_delete_feature(&self, index: usize) -> Result<Self, RegionSetError> {
        if index >= self.features.len() {
            return Err(RegionSetError::FeatureIndexOutOfRange {
                index,
                len: self.features.len(),
            });
        }

        let mut features = self.features.clone();
        features.remove(index);

        Ok(Self {
            features,
            ..self.clone()
        })
    }

    /// Applies the flanking strategy to every feature.
    ///
    /// An entry is `None` when its flanked locus falls outside of the genome.
    pub fn make_flanked_features(&self) -> Vec<Option<Feature>> {
        self.features
            .iter()
            .map(|feature| {
                self.flanking_strategy
                    .make_flanked_feature(feature, &self.genome)
            })
            .collect()
    }

    /// Builds a navigation context from the flanked features, in set order.
    pub fn make_nav_context(&self) -> Result<NavigationContext, MakeNavContextError> {
        let features = self
            .features
            .iter()
            .map(|feature| {
                self.flanking_strategy
                    .make_flanked_feature(feature, &self.genome)
                    .ok_or_else(|| {
                        MakeNavContextError::FlankedFeatureOutsideGenome(feature.name().into())
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        NavigationContext::new(self.name.clone(), features)
            .map_err(MakeNavContextError::InvalidContext)
    }

    pub fn to_record(&self) -> Record {
        Record {
            name: self.name.clone(),
            features: self.features.iter().map(Feature::to_record).collect(),
            genome_name: self.genome.name().into(),
            flanking_strategy: self.flanking_strategy,
        }
    }

    /// Rebuilds a region set, looking up its genome by name.
    pub fn from_record(record: Record, registry: &Registry) -> Result<Self, FromRecordError> {
        let genome = registry
            .genome(&record.genome_name)
            .cloned()
            .ok_or_else(|| FromRecordError::UnknownGenome(record.genome_name.clone()))?;

        let features = record
            .features
            .into_iter()
            .map(Feature::from_record)
            .collect::<Result<_, _>>()
            .map_err(FromRecordError::InvalidFeature)?;

        Ok(Self::new(
            record.name,
            features,
            genome,
            record.flanking_strategy,
        ))
    }
}

/// The plain-data form of a [`RegionSet`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,
    pub features: Vec<feature::Record>,
    pub genome_name: String,
    pub flanking_strategy: FlankingStrategy,
}
