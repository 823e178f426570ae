//! Reference genomes: named, ordered chromosome lists.

mod chromosome;
pub mod reader;
mod registry;

pub use self::{
    chromosome::Chromosome,
    reader::{read_chrom_sizes, ReadGenomeError},
    registry::{Registry, RegistryError},
};

use std::collections::HashMap;

use thiserror::Error;

use crate::{
    feature::{Feature, Strand},
    interval::{ChromosomeInterval, OpenInterval},
    navigation_context::{ContextError, NavigationContext},
};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GenomeError {
    #[error("duplicate chromosome name: {0}")]
    DuplicateName(String),
    #[error("invalid length for chromosome {name}: {length}")]
    InvalidLength { name: String, length: i64 },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Genome {
    name: String,
    chromosomes: Vec<Chromosome>,
    index: HashMap<String, usize>,
}

impl Genome {
    pub fn new<N>(name: N, chromosomes: Vec<Chromosome>) -> Result<Self, GenomeError>
    where
        N: Into<String>,
    {
        let mut index = HashMap::with_capacity(chromosomes.len());

        for (i, chromosome) in chromosomes.iter().enumerate() {
            if chromosome.len() < 0 {
                return Err(GenomeError::InvalidLength {
                    name: chromosome.name().into(),
                    length: chromosome.len(),
                });
            }

            if index.insert(chromosome.name().into(), i).is_some() {
                return Err(GenomeError::DuplicateName(chromosome.name().into()));
            }
        }

        Ok(Self {
            name: name.into(),
            chromosomes,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn get(&self, name: &str) -> Option<&Chromosome> {
        self.index.get(name).map(|&i| &self.chromosomes[i])
    }

    /// Clips a locus to the chromosome it names.
    ///
    /// Returns `None` if the chromosome is unknown or the locus lies entirely outside of it.
    pub fn intersect_interval(&self, interval: &ChromosomeInterval) -> Option<ChromosomeInterval> {
        let chromosome = self.get(interval.chr())?;
        let bounds = ChromosomeInterval::new(chromosome.name(), 0, chromosome.len()).ok()?;
        bounds.overlap(interval)
    }

    /// Builds a context of whole chromosomes, each named after itself.
    pub fn make_nav_context(&self) -> Result<NavigationContext, ContextError> {
        let features = self
            .chromosomes
            .iter()
            .map(|chromosome| {
                let name = chromosome.name();
                let locus = ChromosomeInterval::from_interval(
                    name,
                    OpenInterval::new_unchecked(0, chromosome.len()),
                );
                Feature::new(name, locus, Strand::Forward)
            })
            .collect();

        NavigationContext::new(self.name.clone(), features)
    }
}
