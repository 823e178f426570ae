use std::{collections::HashMap, sync::Arc};

use thiserror::Error;

use super::Genome;
use crate::navigation_context::{ContextError, NavigationContext};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RegistryError {
    #[error("duplicate genome name: {0}")]
    DuplicateGenome(String),
    #[error("invalid context for genome {0}")]
    InvalidContext(String, #[source] ContextError),
}

#[derive(Debug)]
struct Entry {
    genome: Arc<Genome>,
    context: Arc<NavigationContext>,
}

/// Known genomes keyed by name, each with its whole-genome navigation context.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, genome: Genome) -> Result<(), RegistryError> {
        let name = genome.name().to_string();

        if self.entries.contains_key(&name) {
            return Err(RegistryError::DuplicateGenome(name));
        }

        let context = genome
            .make_nav_context()
            .map_err(|e| RegistryError::InvalidContext(name.clone(), e))?;

        let entry = Entry {
            genome: Arc::new(genome),
            context: Arc::new(context),
        };

        self.entries.insert(name, entry);

        Ok(())
    }

    pub fn genome(&self, name: &str) -> Option<&Arc<Genome>> {
        self.entries.get(name).map(|entry| &entry.genome)
    }

    pub fn context(&self, name: &str) -> Option<&Arc<NavigationContext>> {
        self.entries.get(name).map(|entry| &entry.context)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
