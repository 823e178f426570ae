mod locate;
mod region_set;
pub mod view;

pub use self::{locate::locate, region_set::region_set, view::view};

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    sync::Arc,
};

use anyhow::Context;
use tracing::{info, warn};

use crate::{
    bed,
    feature::Feature,
    flanking_strategy::FlankingStrategy,
    genome::{read_chrom_sizes, Genome},
    region_set::RegionSet,
};

const DEFAULT_GENOME_NAME: &str = "genome";

/// Reads a genome from a `chrom.sizes` file, naming it after the file.
fn read_genome(src: &Path) -> anyhow::Result<Genome> {
    let name = genome_name(src);

    let reader =
        crate::reader::open(src).with_context(|| format!("Could not open {}", src.display()))?;

    info!(src = ?src, genome_name = name, "reading genome");

    let genome = read_chrom_sizes(reader, name)
        .with_context(|| format!("Could not read {}", src.display()))?;

    info!(chromosome_count = genome.chromosomes().len(), "read genome");

    Ok(genome)
}

// e.g., `hg19.chrom.sizes` => `hg19`
fn genome_name(src: &Path) -> &str {
    src.file_name()
        .and_then(|s| s.to_str())
        .and_then(|s| s.split('.').next())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_GENOME_NAME)
}

fn read_features(src: &Path) -> anyhow::Result<Vec<Feature>> {
    let reader =
        crate::reader::open(src).with_context(|| format!("Could not open {}", src.display()))?;

    info!(src = ?src, "reading features");

    let features =
        bed::read_features(reader).with_context(|| format!("Could not read {}", src.display()))?;

    info!(feature_count = features.len(), "read features");

    Ok(features)
}

/// Builds a region set, skipping features that cannot join it.
fn build_region_set(
    name: &str,
    genome: Arc<Genome>,
    features: Vec<Feature>,
    flanking_strategy: FlankingStrategy,
) -> RegionSet {
    let mut region_set = RegionSet::new(name, Vec::new(), genome, flanking_strategy);

    for feature in features {
        match region_set.clone_and_add_feature(feature) {
            Ok(next) => region_set = next,
            Err(e) => warn!("skipping feature: {e}"),
        }
    }

    info!(
        region_set_name = name,
        feature_count = region_set.features().len(),
        flanking_type = %flanking_strategy.ty(),
        upstream = flanking_strategy.upstream(),
        downstream = flanking_strategy.downstream(),
        "built region set"
    );

    region_set
}

/// Opens a file for writing, or stdout if no path is given.
fn create<P>(dst: Option<P>) -> anyhow::Result<Box<dyn Write>>
where
    P: AsRef<Path>,
{
    match dst {
        Some(dst) => {
            let dst = dst.as_ref();

            let writer = File::create(dst)
                .map(BufWriter::new)
                .with_context(|| format!("Could not open {}", dst.display()))?;

            Ok(Box::new(writer))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
