use std::{fs::File, io::BufWriter, path::Path, sync::Arc};

use anyhow::Context;
use tracing::info;

use super::{build_region_set, create, read_features, read_genome};
use crate::{flanking_strategy::FlankingStrategy, writer::Writer};

/// Builds a region set from a BED file and writes the layout of its navigation context.
///
/// Features that cannot join the set are logged and skipped.
pub fn region_set<P, Q, R>(
    genome_src: P,
    features_src: Q,
    name: &str,
    flanking_strategy: FlankingStrategy,
    dst: Option<R>,
    record_dst: Option<R>,
) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let genome = read_genome(genome_src.as_ref()).map(Arc::new)?;
    let features = read_features(features_src.as_ref())?;

    let region_set = build_region_set(name, genome, features, flanking_strategy);

    let context = region_set
        .make_nav_context()
        .context("Could not build region set context")?;

    info!(
        feature_count = context.features().len(),
        total_bases = context.total_bases(),
        "built region set context"
    );

    let mut writer = create(dst).map(Writer::new)?;
    writer.write_context_layout(&context)?;

    if let Some(record_dst) = record_dst {
        let record_dst = record_dst.as_ref();

        let writer = File::create(record_dst)
            .map(BufWriter::new)
            .with_context(|| format!("Could not open {}", record_dst.display()))?;

        info!(dst = ?record_dst, "writing region set");

        serde_json::to_writer_pretty(writer, &region_set.to_record())
            .with_context(|| format!("Could not write {}", record_dst.display()))?;
    }

    Ok(())
}
