use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use super::{create, read_genome};
use crate::writer::Writer;

/// Locates absolute bases and region strings in the whole-genome context.
///
/// Each base is written as its feature coordinate. Each region string is written as its absolute
/// interval and feature intervals. Queries that cannot be resolved are logged and skipped.
pub fn locate<P, Q>(
    genome_src: P,
    bases: &[i64],
    regions: &[String],
    dst: Option<Q>,
) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let genome = read_genome(genome_src.as_ref())?;
    let context = genome
        .make_nav_context()
        .context("Could not build genome context")?;

    info!(
        base_count = bases.len(),
        region_count = regions.len(),
        "locating queries"
    );

    let mut writer = create(dst).map(Writer::new)?;

    for &base in bases {
        match context.absolute_to_feature_coordinate(base) {
            Ok(coordinate) => writer.write_feature_coordinate(base, &coordinate)?,
            Err(e) => warn!(base, "skipping base: {e}"),
        }
    }

    for region in regions {
        match context.parse_region_string(region) {
            Ok(interval) => {
                writer.write_absolute_interval(&interval)?;
                let intervals = context.features_overlapping(interval.start(), interval.end());
                writer.write_feature_intervals(&intervals)?;
            }
            Err(e) => warn!(region = region.as_str(), "skipping region: {e}"),
        }
    }

    Ok(())
}
