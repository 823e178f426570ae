use std::{
    fmt,
    fs::{self, File},
    io::BufWriter,
    num,
    path::Path,
    str::FromStr,
    sync::Arc,
};

use anyhow::Context;
use thiserror::Error;
use tracing::info;

use super::{build_region_set, create, read_features, read_genome};
use crate::{
    displayed_region::DisplayedRegionModel,
    flanking_strategy::FlankingStrategy,
    genome::Registry,
    linear_drawing_model::LinearDrawingModel,
    region_expander::RegionExpander,
    session::{ContextSource, Session},
    writer::Writer,
};

const DEFAULT_FOCAL_POINT: f64 = 0.5;

/// A navigation action applied to a view.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Move by a number of bases.
    Pan(i64),
    /// Multiply the width, holding the base at `focal_point` (a fraction of the width) fixed.
    Zoom { factor: f64, focal_point: f64 },
    /// Jump to a region string.
    Set(String),
}

impl Action {
    fn apply(&self, view_region: &mut DisplayedRegionModel) -> anyhow::Result<()> {
        match self {
            Self::Pan(delta) => view_region.pan(*delta),
            Self::Zoom {
                factor,
                focal_point,
            } => view_region.zoom(*factor, *focal_point)?,
            Self::Set(region) => view_region.set_region_string(region)?,
        }

        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pan(delta) => write!(f, "pan={delta}"),
            Self::Zoom {
                factor,
                focal_point,
            } => write!(f, "zoom={factor}@{focal_point}"),
            Self::Set(region) => write!(f, "set={region}"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseActionError {
    #[error("missing delimiter")]
    MissingDelimiter,
    #[error("invalid action: {0}")]
    InvalidKind(String),
    #[error("invalid pan")]
    InvalidPan(#[source] num::ParseIntError),
    #[error("invalid zoom factor")]
    InvalidZoomFactor(#[source] num::ParseFloatError),
    #[error("invalid focal point")]
    InvalidFocalPoint(#[source] num::ParseFloatError),
    #[error("missing region")]
    MissingRegion,
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const DELIMITER: char = '=';
        const FOCAL_POINT_DELIMITER: char = '@';

        let (kind, value) = s
            .split_once(DELIMITER)
            .ok_or(ParseActionError::MissingDelimiter)?;

        match kind {
            "pan" => value
                .parse()
                .map(Self::Pan)
                .map_err(ParseActionError::InvalidPan),
            "zoom" => {
                let (raw_factor, raw_focal_point) = match value.split_once(FOCAL_POINT_DELIMITER) {
                    Some((a, b)) => (a, Some(b)),
                    None => (value, None),
                };

                let factor = raw_factor
                    .parse()
                    .map_err(ParseActionError::InvalidZoomFactor)?;

                let focal_point = raw_focal_point
                    .map(|s| s.parse().map_err(ParseActionError::InvalidFocalPoint))
                    .transpose()?
                    .unwrap_or(DEFAULT_FOCAL_POINT);

                Ok(Self::Zoom {
                    factor,
                    focal_point,
                })
            }
            "set" => {
                if value.is_empty() {
                    Err(ParseActionError::MissingRegion)
                } else {
                    Ok(Self::Set(value.into()))
                }
            }
            _ => Err(ParseActionError::InvalidKind(kind.into())),
        }
    }
}

/// Where the view comes from.
pub enum Source<'a> {
    /// The whole genome
    Genome,
    /// A region set built from a BED file
    Regions {
        src: &'a Path,
        name: &'a str,
        flanking_strategy: FlankingStrategy,
    },
    /// A saved session
    Session(&'a Path),
}

/// Builds a view, applies actions to it in order, and writes the resulting region.
///
/// Fails on the first action that cannot be applied.
#[allow(clippy::too_many_arguments)]
pub fn view<P, Q>(
    genome_src: P,
    source: Source<'_>,
    region: Option<&str>,
    actions: &[Action],
    pixel_width: Option<f64>,
    expansion: Option<f64>,
    session_dst: Option<Q>,
    dst: Option<Q>,
) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let genome = read_genome(genome_src.as_ref())?;
    let genome_name = genome.name().to_string();

    let mut registry = Registry::new();
    registry.insert(genome).context("Could not register genome")?;

    let (context_source, mut view_region) = match source {
        Source::Genome => {
            let context = registry
                .context(&genome_name)
                .cloned()
                .context("Missing genome context")?;

            let context_source = ContextSource::Genome { genome_name };
            (context_source, DisplayedRegionModel::new(context))
        }
        Source::Regions {
            src,
            name,
            flanking_strategy,
        } => {
            let features = read_features(src)?;

            let genome = registry
                .genome(&genome_name)
                .cloned()
                .context("Missing genome")?;

            let region_set = build_region_set(name, genome, features, flanking_strategy);

            let context = region_set
                .make_nav_context()
                .map(Arc::new)
                .context("Could not build region set context")?;

            let context_source = ContextSource::from(&region_set);
            (context_source, DisplayedRegionModel::new(context))
        }
        Source::Session(src) => {
            info!(src = ?src, "reading session");

            let s = fs::read_to_string(src)
                .with_context(|| format!("Could not open {}", src.display()))?;

            let session: Session = serde_json::from_str(&s)
                .with_context(|| format!("Could not parse {}", src.display()))?;

            let view_region = session
                .restore(&registry)
                .context("Could not restore session")?;

            (session.source().clone(), view_region)
        }
    };

    if let Some(region) = region {
        view_region
            .set_region_string(region)
            .with_context(|| format!("Invalid region: {region}"))?;
    }

    for action in actions {
        action
            .apply(&mut view_region)
            .with_context(|| format!("Could not apply action: {action}"))?;

        let interval = view_region.absolute_region();
        info!(%action, start = interval.start(), end = interval.end(), "applied action");
    }

    let mut writer = create(dst).map(Writer::new)?;

    let drawing_model = pixel_width.map(|width| LinearDrawingModel::new(&view_region, width));
    writer.write_view(&view_region, drawing_model.as_ref())?;

    if let (Some(width), Some(multiple_on_each_side)) = (pixel_width, expansion) {
        let expansion = RegionExpander::new(multiple_on_each_side)
            .context("Invalid expansion")?
            .calculate_expansion(width, &view_region)
            .context("Could not expand region")?;

        writer.write_expansion(&expansion)?;
    }

    if let Some(session_dst) = session_dst {
        let session_dst = session_dst.as_ref();
        let session = Session::capture(context_source, &view_region);

        let writer = File::create(session_dst)
            .map(BufWriter::new)
            .with_context(|| format!("Could not open {}", session_dst.display()))?;

        info!(dst = ?session_dst, "writing session");

        serde_json::to_writer_pretty(writer, &session)
            .with_context(|| format!("Could not write {}", session_dst.display()))?;
    }

    Ok(())
}
