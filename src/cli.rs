use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use git_testament::{git_testament, render_testament};

use crate::{
    commands::view::Action,
    flanking_strategy::{FlankingStrategy, FlankingType},
};

git_testament!(TESTAMENT);

#[derive(Parser)]
#[command(version = render_testament!(TESTAMENT))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert absolute bases and region strings to feature coordinates.
    Locate(Locate),
    /// Apply navigation actions to a view and print the resulting region.
    View(View),
    /// Build a navigation context from a list of regions.
    RegionSet(RegionSet),
}

#[derive(Args)]
pub struct Flanking {
    /// Part of each region to surround.
    #[arg(long, default_value_t = FlankingType::SurroundAll)]
    pub flanking_type: FlankingType,

    /// Number of bases to extend upstream.
    #[arg(long, default_value_t = 0)]
    pub upstream: u64,

    /// Number of bases to extend downstream.
    #[arg(long, default_value_t = 0)]
    pub downstream: u64,
}

impl Flanking {
    pub fn strategy(&self) -> FlankingStrategy {
        FlankingStrategy::new(self.flanking_type, self.upstream, self.downstream)
    }
}

#[derive(Parser)]
pub struct Locate {
    /// Input chromosome sizes (`chrom.sizes`).
    #[arg(short = 'g', long)]
    pub genome: PathBuf,

    /// Output destination. Defaults to stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Absolute base (0-based) to convert to a feature coordinate.
    #[arg(short = 'b', long = "base")]
    pub bases: Vec<i64>,

    /// Region strings (e.g., `chr1:1000-2000` or a bare chromosome name).
    #[arg(required_unless_present = "bases")]
    pub regions: Vec<String>,
}

#[derive(Parser)]
pub struct View {
    /// Input chromosome sizes (`chrom.sizes`).
    #[arg(short = 'g', long)]
    pub genome: PathBuf,

    /// Input regions (BED). Views the region set instead of the whole genome.
    #[arg(long, conflicts_with = "session_input")]
    pub regions: Option<PathBuf>,

    #[command(flatten)]
    pub flanking: Flanking,

    /// Initial region (e.g., `chr1:1000-2000`).
    #[arg(short = 'r', long)]
    pub region: Option<String>,

    /// Navigation action: `pan=BASES`, `zoom=FACTOR[@FOCAL_POINT]`, or `set=REGION`.
    #[arg(short = 'x', long = "action")]
    pub actions: Vec<Action>,

    /// Width of the drawing surface, in pixels.
    #[arg(long)]
    pub pixel_width: Option<f64>,

    /// Region widths to expand on each side for off-screen drawing. Requires a pixel width.
    #[arg(long, requires = "pixel_width")]
    pub expansion: Option<f64>,

    /// Restore the view from a session file.
    #[arg(long)]
    pub session_input: Option<PathBuf>,

    /// Save the resulting view to a session file.
    #[arg(long)]
    pub session_output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RegionSet {
    /// Input chromosome sizes (`chrom.sizes`).
    #[arg(short = 'g', long)]
    pub genome: PathBuf,

    /// Region set name.
    #[arg(short = 'n', long, default_value_t = String::from("regions"))]
    pub name: String,

    #[command(flatten)]
    pub flanking: Flanking,

    /// Output destination for the context layout. Defaults to stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output destination for the serialized region set (JSON).
    #[arg(long)]
    pub record_output: Option<PathBuf>,

    /// Input regions (BED).
    pub features: PathBuf,
}
