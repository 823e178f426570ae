use std::io;

use clap::Parser;
use genomenav::{
    cli::Command,
    commands::{self, view::Source},
    Cli,
};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Locate(args) => {
            commands::locate(args.genome, &args.bases, &args.regions, args.output)?
        }
        Command::View(args) => {
            let source = if let Some(src) = args.session_input.as_deref() {
                Source::Session(src)
            } else if let Some(src) = args.regions.as_deref() {
                Source::Regions {
                    src,
                    name: "regions",
                    flanking_strategy: args.flanking.strategy(),
                }
            } else {
                Source::Genome
            };

            commands::view(
                &args.genome,
                source,
                args.region.as_deref(),
                &args.actions,
                args.pixel_width,
                args.expansion,
                args.session_output.as_deref(),
                None,
            )?;
        }
        Command::RegionSet(args) => commands::region_set(
            args.genome,
            args.features,
            &args.name,
            args.flanking.strategy(),
            args.output,
            args.record_output,
        )?,
    }

    Ok(())
}
