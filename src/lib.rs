//! Navigation and coordinate mapping for genome browsers.
//!
//! A [`NavigationContext`] concatenates features (chromosomes, genes, or user regions) into one
//! absolute coordinate space. A [`DisplayedRegionModel`] is a view window over a context, and a
//! [`LinearDrawingModel`] maps that window onto pixels. A [`RegionSet`] derives new contexts from
//! curated, optionally flanked, feature lists.

pub mod bed;
pub mod cli;
pub mod commands;
pub mod displayed_region;
pub mod feature;
pub mod flanking_strategy;
pub mod genome;
pub mod interval;
pub mod linear_drawing_model;
pub mod navigation_context;
mod reader;
pub mod region_expander;
pub mod region_set;
pub mod session;
pub mod writer;

pub use self::{
    cli::Cli,
    displayed_region::DisplayedRegionModel,
    feature::{Feature, Strand},
    flanking_strategy::{FlankingStrategy, FlankingType},
    genome::{Genome, Registry},
    interval::{ChromosomeInterval, FeatureInterval, OpenInterval},
    linear_drawing_model::LinearDrawingModel,
    navigation_context::NavigationContext,
    region_expander::RegionExpander,
    region_set::RegionSet,
    session::Session,
};
