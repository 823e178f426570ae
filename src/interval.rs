//! Half-open intervals over absolute, genomic, and feature-relative coordinates.

mod chromosome_interval;
mod feature_interval;
mod open_interval;

pub use self::{
    chromosome_interval::{ChromosomeInterval, ParseChromosomeIntervalError},
    feature_interval::FeatureInterval,
    open_interval::{InvalidIntervalError, OpenInterval},
};
