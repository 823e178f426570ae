//! Conversions between absolute bases and pixels of a drawing surface.

use crate::{
    displayed_region::DisplayedRegionModel, interval::ChromosomeInterval,
    navigation_context::OutOfRangeError,
};

/// Maps the view region of a [`DisplayedRegionModel`] onto a surface `pixel_width` pixels wide.
///
/// The view region is always at least one base wide, so none of the conversions divide by zero.
#[derive(Clone, Copy, Debug)]
pub struct LinearDrawingModel<'a> {
    view_region: &'a DisplayedRegionModel,
    pixel_width: f64,
}

impl<'a> LinearDrawingModel<'a> {
    pub fn new(view_region: &'a DisplayedRegionModel, pixel_width: f64) -> Self {
        Self {
            view_region,
            pixel_width,
        }
    }

    pub fn view_region(&self) -> &'a DisplayedRegionModel {
        self.view_region
    }

    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    fn view_start(&self) -> f64 {
        self.view_region.absolute_region().start() as f64
    }

    fn view_width(&self) -> f64 {
        self.view_region.width() as f64
    }

    pub fn bases_to_pixel_width(&self, bases: f64) -> f64 {
        bases * self.pixel_width / self.view_width()
    }

    pub fn pixel_width_to_bases(&self, pixels: f64) -> f64 {
        pixels * self.view_width() / self.pixel_width
    }

    pub fn base_to_pixel(&self, base: f64) -> f64 {
        (base - self.view_start()) * self.pixel_width / self.view_width()
    }

    pub fn pixel_to_base(&self, pixel: f64) -> f64 {
        pixel * self.view_width() / self.pixel_width + self.view_start()
    }

    /// Returns the single-base genomic locus drawn at a pixel.
    pub fn pixel_to_genome_coordinate(
        &self,
        pixel: f64,
    ) -> Result<ChromosomeInterval, OutOfRangeError> {
        let base = self.pixel_to_base(pixel).floor() as i64;

        self.view_region
            .navigation_context()
            .absolute_to_feature_coordinate(base)
            .map(|coordinate| coordinate.genome_coordinates())
    }
}
