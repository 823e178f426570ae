//! Expansion of view regions for off-screen drawing.

use std::ops::Range;

use thiserror::Error;

use crate::displayed_region::{DisplayedRegionModel, RangeError};

/// Widens view regions by a multiple of their width on each side.
///
/// A view drawn over an expanded region can be scrolled without fetching data at every step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionExpander {
    multiple_on_each_side: f64,
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("invalid expansion multiple: {0}")]
pub struct InvalidMultipleError(pub f64);

/// The result of [`RegionExpander::calculate_expansion`].
#[derive(Clone, Debug, PartialEq)]
pub struct Expansion {
    /// The pixel width of the expanded view.
    pub width: f64,
    /// The expanded region.
    pub view_region: DisplayedRegionModel,
    /// The pixels of the expanded view that show the unexpanded region.
    pub view_window: Range<f64>,
}

impl RegionExpander {
    pub const DEFAULT_EXPANSION: f64 = 1.0;

    /// Creates an expander that adds `multiple_on_each_side` region widths to each side.
    ///
    /// The multiple must be finite and non-negative.
    pub fn new(multiple_on_each_side: f64) -> Result<Self, InvalidMultipleError> {
        // This also rejects NaN.
        if multiple_on_each_side.is_finite() && multiple_on_each_side >= 0.0 {
            Ok(Self {
                multiple_on_each_side,
            })
        } else {
            Err(InvalidMultipleError(multiple_on_each_side))
        }
    }

    /// Creates an expander that does not expand.
    pub fn identity() -> Self {
        Self {
            multiple_on_each_side: 0.0,
        }
    }

    pub fn multiple_on_each_side(&self) -> f64 {
        self.multiple_on_each_side
    }

    pub fn zoom_ratio(&self) -> f64 {
        2.0 * self.multiple_on_each_side + 1.0
    }

    pub fn make_expanded_region(
        &self,
        region: &DisplayedRegionModel,
    ) -> Result<DisplayedRegionModel, RangeError> {
        let mut expanded_region = region.clone();
        expanded_region.zoom(self.zoom_ratio(), 0.5)?;
        Ok(expanded_region)
    }

    /// Expands a region drawn `width` pixels wide.
    ///
    /// Near the edges of the context, the expansion is lopsided, so the view window is not
    /// necessarily centered.
    pub fn calculate_expansion(
        &self,
        width: f64,
        region: &DisplayedRegionModel,
    ) -> Result<Expansion, RangeError> {
        let pixels_per_base = width / region.width() as f64;
        let view_region = self.make_expanded_region(region)?;
        let expanded_width = view_region.width() as f64 * pixels_per_base;

        let original = region.absolute_region();
        let expanded = view_region.absolute_region();
        let left_base_diff = (original.start() - expanded.start()) as f64;
        let right_base_diff = (expanded.end() - original.end()) as f64;

        let left_extra_pixels = left_base_diff * pixels_per_base;
        let right_extra_pixels = right_base_diff * pixels_per_base;

        Ok(Expansion {
            width: expanded_width,
            view_region,
            view_window: left_extra_pixels..expanded_width - right_extra_pixels,
        })
    }
}

impl Default for RegionExpander {
    fn default() -> Self {
        Self {
            multiple_on_each_side: Self::DEFAULT_EXPANSION,
        }
    }
}
