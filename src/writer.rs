//! Tab-delimited output.

use std::io::{self, Write};

use crate::{
    displayed_region::DisplayedRegionModel,
    interval::{FeatureInterval, OpenInterval},
    linear_drawing_model::LinearDrawingModel,
    navigation_context::{FeatureCoordinate, NavigationContext},
    region_expander::Expansion,
};

pub struct Writer<W> {
    inner: W,
}

impl<W> Writer<W>
where
    W: Write,
{
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Writes where each feature of a context lies, both genomically and absolutely.
    ///
    /// Columns are name, chromosome, start, end, strand, absolute start, and absolute end.
    pub fn write_context_layout(&mut self, context: &NavigationContext) -> io::Result<()> {
        for (feature, &start) in context.features().iter().zip(context.feature_starts()) {
            let locus = feature.locus();
            let end = start + feature.len();

            writeln!(
                self.inner,
                "{}\t{}\t{}\t{}\t{}\t{start}\t{end}",
                feature.name(),
                locus.chr(),
                locus.start(),
                locus.end(),
                feature.strand(),
            )?;
        }

        Ok(())
    }

    /// Writes feature intervals as name, relative start, relative end, and genomic locus.
    pub fn write_feature_intervals(&mut self, intervals: &[FeatureInterval<'_>]) -> io::Result<()> {
        for interval in intervals {
            writeln!(
                self.inner,
                "{}\t{}\t{}\t{}",
                interval.name(),
                interval.relative_start(),
                interval.relative_end(),
                interval.genome_coordinates(),
            )?;
        }

        Ok(())
    }

    pub fn write_absolute_interval(&mut self, interval: &OpenInterval) -> io::Result<()> {
        writeln!(
            self.inner,
            "absolute\t{}\t{}",
            interval.start(),
            interval.end()
        )
    }

    pub fn write_feature_coordinate(
        &mut self,
        base: i64,
        coordinate: &FeatureCoordinate<'_>,
    ) -> io::Result<()> {
        writeln!(
            self.inner,
            "{base}\t{}\t{}\t{}",
            coordinate.name(),
            coordinate.position(),
            coordinate.genome_coordinates(),
        )
    }

    /// Writes a summary of a view: its region, width, and the genomic loci it shows.
    pub fn write_view(
        &mut self,
        view_region: &DisplayedRegionModel,
        drawing_model: Option<&LinearDrawingModel<'_>>,
    ) -> io::Result<()> {
        let context = view_region.navigation_context();
        let interval = view_region.absolute_region();

        if let Ok(region) = context.format_region(&interval) {
            writeln!(self.inner, "region\t{region}")?;
        }

        self.write_absolute_interval(&interval)?;
        writeln!(self.inner, "width\t{}", view_region.width())?;

        if let Some(drawing_model) = drawing_model {
            writeln!(
                self.inner,
                "bases_per_pixel\t{}",
                drawing_model.pixel_width_to_bases(1.0)
            )?;
        }

        for locus in view_region.genome_intervals() {
            writeln!(self.inner, "locus\t{locus}")?;
        }

        Ok(())
    }

    /// Writes the expanded region and the pixels that show the unexpanded region.
    pub fn write_expansion(&mut self, expansion: &Expansion) -> io::Result<()> {
        let interval = expansion.view_region.absolute_region();

        writeln!(
            self.inner,
            "expanded\t{}\t{}\t{}",
            interval.start(),
            interval.end(),
            expansion.width
        )?;

        writeln!(
            self.inner,
            "view_window\t{}\t{}",
            expansion.view_window.start, expansion.view_window.end
        )
    }
}
