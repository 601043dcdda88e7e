//! Page loop: extract, map and draw every selected page.

use super::{DrawFailure, PageWriter, RenderOptions, RenderReport};
use crate::error::Result;
use crate::extract::BlockExtractor;
use crate::model::Extraction;

/// Render every selected page of `extraction` through `writer`.
///
/// See [`render_document_with_progress`].
pub fn render_document<W>(
    extraction: &Extraction,
    writer: &mut W,
    options: &RenderOptions,
) -> Result<RenderReport>
where
    W: PageWriter + ?Sized,
{
    render_document_with_progress(extraction, writer, options, |_, _| {})
}

/// Render every selected page, calling `on_page(page, total)` after each one.
///
/// Pages are processed in ascending order and each is committed with
/// `show_page`. A placement the writer rejects is recorded in the report and
/// skipped; the rest of the page is still drawn. `save` is called exactly
/// once whatever happens in the page loop, and a page loop error takes
/// precedence over a save error.
pub fn render_document_with_progress<W, F>(
    extraction: &Extraction,
    writer: &mut W,
    options: &RenderOptions,
    on_page: F,
) -> Result<RenderReport>
where
    W: PageWriter + ?Sized,
    F: FnMut(u32, u32),
{
    let outcome = render_pages(extraction, writer, options, on_page);
    let saved = writer.save();

    let report = outcome?;
    saved?;
    log::info!(
        "Rendered {} pages, {} of {} placements drawn",
        report.page_count,
        report.drawn_count,
        report.placement_count
    );
    Ok(report)
}

fn render_pages<W, F>(
    extraction: &Extraction,
    writer: &mut W,
    options: &RenderOptions,
    mut on_page: F,
) -> Result<RenderReport>
where
    W: PageWriter + ?Sized,
    F: FnMut(u32, u32),
{
    let total = extraction.page_count();
    let extractor = BlockExtractor::new(extraction);
    let geometry = &options.geometry;
    let mut report = RenderReport::new();

    log::info!("Processing {} pages", total);

    for page in (1..=total).filter(|p| options.pages.includes(*p)) {
        writer.set_font(&options.font.name, options.font.size)?;

        let placements = extractor.page_blocks(page);
        log::debug!("Page {}: {} placements", page, placements.len());

        for placement in &placements {
            let position = geometry.map(placement);
            if !position.is_on_page(geometry.width, geometry.height) {
                log::debug!(
                    "Page {}: placement at ({:.1}, {:.1}) is off the page",
                    page,
                    position.x,
                    position.y
                );
            }

            match writer.draw_string(position.x, position.y, &placement.text) {
                Ok(()) => report.add_drawn(),
                Err(error) => {
                    let failure = DrawFailure::new(page, &placement.text, error);
                    log::warn!(
                        "Skipping text on page {}: {}... ({})",
                        page,
                        failure.excerpt,
                        failure.error
                    );
                    report.add_failure(failure);
                }
            }
        }

        if options.progress_interval > 0 && page % options.progress_interval == 0 {
            log::info!("Processed page {}", page);
        }

        writer.show_page()?;
        report.add_page();
        on_page(page, total);
    }

    Ok(report)
}
