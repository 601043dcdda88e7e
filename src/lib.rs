//! # repdf
//!
//! Rebuild a paged PDF from an OCR line extraction.
//!
//! The input is a Textract-style `AnalyzeDocument` response: a page count
//! and a flat list of blocks, each LINE block carrying its text and a
//! bounding box normalized to its page. Every page's lines are cleaned,
//! ordered top to bottom and drawn at the matching position on a new page,
//! so the output keeps the approximate layout of the scanned original.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> repdf::Result<()> {
//!     let report = repdf::reconstruct_file("analyzeDocResponse.json", "book.pdf")?;
//!     println!("{} pages, {} lines skipped", report.page_count, report.skipped_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`extract`]: select, clean and order one page's LINE blocks
//! - [`render::PageGeometry`]: map normalized positions to PDF points
//! - [`render::PageWriter`]: draw strings and commit pages
//! - [`render::render_document`]: drive the page loop and collect a report

pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{DrawError, Error, Result};
pub use extract::{clean_text, extract_page_blocks, BlockExtractor};
pub use model::{
    AbsolutePosition, BlockType, Extraction, ExtractionBlock, ExtractionSummary, FieldKind,
    FieldSpec, FieldValue, LayoutSchema, LayoutTable, TextPlacement,
};
pub use parser::{load_extraction, load_extraction_bytes, load_layout_table};
pub use render::{
    map_to_absolute, render_document, FontSpec, PageGeometry, PageSelection, PageWriter,
    PdfPageWriter, RenderOptions, RenderReport,
};

use std::path::Path;

/// Rebuild a PDF from an extraction file with default options.
///
/// # Example
///
/// ```no_run
/// let report = repdf::reconstruct_file("response.json", "out.pdf").unwrap();
/// assert!(report.page_count > 0);
/// ```
pub fn reconstruct_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<RenderReport> {
    Repdf::new().load(input)?.write_pdf(output)
}

/// Render an extraction into an in-memory PDF.
pub fn to_pdf_bytes(
    extraction: &Extraction,
    options: &RenderOptions,
) -> Result<(Vec<u8>, RenderReport)> {
    let mut writer = PdfPageWriter::new(Vec::new(), options.geometry);
    let report = render_document(extraction, &mut writer, options)?;
    Ok((writer.into_inner(), report))
}

/// Load an extraction and its layout table, then write the PDF.
///
/// Any failure is logged and reported as `false`; individual lines that
/// cannot be drawn do not count as failures.
pub fn process_document<P, Q, R>(input: P, layout: Q, output: R) -> bool
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    log::info!("Starting document reconstruction");
    let result = Repdf::new()
        .load_with_layout(input, layout)
        .and_then(|job| job.write_pdf(&output));

    match result {
        Ok(report) => {
            log::info!("PDF written: {}", output.as_ref().display());
            if !report.is_clean() {
                log::warn!("{} lines could not be drawn", report.skipped_count());
            }
            true
        }
        Err(e) => {
            log::error!("Reconstruction failed: {}", e);
            false
        }
    }
}

/// Builder for loading an extraction and rendering it.
///
/// # Example
///
/// ```no_run
/// use repdf::{PageGeometry, Repdf};
///
/// let report = Repdf::new()
///     .with_geometry(PageGeometry::letter())
///     .with_font("Times-Roman", 11.0)
///     .load_with_layout("response.json", "layout.csv")?
///     .write_pdf("book.pdf")?;
/// # Ok::<(), repdf::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Repdf {
    render_options: RenderOptions,
    layout_schema: LayoutSchema,
}

impl Repdf {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.render_options = self.render_options.with_geometry(geometry);
        self
    }

    /// Set the font used on every page.
    pub fn with_font(mut self, name: impl Into<String>, size: f64) -> Self {
        self.render_options = self.render_options.with_font(name, size);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Set the schema used to validate the layout table.
    pub fn with_layout_schema(mut self, schema: LayoutSchema) -> Self {
        self.layout_schema = schema;
        self
    }

    /// Load an extraction file.
    pub fn load<P: AsRef<Path>>(self, input: P) -> Result<RepdfJob> {
        let extraction = load_extraction(input)?;
        Ok(self.job(extraction, None))
    }

    /// Load an extraction file together with its layout table.
    pub fn load_with_layout<P: AsRef<Path>, Q: AsRef<Path>>(
        self,
        input: P,
        layout: Q,
    ) -> Result<RepdfJob> {
        let extraction = load_extraction(input)?;
        let table = load_layout_table(layout, &self.layout_schema)?;
        Ok(self.job(extraction, Some(table)))
    }

    /// Load an extraction from JSON bytes.
    pub fn load_bytes(self, data: &[u8]) -> Result<RepdfJob> {
        let extraction = load_extraction_bytes(data)?;
        Ok(self.job(extraction, None))
    }

    fn job(self, extraction: Extraction, layout: Option<LayoutTable>) -> RepdfJob {
        RepdfJob {
            extraction,
            layout,
            render_options: self.render_options,
        }
    }
}

/// A loaded extraction ready to be rendered.
#[derive(Debug, Clone)]
pub struct RepdfJob {
    /// The loaded extraction
    pub extraction: Extraction,
    /// Layout table, when one was loaded
    pub layout: Option<LayoutTable>,
    render_options: RenderOptions,
}

impl RepdfJob {
    /// Render options in effect.
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Write the PDF to a file.
    pub fn write_pdf<P: AsRef<Path>>(&self, output: P) -> Result<RenderReport> {
        let mut writer = PdfPageWriter::create(output, self.render_options.geometry)?;
        render_document(&self.extraction, &mut writer, &self.render_options)
    }

    /// Render the PDF into memory.
    pub fn to_pdf_bytes(&self) -> Result<(Vec<u8>, RenderReport)> {
        to_pdf_bytes(&self.extraction, &self.render_options)
    }

    /// Ordered placements for one page.
    pub fn page_blocks(&self, page_number: u32) -> Vec<TextPlacement> {
        extract_page_blocks(&self.extraction, page_number)
    }

    /// Block counts of the loaded extraction.
    pub fn summary(&self) -> ExtractionSummary {
        self.extraction.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = br#"{
        "DocumentMetadata": { "Pages": 1 },
        "Blocks": [
            { "BlockType": "LINE", "Page": 1, "Text": "Hello *World*",
              "Geometry": { "BoundingBox": { "Top": 0.1, "Left": 0.2 } } }
        ]
    }"#;

    #[test]
    fn test_builder_defaults() {
        let builder = Repdf::default();
        assert_eq!(builder.render_options.geometry, PageGeometry::a4());
        assert_eq!(builder.layout_schema, LayoutSchema::textract());
    }

    #[test]
    fn test_builder_chained() {
        let builder = Repdf::new()
            .with_geometry(PageGeometry::letter())
            .with_font("Courier", 8.0)
            .with_pages(PageSelection::Pages(vec![2]));

        assert_eq!(builder.render_options.geometry, PageGeometry::letter());
        assert_eq!(builder.render_options.font, FontSpec::new("Courier", 8.0));
        assert!(!builder.render_options.pages.includes(1));
    }

    #[test]
    fn test_load_bytes_and_render() {
        let job = Repdf::new().load_bytes(SAMPLE).unwrap();
        assert!(job.layout.is_none());
        assert_eq!(job.page_blocks(1)[0].text, "HelloWorld");

        let (pdf, report) = job.to_pdf_bytes().unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert_eq!(report.page_count, 1);
        assert_eq!(report.drawn_count, 1);
    }

    #[test]
    fn test_load_invalid_bytes() {
        let result = Repdf::new().load_bytes(b"{ not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_process_document_missing_input() {
        assert!(!process_document(
            "missing.json",
            "missing.csv",
            std::env::temp_dir().join("repdf-never-written.pdf")
        ));
    }
}
