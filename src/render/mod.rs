//! Rendering module: page geometry, page writers and the render driver.

mod driver;
mod geometry;
mod options;
pub mod pdf;
mod result;
mod writer;

pub use driver::{render_document, render_document_with_progress};
pub use geometry::{map_to_absolute, PageGeometry, INCH};
pub use options::{FontSpec, PageSelection, RenderOptions};
pub use pdf::PdfPageWriter;
pub use result::{DrawFailure, RenderReport};
pub use writer::PageWriter;
