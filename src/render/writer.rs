//! Page writer capability used by the render driver.

use crate::error::{DrawError, Result};

/// An append-only paged document under construction.
///
/// Pages are built one at a time: set a font, draw strings at absolute
/// positions, then [`show_page`](PageWriter::show_page) commits the page.
/// [`save`](PageWriter::save) finalizes the document and must be called
/// exactly once.
pub trait PageWriter {
    /// Select the font used by subsequent draws on the current page.
    fn set_font(&mut self, name: &str, size: f64) -> Result<()>;

    /// Draw `text` with its baseline starting at (`x`, `y`).
    ///
    /// A failure only concerns this string; the page stays usable.
    fn draw_string(&mut self, x: f64, y: f64, text: &str) -> std::result::Result<(), DrawError>;

    /// Commit the current page and start a new one.
    fn show_page(&mut self) -> Result<()>;

    /// Finalize the document and release the output.
    fn save(&mut self) -> Result<()>;
}
