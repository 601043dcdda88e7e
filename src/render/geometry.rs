//! Mapping normalized line geometry onto the output page.

use crate::model::{AbsolutePosition, TextPlacement};

/// Points per inch.
pub const INCH: f64 = 72.0;

/// Output page size and margin, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f64,

    /// Page height
    pub height: f64,

    /// Inset applied on every side
    pub margin: f64,
}

impl PageGeometry {
    /// Create a geometry with the given size and margin.
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// A4 (210 x 297 mm) with a one-inch margin.
    pub fn a4() -> Self {
        Self::new(595.0, 842.0, INCH)
    }

    /// US Letter (8.5 x 11 inches) with a one-inch margin.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0, INCH)
    }

    /// Replace the margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Map a placement onto this page.
    pub fn map(&self, placement: &TextPlacement) -> AbsolutePosition {
        map_to_absolute(placement, self.width, self.height, self.margin)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Convert a placement's normalized position to page coordinates.
///
/// The extraction measures `top` downward from the page top while PDF
/// coordinates grow upward, so `y = height - top * height - margin`. Only
/// one margin is subtracted vertically. Horizontally the band between the
/// left and right margins is scaled by `left`. Results are not clamped.
pub fn map_to_absolute(
    placement: &TextPlacement,
    page_width: f64,
    page_height: f64,
    margin: f64,
) -> AbsolutePosition {
    let y = page_height - (placement.top * page_height) - margin;
    let x = margin + placement.left * (page_width - 2.0 * margin);
    AbsolutePosition::new(x, y)
}
