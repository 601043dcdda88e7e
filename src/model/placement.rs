//! Derived render values.

use serde::{Deserialize, Serialize};

/// A cleaned line of text with its normalized page position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPlacement {
    /// Cleaned, non-empty text
    pub text: String,

    /// Distance from the page top as a fraction of page height
    pub top: f64,

    /// Distance from the page left edge as a fraction of page width
    pub left: f64,
}

impl TextPlacement {
    /// Create a new placement.
    pub fn new(text: impl Into<String>, top: f64, left: f64) -> Self {
        Self {
            text: text.into(),
            top,
            left,
        }
    }
}

/// A point on the output page, origin bottom-left, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AbsolutePosition {
    pub x: f64,
    pub y: f64,
}

impl AbsolutePosition {
    /// Create a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether the point falls inside a `width` x `height` page.
    pub fn is_on_page(&self, width: f64, height: f64) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }
}
