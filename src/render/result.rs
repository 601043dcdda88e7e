//! Render report with per-placement draw failures.

use crate::error::DrawError;
use serde::Serialize;

/// Number of characters of a failed line kept in its report entry.
const EXCERPT_CHARS: usize = 50;

/// Outcome of rendering an extraction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderReport {
    /// Number of pages committed
    pub page_count: u32,

    /// Placements produced by extraction across rendered pages
    pub placement_count: u32,

    /// Placements successfully drawn
    pub drawn_count: u32,

    /// Placements skipped because the writer rejected them
    pub failures: Vec<DrawFailure>,
}

impl RenderReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed page.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Record a successful draw.
    pub fn add_drawn(&mut self) {
        self.placement_count += 1;
        self.drawn_count += 1;
    }

    /// Record a skipped placement.
    pub fn add_failure(&mut self, failure: DrawFailure) {
        self.placement_count += 1;
        self.failures.push(failure);
    }

    /// Whether every placement was drawn.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of skipped placements.
    pub fn skipped_count(&self) -> usize {
        self.failures.len()
    }
}

/// A placement the writer could not draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawFailure {
    /// Page the placement belonged to
    pub page: u32,

    /// Leading characters of the placement text
    pub excerpt: String,

    /// Why the writer rejected it
    #[serde(serialize_with = "serialize_display")]
    pub error: DrawError,
}

impl DrawFailure {
    /// Create a failure entry, truncating the text to an excerpt.
    pub fn new(page: u32, text: &str, error: DrawError) -> Self {
        Self {
            page,
            excerpt: text.chars().take(EXCERPT_CHARS).collect(),
            error,
        }
    }
}

fn serialize_display<S: serde::Serializer>(
    error: &DrawError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
