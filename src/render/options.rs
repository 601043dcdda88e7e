//! Rendering options and configuration.

use super::PageGeometry;
use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Options for rendering an extraction to pages.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output page size and margin
    pub geometry: PageGeometry,

    /// Font set at the start of every page
    pub font: FontSpec,

    /// Page selection
    pub pages: PageSelection,

    /// Log a progress line every this many pages (0 = never)
    pub progress_interval: u32,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the page font.
    pub fn with_font(mut self, name: impl Into<String>, size: f64) -> Self {
        self.font = FontSpec::new(name, size);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.pages = selection;
        self
    }

    /// Set page range to render.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.pages = PageSelection::Range(range);
        self
    }

    /// Set the progress log interval.
    pub fn with_progress_interval(mut self, pages: u32) -> Self {
        self.progress_interval = pages;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            font: FontSpec::default(),
            pages: PageSelection::All,
            progress_interval: 10,
        }
    }
}

/// Font name and size in points.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub name: String,
    pub size: f64,
}

impl FontSpec {
    /// Create a font spec.
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Helvetica", 12.0)
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed)
    Pages(Vec<u32>),
    /// Render several ranges; sorted, non-overlapping and non-adjacent
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
            PageSelection::Ranges(ranges) => {
                let after = ranges.partition_point(|r| *r.end() < page);
                ranges.get(after).is_some_and(|r| r.contains(&page))
            }
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let page = |p: &str| -> Result<u32> {
            p.trim()
                .parse()
                .map_err(|_| Error::InvalidPageRange(format!("invalid page number '{}'", p.trim())))
        };

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = (page(start)?, page(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let range = match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (page(start)?, page(end)?);
                    if start > end {
                        return Err(Error::InvalidPageRange(part.trim().to_string()));
                    }
                    start..=end
                }
                None => {
                    let p = page(part)?;
                    p..=p
                }
            };
            ranges.push(range);
        }

        Ok(PageSelection::Ranges(merge_ranges(ranges)))
    }
}

/// Sort ranges and merge the ones that overlap or touch.
fn merge_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_by_key(|r| *r.start());

    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_geometry(PageGeometry::letter())
            .with_font("Courier", 10.0)
            .with_progress_interval(5);

        assert_eq!(options.geometry, PageGeometry::letter());
        assert_eq!(options.font, FontSpec::new("Courier", 10.0));
        assert_eq!(options.progress_interval, 5);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.geometry, PageGeometry::a4());
        assert_eq!(options.font.name, "Helvetica");
        assert_eq!(options.font.size, 12.0);
        assert_eq!(options.progress_interval, 10);
        assert!(matches!(options.pages, PageSelection::All));
    }

    #[test]
    fn test_page_selection_includes() {
        let all = PageSelection::All;
        assert!(all.includes(1));
        assert!(all.includes(100));

        let range = PageSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let pages = PageSelection::Pages(vec![1, 3, 5, 7]);
        assert!(pages.includes(1));
        assert!(!pages.includes(2));
        assert!(pages.includes(3));
    }

    #[test]
    fn test_page_selection_parse() {
        let all = PageSelection::parse("all").unwrap();
        assert!(matches!(all, PageSelection::All));

        let range = PageSelection::parse("1-10").unwrap();
        assert!(matches!(range, PageSelection::Range(_)));

        let mixed = PageSelection::parse("1,3,5-7,10").unwrap();
        if let PageSelection::Ranges(ranges) = &mixed {
            assert_eq!(ranges, &vec![1..=1, 3..=3, 5..=7, 10..=10]);
        } else {
            panic!("Expected Ranges variant");
        }
        let included: Vec<u32> = (0..=11).filter(|p| mixed.includes(*p)).collect();
        assert_eq!(included, vec![1, 3, 5, 6, 7, 10]);

        let overlapping = PageSelection::parse("8-9, 2, 1-3, 4").unwrap();
        assert!(matches!(
            overlapping,
            PageSelection::Ranges(ref r) if *r == vec![1..=4, 8..=9]
        ));
    }

    #[test]
    fn test_page_selection_large_list_range() {
        let pages = PageSelection::parse("1,1-4000000000").unwrap();
        assert!(matches!(
            pages,
            PageSelection::Ranges(ref r) if *r == vec![1..=4_000_000_000]
        ));
        assert!(pages.includes(3_999_999_999));
        assert!(!pages.includes(4_000_000_001));
    }

    #[test]
    fn test_page_selection_parse_errors() {
        assert!(matches!(
            PageSelection::parse("x-3"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(matches!(
            PageSelection::parse("9-2"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(matches!(
            PageSelection::parse("1,9-2"),
            Err(Error::InvalidPageRange(ref m)) if m == "9-2"
        ));
        assert!(PageSelection::parse("1,,2").is_err());
    }
}
