//! Per-page line selection and ordering.

use super::clean_text;
use crate::model::{Extraction, TextPlacement};

/// Selects, cleans and orders the text lines of an extraction page by page.
#[derive(Debug, Clone, Copy)]
pub struct BlockExtractor<'a> {
    extraction: &'a Extraction,
}

impl<'a> BlockExtractor<'a> {
    /// Create an extractor over a loaded extraction.
    pub fn new(extraction: &'a Extraction) -> Self {
        Self { extraction }
    }

    /// Ordered placements for one page (1-indexed).
    ///
    /// Only LINE blocks on `page_number` are considered. Lines whose cleaned
    /// text is empty are dropped. The result is sorted by `top`; lines with
    /// equal `top` keep the order in which the extraction lists them.
    pub fn page_blocks(&self, page_number: u32) -> Vec<TextPlacement> {
        let mut placements: Vec<TextPlacement> = self
            .extraction
            .lines()
            .filter(|block| block.page == Some(page_number))
            .filter_map(|block| {
                let text = clean_text(block.text.as_deref());
                if text.is_empty() {
                    return None;
                }
                Some(TextPlacement::new(text, block.top(), block.left()))
            })
            .collect();

        // stable
        placements.sort_by(|a, b| a.top.total_cmp(&b.top));
        placements
    }

    /// Lazily yield `(page_number, placements)` for pages 1..=page_count.
    pub fn pages(&self) -> impl Iterator<Item = (u32, Vec<TextPlacement>)> + 'a {
        let extractor = *self;
        (1..=self.extraction.page_count()).map(move |page| (page, extractor.page_blocks(page)))
    }
}

/// Ordered placements for one page of `extraction`.
pub fn extract_page_blocks(extraction: &Extraction, page_number: u32) -> Vec<TextPlacement> {
    BlockExtractor::new(extraction).page_blocks(page_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockType, ExtractionBlock};

    fn texts(placements: &[TextPlacement]) -> Vec<&str> {
        placements.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_filters_page_and_type() {
        let mut extraction = Extraction::new(2);
        extraction.add_block(ExtractionBlock::line(1, "one", 0.1, 0.0));
        extraction.add_block(ExtractionBlock::line(2, "two", 0.1, 0.0));
        extraction.add_block(ExtractionBlock::line(1, "word", 0.2, 0.0).with_type(BlockType::Word));
        extraction.add_block(ExtractionBlock::line(1, "cell", 0.3, 0.0).with_type(BlockType::Cell));

        let page1 = extract_page_blocks(&extraction, 1);
        assert_eq!(texts(&page1), vec!["one"]);

        let page2 = extract_page_blocks(&extraction, 2);
        assert_eq!(texts(&page2), vec!["two"]);
    }

    #[test]
    fn test_empty_page() {
        let extraction = Extraction::new(3);
        assert!(extract_page_blocks(&extraction, 3).is_empty());
        assert!(extract_page_blocks(&extraction, 99).is_empty());
    }

    #[test]
    fn test_sorted_by_top_and_stable() {
        let mut extraction = Extraction::new(1);
        extraction.add_block(ExtractionBlock::line(1, "bottom", 0.9, 0.1));
        extraction.add_block(ExtractionBlock::line(1, "A", 0.5, 0.6));
        extraction.add_block(ExtractionBlock::line(1, "top", 0.05, 0.1));
        extraction.add_block(ExtractionBlock::line(1, "B", 0.5, 0.1));

        let blocks = extract_page_blocks(&extraction, 1);
        assert_eq!(texts(&blocks), vec!["top", "A", "B", "bottom"]);
    }

    #[test]
    fn test_drops_empty_after_cleaning() {
        let mut extraction = Extraction::new(1);
        extraction.add_block(ExtractionBlock::line(1, "  ", 0.1, 0.0));
        extraction.add_block(ExtractionBlock::line(1, "**", 0.2, 0.0));
        let mut missing = ExtractionBlock::line(1, "", 0.3, 0.0);
        missing.text = None;
        extraction.add_block(missing);
        extraction.add_block(ExtractionBlock::line(1, "kept", 0.4, 0.0));

        let blocks = extract_page_blocks(&extraction, 1);
        assert_eq!(texts(&blocks), vec!["kept"]);
    }

    #[test]
    fn test_missing_geometry_defaults_to_zero() {
        let mut extraction = Extraction::new(1);
        extraction.add_block(ExtractionBlock::line(1, "later", 0.3, 0.4));
        let mut block = ExtractionBlock::line(1, "no geometry", 0.0, 0.0);
        block.geometry = Default::default();
        extraction.add_block(block);

        let blocks = extract_page_blocks(&extraction, 1);
        assert_eq!(blocks[0], TextPlacement::new("no geometry", 0.0, 0.0));
        assert_eq!(blocks[1].text, "later");
    }

    #[test]
    fn test_pages_iterator() {
        let mut extraction = Extraction::new(3);
        extraction.add_block(ExtractionBlock::line(2, "middle", 0.1, 0.0));

        let pages: Vec<_> = BlockExtractor::new(&extraction).pages().collect();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].0, 1);
        assert!(pages[0].1.is_empty());
        assert_eq!(texts(&pages[1].1), vec!["middle"]);
    }
}
