//! Extraction tree as produced by a Textract-style `AnalyzeDocument` call.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A recognized document: page count plus a flat list of blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Extraction {
    /// Document-level metadata
    #[serde(default)]
    pub document_metadata: DocumentMetadata,

    /// All recognized blocks, in the order the service emitted them
    #[serde(default)]
    pub blocks: Vec<ExtractionBlock>,
}

impl Extraction {
    /// Create an empty extraction declaring `pages` pages.
    pub fn new(pages: u32) -> Self {
        Self {
            document_metadata: DocumentMetadata { pages },
            blocks: Vec::new(),
        }
    }

    /// Declared number of pages.
    pub fn page_count(&self) -> u32 {
        self.document_metadata.pages
    }

    /// Add a block.
    pub fn add_block(&mut self, block: ExtractionBlock) {
        self.blocks.push(block);
    }

    /// Iterate over the recognized text lines, in encounter order.
    pub fn lines(&self) -> impl Iterator<Item = &ExtractionBlock> {
        self.blocks.iter().filter(|b| b.is_line())
    }

    /// Summarize block counts for reporting.
    pub fn summary(&self) -> ExtractionSummary {
        let mut summary = ExtractionSummary {
            page_count: self.page_count(),
            block_count: self.blocks.len(),
            ..Default::default()
        };

        for block in &self.blocks {
            *summary
                .blocks_by_type
                .entry(block.block_type.as_str().to_string())
                .or_insert(0) += 1;

            if block.is_line() {
                summary.line_count += 1;
                if let Some(page) = block.page {
                    *summary.lines_per_page.entry(page).or_insert(0) += 1;
                }
            }
        }

        summary
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    /// Total number of pages in the source document
    #[serde(default)]
    pub pages: u32,
}

/// One block of the extraction tree.
///
/// Only [`BlockType::Line`] blocks carry renderable text; words, tables and
/// the rest of the taxonomy are kept so that summaries stay faithful.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractionBlock {
    /// Source page (1-indexed). Blocks without a page match no page.
    #[serde(default)]
    pub page: Option<u32>,

    /// Block kind
    #[serde(default)]
    pub block_type: BlockType,

    /// Recognized text; non-string values are kept as their JSON text
    #[serde(default, deserialize_with = "deserialize_text")]
    pub text: Option<String>,

    /// Block position on its page
    #[serde(default)]
    pub geometry: Geometry,
}

impl ExtractionBlock {
    /// Create a LINE block.
    pub fn line(page: u32, text: impl Into<String>, top: f64, left: f64) -> Self {
        Self {
            page: Some(page),
            block_type: BlockType::Line,
            text: Some(text.into()),
            geometry: Geometry::at(top, left),
        }
    }

    /// Set the block type.
    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }

    /// Whether this block is a renderable text line.
    pub fn is_line(&self) -> bool {
        self.block_type == BlockType::Line
    }

    /// Normalized distance from the page top, 0.0 when absent.
    pub fn top(&self) -> f64 {
        self.geometry.bounding_box.top.unwrap_or(0.0)
    }

    /// Normalized distance from the page left edge, 0.0 when absent.
    pub fn left(&self) -> f64 {
        self.geometry.bounding_box.left.unwrap_or(0.0)
    }
}

/// Block kind in the extraction taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    MergedCell,
    KeyValueSet,
    SelectionElement,
    Signature,
    Query,
    QueryResult,
    /// Anything else, including a missing type
    #[default]
    #[serde(other)]
    Other,
}

impl BlockType {
    /// Wire name of the block type.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Page => "PAGE",
            BlockType::Line => "LINE",
            BlockType::Word => "WORD",
            BlockType::Table => "TABLE",
            BlockType::Cell => "CELL",
            BlockType::MergedCell => "MERGED_CELL",
            BlockType::KeyValueSet => "KEY_VALUE_SET",
            BlockType::SelectionElement => "SELECTION_ELEMENT",
            BlockType::Signature => "SIGNATURE",
            BlockType::Query => "QUERY",
            BlockType::QueryResult => "QUERY_RESULT",
            BlockType::Other => "OTHER",
        }
    }
}

/// Block geometry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    /// Axis-aligned bounding box, normalized to the page
    #[serde(default)]
    pub bounding_box: BoundingBox,
}

impl Geometry {
    /// Geometry with only top/left set.
    pub fn at(top: f64, left: f64) -> Self {
        Self {
            bounding_box: BoundingBox {
                top: Some(top),
                left: Some(left),
                ..Default::default()
            },
        }
    }
}

/// Normalized bounding box. All fields are fractions of the page size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Block counts for a loaded extraction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionSummary {
    /// Declared page count
    pub page_count: u32,
    /// Total number of blocks
    pub block_count: usize,
    /// Number of LINE blocks
    pub line_count: usize,
    /// Block count keyed by wire type name
    pub blocks_by_type: BTreeMap<String, usize>,
    /// LINE block count keyed by page number
    pub lines_per_page: BTreeMap<u32, usize>,
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // Any JSON value is accepted; only strings are kept verbatim
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
