//! Model types for recognized documents and their render values.
//!
//! The pipeline is one-way: an [`Extraction`] is loaded once, turned into
//! [`TextPlacement`]s per page, and each placement into an
//! [`AbsolutePosition`] on the output page. Nothing is mutated after
//! creation.

mod extraction;
mod layout_table;
mod placement;

pub use extraction::{
    BlockType, BoundingBox, DocumentMetadata, Extraction, ExtractionBlock, ExtractionSummary,
    Geometry,
};
pub use layout_table::{FieldKind, FieldSpec, FieldValue, LayoutRecord, LayoutSchema, LayoutTable};
pub use placement::{AbsolutePosition, TextPlacement};
