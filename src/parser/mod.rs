//! Input loaders for extraction JSON and layout tables.

mod extraction;
mod layout_csv;

pub use extraction::{load_extraction, load_extraction_bytes, load_extraction_reader};
pub use layout_csv::{load_layout_table, load_layout_table_reader, strip_cell};
