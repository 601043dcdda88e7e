//! Text line extraction from a recognized document.

mod blocks;
mod clean;
mod entities;

pub use blocks::{extract_page_blocks, BlockExtractor};
pub use clean::clean_text;
pub use entities::decode_entities;
