//! Extraction JSON loader.

use crate::error::Result;
use crate::model::Extraction;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load an extraction from a JSON file.
pub fn load_extraction<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let path = path.as_ref();
    log::debug!("Loading extraction from {}", path.display());
    let file = File::open(path)?;
    load_extraction_reader(BufReader::new(file))
}

/// Load an extraction from any reader.
pub fn load_extraction_reader<R: Read>(reader: R) -> Result<Extraction> {
    let extraction: Extraction = serde_json::from_reader(reader)?;
    log::debug!(
        "Loaded extraction: {} pages, {} blocks",
        extraction.page_count(),
        extraction.blocks.len()
    );
    Ok(extraction)
}

/// Load an extraction from JSON bytes.
pub fn load_extraction_bytes(data: &[u8]) -> Result<Extraction> {
    load_extraction_reader(data)
}
