//! Error types for repdf library.

use std::io;
use thiserror::Error;

/// Result type alias for repdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading inputs or writing the output PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The extraction JSON could not be parsed.
    #[error("Extraction parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The layout table could not be read.
    #[error("Layout table error: {0}")]
    Csv(#[from] csv::Error),

    /// A column required by the layout schema is not present in the header.
    #[error("Layout table is missing column '{0}'")]
    MissingColumn(String),

    /// A layout table cell does not match its declared field type.
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidField {
        /// 1-based data row (header excluded)
        row: usize,
        /// Column name from the schema
        column: String,
        /// Offending cell after normalization
        value: String,
    },

    /// Error building or serializing the output PDF.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// The requested font is not one of the standard PDF base fonts.
    #[error("Unsupported font: {0}")]
    UnsupportedFont(String),

    /// The output document has already been finalized.
    #[error("Document has already been saved")]
    AlreadySaved,

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error happened while loading the extraction or the layout table.
    ///
    /// Load failures abort the whole run; nothing written before them is
    /// guaranteed to be a valid document.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Error::Json(_) | Error::Csv(_) | Error::MissingColumn(_) | Error::InvalidField { .. }
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

/// Reasons a single text placement could not be drawn.
///
/// These never abort a page: the render driver records them and moves on
/// to the next placement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The active font encoding has no glyph for this character.
    #[error("No glyph for {ch:?} in {font}")]
    UnsupportedGlyph {
        /// The character that could not be encoded
        ch: char,
        /// Base font name in use
        font: String,
    },

    /// The writer has already been saved.
    #[error("Cannot draw after the document was saved")]
    Finalized,

    /// Writer-specific rejection.
    #[error("{0}")]
    Rejected(String),
}
