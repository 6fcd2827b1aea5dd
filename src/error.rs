//! Error type shared by the layout engine, the renderer and the CLI.

use thiserror::Error;

/// All errors this crate can produce.
///
/// Missing resume fields, malformed dates and unknown design selectors are
/// not errors; they are absorbed by the layout engine. Only backend and I/O
/// failures surface here.
#[derive(Debug, Error)]
pub enum ResumeError {
    /// A draw operation carried a coordinate or size the PDF backend cannot
    /// encode (NaN or infinite).
    #[error("invalid geometry on page {page}: {detail}")]
    InvalidGeometry { page: usize, detail: String },

    /// The layout handed to the renderer had no pages.
    #[error("document layout has no pages")]
    EmptyDocument,

    /// A TrueType font supplied for text measurement could not be parsed.
    #[error("failed to parse metrics font: {0}")]
    FontParse(#[from] ttf_parser::FaceParsingError),

    /// Resume input was not valid JSON for [`crate::model::ResumeData`].
    #[error("invalid resume JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ResumeError>;
