//! JSON output for the verse tree.
//!
//! The document is rendered fully in memory before the output file is
//! created, so a failure upstream never leaves a half-written file behind.
use crate::error::PipelineError;
use crate::model::Book;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    #[default]
    Pretty,
    Compact,
}

pub fn render_books(books: &[Book], style: JsonStyle) -> serde_json::Result<Vec<u8>> {
    match style {
        JsonStyle::Pretty => serde_json::to_vec_pretty(books),
        JsonStyle::Compact => serde_json::to_vec(books),
    }
}

pub fn write_books(path: &Path, books: &[Book], style: JsonStyle) -> Result<(), PipelineError> {
    let write_error = |source: io::Error| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };
    let bytes = render_books(books, style).map_err(|err| write_error(err.into()))?;
    fs::write(path, &bytes).map_err(write_error)?;
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        "wrote verse tree"
    );
    Ok(())
}

/// Load a previously written verse tree.
pub fn read_books(path: &Path) -> Result<Vec<Book>, PipelineError> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|err| PipelineError::parse(path.display().to_string(), err.to_string()))
}
