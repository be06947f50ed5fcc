//! Error taxonomy shared by the pipeline stages.
//!
//! Each stage reports one of three failure kinds. Nothing is retried; the
//! command layer wraps these in `anyhow` context and aborts the run.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file missing or unreadable.
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed row, non-numeric chapter/verse field, or malformed document.
    #[error("parse {location}: {message}")]
    Parse { location: String, message: String },

    /// Output file cannot be created or written.
    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Parse {
            location: location.into(),
            message: message.into(),
        }
    }
}
