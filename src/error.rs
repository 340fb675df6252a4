//! Error types for typewrite.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for typewrite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while typesetting or splicing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input text (or embedded text) is not valid UTF-8.
    #[error("Invalid text encoding: {0}")]
    InvalidEncoding(String),

    /// A stylesheet file could not be read.
    #[error("Invalid stylesheet: {0}")]
    Stylesheet(String),

    /// The typesetting engine could not be started.
    #[error("Failed to launch typesetting engine '{program}': {source}")]
    EngineSpawn {
        /// Program that was executed
        program: String,
        /// Underlying spawn error
        #[source]
        source: io::Error,
    },

    /// The typesetting engine exited unsuccessfully.
    #[error("Typesetting engine failed ({status}):\n{diagnostics}")]
    EngineFailed {
        /// Exit status as reported by the OS
        status: String,
        /// Tail of the engine's console output or log file
        diagnostics: String,
    },

    /// The typesetting engine did not finish in time and was killed.
    #[error("Typesetting engine did not finish within {0:?}")]
    EngineTimeout(Duration),

    /// The engine reported success but wrote no document.
    #[error("Typesetting engine produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    /// The generated file is not a PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version in the header is not understood.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The first-object marker is absent from the generated document.
    #[error("First object marker not found in document")]
    MarkerNotFound,

    /// The content to splice does not have the length that was reserved.
    #[error("Content length {actual} does not match reserved length {reserved}")]
    LengthMismatch {
        /// Length of text plus epilogue
        actual: usize,
        /// Length reserved during composition
        reserved: usize,
    },

    /// The placeholder span in the generated document has an unexpected size.
    #[error(
        "Reserved span mismatch at offset {offset}: expected {expected} bytes, found {found}"
    )]
    ReservedSpanMismatch {
        /// Byte offset where the span starts
        offset: usize,
        /// Span length required by the content
        expected: usize,
        /// Span length actually present
        found: usize,
    },

    /// The object terminator does not follow the reserved span.
    #[error("Object terminator not found after reserved span at offset {0}")]
    AnchorMissing(usize),

    /// The document carries no spliced plain-text object.
    #[error("No embedded text: {0}")]
    NoEmbeddedText(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Stylesheet(err.to_string())
    }
}
