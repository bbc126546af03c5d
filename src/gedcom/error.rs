//! Error types for reading, indexing and writing GEDCOM data.
//!
//! Malformed input lines never surface as [`GedcomError`]: the line parser reports them
//! through [`LineError`] and the reader degrades them to cleared records. Lookup misses
//! are `Option`s. What remains are I/O failures, rejected configuration and attempts to
//! remove records a collection does not hold.

use thiserror::Error;

/// Why a single raw line could not be split into level, id, tag and data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// The line was empty after trimming.
    #[error("empty line")]
    Empty,

    /// The line does not follow `level [@id@] TAG [data]`.
    #[error("malformed line: {0:?}")]
    Malformed(String),

    /// The level token is not a non-negative integer that fits in memory.
    #[error("invalid level {0:?}")]
    InvalidLevel(String),

    /// An `@...@` token too short to carry a prefix character.
    #[error("invalid cross-reference id {0:?}")]
    InvalidId(String),
}

/// Errors surfaced by readers, writers, collections and documents.
#[derive(Error, Debug)]
pub enum GedcomError {
    /// The underlying byte stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer output was not valid UTF-8 when collected into a `String`.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The writer's maximum data length must stay within `1..=248`.
    #[error("maximum data length {0} is outside 1..=248")]
    MaxLengthOutOfRange(usize),

    /// A record passed for removal is not held by the collection or document.
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// Positional access past the end of a collection.
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The tag index disagrees with the backing list. Indicates a bug, not bad input.
    #[error("tag index has no bucket for {0:?}")]
    IndexCorrupted(String),

    /// Configuration could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GedcomError>;

impl From<gedcom_config::ConfigError> for GedcomError {
    fn from(err: gedcom_config::ConfigError) -> Self {
        GedcomError::Config(err.to_string())
    }
}
