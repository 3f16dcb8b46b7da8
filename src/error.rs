//! Error types for the Marquee library.
//!
//! All failures are represented by the [`MarqueeError`] enum. Only index
//! lifecycle operations (building, saving, loading) can fail; query parsing,
//! filtering, scoring, and ranking are total functions and never return an
//! error.
//!
//! # Examples
//!
//! ```
//! use marquee::error::{MarqueeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MarqueeError::source_data("record 42: year is not a number"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Marquee operations.
///
/// Uses the `thiserror` crate for automatic `Error` trait implementation and
/// provides convenient constructor methods for the common cases.
#[derive(Error, Debug)]
pub enum MarqueeError {
    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The durable index artifact does not exist.
    #[error("index not found at {path}; run an index build first")]
    IndexMissing {
        /// Path that was probed for the artifact.
        path: PathBuf,
    },

    /// The durable index artifact exists but cannot be read.
    #[error("index artifact is corrupt: {0}")]
    IndexCorrupt(String),

    /// The raw corpus was malformed during an index build.
    #[error("corpus source error: {0}")]
    SourceData(String),

    /// Binary serialization error outside of artifact decoding.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MarqueeError.
pub type Result<T> = std::result::Result<T, MarqueeError>;

impl MarqueeError {
    /// Create a new index-missing error.
    pub fn index_missing<P: Into<PathBuf>>(path: P) -> Self {
        MarqueeError::IndexMissing { path: path.into() }
    }

    /// Create a new index-corrupt error.
    pub fn index_corrupt<S: Into<String>>(msg: S) -> Self {
        MarqueeError::IndexCorrupt(msg.into())
    }

    /// Create a new source-data error.
    pub fn source_data<S: Into<String>>(msg: S) -> Self {
        MarqueeError::SourceData(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        MarqueeError::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = MarqueeError::index_missing("/tmp/missing.idx");
        assert_eq!(
            error.to_string(),
            "index not found at /tmp/missing.idx; run an index build first"
        );

        let error = MarqueeError::index_corrupt("checksum mismatch");
        assert_eq!(
            error.to_string(),
            "index artifact is corrupt: checksum mismatch"
        );

        let error = MarqueeError::source_data("line 7: missing title");
        assert_eq!(
            error.to_string(),
            "corpus source error: line 7: missing title"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let marquee_error = MarqueeError::from(io_error);

        match marquee_error {
            MarqueeError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
