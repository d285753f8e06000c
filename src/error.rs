//! Error types for blockfolio library.
//!
//! Editing and command parsing never fail; these errors only come from the
//! external collaborators (persistence, image upload, speech capture) and
//! from serializing rendered output.

use std::io;
use thiserror::Error;

/// Result type alias for blockfolio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around an editing session.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The persistence collaborator failed to load or save.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The image upload collaborator failed.
    #[error("Image upload failed: {0}")]
    Upload(String),

    /// An upload for this block is already in flight.
    #[error("Upload already pending for block {0}")]
    UploadPending(usize),

    /// The addressed block is not an image block.
    #[error("Block {0} is not an image block")]
    NotAnImage(usize),

    /// Block index is out of range.
    #[error("Block {0} is out of range (document has {1} blocks)")]
    BlockOutOfRange(usize, usize),

    /// Export was requested while uploads are still resolving.
    #[error("Export not ready: {0} image upload(s) pending")]
    ExportNotReady(usize),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The speech capture collaborator failed.
    #[error("Speech capture error: {0}")]
    Speech(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UploadPending(3);
        assert_eq!(err.to_string(), "Upload already pending for block 3");

        let err = Error::BlockOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Block 10 is out of range (document has 5 blocks)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
