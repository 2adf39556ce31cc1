//! Error types for the HTRE library.

use thiserror::Error;

/// Errors that can occur when decoding HTRE terrain tiles.
#[derive(Error, Debug)]
pub enum HtreError {
    /// IO error when opening, seeking, or reading a tile stream.
    ///
    /// A truncated stream surfaces here as
    /// [`std::io::ErrorKind::UnexpectedEof`].
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The version tag at the start of the stream is not a known layout.
    #[error("unsupported HTRE version: {version} (expected 3 or 4)")]
    UnsupportedVersion { version: i32 },
}

/// Result type alias using [`HtreError`].
pub type Result<T> = std::result::Result<T, HtreError>;
