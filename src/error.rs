//! Error types shared by the detector and the decoder.

use thiserror::Error;

/// Failure raised anywhere in the detect → sample → decode pipeline.
///
/// Every attempt either fully succeeds or ends in exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// Finder/alignment patterns or the sampling transform could not be located.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Structural inconsistency in version, format, dimension, codeword count or mode.
    #[error("format error: {0}")]
    FormatError(&'static str),

    /// Reed-Solomon could not correct the received codewords.
    #[error("checksum error: {0}")]
    ChecksumError(&'static str),

    /// A pixel read fell outside the image.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        /// Requested column
        x: i64,
        /// Requested row
        y: i64,
        /// Image width
        width: usize,
        /// Image height
        height: usize,
    },

    /// Field or polynomial arithmetic was called with an invalid operand.
    #[error("illegal argument: {0}")]
    IllegalArgument(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T, E = QrError> = std::result::Result<T, E>;

impl QrError {
    /// True for the three per-attempt failures the decoder retries on.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QrError::NotFound(_) | QrError::FormatError(_) | QrError::ChecksumError(_)
        )
    }
}
