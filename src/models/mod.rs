//! Core data structures shared by the detector and the decoder

/// Packed bit matrix (bi-level image and module grid)
pub mod matrix;
/// Image-space points
pub mod point;
/// Decode results and error correction levels
pub mod qr_code;

pub use matrix::BitMatrix;
pub use point::Point;
pub use qr_code::{
    DecoderResult, DoubleByteCharset, DoubleByteSegment, ECLevel, QRCode, StructuredAppend,
};
