//! qrcore - QR code detection and decoding in pure Rust
//!
//! Takes an already binarized image (a [`BitMatrix`], true = black), locates
//! the finder and alignment patterns, samples the module grid through a
//! perspective transform, corrects errors with Reed-Solomon coding and decodes
//! the segment stream into text.
//!
//! ```no_run
//! use qrcore::{BitMatrix, DecodeHints};
//!
//! let image = BitMatrix::from_fn(640, 480, |_x, _y| false);
//! match qrcore::detect_and_decode(&image, &DecodeHints::default()) {
//!     Ok(code) => println!("{}", code.content()),
//!     Err(e) => eprintln!("no symbol: {e}"),
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decode hints with environment defaults
pub mod config;
/// QR code decoding modules (error correction, format extraction, data modes)
pub mod decoder;
/// QR code detection modules (finder patterns, alignment, grid sampling)
pub mod detector;
/// Error taxonomy
pub mod error;
/// Core data structures (QRCode, BitMatrix, Point, etc.)
pub mod models;
/// Utility functions (geometry)
pub mod utils;

pub use config::DecodeHints;
pub use decoder::qr_decoder::QrDecoder;
pub use detector::{Detector, DetectorResult};
pub use error::{QrError, Result};
pub use models::{
    BitMatrix, DecoderResult, DoubleByteCharset, DoubleByteSegment, ECLevel, Point, QRCode,
    StructuredAppend,
};

use rayon::prelude::*;
use tracing::debug;

/// Detect and decode the QR code in a bi-level image
///
/// # Arguments
/// * `image` - Binarized image, true = black
/// * `hints` - Search tuning for the finder pattern scan
///
/// # Returns
/// The decoded payload with the finder (and alignment) centers it was found at
pub fn detect_and_decode(image: &BitMatrix, hints: &DecodeHints) -> Result<QRCode> {
    let detected = Detector::new(image).detect(hints)?;
    let result = QrDecoder::new().decode(detected.bits)?;
    debug!(
        version = result.version,
        ec_level = %result.ec_level,
        mirrored = result.mirrored,
        "symbol decoded"
    );
    Ok(QRCode {
        result,
        position: detected.points,
    })
}

/// [`detect_and_decode`] with hints taken from the environment
pub fn decode(image: &BitMatrix) -> Result<QRCode> {
    detect_and_decode(image, &DecodeHints::default())
}

/// Decode an already sampled module grid, skipping detection
pub fn decode_bits(bits: BitMatrix) -> Result<DecoderResult> {
    QrDecoder::new().decode(bits)
}

/// Decode many independent images in parallel
///
/// Results come back in input order; each image is detected and decoded with
/// its own scratch state.
pub fn decode_batch(images: &[BitMatrix], hints: &DecodeHints) -> Vec<Result<QRCode>> {
    images
        .par_iter()
        .map(|image| detect_and_decode(image, hints))
        .collect()
}
