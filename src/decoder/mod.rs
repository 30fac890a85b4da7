//! QR code decoding modules
//!
//! Everything between a sampled module grid and the decoded payload:
//! - Format and version information extraction
//! - Codeword extraction, unmasking and de-interleaving
//! - Reed-Solomon error correction over GF(256)
//! - Data mode decoding (numeric, alphanumeric, byte, kanji, hanzi, ECI)

/// Reads format, version and codewords out of the module grid
pub mod bit_matrix_parser;
/// MSB-first bit reader over the corrected data codewords
pub mod bit_source;
/// Segment decoding of the data codewords
pub mod bitstream;
/// De-interleaving of raw codewords into Reed-Solomon blocks
pub mod data_block;
/// The eight data mask patterns
pub mod data_mask;
/// Format information decoding (mask pattern, EC level)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// GF(256) arithmetic and polynomials
pub mod galois;
/// Data mode decoders (numeric, alphanumeric, byte, kanji, ECI)
pub mod modes;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Version table and version information decoding
pub mod version;
