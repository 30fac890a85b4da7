//! Segment decoding of corrected data codewords into text

use tracing::trace;

use super::bit_source::BitSource;
use super::modes::alphanumeric::AlphanumericDecoder;
use super::modes::byte::ByteDecoder;
use super::modes::eci::CharacterSetEci;
use super::modes::kanji::{GB2312_SUBSET, KanjiDecoder};
use super::modes::numeric::NumericDecoder;
use super::modes::Mode;
use super::version::Version;
use crate::error::{QrError, Result};
use crate::models::{DecoderResult, DoubleByteCharset, ECLevel, StructuredAppend};

/// Walks the mode segments of a symbol's data codewords
pub struct DecodedBitStreamParser;

impl DecodedBitStreamParser {
    /// Decode every segment, keeping `bytes` as the result's raw bytes
    pub fn decode(bytes: Vec<u8>, version: &Version, ec_level: ECLevel) -> Result<DecoderResult> {
        let mut bits = BitSource::new(&bytes);
        let mut result = String::with_capacity(50);
        let mut byte_segments = Vec::new();
        let mut double_byte_segments = Vec::new();
        let mut structured_append = None;
        let mut current_charset: Option<CharacterSetEci> = None;
        let mut fnc1_in_effect = false;

        loop {
            // While still another segment to read...
            let mode = if bits.available() < 4 {
                // OK, assume we're done. Really, a TERMINATOR mode should have been recorded here
                Mode::Terminator
            } else {
                Mode::for_bits(bits.read_bits(4)?)?
            };
            trace!(?mode, available = bits.available(), "segment");

            match mode {
                Mode::Terminator => break,
                Mode::Fnc1FirstPosition | Mode::Fnc1SecondPosition => {
                    // We do little with FNC1 except alter the parsed result a bit
                    fnc1_in_effect = true;
                }
                Mode::StructuredAppend => {
                    if bits.available() < 16 {
                        return Err(QrError::FormatError("structured append header truncated"));
                    }
                    let sequence = bits.read_bits(8)? as u8;
                    let parity = bits.read_bits(8)? as u8;
                    structured_append = Some(StructuredAppend { sequence, parity });
                }
                Mode::Eci => {
                    current_charset = Some(CharacterSetEci::parse(&mut bits)?);
                }
                Mode::Hanzi => {
                    // Subset indicator comes before the character count
                    let subset = bits.read_bits(4)?;
                    let count = bits.read_bits(mode.character_count_bits(version))? as usize;
                    if subset != GB2312_SUBSET {
                        return Err(QrError::FormatError("unsupported hanzi subset"));
                    }
                    KanjiDecoder::decode(
                        &mut bits,
                        count,
                        DoubleByteCharset::Gb2312,
                        &mut result,
                        &mut double_byte_segments,
                    )?;
                }
                Mode::Numeric | Mode::Alphanumeric | Mode::Byte | Mode::Kanji => {
                    let count = bits.read_bits(mode.character_count_bits(version))? as usize;
                    match mode {
                        Mode::Numeric => NumericDecoder::decode(&mut bits, count, &mut result)?,
                        Mode::Alphanumeric => AlphanumericDecoder::decode(
                            &mut bits,
                            count,
                            fnc1_in_effect,
                            &mut result,
                        )?,
                        Mode::Byte => ByteDecoder::decode(
                            &mut bits,
                            count,
                            current_charset,
                            &mut result,
                            &mut byte_segments,
                        )?,
                        _ => KanjiDecoder::decode(
                            &mut bits,
                            count,
                            DoubleByteCharset::ShiftJis,
                            &mut result,
                            &mut double_byte_segments,
                        )?,
                    }
                }
            }
        }

        Ok(DecoderResult {
            raw_bytes: bytes,
            text: result,
            byte_segments,
            double_byte_segments,
            ec_level,
            version: version.version_number(),
            structured_append,
            errors_corrected: 0,
            mirrored: false,
        })
    }
}
