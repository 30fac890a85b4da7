//! Byte mode decoder (Mode 0100) for 8-bit data

use super::eci::{self, CharacterSetEci};
use crate::decoder::bit_source::BitSource;
use crate::error::{QrError, Result};

/// Decode byte mode data (8 bits per character)
pub struct ByteDecoder;

impl ByteDecoder {
    /// Read `count` bytes, keep them verbatim in `byte_segments` and append
    /// their text in the active character set to `result`
    pub fn decode(
        bits: &mut BitSource<'_>,
        count: usize,
        charset: Option<CharacterSetEci>,
        result: &mut String,
        byte_segments: &mut Vec<Vec<u8>>,
    ) -> Result<()> {
        if 8 * count > bits.available() {
            return Err(QrError::FormatError("byte segment truncated"));
        }
        let mut bytes = Vec::with_capacity(count);
        for _ in 0..count {
            bytes.push(bits.read_bits(8)? as u8);
        }

        match charset {
            Some(charset) => result.push_str(&charset.decode(&bytes)),
            None => result.push_str(&eci::decode_default(&bytes)),
        }
        byte_segments.push(bytes);
        Ok(())
    }
}
