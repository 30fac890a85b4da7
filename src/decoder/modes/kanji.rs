//! Kanji (Mode 1000) and Hanzi (Mode 1101) decoders, 13 bits per character

use crate::decoder::bit_source::BitSource;
use crate::error::{QrError, Result};
use crate::models::{DoubleByteCharset, DoubleByteSegment};

/// Stand-in for each double-byte character in decoded text
const UNTRANSCODED: char = '\u{FFFD}';

/// Hanzi subset indicator for GB2312
pub const GB2312_SUBSET: u32 = 1;

/// Unpacks 13-bit values into Shift-JIS or GB2312 byte pairs.
///
/// The pairs are kept raw in a [`DoubleByteSegment`]; `result` receives one
/// U+FFFD per character.
pub struct KanjiDecoder;

impl KanjiDecoder {
    /// Decode `count` characters of `charset`
    pub fn decode(
        bits: &mut BitSource<'_>,
        count: usize,
        charset: DoubleByteCharset,
        result: &mut String,
        segments: &mut Vec<DoubleByteSegment>,
    ) -> Result<()> {
        if count * 13 > bits.available() {
            return Err(QrError::FormatError("double-byte segment truncated"));
        }

        let mut bytes = Vec::with_capacity(2 * count);
        for _ in 0..count {
            let two_bytes = bits.read_bits(13)?;
            let assembled = match charset {
                DoubleByteCharset::ShiftJis => {
                    let assembled = ((two_bytes / 0x0C0) << 8) | (two_bytes % 0x0C0);
                    if assembled < 0x01F00 {
                        // In the 0x8140 to 0x9FFC range
                        assembled + 0x08140
                    } else {
                        // In the 0xE040 to 0xEBBF range
                        assembled + 0x0C140
                    }
                }
                DoubleByteCharset::Gb2312 => {
                    let assembled = ((two_bytes / 0x060) << 8) | (two_bytes % 0x060);
                    if assembled < 0x00A00 {
                        // In the 0xA1A1 to 0xAAFE range
                        assembled + 0x0A1A1
                    } else {
                        // In the 0xB0A1 to 0xFAFE range
                        assembled + 0x0A6A1
                    }
                }
            };
            bytes.push((assembled >> 8) as u8);
            bytes.push(assembled as u8);
            result.push(UNTRANSCODED);
        }

        segments.push(DoubleByteSegment { charset, bytes });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(value: u32, charset: DoubleByteCharset) -> DoubleByteSegment {
        // 13-bit value left-aligned in two bytes
        let packed = (value << 3) as u16;
        let bytes = packed.to_be_bytes();
        let mut bits = BitSource::new(&bytes);
        let mut result = String::new();
        let mut segments = Vec::new();
        KanjiDecoder::decode(&mut bits, 1, charset, &mut result, &mut segments).unwrap();
        assert_eq!(result, "\u{FFFD}");
        segments.pop().unwrap()
    }

    #[test]
    fn test_kanji_ranges() {
        // 0x935F -> 0x935F - 0x8140 = 0x121F -> 0x12 * 0xC0 + 0x1F = 0xD9F
        assert_eq!(decode(0xD9F, DoubleByteCharset::ShiftJis).bytes, vec![0x93, 0x5F]);
        // 0xE4AA -> 0xE4AA - 0xC140 = 0x236A -> 0x23 * 0xC0 + 0x6A = 0x1AAA
        assert_eq!(decode(0x1AAA, DoubleByteCharset::ShiftJis).bytes, vec![0xE4, 0xAA]);
    }

    #[test]
    fn test_hanzi_ranges() {
        // 0xA1A1 is the first GB2312 code
        assert_eq!(decode(0, DoubleByteCharset::Gb2312).bytes, vec![0xA1, 0xA1]);
        // 0xB0A1 -> 0xB0A1 - 0xA6A1 = 0x0A00 -> 0x0A * 0x60 = 0x3C0
        assert_eq!(decode(0x3C0, DoubleByteCharset::Gb2312).bytes, vec![0xB0, 0xA1]);
        // 0xA5A1 stays in the lower block
        assert_eq!(decode(4 * 0x60, DoubleByteCharset::Gb2312).bytes, vec![0xA5, 0xA1]);
    }

    #[test]
    fn test_truncated() {
        let bytes = [0xFF];
        let mut bits = BitSource::new(&bytes);
        let mut result = String::new();
        let mut segments = Vec::new();
        assert!(
            KanjiDecoder::decode(&mut bits, 1, DoubleByteCharset::ShiftJis, &mut result, &mut segments)
                .is_err()
        );
    }
}
