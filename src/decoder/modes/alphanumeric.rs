//! Alphanumeric mode decoder (Mode 0010)
//! Alphanumeric character set: 0-9, A-Z, space, $%*+-./:

use crate::decoder::bit_source::BitSource;
use crate::error::{QrError, Result};

const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Group separator substituted for `%` under FNC1
const FNC1_SEPARATOR: char = '\u{1D}';

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Decode `count` characters, appending them to `result`.
    ///
    /// With FNC1 in effect `%%` stands for a literal `%` and a lone `%` for
    /// the GS1 group separator.
    pub fn decode(
        bits: &mut BitSource<'_>,
        count: usize,
        fnc1_in_effect: bool,
        result: &mut String,
    ) -> Result<()> {
        let mut segment = String::with_capacity(count);
        let mut remaining = count;
        while remaining > 1 {
            if bits.available() < 11 {
                return Err(QrError::FormatError("alphanumeric segment truncated"));
            }
            let value = bits.read_bits(11)?;
            segment.push(Self::to_char(value / 45)?);
            segment.push(Self::to_char(value % 45)?);
            remaining -= 2;
        }
        if remaining == 1 {
            if bits.available() < 6 {
                return Err(QrError::FormatError("alphanumeric segment truncated"));
            }
            segment.push(Self::to_char(bits.read_bits(6)?)?);
        }

        if fnc1_in_effect {
            let mut chars = segment.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '%' {
                    if chars.peek() == Some(&'%') {
                        chars.next();
                        result.push('%');
                    } else {
                        result.push(FNC1_SEPARATOR);
                    }
                } else {
                    result.push(c);
                }
            }
        } else {
            result.push_str(&segment);
        }
        Ok(())
    }

    fn to_char(value: u32) -> Result<char> {
        ALPHANUMERIC_TABLE
            .get(value as usize)
            .copied()
            .ok_or(QrError::FormatError("alphanumeric value out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pack (value, width) fields MSB first
    fn pack(fields: &[(u32, usize)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut acc = 0u64;
        let mut len = 0;
        for &(value, width) in fields {
            acc = (acc << width) | u64::from(value);
            len += width;
            while len >= 8 {
                bytes.push((acc >> (len - 8)) as u8);
                len -= 8;
            }
        }
        if len > 0 {
            bytes.push((acc << (8 - len)) as u8);
        }
        bytes
    }

    #[test]
    fn test_alphanumeric_decode() {
        // "A1" = (10 * 45 + 1) = 451
        let bytes = pack(&[(451, 11)]);
        let mut bits = BitSource::new(&bytes);
        let mut result = String::new();
        AlphanumericDecoder::decode(&mut bits, 2, false, &mut result).unwrap();
        assert_eq!(result, "A1");
    }

    #[test]
    fn test_pair_value_47_is_12() {
        let bytes = pack(&[(47, 11), (36, 6)]);
        let mut bits = BitSource::new(&bytes);
        let mut result = String::new();
        AlphanumericDecoder::decode(&mut bits, 3, false, &mut result).unwrap();
        assert_eq!(result, "12 ");
    }

    #[test]
    fn test_out_of_range() {
        let bytes = pack(&[(45 * 45, 11)]);
        let mut bits = BitSource::new(&bytes);
        let mut result = String::new();
        assert!(AlphanumericDecoder::decode(&mut bits, 2, false, &mut result).is_err());
    }

    #[test]
    fn test_fnc1_percent_handling() {
        // "A%%B%C" -> "A%B<GS>C"
        let value = |c: char| ALPHANUMERIC_TABLE.iter().position(|&t| t == c).unwrap() as u32;
        let text: Vec<u32> = "A%%B%C".chars().map(value).collect();
        let fields: Vec<(u32, usize)> = text.chunks(2).map(|p| (p[0] * 45 + p[1], 11)).collect();
        let bytes = pack(&fields);

        let mut bits = BitSource::new(&bytes);
        let mut result = String::from("01");
        AlphanumericDecoder::decode(&mut bits, 6, true, &mut result).unwrap();
        assert_eq!(result, "01A%B\u{1D}C");

        let mut bits = BitSource::new(&bytes);
        let mut plain = String::new();
        AlphanumericDecoder::decode(&mut bits, 6, false, &mut plain).unwrap();
        assert_eq!(plain, "A%%B%C");
    }
}
