//! Numeric mode decoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use crate::decoder::bit_source::BitSource;
use crate::error::{QrError, Result};

/// Decoder for digit groups
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode `count` digits from the bit stream, appending them to `result`
    pub fn decode(bits: &mut BitSource<'_>, count: usize, result: &mut String) -> Result<()> {
        let mut remaining = count;
        while remaining > 0 {
            let (group_size, bits_needed, limit) = match remaining {
                1 => (1, 4, 10),
                2 => (2, 7, 100),
                _ => (3, 10, 1000),
            };
            if bits.available() < bits_needed {
                return Err(QrError::FormatError("numeric segment truncated"));
            }
            let value = bits.read_bits(bits_needed)?;
            if value >= limit {
                return Err(QrError::FormatError("numeric group out of range"));
            }
            Self::push_digits(result, value, group_size);
            remaining -= group_size;
        }
        Ok(())
    }

    fn push_digits(result: &mut String, value: u32, width: usize) {
        let mut divisor = 10u32.pow(width as u32 - 1);
        while divisor > 0 {
            let digit = (value / divisor) % 10;
            result.push(char::from(b'0' + digit as u8));
            divisor /= 10;
        }
    }
}
