//! QR code data mode decoders
//!
//! This module contains decoders for the QR segment modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Letters, numbers, and symbols
//! - Byte: 8-bit data, transcoded per the active ECI
//! - Kanji / Hanzi: 13-bit double-byte characters
//! - ECI: character set designators

/// Alphanumeric mode, including FNC1 `%` handling
pub mod alphanumeric;
/// Byte mode with ECI transcoding
pub mod byte;
/// ECI designators and character sets
pub mod eci;
/// Kanji and Hanzi double-byte modes
pub mod kanji;
/// Numeric mode
pub mod numeric;

use crate::decoder::version::Version;
use crate::error::{QrError, Result};

/// Segment mode indicated by the 4-bit header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// End of data (0000)
    Terminator,
    /// Digits, 10 bits per three (0001)
    Numeric,
    /// 45-symbol set, 11 bits per pair (0010)
    Alphanumeric,
    /// Sequence and parity header (0011)
    StructuredAppend,
    /// 8-bit data (0100)
    Byte,
    /// GS1 FNC1 in first position (0101)
    Fnc1FirstPosition,
    /// Character set designator (0111)
    Eci,
    /// Shift-JIS double-byte (1000)
    Kanji,
    /// AIM FNC1 in second position (1001)
    Fnc1SecondPosition,
    /// GB2312 double-byte (1101)
    Hanzi,
}

impl Mode {
    /// Mode for the 4-bit indicator
    pub fn for_bits(bits: u32) -> Result<Self> {
        Ok(match bits {
            0x0 => Mode::Terminator,
            0x1 => Mode::Numeric,
            0x2 => Mode::Alphanumeric,
            0x3 => Mode::StructuredAppend,
            0x4 => Mode::Byte,
            0x5 => Mode::Fnc1FirstPosition,
            0x7 => Mode::Eci,
            0x8 => Mode::Kanji,
            0x9 => Mode::Fnc1SecondPosition,
            0xD => Mode::Hanzi,
            _ => return Err(QrError::FormatError("unknown mode indicator")),
        })
    }

    /// Width of the character count field for this mode at `version`
    pub fn character_count_bits(self, version: &Version) -> usize {
        let counts: [usize; 3] = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji | Mode::Hanzi => [8, 10, 12],
            _ => [0, 0, 0],
        };
        let number = version.version_number();
        let offset = if number <= 9 {
            0
        } else if number <= 26 {
            1
        } else {
            2
        };
        counts[offset]
    }
}
