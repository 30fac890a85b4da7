//! Format information: error correction level and data mask

use crate::models::ECLevel;

/// XOR mask applied to the 15 format bits
pub const FORMAT_INFO_MASK_QR: u32 = 0x5412;

/// Masked 15-bit format codes and the 5 data bits they carry
pub const FORMAT_INFO_DECODE_LOOKUP: [(u32, u8); 32] = [
    (0x5412, 0x00), (0x5125, 0x01), (0x5E7C, 0x02), (0x5B4B, 0x03),
    (0x45F9, 0x04), (0x40CE, 0x05), (0x4F97, 0x06), (0x4AA0, 0x07),
    (0x77C4, 0x08), (0x72F3, 0x09), (0x7DAA, 0x0A), (0x789D, 0x0B),
    (0x662F, 0x0C), (0x6318, 0x0D), (0x6C41, 0x0E), (0x6976, 0x0F),
    (0x1689, 0x10), (0x13BE, 0x11), (0x1CE7, 0x12), (0x19D0, 0x13),
    (0x0762, 0x14), (0x0255, 0x15), (0x0D0C, 0x16), (0x083B, 0x17),
    (0x355F, 0x18), (0x3068, 0x19), (0x3F31, 0x1A), (0x3A06, 0x1B),
    (0x24B4, 0x1C), (0x2183, 0x1D), (0x2EDA, 0x1E), (0x2BED, 0x1F),
];

/// Format info is 15 bits (5 data + 10 ECC), stored twice in the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInformation {
    ec_level: ECLevel,
    data_mask: u8,
}

impl FormatInformation {
    fn from_bits(format_info: u8) -> Self {
        Self {
            ec_level: ECLevel::from_bits((format_info >> 3) & 0x03),
            data_mask: format_info & 0x07,
        }
    }

    /// Decode from both masked copies, tolerating up to 3 bit errors.
    ///
    /// Some encoders forget the XOR mask, so a second pass unmasks both
    /// copies before matching.
    pub fn decode(masked_format_info1: u32, masked_format_info2: u32) -> Option<Self> {
        Self::do_decode(masked_format_info1, masked_format_info2).or_else(|| {
            Self::do_decode(
                masked_format_info1 ^ FORMAT_INFO_MASK_QR,
                masked_format_info2 ^ FORMAT_INFO_MASK_QR,
            )
        })
    }

    fn do_decode(masked_format_info1: u32, masked_format_info2: u32) -> Option<Self> {
        let mut best_difference = u32::MAX;
        let mut best_format_info = 0;
        for &(target, info) in &FORMAT_INFO_DECODE_LOOKUP {
            if target == masked_format_info1 || target == masked_format_info2 {
                return Some(Self::from_bits(info));
            }
            let mut difference = (masked_format_info1 ^ target).count_ones();
            if difference < best_difference {
                best_format_info = info;
                best_difference = difference;
            }
            if masked_format_info1 != masked_format_info2 {
                difference = (masked_format_info2 ^ target).count_ones();
                if difference < best_difference {
                    best_format_info = info;
                    best_difference = difference;
                }
            }
        }
        // Format codes differ pairwise in at least 7 bits
        (best_difference <= 3).then(|| Self::from_bits(best_format_info))
    }

    /// Masked 15-bit code for a level and mask, as written into a symbol
    pub fn encode(ec_level: ECLevel, data_mask: u8) -> u32 {
        let info = (ec_level.bits() << 3) | (data_mask & 0x07);
        FORMAT_INFO_DECODE_LOOKUP[info as usize].0
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Data mask reference (0-7)
    pub fn data_mask(&self) -> u8 {
        self.data_mask
    }
}
