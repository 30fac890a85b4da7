//! QR version descriptors: dimensions, alignment centers and EC block layout

use std::sync::OnceLock;

use super::function_mask::FunctionMask;
use crate::error::{QrError, Result};
use crate::models::ECLevel;

/// Raw 18-bit version information; element i encodes version i + 7.
pub const VERSION_DECODE_INFO: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762, 0x0D847, 0x0E60D, 0x0F928, 0x10B78,
    0x1145D, 0x12A17, 0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4, 0x191E1, 0x1AFAB,
    0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75, 0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];

/// `count` blocks holding `data_codewords` data codewords each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ECB {
    count: usize,
    data_codewords: usize,
}

impl ECB {
    const fn new(count: usize, data_codewords: usize) -> Self {
        Self {
            count,
            data_codewords,
        }
    }

    /// Number of blocks in this group
    pub fn count(&self) -> usize {
        self.count
    }

    /// Data codewords per block in this group
    pub fn data_codewords(&self) -> usize {
        self.data_codewords
    }
}

/// Block layout of one version at one EC level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ECBlocks {
    ec_codewords_per_block: usize,
    blocks: &'static [ECB],
}

impl ECBlocks {
    const fn new(ec_codewords_per_block: usize, blocks: &'static [ECB]) -> Self {
        Self {
            ec_codewords_per_block,
            blocks,
        }
    }

    /// EC codewords in every block
    pub fn ec_codewords_per_block(&self) -> usize {
        self.ec_codewords_per_block
    }

    /// Total number of blocks over all groups
    pub fn num_blocks(&self) -> usize {
        self.blocks.iter().map(ECB::count).sum()
    }

    /// Block groups, shorter blocks first
    pub fn blocks(&self) -> &'static [ECB] {
        self.blocks
    }
}

struct VersionSpec {
    number: u32,
    alignment_centers: &'static [usize],
    ec_blocks: [ECBlocks; 4],
}

/// One of the 40 QR versions
#[derive(Debug, PartialEq, Eq)]
pub struct Version {
    version_number: u32,
    alignment_pattern_centers: &'static [usize],
    ec_blocks: [ECBlocks; 4],
    total_codewords: usize,
}

static VERSIONS: OnceLock<Vec<Version>> = OnceLock::new();

fn versions() -> &'static [Version] {
    VERSIONS.get_or_init(|| {
        VERSION_SPECS
            .iter()
            .map(|spec| {
                // Every level of a version covers the same number of codewords
                let level = &spec.ec_blocks[0];
                let total_codewords = level
                    .blocks
                    .iter()
                    .map(|b| b.count * (b.data_codewords + level.ec_codewords_per_block))
                    .sum();
                Version {
                    version_number: spec.number,
                    alignment_pattern_centers: spec.alignment_centers,
                    ec_blocks: spec.ec_blocks,
                    total_codewords,
                }
            })
            .collect()
    })
}

impl Version {
    /// Look up a version by number (1-40)
    pub fn for_number(version_number: u32) -> Result<&'static Version> {
        if !(1..=40).contains(&version_number) {
            return Err(QrError::FormatError("version number out of range"));
        }
        Ok(&versions()[version_number as usize - 1])
    }

    /// Version implied by a symbol dimension (must be 1 mod 4)
    pub fn provisional_for_dimension(dimension: usize) -> Result<&'static Version> {
        if dimension % 4 != 1 || dimension < 21 {
            return Err(QrError::FormatError("dimension is not 1 mod 4"));
        }
        Self::for_number(((dimension - 17) / 4) as u32)
    }

    /// Match 18 version bits against the reference codes, tolerating 3 bit errors
    pub fn decode_version_information(version_bits: u32) -> Option<&'static Version> {
        let mut best_difference = u32::MAX;
        let mut best_version = 0;
        for (i, &target) in VERSION_DECODE_INFO.iter().enumerate() {
            if target == version_bits {
                return Self::for_number(i as u32 + 7).ok();
            }
            let difference = (version_bits ^ target).count_ones();
            if difference < best_difference {
                best_version = i as u32 + 7;
                best_difference = difference;
            }
        }
        if best_difference <= 3 {
            return Self::for_number(best_version).ok();
        }
        None
    }

    /// Version number (1-40)
    pub fn version_number(&self) -> u32 {
        self.version_number
    }

    /// Alignment pattern center coordinates, shared by both axes
    pub fn alignment_pattern_centers(&self) -> &'static [usize] {
        self.alignment_pattern_centers
    }

    /// Data plus EC codewords in the symbol
    pub fn total_codewords(&self) -> usize {
        self.total_codewords
    }

    /// Modules per side
    pub fn dimension_for_version(&self) -> usize {
        17 + 4 * self.version_number as usize
    }

    /// Block layout at the given level
    pub fn ec_blocks_for_level(&self, ec_level: ECLevel) -> &ECBlocks {
        &self.ec_blocks[ec_level.ordinal()]
    }

    /// Modules reserved for finder, timing, alignment, format and version patterns
    pub fn build_function_pattern(&self) -> FunctionMask {
        FunctionMask::for_version(self)
    }
}

#[rustfmt::skip]
static VERSION_SPECS: [VersionSpec; 40] = [
    VersionSpec {
        number: 1,
        alignment_centers: &[],
        ec_blocks: [
            ECBlocks::new(7, &[ECB::new(1, 19)]),
            ECBlocks::new(10, &[ECB::new(1, 16)]),
            ECBlocks::new(13, &[ECB::new(1, 13)]),
            ECBlocks::new(17, &[ECB::new(1, 9)]),
        ],
    },
    VersionSpec {
        number: 2,
        alignment_centers: &[6, 18],
        ec_blocks: [
            ECBlocks::new(10, &[ECB::new(1, 34)]),
            ECBlocks::new(16, &[ECB::new(1, 28)]),
            ECBlocks::new(22, &[ECB::new(1, 22)]),
            ECBlocks::new(28, &[ECB::new(1, 16)]),
        ],
    },
    VersionSpec {
        number: 3,
        alignment_centers: &[6, 22],
        ec_blocks: [
            ECBlocks::new(15, &[ECB::new(1, 55)]),
            ECBlocks::new(26, &[ECB::new(1, 44)]),
            ECBlocks::new(18, &[ECB::new(2, 17)]),
            ECBlocks::new(22, &[ECB::new(2, 13)]),
        ],
    },
    VersionSpec {
        number: 4,
        alignment_centers: &[6, 26],
        ec_blocks: [
            ECBlocks::new(20, &[ECB::new(1, 80)]),
            ECBlocks::new(18, &[ECB::new(2, 32)]),
            ECBlocks::new(26, &[ECB::new(2, 24)]),
            ECBlocks::new(16, &[ECB::new(4, 9)]),
        ],
    },
    VersionSpec {
        number: 5,
        alignment_centers: &[6, 30],
        ec_blocks: [
            ECBlocks::new(26, &[ECB::new(1, 108)]),
            ECBlocks::new(24, &[ECB::new(2, 43)]),
            ECBlocks::new(18, &[ECB::new(2, 15), ECB::new(2, 16)]),
            ECBlocks::new(22, &[ECB::new(2, 11), ECB::new(2, 12)]),
        ],
    },
    VersionSpec {
        number: 6,
        alignment_centers: &[6, 34],
        ec_blocks: [
            ECBlocks::new(18, &[ECB::new(2, 68)]),
            ECBlocks::new(16, &[ECB::new(4, 27)]),
            ECBlocks::new(24, &[ECB::new(4, 19)]),
            ECBlocks::new(28, &[ECB::new(4, 15)]),
        ],
    },
    VersionSpec {
        number: 7,
        alignment_centers: &[6, 22, 38],
        ec_blocks: [
            ECBlocks::new(20, &[ECB::new(2, 78)]),
            ECBlocks::new(18, &[ECB::new(4, 31)]),
            ECBlocks::new(18, &[ECB::new(2, 14), ECB::new(4, 15)]),
            ECBlocks::new(26, &[ECB::new(4, 13), ECB::new(1, 14)]),
        ],
    },
    VersionSpec {
        number: 8,
        alignment_centers: &[6, 24, 42],
        ec_blocks: [
            ECBlocks::new(24, &[ECB::new(2, 97)]),
            ECBlocks::new(22, &[ECB::new(2, 38), ECB::new(2, 39)]),
            ECBlocks::new(22, &[ECB::new(4, 18), ECB::new(2, 19)]),
            ECBlocks::new(26, &[ECB::new(4, 14), ECB::new(2, 15)]),
        ],
    },
    VersionSpec {
        number: 9,
        alignment_centers: &[6, 26, 46],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(2, 116)]),
            ECBlocks::new(22, &[ECB::new(3, 36), ECB::new(2, 37)]),
            ECBlocks::new(20, &[ECB::new(4, 16), ECB::new(4, 17)]),
            ECBlocks::new(24, &[ECB::new(4, 12), ECB::new(4, 13)]),
        ],
    },
    VersionSpec {
        number: 10,
        alignment_centers: &[6, 28, 50],
        ec_blocks: [
            ECBlocks::new(18, &[ECB::new(2, 68), ECB::new(2, 69)]),
            ECBlocks::new(26, &[ECB::new(4, 43), ECB::new(1, 44)]),
            ECBlocks::new(24, &[ECB::new(6, 19), ECB::new(2, 20)]),
            ECBlocks::new(28, &[ECB::new(6, 15), ECB::new(2, 16)]),
        ],
    },
    VersionSpec {
        number: 11,
        alignment_centers: &[6, 30, 54],
        ec_blocks: [
            ECBlocks::new(20, &[ECB::new(4, 81)]),
            ECBlocks::new(30, &[ECB::new(1, 50), ECB::new(4, 51)]),
            ECBlocks::new(28, &[ECB::new(4, 22), ECB::new(4, 23)]),
            ECBlocks::new(24, &[ECB::new(3, 12), ECB::new(8, 13)]),
        ],
    },
    VersionSpec {
        number: 12,
        alignment_centers: &[6, 32, 58],
        ec_blocks: [
            ECBlocks::new(24, &[ECB::new(2, 92), ECB::new(2, 93)]),
            ECBlocks::new(22, &[ECB::new(6, 36), ECB::new(2, 37)]),
            ECBlocks::new(26, &[ECB::new(4, 20), ECB::new(6, 21)]),
            ECBlocks::new(28, &[ECB::new(7, 14), ECB::new(4, 15)]),
        ],
    },
    VersionSpec {
        number: 13,
        alignment_centers: &[6, 34, 62],
        ec_blocks: [
            ECBlocks::new(26, &[ECB::new(4, 107)]),
            ECBlocks::new(22, &[ECB::new(8, 37), ECB::new(1, 38)]),
            ECBlocks::new(24, &[ECB::new(8, 20), ECB::new(4, 21)]),
            ECBlocks::new(22, &[ECB::new(12, 11), ECB::new(4, 12)]),
        ],
    },
    VersionSpec {
        number: 14,
        alignment_centers: &[6, 26, 46, 66],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(3, 115), ECB::new(1, 116)]),
            ECBlocks::new(24, &[ECB::new(4, 40), ECB::new(5, 41)]),
            ECBlocks::new(20, &[ECB::new(11, 16), ECB::new(5, 17)]),
            ECBlocks::new(24, &[ECB::new(11, 12), ECB::new(5, 13)]),
        ],
    },
    VersionSpec {
        number: 15,
        alignment_centers: &[6, 26, 48, 70],
        ec_blocks: [
            ECBlocks::new(22, &[ECB::new(5, 87), ECB::new(1, 88)]),
            ECBlocks::new(24, &[ECB::new(5, 41), ECB::new(5, 42)]),
            ECBlocks::new(30, &[ECB::new(5, 24), ECB::new(7, 25)]),
            ECBlocks::new(24, &[ECB::new(11, 12), ECB::new(7, 13)]),
        ],
    },
    VersionSpec {
        number: 16,
        alignment_centers: &[6, 26, 50, 74],
        ec_blocks: [
            ECBlocks::new(24, &[ECB::new(5, 98), ECB::new(1, 99)]),
            ECBlocks::new(28, &[ECB::new(7, 45), ECB::new(3, 46)]),
            ECBlocks::new(24, &[ECB::new(15, 19), ECB::new(2, 20)]),
            ECBlocks::new(30, &[ECB::new(3, 15), ECB::new(13, 16)]),
        ],
    },
    VersionSpec {
        number: 17,
        alignment_centers: &[6, 30, 54, 78],
        ec_blocks: [
            ECBlocks::new(28, &[ECB::new(1, 107), ECB::new(5, 108)]),
            ECBlocks::new(28, &[ECB::new(10, 46), ECB::new(1, 47)]),
            ECBlocks::new(28, &[ECB::new(1, 22), ECB::new(15, 23)]),
            ECBlocks::new(28, &[ECB::new(2, 14), ECB::new(17, 15)]),
        ],
    },
    VersionSpec {
        number: 18,
        alignment_centers: &[6, 30, 56, 82],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(5, 120), ECB::new(1, 121)]),
            ECBlocks::new(26, &[ECB::new(9, 43), ECB::new(4, 44)]),
            ECBlocks::new(28, &[ECB::new(17, 22), ECB::new(1, 23)]),
            ECBlocks::new(28, &[ECB::new(2, 14), ECB::new(19, 15)]),
        ],
    },
    VersionSpec {
        number: 19,
        alignment_centers: &[6, 30, 58, 86],
        ec_blocks: [
            ECBlocks::new(28, &[ECB::new(3, 113), ECB::new(4, 114)]),
            ECBlocks::new(26, &[ECB::new(3, 44), ECB::new(11, 45)]),
            ECBlocks::new(26, &[ECB::new(17, 21), ECB::new(4, 22)]),
            ECBlocks::new(26, &[ECB::new(9, 13), ECB::new(16, 14)]),
        ],
    },
    VersionSpec {
        number: 20,
        alignment_centers: &[6, 34, 62, 90],
        ec_blocks: [
            ECBlocks::new(28, &[ECB::new(3, 107), ECB::new(5, 108)]),
            ECBlocks::new(26, &[ECB::new(3, 41), ECB::new(13, 42)]),
            ECBlocks::new(30, &[ECB::new(15, 24), ECB::new(5, 25)]),
            ECBlocks::new(28, &[ECB::new(15, 15), ECB::new(10, 16)]),
        ],
    },
    VersionSpec {
        number: 21,
        alignment_centers: &[6, 28, 50, 72, 94],
        ec_blocks: [
            ECBlocks::new(28, &[ECB::new(4, 116), ECB::new(4, 117)]),
            ECBlocks::new(26, &[ECB::new(17, 42)]),
            ECBlocks::new(28, &[ECB::new(17, 22), ECB::new(6, 23)]),
            ECBlocks::new(30, &[ECB::new(19, 16), ECB::new(6, 17)]),
        ],
    },
    VersionSpec {
        number: 22,
        alignment_centers: &[6, 26, 50, 74, 98],
        ec_blocks: [
            ECBlocks::new(28, &[ECB::new(2, 111), ECB::new(7, 112)]),
            ECBlocks::new(28, &[ECB::new(17, 46)]),
            ECBlocks::new(30, &[ECB::new(7, 24), ECB::new(16, 25)]),
            ECBlocks::new(24, &[ECB::new(34, 13)]),
        ],
    },
    VersionSpec {
        number: 23,
        alignment_centers: &[6, 30, 54, 78, 102],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(4, 121), ECB::new(5, 122)]),
            ECBlocks::new(28, &[ECB::new(4, 47), ECB::new(14, 48)]),
            ECBlocks::new(30, &[ECB::new(11, 24), ECB::new(14, 25)]),
            ECBlocks::new(30, &[ECB::new(16, 15), ECB::new(14, 16)]),
        ],
    },
    VersionSpec {
        number: 24,
        alignment_centers: &[6, 28, 54, 80, 106],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(6, 117), ECB::new(4, 118)]),
            ECBlocks::new(28, &[ECB::new(6, 45), ECB::new(14, 46)]),
            ECBlocks::new(30, &[ECB::new(11, 24), ECB::new(16, 25)]),
            ECBlocks::new(30, &[ECB::new(30, 16), ECB::new(2, 17)]),
        ],
    },
    VersionSpec {
        number: 25,
        alignment_centers: &[6, 32, 58, 84, 110],
        ec_blocks: [
            ECBlocks::new(26, &[ECB::new(8, 106), ECB::new(4, 107)]),
            ECBlocks::new(28, &[ECB::new(8, 47), ECB::new(13, 48)]),
            ECBlocks::new(30, &[ECB::new(7, 24), ECB::new(22, 25)]),
            ECBlocks::new(30, &[ECB::new(22, 15), ECB::new(13, 16)]),
        ],
    },
    VersionSpec {
        number: 26,
        alignment_centers: &[6, 30, 58, 86, 114],
        ec_blocks: [
            ECBlocks::new(28, &[ECB::new(10, 114), ECB::new(2, 115)]),
            ECBlocks::new(28, &[ECB::new(19, 46), ECB::new(4, 47)]),
            ECBlocks::new(28, &[ECB::new(28, 22), ECB::new(6, 23)]),
            ECBlocks::new(30, &[ECB::new(33, 16), ECB::new(4, 17)]),
        ],
    },
    VersionSpec {
        number: 27,
        alignment_centers: &[6, 34, 62, 90, 118],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(8, 122), ECB::new(4, 123)]),
            ECBlocks::new(28, &[ECB::new(22, 45), ECB::new(3, 46)]),
            ECBlocks::new(30, &[ECB::new(8, 23), ECB::new(26, 24)]),
            ECBlocks::new(30, &[ECB::new(12, 15), ECB::new(28, 16)]),
        ],
    },
    VersionSpec {
        number: 28,
        alignment_centers: &[6, 26, 50, 74, 98, 122],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(3, 117), ECB::new(10, 118)]),
            ECBlocks::new(28, &[ECB::new(3, 45), ECB::new(23, 46)]),
            ECBlocks::new(30, &[ECB::new(4, 24), ECB::new(31, 25)]),
            ECBlocks::new(30, &[ECB::new(11, 15), ECB::new(31, 16)]),
        ],
    },
    VersionSpec {
        number: 29,
        alignment_centers: &[6, 30, 54, 78, 102, 126],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(7, 116), ECB::new(7, 117)]),
            ECBlocks::new(28, &[ECB::new(21, 45), ECB::new(7, 46)]),
            ECBlocks::new(30, &[ECB::new(1, 23), ECB::new(37, 24)]),
            ECBlocks::new(30, &[ECB::new(19, 15), ECB::new(26, 16)]),
        ],
    },
    VersionSpec {
        number: 30,
        alignment_centers: &[6, 26, 52, 78, 104, 130],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(5, 115), ECB::new(10, 116)]),
            ECBlocks::new(28, &[ECB::new(19, 47), ECB::new(10, 48)]),
            ECBlocks::new(30, &[ECB::new(15, 24), ECB::new(25, 25)]),
            ECBlocks::new(30, &[ECB::new(23, 15), ECB::new(25, 16)]),
        ],
    },
    VersionSpec {
        number: 31,
        alignment_centers: &[6, 30, 56, 82, 108, 134],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(13, 115), ECB::new(3, 116)]),
            ECBlocks::new(28, &[ECB::new(2, 46), ECB::new(29, 47)]),
            ECBlocks::new(30, &[ECB::new(42, 24), ECB::new(1, 25)]),
            ECBlocks::new(30, &[ECB::new(23, 15), ECB::new(28, 16)]),
        ],
    },
    VersionSpec {
        number: 32,
        alignment_centers: &[6, 34, 60, 86, 112, 138],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(17, 115)]),
            ECBlocks::new(28, &[ECB::new(10, 46), ECB::new(23, 47)]),
            ECBlocks::new(30, &[ECB::new(10, 24), ECB::new(35, 25)]),
            ECBlocks::new(30, &[ECB::new(19, 15), ECB::new(35, 16)]),
        ],
    },
    VersionSpec {
        number: 33,
        alignment_centers: &[6, 30, 58, 86, 114, 142],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(17, 115), ECB::new(1, 116)]),
            ECBlocks::new(28, &[ECB::new(14, 46), ECB::new(21, 47)]),
            ECBlocks::new(30, &[ECB::new(29, 24), ECB::new(19, 25)]),
            ECBlocks::new(30, &[ECB::new(11, 15), ECB::new(46, 16)]),
        ],
    },
    VersionSpec {
        number: 34,
        alignment_centers: &[6, 34, 62, 90, 118, 146],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(13, 115), ECB::new(6, 116)]),
            ECBlocks::new(28, &[ECB::new(14, 46), ECB::new(23, 47)]),
            ECBlocks::new(30, &[ECB::new(44, 24), ECB::new(7, 25)]),
            ECBlocks::new(30, &[ECB::new(59, 16), ECB::new(1, 17)]),
        ],
    },
    VersionSpec {
        number: 35,
        alignment_centers: &[6, 30, 54, 78, 102, 126, 150],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(12, 121), ECB::new(7, 122)]),
            ECBlocks::new(28, &[ECB::new(12, 47), ECB::new(26, 48)]),
            ECBlocks::new(30, &[ECB::new(39, 24), ECB::new(14, 25)]),
            ECBlocks::new(30, &[ECB::new(22, 15), ECB::new(41, 16)]),
        ],
    },
    VersionSpec {
        number: 36,
        alignment_centers: &[6, 24, 50, 76, 102, 128, 154],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(6, 121), ECB::new(14, 122)]),
            ECBlocks::new(28, &[ECB::new(6, 47), ECB::new(34, 48)]),
            ECBlocks::new(30, &[ECB::new(46, 24), ECB::new(10, 25)]),
            ECBlocks::new(30, &[ECB::new(2, 15), ECB::new(64, 16)]),
        ],
    },
    VersionSpec {
        number: 37,
        alignment_centers: &[6, 28, 54, 80, 106, 132, 158],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(17, 122), ECB::new(4, 123)]),
            ECBlocks::new(28, &[ECB::new(29, 46), ECB::new(14, 47)]),
            ECBlocks::new(30, &[ECB::new(49, 24), ECB::new(10, 25)]),
            ECBlocks::new(30, &[ECB::new(24, 15), ECB::new(46, 16)]),
        ],
    },
    VersionSpec {
        number: 38,
        alignment_centers: &[6, 32, 58, 84, 110, 136, 162],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(4, 122), ECB::new(18, 123)]),
            ECBlocks::new(28, &[ECB::new(13, 46), ECB::new(32, 47)]),
            ECBlocks::new(30, &[ECB::new(48, 24), ECB::new(14, 25)]),
            ECBlocks::new(30, &[ECB::new(42, 15), ECB::new(32, 16)]),
        ],
    },
    VersionSpec {
        number: 39,
        alignment_centers: &[6, 26, 54, 82, 110, 138, 166],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(20, 117), ECB::new(4, 118)]),
            ECBlocks::new(28, &[ECB::new(40, 47), ECB::new(7, 48)]),
            ECBlocks::new(30, &[ECB::new(43, 24), ECB::new(22, 25)]),
            ECBlocks::new(30, &[ECB::new(10, 15), ECB::new(67, 16)]),
        ],
    },
    VersionSpec {
        number: 40,
        alignment_centers: &[6, 30, 58, 86, 114, 142, 170],
        ec_blocks: [
            ECBlocks::new(30, &[ECB::new(19, 118), ECB::new(6, 119)]),
            ECBlocks::new(28, &[ECB::new(18, 47), ECB::new(31, 48)]),
            ECBlocks::new(30, &[ECB::new(34, 24), ECB::new(34, 25)]),
            ECBlocks::new(30, &[ECB::new(20, 15), ECB::new(61, 16)]),
        ],
    },
];
