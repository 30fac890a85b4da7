//! The eight data mask patterns XORed over QR data modules

use crate::models::BitMatrix;

/// Mask pattern (0-7); `i` is the row and `j` the column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMask {
    /// (i + j) % 2 == 0
    Pattern000,
    /// i % 2 == 0
    Pattern001,
    /// j % 3 == 0
    Pattern010,
    /// (i + j) % 3 == 0
    Pattern011,
    /// (i/2 + j/3) % 2 == 0
    Pattern100,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern101,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern110,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern111,
}

impl DataMask {
    /// Mask for the 3-bit reference in the format information
    pub fn for_reference(reference: u8) -> Self {
        match reference & 0x07 {
            0 => DataMask::Pattern000,
            1 => DataMask::Pattern001,
            2 => DataMask::Pattern010,
            3 => DataMask::Pattern011,
            4 => DataMask::Pattern100,
            5 => DataMask::Pattern101,
            6 => DataMask::Pattern110,
            _ => DataMask::Pattern111,
        }
    }

    /// Check if module at row `i`, column `j` is flipped by this mask
    pub fn is_masked(self, i: usize, j: usize) -> bool {
        match self {
            DataMask::Pattern000 => (i + j) & 0x01 == 0,
            DataMask::Pattern001 => i & 0x01 == 0,
            DataMask::Pattern010 => j % 3 == 0,
            DataMask::Pattern011 => (i + j) % 3 == 0,
            DataMask::Pattern100 => ((i / 2) + (j / 3)) & 0x01 == 0,
            DataMask::Pattern101 => {
                let t = i * j;
                (t & 0x01) + (t % 3) == 0
            }
            DataMask::Pattern110 => {
                let t = i * j;
                ((t & 0x01) + (t % 3)) & 0x01 == 0
            }
            DataMask::Pattern111 => (((i + j) & 0x01) + ((i * j) % 3)) & 0x01 == 0,
        }
    }

    /// Flip every masked module of the top-left `dimension` square.
    ///
    /// Function modules are flipped too; the codeword reader skips them.
    /// Applying the same mask twice restores the matrix.
    pub fn unmask_bit_matrix(self, bits: &mut BitMatrix, dimension: usize) {
        for i in 0..dimension {
            for j in 0..dimension {
                if self.is_masked(i, j) {
                    bits.flip(j, i);
                }
            }
        }
    }
}
