//! Reads format, version and codewords out of a sampled module grid

use super::data_mask::DataMask;
use super::format::FormatInformation;
use super::version::Version;
use crate::error::{QrError, Result};
use crate::models::BitMatrix;

/// Owns the working copy of the sampled matrix for one decode.
pub struct BitMatrixParser {
    bit_matrix: BitMatrix,
    parsed_version: Option<&'static Version>,
    parsed_format_info: Option<FormatInformation>,
    applied_mask: Option<DataMask>,
    mirror: bool,
}

impl BitMatrixParser {
    /// Fails with `FormatError` unless the matrix is square with dimension ≥ 21 and ≡ 1 mod 4.
    pub fn new(bit_matrix: BitMatrix) -> Result<Self> {
        let dimension = bit_matrix.height();
        if dimension < 21 || (dimension & 0x03) != 1 || bit_matrix.width() != dimension {
            return Err(QrError::FormatError("matrix dimension is not 1 mod 4"));
        }
        Ok(Self {
            bit_matrix,
            parsed_version: None,
            parsed_format_info: None,
            applied_mask: None,
            mirror: false,
        })
    }

    fn dimension(&self) -> usize {
        self.bit_matrix.height()
    }

    fn copy_bit(&self, i: usize, j: usize, version_bits: u32) -> u32 {
        let bit = if self.mirror {
            self.bit_matrix.get(j, i)
        } else {
            self.bit_matrix.get(i, j)
        };
        if bit { (version_bits << 1) | 0x1 } else { version_bits << 1 }
    }

    /// Read both copies of the format information (cached after the first success)
    pub fn read_format_information(&mut self) -> Result<FormatInformation> {
        if let Some(info) = self.parsed_format_info {
            return Ok(info);
        }

        // Around the top-left finder pattern
        let mut format_info_bits1 = 0;
        for i in 0..6 {
            format_info_bits1 = self.copy_bit(i, 8, format_info_bits1);
        }
        // .. skipping the timing pattern
        format_info_bits1 = self.copy_bit(7, 8, format_info_bits1);
        format_info_bits1 = self.copy_bit(8, 8, format_info_bits1);
        format_info_bits1 = self.copy_bit(8, 7, format_info_bits1);
        for j in (0..=5).rev() {
            format_info_bits1 = self.copy_bit(8, j, format_info_bits1);
        }

        // Split between the top-right and bottom-left finder patterns
        let dimension = self.dimension();
        let mut format_info_bits2 = 0;
        let j_min = dimension - 7;
        for j in (j_min..dimension).rev() {
            format_info_bits2 = self.copy_bit(8, j, format_info_bits2);
        }
        for i in (dimension - 8)..dimension {
            format_info_bits2 = self.copy_bit(i, 8, format_info_bits2);
        }

        let info = FormatInformation::decode(format_info_bits1, format_info_bits2)
            .ok_or(QrError::FormatError("format information does not decode"))?;
        self.parsed_format_info = Some(info);
        Ok(info)
    }

    /// Determine the version from the dimension or the version blocks (cached)
    pub fn read_version(&mut self) -> Result<&'static Version> {
        if let Some(version) = self.parsed_version {
            return Ok(version);
        }

        let dimension = self.dimension();
        let provisional_version = (dimension - 17) / 4;
        if provisional_version <= 6 {
            let version = Version::for_number(provisional_version as u32)?;
            self.parsed_version = Some(version);
            return Ok(version);
        }

        // Top-right version block
        let mut version_bits = 0;
        let ij_min = dimension - 11;
        for j in (0..=5).rev() {
            for i in (ij_min..dimension - 8).rev() {
                version_bits = self.copy_bit(i, j, version_bits);
            }
        }
        if let Some(version) = Self::matching_version(version_bits, dimension) {
            self.parsed_version = Some(version);
            return Ok(version);
        }

        // Bottom-left version block
        version_bits = 0;
        for i in (0..=5).rev() {
            for j in (ij_min..dimension - 8).rev() {
                version_bits = self.copy_bit(i, j, version_bits);
            }
        }
        if let Some(version) = Self::matching_version(version_bits, dimension) {
            self.parsed_version = Some(version);
            return Ok(version);
        }

        Err(QrError::FormatError("version information does not decode"))
    }

    fn matching_version(version_bits: u32, dimension: usize) -> Option<&'static Version> {
        Version::decode_version_information(version_bits)
            .filter(|version| version.dimension_for_version() == dimension)
    }

    /// Unmask the matrix and read the codewords in zig-zag order
    pub fn read_codewords(&mut self) -> Result<Vec<u8>> {
        let format_info = self.read_format_information()?;
        let version = self.read_version()?;

        // Undo the data mask before reading
        let data_mask = DataMask::for_reference(format_info.data_mask());
        let dimension = self.dimension();
        data_mask.unmask_bit_matrix(&mut self.bit_matrix, dimension);
        self.applied_mask = Some(data_mask);

        let function_pattern = version.build_function_pattern();

        let mut reading_up = true;
        let mut result = Vec::with_capacity(version.total_codewords());
        let mut current_byte: u8 = 0;
        let mut bits_read = 0;
        // Read columns in pairs, from right to left
        let mut j = dimension as isize - 1;
        while j > 0 {
            if j == 6 {
                // Skip the vertical timing pattern
                j -= 1;
            }
            let column = j as usize;
            for count in 0..dimension {
                let i = if reading_up { dimension - 1 - count } else { count };
                for col in 0..2 {
                    let x = column - col;
                    if !function_pattern.is_function(x, i) {
                        bits_read += 1;
                        current_byte <<= 1;
                        if self.bit_matrix.get(x, i) {
                            current_byte |= 1;
                        }
                        if bits_read == 8 {
                            result.push(current_byte);
                            bits_read = 0;
                            current_byte = 0;
                        }
                    }
                }
            }
            reading_up = !reading_up;
            j -= 2;
        }

        if result.len() != version.total_codewords() {
            return Err(QrError::FormatError("codeword count does not match version"));
        }
        Ok(result)
    }

    /// Re-apply the data mask removed by `read_codewords`, if any
    pub fn remask(&mut self) {
        if let Some(mask) = self.applied_mask.take() {
            let dimension = self.dimension();
            mask.unmask_bit_matrix(&mut self.bit_matrix, dimension);
        }
    }

    /// Transpose format and version reads; clears the cached values.
    pub fn set_mirror(&mut self, mirror: bool) {
        self.parsed_version = None;
        self.parsed_format_info = None;
        self.mirror = mirror;
    }

    /// Transpose the working matrix
    pub fn mirror(&mut self) {
        self.bit_matrix.transpose();
    }

    /// Current working matrix
    pub fn bit_matrix(&self) -> &BitMatrix {
        &self.bit_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_dimensions() {
        for dimension in [20, 22, 23, 24, 17] {
            assert!(matches!(
                BitMatrixParser::new(BitMatrix::square(dimension)),
                Err(QrError::FormatError(_))
            ));
        }
        assert!(BitMatrixParser::new(BitMatrix::new(21, 25)).is_err());
        assert!(BitMatrixParser::new(BitMatrix::square(25)).is_ok());
    }

    #[test]
    fn test_small_versions_from_dimension() {
        let mut parser = BitMatrixParser::new(BitMatrix::square(41)).unwrap();
        assert_eq!(parser.read_version().unwrap().version_number(), 6);
    }

    #[test]
    fn test_blank_matrix_format_fails() {
        let mut parser = BitMatrixParser::new(BitMatrix::square(21)).unwrap();
        assert!(matches!(
            parser.read_format_information(),
            Err(QrError::FormatError(_))
        ));
        assert!(parser.read_codewords().is_err());
    }

    #[test]
    fn test_reads_format_copy_positions() {
        let code = FormatInformation::encode(crate::models::ECLevel::Q, 6);
        let mut bits = BitMatrix::square(21);
        // Only the second copy, most significant bit first
        let mut positions = Vec::new();
        for j in (14..21).rev() {
            positions.push((8, j));
        }
        for i in 13..21 {
            positions.push((i, 8));
        }
        for (n, &(x, y)) in positions.iter().enumerate() {
            if code & (1 << (14 - n)) != 0 {
                bits.set(x, y, true);
            }
        }
        let mut parser = BitMatrixParser::new(bits.clone()).unwrap();
        let info = parser.read_format_information().unwrap();
        assert_eq!(info.ec_level(), crate::models::ECLevel::Q);
        assert_eq!(info.data_mask(), 6);

        // Transposed copy only decodes with the mirror flag
        bits.transpose();
        let mut parser = BitMatrixParser::new(bits).unwrap();
        parser.set_mirror(true);
        assert_eq!(parser.read_format_information().unwrap(), info);
    }

    #[test]
    fn test_remask_without_unmask_is_noop() {
        let original = BitMatrix::from_fn(21, 21, |x, y| (x ^ y) & 1 == 1);
        let mut parser = BitMatrixParser::new(original.clone()).unwrap();
        parser.remask();
        assert_eq!(parser.bit_matrix(), &original);
    }
}
