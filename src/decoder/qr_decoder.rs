//! Main QR code decoder - wires everything together

use tracing::debug;

use super::bit_matrix_parser::BitMatrixParser;
use super::bitstream::DecodedBitStreamParser;
use super::data_block::DataBlock;
use super::galois::{GenericGF, qr_code_field_256};
use super::reed_solomon::ReedSolomonDecoder;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, DecoderResult};

/// Decodes a sampled module matrix into its payload
pub struct QrDecoder {
    field: &'static GenericGF,
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QrDecoder {
    /// Decoder over the QR code field
    pub fn new() -> Self {
        Self {
            field: qr_code_field_256(),
        }
    }

    /// Decode a square module matrix (true = dark module).
    ///
    /// If the straight read fails, the symbol is read once more as if it had
    /// been reflected about its main diagonal.
    pub fn decode(&self, bits: BitMatrix) -> Result<DecoderResult> {
        let mut parser = BitMatrixParser::new(bits)?;

        let first_error = match self.decode_parser(&mut parser) {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() => e,
            Err(e) => return Err(e),
        };

        // Restore the matrix to its sampled state before re-reading it
        parser.remask();
        parser.set_mirror(true);

        // Only worth a second pass when version and format read cleanly mirrored
        if parser.read_version().is_err() || parser.read_format_information().is_err() {
            return Err(first_error);
        }

        debug!(error = %first_error, "retrying decode with mirrored matrix");
        // Version and format stay cached; codewords come from the transposed matrix
        parser.mirror();

        match self.decode_parser(&mut parser) {
            Ok(mut result) => {
                result.mirrored = true;
                Ok(result)
            }
            Err(_) => Err(first_error),
        }
    }

    fn decode_parser(&self, parser: &mut BitMatrixParser) -> Result<DecoderResult> {
        let version = parser.read_version()?;
        let ec_level = parser.read_format_information()?.ec_level();

        // Read codewords
        let codewords = parser.read_codewords()?;
        // Separate into data blocks
        let data_blocks = DataBlock::get_data_blocks(&codewords, version, ec_level)?;

        let total_bytes = data_blocks.iter().map(DataBlock::num_data_codewords).sum();
        let mut result_bytes = Vec::with_capacity(total_bytes);
        let mut errors_corrected = 0;

        // Error-correct and copy data blocks together into a stream of bytes
        for mut data_block in data_blocks {
            let num_data_codewords = data_block.num_data_codewords();
            errors_corrected += self.correct_errors(data_block.codewords_mut(), num_data_codewords)?;
            result_bytes.extend_from_slice(&data_block.codewords()[..num_data_codewords]);
        }

        debug!(
            version = version.version_number(),
            ec_level = %ec_level,
            errors_corrected,
            "codewords corrected"
        );

        let mut result = DecodedBitStreamParser::decode(result_bytes, version, ec_level)?;
        result.errors_corrected = errors_corrected;
        Ok(result)
    }

    /// Correct one block in place; only the data codewords are written back
    fn correct_errors(&self, codeword_bytes: &mut [u8], num_data_codewords: usize) -> Result<usize> {
        let mut codewords: Vec<u16> = codeword_bytes.iter().map(|&b| u16::from(b)).collect();
        let num_ec_codewords = codeword_bytes.len() - num_data_codewords;
        let corrected = ReedSolomonDecoder::new(self.field)
            .decode(&mut codewords, num_ec_codewords)
            .map_err(|e| match e {
                QrError::IllegalArgument(_) => QrError::ChecksumError("reed-solomon arithmetic failed"),
                other => other,
            })?;
        for (byte, &codeword) in codeword_bytes.iter_mut().zip(&codewords).take(num_data_codewords) {
            *byte = codeword as u8;
        }
        Ok(corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_matrix_is_format_error() {
        let decoder = QrDecoder::new();
        assert!(matches!(
            decoder.decode(BitMatrix::square(21)),
            Err(QrError::FormatError(_))
        ));
    }

    #[test]
    fn test_bad_dimension_rejected_up_front() {
        let decoder = QrDecoder::default();
        for dimension in [22, 23, 24] {
            assert!(matches!(
                decoder.decode(BitMatrix::square(dimension)),
                Err(QrError::FormatError(_))
            ));
        }
    }

    #[test]
    fn test_correct_errors_writes_back_data() {
        let decoder = QrDecoder::new();
        // Version 1-M "01234567" block with two corrupted data codewords
        let mut block: Vec<u8> = vec![
            0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11, 0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55,
        ];
        let expected = block.clone();
        block[1] ^= 0xFF;
        block[5] ^= 0x0F;
        assert_eq!(decoder.correct_errors(&mut block, 16), Ok(2));
        assert_eq!(&block[..16], &expected[..16]);
    }
}
