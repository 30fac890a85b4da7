//! De-interleaving of raw codewords into Reed-Solomon blocks.

use super::version::Version;
use crate::error::{QrError, Result};
use crate::models::ECLevel;

/// Data and EC codewords of one Reed-Solomon block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    num_data_codewords: usize,
    codewords: Vec<u8>,
}

impl DataBlock {
    /// Split the interleaved codewords of a symbol into its blocks.
    ///
    /// Blocks are filled round-robin: all data codewords the shorter blocks
    /// share, then the extra data codeword of each longer block, then the EC
    /// codewords.
    pub fn get_data_blocks(
        raw_codewords: &[u8],
        version: &Version,
        ec_level: ECLevel,
    ) -> Result<Vec<DataBlock>> {
        if raw_codewords.len() != version.total_codewords() {
            return Err(QrError::FormatError("raw codeword count does not match version"));
        }

        let ec_blocks = version.ec_blocks_for_level(ec_level);
        let ec_codewords = ec_blocks.ec_codewords_per_block();

        let mut result = Vec::with_capacity(ec_blocks.num_blocks());
        for ecb in ec_blocks.blocks() {
            for _ in 0..ecb.count() {
                let num_data_codewords = ecb.data_codewords();
                result.push(DataBlock {
                    num_data_codewords,
                    codewords: vec![0; ec_codewords + num_data_codewords],
                });
            }
        }

        // Longer blocks, if any, come last
        let shorter_blocks_total_codewords = result[0].codewords.len();
        let longer_blocks_start_at = result
            .iter()
            .position(|block| block.codewords.len() != shorter_blocks_total_codewords)
            .unwrap_or(result.len());
        let shorter_blocks_num_data_codewords = shorter_blocks_total_codewords - ec_codewords;

        let mut raw = raw_codewords.iter().copied();
        let mut next = || raw.next().ok_or(QrError::FormatError("ran out of raw codewords"));

        for i in 0..shorter_blocks_num_data_codewords {
            for block in result.iter_mut() {
                block.codewords[i] = next()?;
            }
        }
        for block in result[longer_blocks_start_at..].iter_mut() {
            block.codewords[shorter_blocks_num_data_codewords] = next()?;
        }
        let max = result[0].codewords.len();
        for i in shorter_blocks_num_data_codewords..max {
            for (j, block) in result.iter_mut().enumerate() {
                let offset = if j < longer_blocks_start_at { i } else { i + 1 };
                block.codewords[offset] = next()?;
            }
        }

        Ok(result)
    }

    /// Number of leading data codewords
    pub fn num_data_codewords(&self) -> usize {
        self.num_data_codewords
    }

    /// Data codewords followed by EC codewords
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    /// Mutable access for in-place error correction
    pub fn codewords_mut(&mut self) -> &mut [u8] {
        &mut self.codewords
    }
}
