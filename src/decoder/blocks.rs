/// Codeword block de-interleaving and per-block correction
///
/// A symbol with more than one RS block transmits its codewords round-robin:
/// column j of block i sits at flat index `j * num_blocks + i`, with an
/// offset correction once the shorter blocks run out of payload columns.
/// Each block is corrected independently and the payload portions are
/// concatenated back in block order.
use crate::debug::debug_enabled;
use crate::decoder::reed_solomon::RsDecoder;
use crate::error::LayoutError;
use crate::models::BlockLayout;

/// Outcome of correcting one interleaved codeword array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCorrection {
    /// Corrected payload codewords in block order, parity stripped.
    pub data: Vec<u8>,
    /// Codewords corrected across all blocks.
    pub corrected: usize,
    /// Blocks whose damage exceeded the correction capacity.
    pub failures: usize,
}

/// Splits a flat codeword sequence into per-block views and recombines them.
pub struct BlockInterleaver {
    layout: BlockLayout,
    num_longer: usize,
    num_shorter: usize,
    shorter_len: usize,
    /// Payload columns of a shorter block; the offset correction starts here.
    shorter_data: usize,
}

impl BlockInterleaver {
    /// Validate a layout and build the interleaver for it.
    pub fn new(layout: BlockLayout) -> Result<Self, LayoutError> {
        if layout.num_rs_blocks == 0 || layout.total_parity % layout.num_rs_blocks != 0 {
            return Err(LayoutError::UnevenParity);
        }
        let num_longer = layout.data_capacity % layout.num_rs_blocks;
        let shorter_len = layout.data_capacity / layout.num_rs_blocks;
        let parity = layout.parity_per_block();
        if shorter_len <= parity {
            return Err(LayoutError::NoPayload);
        }
        Ok(Self {
            layout,
            num_longer,
            num_shorter: layout.num_rs_blocks - num_longer,
            shorter_len,
            shorter_data: shorter_len - parity,
        })
    }

    /// The layout this interleaver was built for.
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// Flat index of column `j` of block `block`.
    fn flat_index(&self, block: usize, j: usize) -> usize {
        let n = self.layout.num_rs_blocks;
        if j < self.shorter_data {
            j * n + block
        } else if block >= self.num_shorter {
            // longer blocks: the shorter ones stopped contributing columns
            j * n + block - self.num_shorter
        } else {
            j * n + block + self.num_longer
        }
    }

    fn block_len(&self, block: usize) -> usize {
        if block >= self.num_shorter {
            self.shorter_len + 1
        } else {
            self.shorter_len
        }
    }

    /// De-interleave a flat codeword sequence into per-block sequences.
    pub fn split(&self, codewords: &[u8]) -> Result<Vec<Vec<u8>>, LayoutError> {
        if codewords.len() != self.layout.data_capacity {
            return Err(LayoutError::CapacityMismatch);
        }
        let mut blocks = Vec::with_capacity(self.layout.num_rs_blocks);
        for i in 0..self.layout.num_rs_blocks {
            let mut block = vec![0u8; self.block_len(i)];
            for (j, slot) in block.iter_mut().enumerate() {
                *slot = codewords[self.flat_index(i, j)];
            }
            blocks.push(block);
        }
        Ok(blocks)
    }

    /// Re-interleave per-block sequences into the flat transmission order.
    /// Exact inverse of [`split`](Self::split).
    pub fn join(&self, blocks: &[Vec<u8>]) -> Result<Vec<u8>, LayoutError> {
        if blocks.len() != self.layout.num_rs_blocks {
            return Err(LayoutError::CapacityMismatch);
        }
        for (i, block) in blocks.iter().enumerate() {
            if block.len() != self.block_len(i) {
                return Err(LayoutError::CapacityMismatch);
            }
        }
        let mut flat = vec![0u8; self.layout.data_capacity];
        for (i, block) in blocks.iter().enumerate() {
            for (j, &cw) in block.iter().enumerate() {
                flat[self.flat_index(i, j)] = cw;
            }
        }
        Ok(flat)
    }

    /// De-interleave, correct every block, and concatenate the payload
    /// portions.
    ///
    /// A block that cannot be corrected keeps its received codewords and
    /// bumps the failure count; the caller ranks attempts by that count.
    pub fn correct(&self, codewords: &[u8]) -> Result<BlockCorrection, LayoutError> {
        let parity = self.layout.parity_per_block();
        let decoder = RsDecoder::new(parity);
        let mut blocks = self.split(codewords)?;

        let mut corrected = 0;
        let mut failures = 0;
        for block in &mut blocks {
            match decoder.decode(block) {
                Ok(fixed) => corrected += fixed,
                Err(_) => failures += 1,
            }
        }

        let mut data = Vec::with_capacity(self.layout.data_capacity - self.layout.total_parity);
        for block in &blocks {
            data.extend_from_slice(&block[..block.len() - parity]);
        }

        if debug_enabled() {
            if corrected > 0 {
                eprintln!("BLOCKS: corrected {corrected} codeword(s)");
            }
            if failures > 0 {
                eprintln!("BLOCKS: {failures} block(s) beyond correction capacity");
            }
        }

        Ok(BlockCorrection {
            data,
            corrected,
            failures,
        })
    }
}
