use crate::error::SourceError;

/// Codeword block structure of one symbol, as reported by the grid reader.
///
/// The counts are produced by the version/format tables of the geometry
/// layer and consumed here as opaque integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Total codeword count of the symbol (payload and parity together).
    pub data_capacity: usize,
    /// Number of independently corrected Reed-Solomon blocks.
    pub num_rs_blocks: usize,
    /// Parity codewords across the whole symbol.
    pub total_parity: usize,
}

impl BlockLayout {
    /// Parity codewords carried by each RS block.
    pub fn parity_per_block(&self) -> usize {
        self.total_parity / self.num_rs_blocks
    }
}

/// One structural reading of a symbol at some sampling-grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolReading {
    /// Symbol version as reported by the geometry layer.
    pub version: u8,
    /// Block structure for this version and EC level.
    pub layout: BlockLayout,
    /// Raw codewords in transmission order, interleaved across blocks.
    pub codewords: Vec<u8>,
}

/// Relative sampling-grid nudge applied between decode attempts.
///
/// Offsets are deltas from the previous attempt's position; the source
/// accumulates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridAdjust {
    /// Horizontal nudge in sampling-grid units.
    pub dx: i32,
    /// Vertical nudge in sampling-grid units.
    pub dy: i32,
}

impl GridAdjust {
    /// Create an adjustment delta.
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// The grid/geometry collaborator: locates the symbol, samples its module
/// grid, and returns the raw codeword array.
///
/// Implementations own the pixel data and the sampling-grid state; repeated
/// `read_adjusted` calls see cumulative adjustments.
pub trait SymbolSource {
    /// Read the symbol at the unadjusted grid position.
    fn read(&mut self) -> Result<SymbolReading, SourceError>;

    /// Re-read the symbol with a further grid adjustment applied on top of
    /// all earlier ones.
    fn read_adjusted(&mut self, adjust: GridAdjust) -> Result<SymbolReading, SourceError>;
}
