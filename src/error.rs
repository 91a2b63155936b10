//! Error taxonomy for the decode pipeline.
//!
//! Failure kinds are distinguished structurally by enum variant, never by
//! message text. Only [`SourceError::FinderNotFound`] aborts the retry loop;
//! every other failure is absorbed into best-candidate selection.

use thiserror::Error;

/// Terminal failures reported to callers of [`crate::decode`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The finder patterns are absent; the symbol is structurally missing.
    /// Grid adjustments cannot help, so no retries are made.
    #[error("finder pattern not found")]
    SymbolNotFound,
    /// Every grid adjustment was exhausted without producing a candidate.
    #[error("gave up decoding after {attempts} attempts")]
    Unrecognizable {
        /// Number of decode attempts that were made before giving up.
        attempts: usize,
    },
}

/// Failures reported by the grid/geometry collaborator behind
/// [`crate::models::SymbolSource`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// The symbol's fixed reference markers could not be located.
    #[error("finder pattern not found")]
    FinderNotFound,
    /// The grid could not be sampled at this adjustment; another nudge may
    /// still succeed.
    #[error("symbol grid could not be sampled")]
    Sampling,
}

/// Reed-Solomon block decode failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RsError {
    /// Block length or parity count outside the decodable range.
    #[error("block length outside the decodable range")]
    InvalidLength,
    /// More errors than the parity codewords can correct.
    #[error("too many errors to correct")]
    Uncorrectable,
}

/// Rejected codeword block layouts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// Parity codewords do not divide evenly across the RS blocks.
    #[error("parity codewords do not divide evenly across blocks")]
    UnevenParity,
    /// The layout leaves no payload codewords in a block.
    #[error("blocks would hold no payload codewords")]
    NoPayload,
    /// The codeword sequence does not match the declared capacity.
    #[error("codeword count does not match the declared capacity")]
    CapacityMismatch,
}

/// Failure surfaced by the bitstream-parsing collaborator. Treated as an
/// attempt failure by the orchestrator, never as a block failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid data block: {0}")]
pub struct ParseError(pub &'static str);
