//! QR code decoding modules
//!
//! This module contains the error-correction half of the decoding pipeline:
//! - GF(256) field arithmetic
//! - Reed-Solomon block correction
//! - Codeword block de-interleaving
//! - BCH(15,5) correction for format info
//! - The retry orchestrator that drives decode attempts

/// BCH(15,5) error correction for format and version info
pub mod bch15_5;
/// Codeword block de-interleaving and per-block correction
pub mod blocks;
pub mod config;
/// Format information recovery (EC level, mask pattern)
pub mod format;
/// GF(256) arithmetic tables and polynomial helpers
pub mod galois;
/// Retry orchestrator that selects the least-damaged decode attempt
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
