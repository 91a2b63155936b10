//! qr_ecc - error correction and decode-retry core for QR code scanning
//!
//! The subsystem that turns a noisy raw codeword reading into the payload
//! bytes: GF(256) arithmetic, a Reed-Solomon block decoder, round-robin
//! block de-interleaving, a BCH(15,5) corrector for control fields, and the
//! retry loop that nudges the sampling grid and keeps the least-damaged
//! result.
//!
//! Pixel work stays outside: finder detection, perspective correction, and
//! grid sampling live behind the [`SymbolSource`] trait, and final
//! bitstream parsing can be plugged in through
//! [`QrDecoder::decode_with_parser`].

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod debug;
/// QR code decoding modules (field arithmetic, error correction, retry orchestration)
pub mod decoder;
/// Error taxonomy (terminal, source, correction, and layout failures)
pub mod error;
/// Core data structures (block layout, symbol readings, grid adjustments)
pub mod models;

pub use decoder::blocks::{BlockCorrection, BlockInterleaver};
pub use decoder::qr_decoder::{DecodeTelemetry, PayloadParser, QrDecoder};
pub use error::{DecodeError, LayoutError, ParseError, RsError, SourceError};
pub use models::{BlockLayout, EcLevel, GridAdjust, SymbolReading, SymbolSource};

/// Decode a QR symbol through a grid-sampling source.
///
/// Walks the grid-adjustment schedule until an attempt is fully corrected,
/// then returns its payload codewords. If no attempt comes back clean, the
/// one with the fewest uncorrectable blocks wins.
///
/// # Example
/// ```no_run
/// use qr_ecc::{SymbolSource, decode};
///
/// fn scan(source: &mut impl SymbolSource) {
///     match decode(source) {
///         Ok(bytes) => println!("payload: {} bytes", bytes.len()),
///         Err(err) => eprintln!("decode failed: {err}"),
///     }
/// }
/// ```
pub fn decode<S: SymbolSource>(source: &mut S) -> Result<Vec<u8>, DecodeError> {
    QrDecoder::decode(source)
}
