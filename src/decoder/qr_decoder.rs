/// Retry orchestrator - drives decode attempts over grid adjustments
///
/// Sampling a damaged or skewed print rarely succeeds at the first grid
/// position, so the decoder walks a short deterministic sequence of grid
/// nudges, corrects each reading independently, and keeps the least-damaged
/// result. A fully corrected attempt returns immediately; structural absence
/// of the symbol aborts without retrying.
use crate::debug::debug_enabled;
use crate::decoder::blocks::BlockInterleaver;
use crate::decoder::config::max_attempts_override;
use crate::error::{DecodeError, ParseError, SourceError};
use crate::models::{GridAdjust, SymbolReading, SymbolSource};

/// Per-call counters for diagnosing decode behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeTelemetry {
    /// Decode attempts made (including the final one).
    pub attempts: usize,
    /// Partial candidates recorded across all attempts.
    pub candidates: usize,
    /// Codewords corrected across all attempts.
    pub corrected_symbols: usize,
}

/// Hook for the bitstream-parsing collaborator: turns corrected payload
/// codewords into final bytes, or rejects the attempt.
pub trait PayloadParser {
    /// Parse one attempt's corrected payload.
    fn parse(&mut self, data: &[u8], reading: &SymbolReading) -> Result<Vec<u8>, ParseError>;
}

impl<F> PayloadParser for F
where
    F: FnMut(&[u8], &SymbolReading) -> Result<Vec<u8>, ParseError>,
{
    fn parse(&mut self, data: &[u8], reading: &SymbolReading) -> Result<Vec<u8>, ParseError> {
        self(data, reading)
    }
}

/// Main decoder that orchestrates correction attempts for one symbol.
pub struct QrDecoder;

impl QrDecoder {
    /// Decode a symbol, returning its corrected payload codewords.
    pub fn decode<S: SymbolSource>(source: &mut S) -> Result<Vec<u8>, DecodeError> {
        let mut telemetry = DecodeTelemetry::default();
        Self::run(source, identity_parser, &mut telemetry)
    }

    /// Decode a symbol and run each attempt's corrected payload through the
    /// bitstream parser. A parser rejection fails the attempt, not the whole
    /// decode.
    pub fn decode_with_parser<S, P>(source: &mut S, parser: P) -> Result<Vec<u8>, DecodeError>
    where
        S: SymbolSource,
        P: PayloadParser,
    {
        let mut telemetry = DecodeTelemetry::default();
        Self::run(source, parser, &mut telemetry)
    }

    /// Like [`decode`](Self::decode), but also reports per-call counters.
    pub fn decode_with_telemetry<S: SymbolSource>(
        source: &mut S,
    ) -> (Result<Vec<u8>, DecodeError>, DecodeTelemetry) {
        let mut telemetry = DecodeTelemetry::default();
        let result = Self::run(source, identity_parser, &mut telemetry);
        (result, telemetry)
    }

    /// The grid adjustment schedule.
    ///
    /// Four base nudges of (1,1), then a diagonal scan of x and y from 0
    /// down to -3 keeping the points with x != y and even x + y, each
    /// emitted as the delta from the previously emitted absolute point.
    /// Adjustments apply cumulatively in the source.
    fn adjust_sequence() -> Vec<GridAdjust> {
        let mut adjusts = Vec::new();
        for _ in 0..4 {
            adjusts.push(GridAdjust::new(1, 1));
        }
        let (mut last_x, mut last_y) = (0i32, 0i32);
        let mut y = 0i32;
        while y > -4 {
            let mut x = 0i32;
            while x > -4 {
                if x != y && (x + y) % 2 == 0 {
                    adjusts.push(GridAdjust::new(x - last_x, y - last_y));
                    last_x = x;
                    last_y = y;
                }
                x -= 1;
            }
            y -= 1;
        }
        adjusts
    }

    fn run<S, P>(
        source: &mut S,
        mut parser: P,
        telemetry: &mut DecodeTelemetry,
    ) -> Result<Vec<u8>, DecodeError>
    where
        S: SymbolSource,
        P: PayloadParser,
    {
        let mut adjusts = Self::adjust_sequence();
        if let Some(cap) = max_attempts_override() {
            adjusts.truncate(cap.max(1));
        }

        let mut candidates: Vec<(Vec<u8>, usize)> = Vec::new();

        for (attempt, adjust) in adjusts.iter().enumerate() {
            telemetry.attempts = attempt + 1;

            // The first attempt reads at the unadjusted position; the first
            // schedule entry is never applied.
            let reading = if attempt == 0 {
                if debug_enabled() {
                    eprintln!("DECODE: started");
                }
                source.read()
            } else {
                if debug_enabled() {
                    eprintln!(
                        "DECODE: restarted #{attempt} with adjust ({}, {})",
                        adjust.dx, adjust.dy
                    );
                }
                source.read_adjusted(*adjust)
            };
            let reading = match reading {
                Ok(reading) => reading,
                // Missing finder patterns cannot be nudged into existence
                Err(SourceError::FinderNotFound) => return Err(DecodeError::SymbolNotFound),
                Err(SourceError::Sampling) => continue,
            };

            let interleaver = match BlockInterleaver::new(reading.layout) {
                Ok(interleaver) => interleaver,
                Err(_) => continue,
            };
            let outcome = match interleaver.correct(&reading.codewords) {
                Ok(outcome) => outcome,
                Err(_) => continue,
            };
            telemetry.corrected_symbols += outcome.corrected;

            let bytes = match parser.parse(&outcome.data, &reading) {
                Ok(bytes) => bytes,
                Err(_) => continue,
            };

            if outcome.failures == 0 {
                return Ok(bytes);
            }
            if debug_enabled() {
                eprintln!(
                    "DECODE: attempt #{attempt} left {} uncorrectable block(s), retrying",
                    outcome.failures
                );
            }
            candidates.push((bytes, outcome.failures));
            telemetry.candidates = candidates.len();
        }

        // No attempt was fully corrected: report the least-damaged one.
        // Earliest attempt wins ties, so only strictly better candidates
        // replace the running best.
        let mut best: Option<&(Vec<u8>, usize)> = None;
        for candidate in &candidates {
            if best.is_none_or(|b| candidate.1 < b.1) {
                best = Some(candidate);
            }
        }
        match best {
            Some((bytes, failures)) => {
                if debug_enabled() {
                    eprintln!("DECODE: returning best candidate with {failures} failed block(s)");
                }
                Ok(bytes.clone())
            }
            None => Err(DecodeError::Unrecognizable {
                attempts: adjusts.len(),
            }),
        }
    }
}

fn identity_parser(data: &[u8], _reading: &SymbolReading) -> Result<Vec<u8>, ParseError> {
    Ok(data.to_vec())
}
