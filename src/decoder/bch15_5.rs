/// BCH(15,5) error correction for QR format and version control fields
///
/// A 15-bit codeword carries 5 payload bits with minimum distance 7, so up
/// to 3 bit errors are always correctable. Decoding searches the 32 valid
/// codewords for the unique one within Hamming distance 3 of the received
/// word.
use std::sync::OnceLock;

/// Generator feedback taps; together with the feedback at bit 10 this is
/// g(x) = x^10 + x^8 + x^5 + x^4 + x^2 + x + 1.
const GENERATOR: u16 = 0x137;

/// BCH(15,5) codec backed by the precomputed table of valid codewords.
pub struct Bch15_5 {
    codes: [u16; 32],
}

impl Bch15_5 {
    /// Shared immutable instance; safe for unsynchronized concurrent reads.
    pub fn instance() -> &'static Bch15_5 {
        static INSTANCE: OnceLock<Bch15_5> = OnceLock::new();
        INSTANCE.get_or_init(Bch15_5::build)
    }

    fn build() -> Bch15_5 {
        let mut codes = [0u16; 32];
        for (data, code) in codes.iter_mut().enumerate() {
            *code = Bch15_5::slow_encode(data as u16);
        }
        Bch15_5 { codes }
    }

    /// Shift-register encoding of one 5-bit payload.
    fn slow_encode(data: u16) -> u16 {
        let mut wk: u16 = 0;
        let mut data = data << 5;
        for _ in 0..5 {
            wk <<= 1;
            data <<= 1;
            if (wk ^ data) & 0x400 != 0 {
                wk ^= GENERATOR;
            }
        }
        (data & 0x7c00) | (wk & 0x3ff)
    }

    /// Encode a 5-bit payload into its 15-bit codeword (payload in the top
    /// five bits).
    pub fn encode(&self, data: u16) -> u16 {
        self.codes[(data & 0x1f) as usize]
    }

    /// Correct a received 15-bit word.
    ///
    /// Returns the valid codeword within Hamming distance 3, or `None` when
    /// more than 3 bits are damaged. With minimum distance 7 the match is
    /// unique.
    pub fn decode(&self, word: u16) -> Option<u16> {
        let word = word & 0x7fff;
        self.codes
            .iter()
            .copied()
            .find(|&code| (word ^ code).count_ones() <= 3)
    }
}
