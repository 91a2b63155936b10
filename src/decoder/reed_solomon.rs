/// Reed-Solomon block decoder
///
/// Decodes one codeword block: syndrome computation, modified
/// Berlekamp-Massey for the error-locator/evaluator pair, Chien search for
/// error positions, Forney correction for error magnitudes. The generator
/// polynomial has roots alpha^0 .. alpha^(parity-1), with the first codeword
/// as the highest-degree coefficient.
use crate::decoder::galois::Field;
use crate::error::RsError;

/// Decoder for blocks carrying a fixed number of parity codewords.
pub struct RsDecoder {
    field: &'static Field,
    parity: usize,
}

impl RsDecoder {
    /// Create a decoder for blocks with `parity` trailing parity codewords.
    pub fn new(parity: usize) -> Self {
        Self {
            field: Field::instance(),
            parity,
        }
    }

    /// Decode and correct one block in place.
    ///
    /// Returns the number of corrected codewords (0 for a clean block).
    pub fn decode(&self, data: &mut [u8]) -> Result<usize, RsError> {
        self.decode_with(data, true)
    }

    /// Decode one block, optionally without applying corrections.
    ///
    /// With `correct = false` the block is only checked: the error count is
    /// still returned but `data` is left untouched.
    pub fn decode_with(&self, data: &mut [u8], correct: bool) -> Result<usize, RsError> {
        let length = data.len();
        if self.parity < 2 || length < self.parity || length > 255 {
            return Err(RsError::InvalidLength);
        }

        let mut syn = vec![0u8; self.parity];
        if self.field.syndrome(data, &mut syn) {
            return Ok(0);
        }

        // sigma needs parity/2 + 2 slots, omega parity/2 + 1
        let mut sigma = vec![0u8; self.parity / 2 + 2];
        let mut omega = vec![0u8; self.parity / 2 + 1];
        let degree = self.berlekamp_massey(&mut sigma, &mut omega, &syn)?;
        if degree == 0 {
            return Err(RsError::Uncorrectable);
        }

        let mut pos = vec![0u8; degree];
        self.chien_search(&mut pos, length, degree, &sigma)?;

        if correct {
            self.forney(data, degree, &pos, &sigma, &omega);
        }
        Ok(degree)
    }

    /// Modified Berlekamp-Massey.
    ///
    /// Maintains the current locator candidate `sg1` and the previous best
    /// `sg0` with their degrees; each syndrome index contributes a
    /// discrepancy that folds a scaled `sg0` into `sg1`, swapping in a new
    /// best candidate whenever the required degree grows past it. Writes
    /// sigma and omega, returns sigma's degree (the detected error count).
    fn berlekamp_massey(
        &self,
        sigma: &mut [u8],
        omega: &mut [u8],
        syn: &[u8],
    ) -> Result<usize, RsError> {
        let f = self.field;
        let parity = self.parity;
        let mut sg0 = vec![0u8; parity];
        let mut sg1 = vec![0u8; parity];
        sg0[1] = 1;
        sg1[0] = 1;
        let mut deg0: usize = 1;
        let mut deg1: usize = 0;
        let mut m: isize = -1;

        for n in 0..parity {
            // discrepancy against the syndrome sequence
            let mut d = syn[n];
            for i in 1..=deg1 {
                d ^= f.mul(sg1[i], syn[n - i]);
            }
            if d != 0 {
                let log_d = f.log(d) as usize;
                let mut wk = vec![0u8; parity];
                for i in 0..=n {
                    wk[i] = sg1[i] ^ f.mul_exp(sg0[i], log_d);
                }
                let required = (n as isize - m) as usize;
                if required > deg1 {
                    m = n as isize - deg1 as isize;
                    deg1 = required;
                    if deg1 > parity / 2 {
                        // sigma's degree exceeds the correction capacity
                        return Err(RsError::Uncorrectable);
                    }
                    let top = deg0.min(parity - 1);
                    for i in 0..=top {
                        sg0[i] = f.div_exp(sg1[i], log_d);
                    }
                    deg0 = deg1;
                }
                sg1 = wk;
            }
            // shift the previous-best candidate by one degree
            let len = (parity - 1).min(deg0);
            sg0.copy_within(0..len, 1);
            sg0[0] = 0;
            deg0 += 1;
        }

        f.mul_poly(omega, &sg1, syn);
        let n = sigma.len().min(sg1.len());
        sigma[..n].copy_from_slice(&sg1[..n]);
        Ok(deg1)
    }

    /// Chien search for the roots of sigma among positions 0..length.
    ///
    /// sigma's degree-1 coefficient is the XOR sum of all error-position
    /// vectors, so the last root is derived by subtracting the found roots
    /// from it instead of being searched.
    fn chien_search(
        &self,
        pos: &mut [u8],
        length: usize,
        degree: usize,
        sigma: &[u8],
    ) -> Result<(), RsError> {
        let f = self.field;
        let mut last = sigma[1];

        if degree == 1 {
            if f.log(last) as usize >= length {
                return Err(RsError::Uncorrectable);
            }
            pos[0] = last;
            return Ok(());
        }

        let mut pos_idx = degree - 1;
        for i in 0..length {
            // evaluate sigma at z = 1/alpha^i
            let z = 255 - i;
            let mut wk = 1u8;
            for j in 1..=degree {
                wk ^= f.mul_exp(sigma[j], (z * j) % 255);
            }
            if wk == 0 {
                let pv = f.exp(i);
                last ^= pv;
                pos[pos_idx] = pv;
                pos_idx -= 1;
                if pos_idx == 0 {
                    if f.log(last) as usize >= length {
                        return Err(RsError::Uncorrectable);
                    }
                    pos[0] = last;
                    return Ok(());
                }
            }
        }
        // fewer than degree roots within the block
        Err(RsError::Uncorrectable)
    }

    /// Forney correction: E_i = pos_i * omega(z) / sigma'(z) at z = 1/pos_i.
    ///
    /// Only odd-degree sigma terms survive the formal derivative in a
    /// characteristic-2 field.
    fn forney(&self, data: &mut [u8], degree: usize, pos: &[u8], sigma: &[u8], omega: &[u8]) {
        let f = self.field;
        let length = data.len();
        for &ps in pos.iter().take(degree) {
            let z_log = 255 - f.log(ps) as usize;

            let mut ov = omega[0];
            for j in 1..degree {
                ov ^= f.mul_exp(omega[j], (z_log * j) % 255);
            }

            let mut dv = sigma[1];
            let mut j = 2;
            while j < degree {
                dv ^= f.mul_exp(sigma[j + 1], (z_log * j) % 255);
                j += 2;
            }

            // position range was guaranteed by the Chien search
            data[f.pos(length, ps)] ^= f.mul(ps, f.div(ov, dv));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RS encoder for testing: appends `parity` parity bytes to `data`.
    /// Generator polynomial has roots alpha^0 .. alpha^(parity-1).
    fn rs_encode(data: &[u8], parity: usize) -> Vec<u8> {
        let f = Field::instance();

        // Build generator polynomial, ascending coefficients
        let mut gpoly = vec![0u8; parity + 1];
        gpoly[0] = 1;
        for i in 0..parity {
            let root = f.exp(i);
            for j in (1..=i + 1).rev() {
                gpoly[j] = gpoly[j - 1] ^ f.mul(gpoly[j], root);
            }
            gpoly[0] = f.mul(gpoly[0], root);
        }

        // Reverse non-leading coefficients for descending-order division
        let mut gpoly_div: Vec<u8> = gpoly[0..parity].to_vec();
        gpoly_div.reverse();

        // Polynomial division: data * x^parity / gpoly
        let mut remainder = vec![0u8; parity];
        for &d in data {
            let factor = d ^ remainder[0];
            for j in 0..parity - 1 {
                remainder[j] = remainder[j + 1];
            }
            remainder[parity - 1] = 0;
            for j in 0..parity {
                remainder[j] ^= f.mul(gpoly_div[j], factor);
            }
        }

        let mut codeword = data.to_vec();
        codeword.extend_from_slice(&remainder);
        codeword
    }

    #[test]
    fn test_clean_codeword_is_untouched() {
        let data = vec![0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
        let mut codeword = rs_encode(&data, 10);
        let original = codeword.clone();
        let decoder = RsDecoder::new(10);
        assert_eq!(decoder.decode(&mut codeword), Ok(0));
        assert_eq!(codeword, original);
    }

    #[test]
    fn test_single_error_corrected() {
        let data = vec![0x00; 10];
        let mut codeword = rs_encode(&data, 10);

        codeword[3] ^= 0xab;

        let decoder = RsDecoder::new(10);
        assert_eq!(decoder.decode(&mut codeword), Ok(1));
        assert_eq!(&codeword[..data.len()], &data[..]);
    }

    #[test]
    fn test_errors_up_to_capacity_corrected() {
        let data = vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
        let parity = 10;
        let mut codeword = rs_encode(&data, parity);
        let original = codeword.clone();

        // parity/2 = 5 errors, the guaranteed bound
        codeword[0] ^= 0xff;
        codeword[2] ^= 0x42;
        codeword[7] ^= 0x13;
        codeword[9] ^= 0x9c;
        codeword[15] ^= 0x77;

        let decoder = RsDecoder::new(parity);
        assert_eq!(decoder.decode(&mut codeword), Ok(5));
        assert_eq!(codeword, original);
    }

    #[test]
    fn test_beyond_capacity_is_uncorrectable() {
        let data = vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
        let parity = 10;
        let mut codeword = rs_encode(&data, parity);

        // parity/2 + 1 = 6 errors
        for (i, pos) in [0usize, 2, 5, 8, 11, 14].iter().enumerate() {
            codeword[*pos] ^= 0x21 + i as u8;
        }

        let decoder = RsDecoder::new(parity);
        assert_eq!(decoder.decode(&mut codeword), Err(RsError::Uncorrectable));
    }

    #[test]
    fn test_check_only_leaves_errors_in_place() {
        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05];
        let mut codeword = rs_encode(&data, 8);

        codeword[2] ^= 0x55;
        let corrupted = codeword.clone();

        let decoder = RsDecoder::new(8);
        assert_eq!(decoder.decode_with(&mut codeword, false), Ok(1));
        assert_eq!(codeword, corrupted);
    }

    #[test]
    fn test_errors_in_parity_section_corrected() {
        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05];
        let mut codeword = rs_encode(&data, 8);
        let total = codeword.len();

        codeword[total - 1] ^= 0xff;
        codeword[total - 2] ^= 0x33;

        let decoder = RsDecoder::new(8);
        assert_eq!(decoder.decode(&mut codeword), Ok(2));
        assert_eq!(&codeword[..data.len()], &data[..]);
    }

    #[test]
    fn test_length_bounds_rejected() {
        let decoder = RsDecoder::new(10);
        // shorter than the parity count
        let mut too_short = vec![0u8; 6];
        assert_eq!(decoder.decode(&mut too_short), Err(RsError::InvalidLength));
        // longer than one GF(256) block can address
        let mut too_long = vec![0u8; 256];
        assert_eq!(decoder.decode(&mut too_long), Err(RsError::InvalidLength));
        // degenerate parity
        let degenerate = RsDecoder::new(1);
        let mut block = vec![0u8; 10];
        assert_eq!(degenerate.decode(&mut block), Err(RsError::InvalidLength));
    }

    #[test]
    fn test_text_payload_roundtrip() {
        let data: Vec<u8> = "https://example.com/r".bytes().collect();
        let mut codeword = rs_encode(&data, 10);

        codeword[1] ^= 0x55;
        codeword[9] ^= 0xaa;

        let decoder = RsDecoder::new(10);
        assert_eq!(decoder.decode(&mut codeword), Ok(2));
        assert_eq!(&codeword[..data.len()], &data[..]);
    }

    #[test]
    fn test_full_length_block() {
        let data = vec![0xa5u8; 225];
        let parity = 30;
        let mut codeword = rs_encode(&data, parity);
        assert_eq!(codeword.len(), 255);
        let original = codeword.clone();

        for pos in [0usize, 37, 101, 254] {
            codeword[pos] ^= 0x6d;
        }

        let decoder = RsDecoder::new(parity);
        assert_eq!(decoder.decode(&mut codeword), Ok(4));
        assert_eq!(codeword, original);
    }
}
