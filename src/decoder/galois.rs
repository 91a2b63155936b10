/// GF(256) arithmetic for Reed-Solomon error correction
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use std::sync::OnceLock;

/// Primitive polynomial (without the x^8 term): x^4 + x^3 + x^2 + 1
pub const POLYNOMIAL: u16 = 0x1d;

/// GF(256) field tables built once per process.
///
/// The exp table is stored twice (indices 0..509) so that expressions like
/// `exp[log(a) + log(b)]` and `exp[log(a) - log(b) + 255]` never need a
/// modulo reduction.
pub struct Field {
    exp: [u8; 510],
    log: [u8; 256],
}

impl Field {
    /// Shared immutable instance; safe for unsynchronized concurrent reads.
    pub fn instance() -> &'static Field {
        static INSTANCE: OnceLock<Field> = OnceLock::new();
        INSTANCE.get_or_init(Field::build)
    }

    fn build() -> Field {
        let mut exp = [0u8; 510];
        let mut log = [0u8; 256];
        let mut d: u16 = 1;
        for i in 0..255 {
            exp[i] = d as u8;
            exp[i + 255] = d as u8;
            log[d as usize] = i as u8;
            d <<= 1;
            if d & 0x100 != 0 {
                d = (d ^ POLYNOMIAL) & 0xff;
            }
        }
        Field { exp, log }
    }

    /// alpha^e for e in 0..510
    #[inline]
    pub fn exp(&self, e: usize) -> u8 {
        self.exp[e]
    }

    /// Discrete log of a nonzero element (log(0) is not defined; the table
    /// slot holds 0)
    #[inline]
    pub fn log(&self, a: u8) -> u8 {
        self.log[a as usize]
    }

    /// Codeword index of error-position vector `a` within a block of
    /// `length` codewords
    #[inline]
    pub fn pos(&self, length: usize, a: u8) -> usize {
        length - 1 - self.log[a as usize] as usize
    }

    /// a * b
    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            0
        } else {
            self.exp[self.log[a as usize] as usize + self.log[b as usize] as usize]
        }
    }

    /// a * alpha^e, for e already known as an exponent in 0..255
    #[inline]
    pub fn mul_exp(&self, a: u8, e: usize) -> u8 {
        if a == 0 {
            0
        } else {
            self.exp[self.log[a as usize] as usize + e]
        }
    }

    /// a / b
    #[inline]
    pub fn div(&self, a: u8, b: u8) -> u8 {
        if a == 0 {
            0
        } else {
            self.exp[self.log[a as usize] as usize + 255 - self.log[b as usize] as usize]
        }
    }

    /// a / alpha^e
    #[inline]
    pub fn div_exp(&self, a: u8, e: usize) -> u8 {
        if a == 0 {
            0
        } else {
            self.exp[self.log[a as usize] as usize + 255 - e]
        }
    }

    /// 1 / a
    #[inline]
    pub fn inv(&self, a: u8) -> u8 {
        self.exp[255 - self.log[a as usize] as usize]
    }

    /// Polynomial product `out = a * b`, truncated to `out.len()` terms.
    ///
    /// Callers size `out` to the maximum degree they care about; higher
    /// terms of the convolution are discarded.
    pub fn mul_poly(&self, out: &mut [u8], a: &[u8], b: &[u8]) {
        out.fill(0);
        for (ia, &av) in a.iter().enumerate() {
            if av == 0 {
                continue;
            }
            let log_a = self.log[av as usize] as usize;
            let ib2 = b.len().min(out.len().saturating_sub(ia));
            for ib in 0..ib2 {
                if b[ib] != 0 {
                    out[ia + ib] ^= self.exp[log_a + self.log[b[ib] as usize] as usize];
                }
            }
        }
    }

    /// Evaluate the syndrome components of `data` into `syn`.
    ///
    /// `syn[i]` is the data polynomial evaluated at alpha^i via Horner's
    /// rule, with `data[0]` as the highest-degree coefficient. Returns true
    /// when every component is zero (no errors).
    pub fn syndrome(&self, data: &[u8], syn: &mut [u8]) -> bool {
        let mut has_err = 0u8;
        for (i, s) in syn.iter_mut().enumerate() {
            let mut wk = 0u8;
            for &d in data {
                // wk = d + wk * alpha^i
                wk = d
                    ^ if wk == 0 {
                        0
                    } else {
                        self.exp[self.log[wk as usize] as usize + i]
                    };
            }
            *s = wk;
            has_err |= wk;
        }
        has_err == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Carry-less reference multiply, for checking the tables.
    fn slow_mul(mut a: u16, mut b: u16) -> u8 {
        let mut r: u16 = 0;
        while b != 0 {
            if b & 1 != 0 {
                r ^= a;
            }
            a <<= 1;
            if a & 0x100 != 0 {
                a = (a ^ POLYNOMIAL) & 0xff;
            }
            b >>= 1;
        }
        r as u8
    }

    #[test]
    fn test_table_construction() {
        let f = Field::instance();
        assert_eq!(f.exp(0), 1);
        // The doubled half mirrors the first
        for i in 0..255 {
            assert_eq!(f.exp(i), f.exp(i + 255));
        }
        // exp and log are inverse on the nonzero range
        for a in 1..=255u8 {
            assert_eq!(f.exp(f.log(a) as usize), a);
        }
    }

    #[test]
    fn test_mul_matches_reference() {
        let f = Field::instance();
        for a in 0..=255u16 {
            for b in 0..=255u16 {
                assert_eq!(f.mul(a as u8, b as u8), slow_mul(a, b));
            }
        }
    }

    #[test]
    fn test_div_mul_roundtrip() {
        let f = Field::instance();
        for a in 1..=255u8 {
            for b in 1..=255u8 {
                assert_eq!(f.div(f.mul(a, b), b), a);
            }
            assert_eq!(f.inv(f.inv(a)), a);
            assert_eq!(f.mul(a, f.inv(a)), 1);
        }
    }

    #[test]
    fn test_zero_is_absorbing() {
        let f = Field::instance();
        assert_eq!(f.mul(0, 77), 0);
        assert_eq!(f.mul(77, 0), 0);
        assert_eq!(f.div(0, 77), 0);
    }

    #[test]
    fn test_mul_exp_agrees_with_mul() {
        let f = Field::instance();
        for a in 1..=255u8 {
            for e in 0..255usize {
                assert_eq!(f.mul_exp(a, e), f.mul(a, f.exp(e)));
                assert_eq!(f.div_exp(a, e), f.div(a, f.exp(e)));
            }
        }
    }

    #[test]
    fn test_mul_poly_convolution() {
        let f = Field::instance();
        // (1 + x) * (1 + x) = 1 + x^2 over GF(2^8)
        let mut out = [0u8; 3];
        f.mul_poly(&mut out, &[1, 1], &[1, 1]);
        assert_eq!(out, [1, 0, 1]);

        // Truncation drops terms beyond the output buffer
        let mut short = [0u8; 2];
        f.mul_poly(&mut short, &[1, 1], &[1, 1]);
        assert_eq!(short, [1, 0]);
    }

    #[test]
    fn test_syndrome_of_zero_word() {
        let f = Field::instance();
        let data = [0u8; 26];
        let mut syn = [0xffu8; 10];
        assert!(f.syndrome(&data, &mut syn));
        assert!(syn.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_syndrome_flags_corruption() {
        let f = Field::instance();
        let mut data = [0u8; 26];
        data[5] = 0x42;
        let mut syn = [0u8; 10];
        assert!(!f.syndrome(&data, &mut syn));
        assert!(syn.iter().any(|&s| s != 0));
    }
}
