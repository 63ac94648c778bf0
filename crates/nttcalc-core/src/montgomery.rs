//! Montgomery multiplication with radix R = 2^64.
//!
//! Values are kept in Montgomery form `x·R mod N` and must be converted in
//! and out explicitly. Reduction uses the positive inverse `N⁻¹ mod R`:
//! `q = low·N⁻¹ mod R`, then `(T − q·N) / R = high − ⌊q·N / R⌋`, corrected by
//! adding `N` when negative.

use crate::constants::MAX_MODULUS;
use crate::error::NttError;

/// Montgomery multiplication context for a fixed odd modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MontgomeryField {
    modulus: u64,
    /// N⁻¹ mod 2^64.
    mod_inv: u64,
    /// R mod N, the Montgomery form of 1.
    r_mod_n: u64,
    /// R² mod N, used to convert into Montgomery form.
    r2_mod_n: u64,
}

impl MontgomeryField {
    /// Build a context for `modulus`, which must be odd, at least 3 and below 2^62.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(modulus: u64) -> Result<Self, NttError> {
        if modulus < 3 || modulus >= MAX_MODULUS {
            return Err(NttError::InvalidModulus {
                modulus,
                reason: "Montgomery modulus must lie in [3, 2^62)",
            });
        }
        if modulus % 2 == 0 {
            return Err(NttError::InvalidModulus {
                modulus,
                reason: "Montgomery modulus must be odd",
            });
        }

        let mod_inv = inverse_mod_r(modulus);
        if modulus.wrapping_mul(mod_inv) != 1 {
            return Err(NttError::InvalidModulus {
                modulus,
                reason: "no inverse modulo 2^64",
            });
        }

        let m = u128::from(modulus);
        let r_mod_n = ((1u128 << 64) % m) as u64;
        let r2_mod_n = (u128::from(r_mod_n) * u128::from(r_mod_n) % m) as u64;

        Ok(Self {
            modulus,
            mod_inv,
            r_mod_n,
            r2_mod_n,
        })
    }

    /// The modulus N.
    #[inline]
    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// N⁻¹ mod 2^64.
    #[inline]
    #[must_use]
    pub fn mod_inv(&self) -> u64 {
        self.mod_inv
    }

    /// Montgomery form of 1.
    #[inline]
    #[must_use]
    pub fn one(&self) -> u64 {
        self.r_mod_n
    }

    /// Convert `x` into Montgomery form. `x` need not be reduced.
    #[inline]
    #[must_use]
    pub fn to_montgomery(&self, x: u64) -> u64 {
        self.multiply(x % self.modulus, self.r2_mod_n)
    }

    /// Convert a Montgomery-form value back to an ordinary residue.
    #[inline]
    #[must_use]
    pub fn from_montgomery(&self, x_mont: u64) -> u64 {
        self.multiply(x_mont, 1)
    }

    /// `a·b·R⁻¹ mod N`.
    ///
    /// The result lies in `[0, N)` whenever `a·b < N·R`, which holds when both
    /// operands are below `N` (every value [`to_montgomery`](Self::to_montgomery)
    /// returns), or when one is below `N` and the other below `R`. Two operands
    /// in `[N, R)` can produce an unreduced result.
    ///
    /// With both operands in Montgomery form the product is in Montgomery form.
    /// With one ordinary operand and one in Montgomery form the product is an
    /// ordinary residue.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn multiply(&self, a: u64, b: u64) -> u64 {
        let t = u128::from(a) * u128::from(b);
        let low = t as u64;
        let high = (t >> 64) as u64;
        let q = low.wrapping_mul(self.mod_inv);
        let qm_high = ((u128::from(q) * u128::from(self.modulus)) >> 64) as u64;
        if high >= qm_high {
            high - qm_high
        } else {
            self.modulus - (qm_high - high)
        }
    }

    /// `base^exp` with `base` and the result in Montgomery form.
    #[must_use]
    pub fn pow(&self, base_mont: u64, mut exp: u64) -> u64 {
        let mut result = self.r_mod_n;
        let mut b = base_mont;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.multiply(result, b);
            }
            exp >>= 1;
            if exp > 0 {
                b = self.multiply(b, b);
            }
        }
        result
    }
}

/// Inverse of an odd `n` modulo 2^64 by Newton-Hensel lifting.
///
/// `n·n ≡ 1 (mod 8)` for odd `n`, so the seed is correct to 3 bits and five
/// doublings reach 96 ≥ 64 bits.
fn inverse_mod_r(n: u64) -> u64 {
    let mut inv = n;
    for _ in 0..5 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(n.wrapping_mul(inv)));
    }
    inv
}
