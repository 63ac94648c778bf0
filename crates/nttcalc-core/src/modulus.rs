//! Working-modulus search.
//!
//! Finds the smallest prime `N = k·n + 1` that is at least `base²·n − 1`,
//! so that a length-`n` convolution of digits bounded by `base` never wraps.

use tracing::debug;

use crate::constants::{DEFAULT_MAX_MODULUS_CANDIDATES, MAX_MODULUS};
use crate::error::NttError;
use crate::primality::is_prime;

/// Bounds on the modulus search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of candidates `k·n + 1` tested before giving up.
    pub max_candidates: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_MODULUS_CANDIDATES,
        }
    }
}

impl SearchLimits {
    /// Normalize limits, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.max_candidates == 0 {
            self.max_candidates = DEFAULT_MAX_MODULUS_CANDIDATES;
        }
        self
    }
}

/// Find the working modulus for digit bound `base` and transform length `n`.
pub fn find_modulus(base: u64, n: usize) -> Result<u64, NttError> {
    find_modulus_with_limits(base, n, &SearchLimits::default())
}

/// [`find_modulus`] with an explicit candidate ceiling.
pub fn find_modulus_with_limits(
    base: u64,
    n: usize,
    limits: &SearchLimits,
) -> Result<u64, NttError> {
    if base < 2 {
        return Err(NttError::InvalidBase(base));
    }
    if n == 0 {
        return Err(NttError::InvalidLength { length: n });
    }
    let len = n as u64;

    let lower_bound = base
        .checked_mul(base)
        .and_then(|sq| sq.checked_mul(len))
        .map(|v| v - 1)
        .ok_or_else(|| bound_overflow(base, n))?;
    if lower_bound >= MAX_MODULUS {
        return Err(bound_overflow(base, n));
    }

    let mut k = (lower_bound - 1) / len;
    for iteration in 0..limits.max_candidates {
        let candidate = k * len + 1;
        if candidate >= MAX_MODULUS {
            return Err(NttError::Overflow(format!(
                "modulus candidate {candidate} for length {n} exceeds 2^62"
            )));
        }
        if candidate >= lower_bound && is_prime(candidate) {
            debug!(
                base,
                length = n,
                modulus = candidate,
                candidates = iteration + 1,
                "found working modulus"
            );
            return Ok(candidate);
        }
        k += 1;
    }

    Err(NttError::NoPrimeFound {
        base,
        length: n,
        iterations: limits.max_candidates,
    })
}

fn bound_overflow(base: u64, n: usize) -> NttError {
    NttError::Overflow(format!("base^2 * n for base {base}, length {n} exceeds 2^62"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_digits_length_eight() {
        // 255^2 * 8 - 1 = 520199; 520201 is composite, 520241 = 65030*8 + 1 is prime.
        assert_eq!(find_modulus(255, 8), Ok(520_241));
    }

    #[test]
    fn decimal_digits() {
        assert_eq!(find_modulus(9, 8), Ok(673));
        assert_eq!(find_modulus(9, 4), Ok(337));
        assert_eq!(find_modulus(9, 1), Ok(83));
    }

    #[test]
    fn result_is_prime_and_congruent() {
        for base in [2u64, 9, 100, 255, 1000] {
            for n in [1usize, 2, 3, 6, 8, 64, 1024] {
                let m = find_modulus(base, n).unwrap();
                assert!(is_prime(m), "base={base} n={n}");
                assert_eq!(m % n as u64, 1 % n as u64, "base={base} n={n}");
                assert!(m >= base * base * n as u64 - 1, "base={base} n={n}");
            }
        }
    }

    #[test]
    fn smallest_such_prime() {
        let n = 16usize;
        let m = find_modulus(255, n).unwrap();
        let lower = 255 * 255 * 16 - 1;
        let mut c = m - 16;
        while c >= lower {
            assert!(!is_prime(c), "{c} is a smaller candidate");
            c -= 16;
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(find_modulus(1, 8), Err(NttError::InvalidBase(1)));
        assert_eq!(
            find_modulus(10, 0),
            Err(NttError::InvalidLength { length: 0 })
        );
        assert!(matches!(
            find_modulus(u64::MAX, 8),
            Err(NttError::Overflow(_))
        ));
        assert!(matches!(
            find_modulus(1 << 30, 8),
            Err(NttError::Overflow(_))
        ));
    }

    #[test]
    fn search_ceiling_is_reported() {
        let limits = SearchLimits { max_candidates: 1 };
        // The first candidate for (255, 8) is below the bound, so one try is not enough.
        assert_eq!(
            find_modulus_with_limits(255, 8, &limits),
            Err(NttError::NoPrimeFound {
                base: 255,
                length: 8,
                iterations: 1,
            })
        );
    }

    #[test]
    fn zero_limit_normalizes_to_default() {
        let limits = SearchLimits { max_candidates: 0 }.normalize();
        assert_eq!(limits, SearchLimits::default());
    }
}
