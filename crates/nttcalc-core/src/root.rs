//! Primitive root search.
//!
//! Candidates are `x^((N−1)/n)` for `x = 2, 3, …`. Each one is an `n`-th root
//! of unity, and it is primitive exactly when `x^((N−1)/p) ≠ 1` for every prime
//! factor `p` of `n`, so only `n` is ever factored. For a power-of-two `n ≥ 2`
//! that condition reads "`x` is a quadratic non-residue", which does not depend
//! on `n`: the same `x` wins at every sub-length, and the root found for `n/2`
//! is always the square of the root found for `n`.

use tracing::debug;

use crate::arith::{pow_mod, prime_factors};
use crate::error::NttError;
use crate::primality::is_prime;

/// Find an element of exact multiplicative order `n` modulo the prime `modulus`.
pub fn find_primitive_root(n: usize, modulus: u64) -> Result<u64, NttError> {
    if !is_prime(modulus) {
        return Err(NttError::InvalidModulus {
            modulus,
            reason: "not prime",
        });
    }
    root_of_unity(n, modulus)
}

/// [`find_primitive_root`] for a modulus already known to be prime.
pub(crate) fn root_of_unity(n: usize, modulus: u64) -> Result<u64, NttError> {
    if n == 0 {
        return Err(NttError::InvalidLength { length: n });
    }
    let not_found = NttError::NoPrimitiveRootFound { length: n, modulus };
    let len = n as u64;
    if (modulus - 1) % len != 0 {
        return Err(not_found);
    }
    if n == 1 {
        return Ok(1);
    }

    let exponent = (modulus - 1) / len;
    let factors = prime_factors(len);
    for x in 2..modulus {
        let candidate = pow_mod(x, exponent, modulus);
        if is_primitive_with_factors(candidate, len, &factors, modulus) {
            debug!(length = n, modulus, root = candidate, seed = x, "found primitive root");
            return Ok(candidate);
        }
    }
    Err(not_found)
}

/// Returns true if `w` has multiplicative order exactly `n` modulo `modulus`.
#[must_use]
pub fn is_primitive_root(w: u64, n: usize, modulus: u64) -> bool {
    if n == 0 || modulus < 2 || w >= modulus {
        return false;
    }
    let len = n as u64;
    is_primitive_with_factors(w, len, &prime_factors(len), modulus)
}

fn is_primitive_with_factors(w: u64, n: u64, factors: &[u64], modulus: u64) -> bool {
    pow_mod(w, n, modulus) == 1 && factors.iter().all(|&p| pow_mod(w, n / p, modulus) != 1)
}
