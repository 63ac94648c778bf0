//! Deterministic Miller-Rabin primality test for `u64`.

use crate::arith::{mul_mod, pow_mod};
use crate::constants::MILLER_RABIN_WITNESSES;

/// Returns true if `n` is prime.
///
/// The witness set covers every 64-bit integer, so the answer is exact.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &MILLER_RABIN_WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    MILLER_RABIN_WITNESSES
        .iter()
        .all(|&a| passes_round(a, d, s, n))
}

/// One Miller-Rabin round: false means `a` witnesses that `n` is composite.
fn passes_round(a: u64, d: u64, s: u32, n: u64) -> bool {
    let mut x = pow_mod(a, d, n);
    if x == 1 || x == n - 1 {
        return true;
    }
    for _ in 1..s {
        x = mul_mod(x, x, n);
        if x == n - 1 {
            return true;
        }
    }
    false
}
