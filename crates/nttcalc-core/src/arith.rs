//! Modular arithmetic over `u64` residues.
//!
//! Every helper expects operands already reduced below the modulus and a
//! modulus below [`MAX_MODULUS`](crate::constants::MAX_MODULUS), and returns a
//! value in `[0, modulus)`. Products go through `u128`.

use num_integer::{Integer, Roots};

/// `(a + b) mod m` for `a, b < m`.
#[inline]
#[must_use]
pub fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    let s = a + b;
    if s >= m {
        s - m
    } else {
        s
    }
}

/// `(a - b) mod m` for `a, b < m`.
#[inline]
#[must_use]
pub fn sub_mod(a: u64, b: u64, m: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        a + m - b
    }
}

/// `(a * b) mod m` through a double-width product.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    (u128::from(a) * u128::from(b) % u128::from(m)) as u64
}

/// `base^exp mod m` by square-and-multiply.
#[must_use]
pub fn pow_mod(base: u64, mut exp: u64, m: u64) -> u64 {
    if m == 1 {
        return 0;
    }
    let mut result = 1;
    let mut base = base % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        exp >>= 1;
        base = mul_mod(base, base, m);
    }
    result
}

/// Multiplicative inverse of `a` modulo a prime `p` (Fermat's little theorem).
///
/// Returns `None` when `a ≡ 0 (mod p)`.
#[must_use]
pub fn inv_mod(a: u64, p: u64) -> Option<u64> {
    if a % p == 0 {
        return None;
    }
    Some(pow_mod(a, p - 2, p))
}

/// Distinct prime factors of `n` in increasing order, by trial division.
#[must_use]
pub fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }
    if n.is_even() {
        factors.push(2);
        while n.is_even() {
            n /= 2;
        }
    }
    let mut d = 3;
    let mut limit = n.sqrt();
    while d <= limit {
        if n % d == 0 {
            factors.push(d);
            while n % d == 0 {
                n /= d;
            }
            limit = n.sqrt();
        }
        d += 2;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}
