//! Constants for modulus search, parallel execution, and exit codes.

/// Default ceiling on the number of candidates `k·n + 1` tried by the modulus search.
pub const DEFAULT_MAX_MODULUS_CANDIDATES: u64 = 1_000_000;

/// Default transform length at or above which the parallel strategy fans out.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 12;

/// Exclusive upper bound for any working modulus.
///
/// Residues stay below 2^62, so `a + b` and `a + N - b` never overflow a `u64`
/// and every product fits in a `u128`.
pub const MAX_MODULUS: u64 = 1 << 62;

/// Miller-Rabin witnesses that are deterministic for every `u64`.
pub const MILLER_RABIN_WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Exit codes for the command-line driver.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Transform variants did not agree, or a round trip failed.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration or input.
    pub const ERROR_CONFIG: i32 = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn witnesses_are_small_primes() {
        for w in MILLER_RABIN_WITNESSES {
            assert!((2..w).all(|d| w % d != 0), "{w} is not prime");
        }
    }

    #[test]
    fn max_modulus_leaves_headroom_for_addition() {
        assert!((MAX_MODULUS - 1).checked_mul(2).is_some());
    }
}
