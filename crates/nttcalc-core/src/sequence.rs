//! Sequence length helpers for callers with arbitrary-length input.

/// Smallest power of two `>= n`; `1` for `n = 0`.
#[must_use]
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Copy `seq` and append zeros up to the next power of two.
///
/// An empty sequence becomes `[0]`.
#[must_use]
pub fn pad_to_power_of_two(seq: &[u64]) -> Vec<u64> {
    let mut padded = Vec::with_capacity(next_power_of_two(seq.len()));
    padded.extend_from_slice(seq);
    padded.resize(next_power_of_two(seq.len()), 0);
    padded
}
