//! # nttcalc-core
//!
//! Number-theoretic transform engine for the NttCalc-rs toolkit.
//! Finds an NTT-friendly prime modulus and a primitive root for a transform
//! length, and runs naive, recursive, iterative and bit-reversed transforms
//! with optional Montgomery twiddle multiplication.

pub mod arena;
pub mod arith;
pub mod bitrev;
pub mod constants;
pub mod context;
pub mod error;
pub mod iterative;
pub mod modulus;
pub mod montgomery;
pub mod multiplier;
pub mod naive;
pub mod options;
pub mod primality;
pub mod recursive;
pub mod registry;
pub mod root;
pub mod sequence;
pub mod transform;

// Re-exports
pub use arena::TransformArena;
pub use constants::{
    exit_codes, DEFAULT_MAX_MODULUS_CANDIDATES, DEFAULT_PARALLEL_THRESHOLD, MAX_MODULUS,
};
pub use context::NttContext;
pub use error::NttError;
pub use modulus::{find_modulus, find_modulus_with_limits, SearchLimits};
pub use montgomery::MontgomeryField;
pub use multiplier::{MultiplierKind, TwiddleMul};
pub use options::{ExecutionStrategy, TransformOptions};
pub use registry::{DefaultFactory, TransformFactory};
pub use root::{find_primitive_root, is_primitive_root};
pub use sequence::{next_power_of_two, pad_to_power_of_two};
pub use transform::{CoreTransform, Direction, NttTransform, Transform, Variant};

/// Forward transform of `seq` under an explicit `(N, w)` pair.
///
/// `w` must have exact order `seq.len()` modulo the prime `N`. For repeated
/// transforms of one length, build an [`NttContext`] once instead.
///
/// # Example
/// ```
/// use nttcalc_core::{ntt_forward, ntt_inverse, Variant};
///
/// let seq = [4, 1, 4, 2, 1, 3, 5, 6];
/// let fwd = ntt_forward(&seq, 673, 609, Variant::Iterative).unwrap();
/// assert_eq!(fwd, vec![26, 115, 437, 338, 2, 448, 228, 457]);
/// assert_eq!(ntt_inverse(&fwd, 673, 609, Variant::Recursive).unwrap(), seq);
/// ```
pub fn ntt_forward(
    seq: &[u64],
    modulus: u64,
    root: u64,
    variant: Variant,
) -> Result<Vec<u64>, NttError> {
    let ctx = NttContext::from_parts(seq.len(), modulus, root)?;
    ctx.forward(seq, variant, &TransformOptions::default())
}

/// Inverse transform of `seq` under an explicit `(N, w)` pair, scaled by `n⁻¹`.
pub fn ntt_inverse(
    seq: &[u64],
    modulus: u64,
    root: u64,
    variant: Variant,
) -> Result<Vec<u64>, NttError> {
    let ctx = NttContext::from_parts(seq.len(), modulus, root)?;
    ctx.inverse(seq, variant, &TransformOptions::default())
}

/// Montgomery product of two operands already in Montgomery form.
///
/// The product is fully reduced when `a·b < N·R` with `R = 2^64`: both
/// operands below `N`, as [`MontgomeryField::to_montgomery`] produces them, or
/// one below `N` and the other anywhere below `R`.
///
/// # Example
/// ```
/// use nttcalc_core::{montgomery_multiply, MontgomeryField};
///
/// let field = MontgomeryField::new(520_241).unwrap();
/// let (a, b) = (field.to_montgomery(1234), field.to_montgomery(5678));
/// let product = montgomery_multiply(&field, a, b);
/// assert_eq!(field.from_montgomery(product), 1234 * 5678 % 520_241);
/// ```
#[must_use]
pub fn montgomery_multiply(field: &MontgomeryField, a: u64, b: u64) -> u64 {
    field.multiply(a, b)
}
