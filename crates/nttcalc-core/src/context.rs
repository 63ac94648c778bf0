//! Transform context: modulus, root and derived tables for one length.
//!
//! A context is derived once for a transform length and reused for every
//! transform of that length. It never changes after construction, apart from
//! the per-level root table of the recursive variant, which is derived on
//! first use.

use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::arena::TransformArena;
use crate::arith::{inv_mod, mul_mod, pow_mod};
use crate::constants::MAX_MODULUS;
use crate::error::NttError;
use crate::modulus::{find_modulus_with_limits, SearchLimits};
use crate::options::TransformOptions;
use crate::primality::is_prime;
use crate::registry::DefaultFactory;
use crate::root::{is_primitive_root, root_of_unity};
use crate::transform::{Direction, Variant};

/// Roots re-derived for every power-of-two sub-length, indexed by log2 of the length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRoots {
    /// `forward[s]` has exact order `2^s`.
    pub forward: Vec<u64>,
    /// `inverse[s] = forward[s]⁻¹`.
    pub inverse: Vec<u64>,
}

/// Everything a transform of length `n` needs, derived together.
#[derive(Debug, Clone)]
pub struct NttContext {
    n: usize,
    modulus: u64,
    root: u64,
    root_inv: u64,
    n_inv: u64,
    /// `w^k` for `k < n/2`; empty unless `n` is a power of two.
    twiddles: Vec<u64>,
    /// `w^-k` for `k < n/2`; empty unless `n` is a power of two.
    inv_twiddles: Vec<u64>,
    level_roots: OnceLock<Result<LevelRoots, NttError>>,
}

impl NttContext {
    /// Derive modulus and root for digit bound `base` and length `n`.
    pub fn new(base: u64, n: usize) -> Result<Self, NttError> {
        Self::with_limits(base, n, &SearchLimits::default())
    }

    /// [`NttContext::new`] with an explicit modulus search ceiling.
    pub fn with_limits(base: u64, n: usize, limits: &SearchLimits) -> Result<Self, NttError> {
        let modulus = find_modulus_with_limits(base, n, limits)?;
        Self::for_modulus(n, modulus)
    }

    /// Derive the root for a given prime modulus `N ≡ 1 (mod n)`.
    pub fn for_modulus(n: usize, modulus: u64) -> Result<Self, NttError> {
        validate_modulus(n, modulus)?;
        let root = root_of_unity(n, modulus)?;
        Self::build(n, modulus, root)
    }

    /// Use an explicit `(N, w)` pair after checking that `w` has exact order `n`.
    pub fn from_parts(n: usize, modulus: u64, root: u64) -> Result<Self, NttError> {
        validate_modulus(n, modulus)?;
        if !is_primitive_root(root, n, modulus) {
            return Err(NttError::InvalidRoot {
                root,
                length: n,
                modulus,
            });
        }
        Self::build(n, modulus, root)
    }

    fn build(n: usize, modulus: u64, root: u64) -> Result<Self, NttError> {
        let root_inv = inv_mod(root, modulus).ok_or(NttError::InvalidRoot {
            root,
            length: n,
            modulus,
        })?;
        let n_inv = inv_mod(n as u64 % modulus, modulus).ok_or(NttError::InvalidModulus {
            modulus,
            reason: "transform length is not invertible",
        })?;

        let (twiddles, inv_twiddles) = if n.is_power_of_two() {
            (
                powers(root, n / 2, modulus),
                powers(root_inv, n / 2, modulus),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        debug!(length = n, modulus, root, "built transform context");
        Ok(Self {
            n,
            modulus,
            root,
            root_inv,
            n_inv,
            twiddles,
            inv_twiddles,
            level_roots: OnceLock::new(),
        })
    }

    /// Transform length `n`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false: contexts are never built for length zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Working modulus `N`.
    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Primitive root `w` of order `n`.
    #[must_use]
    pub fn root(&self) -> u64 {
        self.root
    }

    /// `w⁻¹ mod N`.
    #[must_use]
    pub fn root_inv(&self) -> u64 {
        self.root_inv
    }

    /// `n⁻¹ mod N`.
    #[must_use]
    pub fn n_inv(&self) -> u64 {
        self.n_inv
    }

    /// Returns true if the radix-2 variants accept this length.
    #[must_use]
    pub fn is_power_of_two(&self) -> bool {
        self.n.is_power_of_two()
    }

    /// The root used in `direction`.
    #[must_use]
    pub fn root_for(&self, direction: Direction) -> u64 {
        match direction {
            Direction::Forward => self.root,
            Direction::Inverse => self.root_inv,
        }
    }

    /// Twiddle table `w^±k`, `k < n/2`, for `direction`.
    #[must_use]
    pub fn twiddles(&self, direction: Direction) -> &[u64] {
        match direction {
            Direction::Forward => &self.twiddles,
            Direction::Inverse => &self.inv_twiddles,
        }
    }

    /// Multiply every element by `n⁻¹`.
    pub fn scale_by_n_inv(&self, data: &mut [u64]) {
        for x in data {
            *x = mul_mod(*x, self.n_inv, self.modulus);
        }
    }

    /// Reduce an input sequence modulo `N`.
    #[must_use]
    pub fn reduce(&self, seq: &[u64]) -> Vec<u64> {
        seq.iter().map(|&x| x % self.modulus).collect()
    }

    /// Roots re-derived independently for every sub-length `2^s`.
    ///
    /// Each level gets its own primitive root from the root search, not a
    /// power of the parent root. The table is then checked against the
    /// context's root: the level of length `2^s` must equal `w^(n / 2^s)`,
    /// otherwise the recursive variant would compute a different transform
    /// than the other variants.
    pub fn level_roots(&self) -> Result<&LevelRoots, NttError> {
        self.level_roots
            .get_or_init(|| self.derive_level_roots())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn derive_level_roots(&self) -> Result<LevelRoots, NttError> {
        if !self.is_power_of_two() {
            return Err(NttError::InvalidLength { length: self.n });
        }
        let levels = self.n.trailing_zeros();
        let mut forward = Vec::with_capacity(levels as usize + 1);
        for s in 0..levels {
            let length = 1usize << s;
            let derived = root_of_unity(length, self.modulus)?;
            let expected = pow_mod(self.root, (self.n >> s) as u64, self.modulus);
            if derived != expected {
                warn!(length, derived, expected, "re-derived root disagrees with context root");
                return Err(NttError::RootMismatch {
                    length,
                    derived,
                    expected,
                });
            }
            forward.push(derived);
        }
        forward.push(self.root);

        let inverse = forward
            .iter()
            .enumerate()
            .map(|(s, &w)| {
                inv_mod(w, self.modulus).ok_or(NttError::InvalidRoot {
                    root: w,
                    length: 1 << s,
                    modulus: self.modulus,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LevelRoots { forward, inverse })
    }
}

impl NttContext {
    /// Forward transform of `seq` with `variant`.
    pub fn forward(
        &self,
        seq: &[u64],
        variant: Variant,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        self.forward_in(&TransformArena::for_length(self.n), seq, variant, opts)
    }

    /// Inverse transform of `seq` with `variant`.
    pub fn inverse(
        &self,
        seq: &[u64],
        variant: Variant,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        self.inverse_in(&TransformArena::for_length(self.n), seq, variant, opts)
    }

    /// [`NttContext::forward`] with scratch space from a caller-owned arena.
    pub fn forward_in(
        &self,
        arena: &TransformArena,
        seq: &[u64],
        variant: Variant,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        DefaultFactory::create_transform(variant).apply_in(arena, self, seq, Direction::Forward, opts)
    }

    /// [`NttContext::inverse`] with scratch space from a caller-owned arena.
    pub fn inverse_in(
        &self,
        arena: &TransformArena,
        seq: &[u64],
        variant: Variant,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        DefaultFactory::create_transform(variant).apply_in(arena, self, seq, Direction::Inverse, opts)
    }

    /// Cyclic convolution `c[k] = Σ a[i]·b[j] mod N` over `i + j ≡ k (mod n)`.
    ///
    /// Both inputs are transformed, multiplied pointwise and transformed back.
    /// No carries are propagated: each output is a residue, so a digit product
    /// is only exact while its column sums stay below `N`.
    pub fn cyclic_convolution(
        &self,
        a: &[u64],
        b: &[u64],
        variant: Variant,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        let arena = TransformArena::for_length(self.n);
        let fa = self.forward_in(&arena, a, variant, opts)?;
        let fb = self.forward_in(&arena, b, variant, opts)?;
        let product: Vec<u64> = fa
            .iter()
            .zip(&fb)
            .map(|(&x, &y)| mul_mod(x, y, self.modulus))
            .collect();
        self.inverse_in(&arena, &product, variant, opts)
    }
}

fn validate_modulus(n: usize, modulus: u64) -> Result<(), NttError> {
    if n == 0 {
        return Err(NttError::InvalidLength { length: n });
    }
    if modulus >= MAX_MODULUS {
        return Err(NttError::Overflow(format!("modulus {modulus} exceeds 2^62")));
    }
    if !is_prime(modulus) {
        return Err(NttError::InvalidModulus {
            modulus,
            reason: "not prime",
        });
    }
    if (modulus - 1) % n as u64 != 0 {
        return Err(NttError::InvalidModulus {
            modulus,
            reason: "not congruent to 1 modulo the transform length",
        });
    }
    Ok(())
}

/// `[1, w, w², …]` with `count` entries.
fn powers(w: u64, count: usize, modulus: u64) -> Vec<u64> {
    std::iter::successors(Some(1 % modulus), |&p| Some(mul_mod(p, w, modulus)))
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_digit_context() {
        let ctx = NttContext::new(255, 8).unwrap();
        assert_eq!(ctx.len(), 8);
        assert_eq!(ctx.modulus(), 520_241);
        assert_eq!(ctx.root(), 401_969);
        assert_eq!(ctx.root_inv(), 210_367);
        assert_eq!(ctx.n_inv(), 455_211);
        assert!(ctx.is_power_of_two());
        assert!(!ctx.is_empty());
    }

    #[test]
    fn twiddle_tables() {
        let ctx = NttContext::new(9, 8).unwrap();
        let m = ctx.modulus();
        let fwd = ctx.twiddles(Direction::Forward);
        let inv = ctx.twiddles(Direction::Inverse);
        assert_eq!(fwd.len(), 4);
        assert_eq!(fwd[0], 1);
        assert_eq!(fwd[1], ctx.root());
        for k in 0..4 {
            assert_eq!(mul_mod(fwd[k], inv[k], m), 1);
        }
    }

    #[test]
    fn non_power_of_two_has_no_twiddles() {
        let ctx = NttContext::new(9, 6).unwrap();
        assert!(!ctx.is_power_of_two());
        assert!(ctx.twiddles(Direction::Forward).is_empty());
        assert_eq!(
            ctx.level_roots(),
            Err(NttError::InvalidLength { length: 6 })
        );
    }

    #[test]
    fn level_roots_are_consistent() {
        let ctx = NttContext::new(255, 64).unwrap();
        let roots = ctx.level_roots().unwrap();
        assert_eq!(roots.forward.len(), 7);
        assert_eq!(roots.forward[0], 1);
        assert_eq!(roots.forward[6], ctx.root());
        for s in 0..7 {
            assert!(is_primitive_root(roots.forward[s], 1 << s, ctx.modulus()));
            assert_eq!(mul_mod(roots.forward[s], roots.inverse[s], ctx.modulus()), 1);
        }
    }

    #[test]
    fn non_canonical_root_is_flagged_for_levels() {
        // 609^3 also has order 8 modulo 673, but its square is not the
        // re-derived order-4 root.
        let m = 673;
        let w = pow_mod(609, 3, m);
        let ctx = NttContext::from_parts(8, m, w).unwrap();
        assert!(matches!(
            ctx.level_roots(),
            Err(NttError::RootMismatch { length: 4, .. })
        ));
    }

    #[test]
    fn from_parts_validates() {
        assert!(NttContext::from_parts(8, 673, 609).is_ok());
        assert_eq!(
            NttContext::from_parts(8, 673, 672).unwrap_err(),
            NttError::InvalidRoot {
                root: 672,
                length: 8,
                modulus: 673
            }
        );
        assert!(matches!(
            NttContext::from_parts(8, 675, 2),
            Err(NttError::InvalidModulus { .. })
        ));
        assert!(matches!(
            NttContext::from_parts(8, 13, 2),
            Err(NttError::InvalidModulus { .. })
        ));
        assert!(matches!(
            NttContext::for_modulus(8, u64::MAX),
            Err(NttError::Overflow(_))
        ));
        assert_eq!(
            NttContext::for_modulus(0, 17).unwrap_err(),
            NttError::InvalidLength { length: 0 }
        );
    }

    #[test]
    fn every_variant_round_trips_the_demo_sequence() {
        let ctx = NttContext::new(255, 8).unwrap();
        let opts = TransformOptions::default();
        let seq = [4, 1, 4, 2, 1, 3, 5, 6];
        for variant in Variant::ALL {
            let fwd = ctx.forward(&seq, variant, &opts).unwrap();
            assert_eq!(ctx.inverse(&fwd, variant, &opts).unwrap(), seq.to_vec(), "{variant}");
        }
    }

    #[test]
    fn convolution_multiplies_digit_polynomials() {
        // 123 * 45 = 5535, little-endian digits padded to length 8.
        let ctx = NttContext::new(9, 8).unwrap();
        let opts = TransformOptions::default();
        let a = [3, 2, 1, 0, 0, 0, 0, 0];
        let b = [5, 4, 0, 0, 0, 0, 0, 0];
        for variant in Variant::ALL {
            let c = ctx.cyclic_convolution(&a, &b, variant, &opts).unwrap();
            assert_eq!(c, vec![15, 22, 13, 4, 0, 0, 0, 0], "{variant}");
        }
    }

    #[test]
    fn convolution_wraps_cyclically() {
        let ctx = NttContext::new(9, 4).unwrap();
        let opts = TransformOptions::default();
        let c = ctx
            .cyclic_convolution(&[0, 0, 0, 1], &[0, 1, 0, 0], Variant::Iterative, &opts)
            .unwrap();
        assert_eq!(c, vec![1, 0, 0, 0]);
    }

    #[test]
    fn convolution_length_mismatch() {
        let ctx = NttContext::new(9, 4).unwrap();
        let opts = TransformOptions::default();
        assert_eq!(
            ctx.cyclic_convolution(&[1, 2, 3, 4], &[1, 2], Variant::Naive, &opts),
            Err(NttError::LengthMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn scale_and_reduce() {
        let ctx = NttContext::new(9, 4).unwrap();
        let m = ctx.modulus();
        let mut data = ctx.reduce(&[4, 8, m + 12, 2 * m]);
        assert_eq!(data, vec![4, 8, 12, 0]);
        ctx.scale_by_n_inv(&mut data);
        assert_eq!(data, vec![1, 2, 3, 0]);
    }
}
