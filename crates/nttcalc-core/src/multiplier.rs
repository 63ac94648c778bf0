//! Twiddle multiplication strategies.
//!
//! `TwiddleMul` is the narrow interface the butterfly networks use for the
//! `w^k · x mod N` step. Twiddles are lifted once into the strategy's domain,
//! data stays in ordinary form.

use crate::arith::mul_mod;
use crate::montgomery::MontgomeryField;

/// Multiply-mod step used inside a butterfly.
pub trait TwiddleMul: Send + Sync {
    /// Convert a twiddle factor into the form consumed by [`TwiddleMul::mul`].
    fn lift(&self, twiddle: u64) -> u64;

    /// `x · twiddle mod N` for an ordinary residue `x` and a lifted twiddle.
    fn mul(&self, x: u64, lifted: u64) -> u64;

    /// Get the name of this strategy.
    fn name(&self) -> &'static str;
}

/// Which multiplication strategy a transform should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiplierKind {
    /// Double-width product followed by a division.
    #[default]
    Plain,
    /// Montgomery reduction, no division in the inner loop.
    Montgomery,
}

impl MultiplierKind {
    /// Get the name of this strategy.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Montgomery => "montgomery",
        }
    }
}

/// Double-width product reduced by `%`.
#[derive(Debug, Clone, Copy)]
pub struct PlainMul {
    modulus: u64,
}

impl PlainMul {
    #[must_use]
    pub fn new(modulus: u64) -> Self {
        Self { modulus }
    }
}

impl TwiddleMul for PlainMul {
    #[inline]
    fn lift(&self, twiddle: u64) -> u64 {
        twiddle
    }

    #[inline]
    fn mul(&self, x: u64, lifted: u64) -> u64 {
        mul_mod(x, lifted, self.modulus)
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}

impl TwiddleMul for MontgomeryField {
    #[inline]
    fn lift(&self, twiddle: u64) -> u64 {
        self.to_montgomery(twiddle)
    }

    /// One ordinary operand times one Montgomery operand reduces to an ordinary residue.
    #[inline]
    fn mul(&self, x: u64, lifted: u64) -> u64 {
        self.multiply(x, lifted)
    }

    fn name(&self) -> &'static str {
        "montgomery"
    }
}
