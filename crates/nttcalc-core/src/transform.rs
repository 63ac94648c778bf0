//! Transform traits and the `NttTransform` decorator.
//!
//! `Transform` is the public trait consumed by drivers.
//! `CoreTransform` is the internal trait implemented by each algorithm.
//! `NttTransform` is a decorator that validates lengths, reduces inputs, and
//! short-circuits length one before delegating.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::trace;

use crate::arena::TransformArena;
use crate::context::NttContext;
use crate::error::NttError;
use crate::options::TransformOptions;

/// Forward (`w`) or inverse (`w⁻¹`, scaled by `n⁻¹`) transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Inverse => "inverse",
        }
    }

    /// The direction that undoes this one.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }
}

/// The interchangeable transform algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// O(n²) reference, any length.
    Naive,
    /// Recursive even/odd split, power-of-two lengths.
    Recursive,
    /// Bottom-up ping-pong butterfly network, power-of-two lengths.
    Iterative,
    /// In-place network after a bit-reversal permutation, power-of-two lengths.
    BitReversed,
}

impl Variant {
    /// All variants, reference first.
    pub const ALL: [Variant; 4] = [
        Variant::Naive,
        Variant::Recursive,
        Variant::Iterative,
        Variant::BitReversed,
    ];

    /// Short name used by the registry and the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Naive => "naive",
            Self::Recursive => "recursive",
            Self::Iterative => "iterative",
            Self::BitReversed => "bitrev",
        }
    }

    /// Returns true if the variant only accepts power-of-two lengths.
    #[must_use]
    pub fn requires_power_of_two(self) -> bool {
        !matches!(self, Self::Naive)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = NttError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(Self::Naive),
            "recursive" | "radix2-recursive" => Ok(Self::Recursive),
            "iterative" | "radix2-iterative" => Ok(Self::Iterative),
            "bitrev" | "bit-reversed" => Ok(Self::BitReversed),
            other => Err(NttError::Config(format!("unknown transform variant: {other}"))),
        }
    }
}

/// Public trait for transforms, consumed by drivers.
pub trait Transform: Send + Sync {
    /// Forward transform of `seq` under `ctx`.
    fn forward(
        &self,
        ctx: &NttContext,
        seq: &[u64],
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        self.apply(ctx, seq, Direction::Forward, opts)
    }

    /// Inverse transform of `seq` under `ctx`.
    fn inverse(
        &self,
        ctx: &NttContext,
        seq: &[u64],
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        self.apply(ctx, seq, Direction::Inverse, opts)
    }

    /// Transform in `direction` with a fresh scratch arena.
    fn apply(
        &self,
        ctx: &NttContext,
        seq: &[u64],
        direction: Direction,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        let arena = TransformArena::for_length(seq.len());
        self.apply_in(&arena, ctx, seq, direction, opts)
    }

    /// Transform in `direction`, taking scratch space from `arena`.
    fn apply_in(
        &self,
        arena: &TransformArena,
        ctx: &NttContext,
        seq: &[u64],
        direction: Direction,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError>;

    /// Get the name of this transform.
    fn name(&self) -> &str;
}

/// Internal trait for algorithm implementations.
///
/// `data` is already reduced modulo `N`, has the context's length, and that
/// length is a power of two whenever `requires_power_of_two` says so.
pub trait CoreTransform: Send + Sync {
    /// Transform `data` and return the result, every element in `[0, N)`.
    fn transform_core(
        &self,
        arena: &TransformArena,
        ctx: &NttContext,
        data: Vec<u64>,
        direction: Direction,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError>;

    /// Which variant this is.
    fn variant(&self) -> Variant;

    /// Get the name of this algorithm.
    fn name(&self) -> &str {
        self.variant().name()
    }
}

/// Decorator that wraps a `CoreTransform` with validation and the length-one fast path.
pub struct NttTransform {
    inner: Arc<dyn CoreTransform>,
}

impl NttTransform {
    /// Create a new `NttTransform` wrapping the given core transform.
    #[must_use]
    pub fn new(inner: Arc<dyn CoreTransform>) -> Self {
        Self { inner }
    }

    /// Which variant this wraps.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.inner.variant()
    }
}

impl Transform for NttTransform {
    fn apply_in(
        &self,
        arena: &TransformArena,
        ctx: &NttContext,
        seq: &[u64],
        direction: Direction,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        if seq.len() != ctx.len() {
            return Err(NttError::LengthMismatch {
                expected: ctx.len(),
                actual: seq.len(),
            });
        }
        if self.inner.variant().requires_power_of_two() && !ctx.is_power_of_two() {
            return Err(NttError::InvalidLength { length: seq.len() });
        }

        let data = ctx.reduce(seq);
        // A length-one transform is the identity in both directions.
        if data.len() == 1 {
            return Ok(data);
        }

        trace!(
            variant = self.inner.name(),
            direction = direction.name(),
            length = data.len(),
            "running transform"
        );
        self.inner.transform_core(arena, ctx, data, direction, opts)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
