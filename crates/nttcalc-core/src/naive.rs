//! Naive O(n²) transform.
//!
//! `X[k] = Σ_j a[j]·w^(jk) mod N`, computed row by row. Works for any length
//! with a matching `(N, w)` and serves as the oracle for the fast variants.

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::arena::TransformArena;
use crate::arith::{add_mod, mul_mod, pow_mod};
use crate::context::NttContext;
use crate::error::NttError;
use crate::options::TransformOptions;
use crate::transform::{CoreTransform, Direction, Variant};

/// Reference transform by direct summation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveTransform;

impl NaiveTransform {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CoreTransform for NaiveTransform {
    fn transform_core(
        &self,
        _arena: &TransformArena,
        ctx: &NttContext,
        data: Vec<u64>,
        direction: Direction,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        let n = data.len();
        let modulus = ctx.modulus();
        let w = ctx.root_for(direction);

        // Row k sums a[j]·(w^k)^j with a running power.
        let row = |k: usize| -> u64 {
            let wk = pow_mod(w, k as u64, modulus);
            let mut acc = 0;
            let mut p = 1;
            for &x in &data {
                acc = add_mod(acc, mul_mod(x, p, modulus), modulus);
                p = mul_mod(p, wk, modulus);
            }
            acc
        };

        let mut out: Vec<u64> = if opts.parallel_for(n) {
            (0..n).into_par_iter().map(row).collect()
        } else {
            (0..n).map(row).collect()
        };

        if direction == Direction::Inverse {
            ctx.scale_by_n_inv(&mut out);
        }
        Ok(out)
    }

    fn variant(&self) -> Variant {
        Variant::Naive
    }
}
