//! In-place Cooley-Tukey transform over bit-reversed input.
//!
//! The input is permuted into bit-reversed order once, then `log2(n)` stages of
//! butterflies run in place: a stage of block size `s` combines the two halves
//! of every `s`-wide block with twiddles `w^(j·n/s)`. No second buffer is needed.

use rayon::prelude::*;

use crate::arena::TransformArena;
use crate::arith::{add_mod, sub_mod};
use crate::context::NttContext;
use crate::error::NttError;
use crate::montgomery::MontgomeryField;
use crate::multiplier::{MultiplierKind, PlainMul, TwiddleMul};
use crate::options::TransformOptions;
use crate::transform::{CoreTransform, Direction, Variant};

/// In-place decimation-in-time network, power-of-two lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitReversedTransform;

impl BitReversedTransform {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CoreTransform for BitReversedTransform {
    fn transform_core(
        &self,
        arena: &TransformArena,
        ctx: &NttContext,
        mut data: Vec<u64>,
        direction: Direction,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        match opts.multiplier {
            MultiplierKind::Plain => {
                run_in_place(&PlainMul::new(ctx.modulus()), arena, ctx, &mut data, direction, opts);
            }
            MultiplierKind::Montgomery => {
                let field = MontgomeryField::new(ctx.modulus())?;
                run_in_place(&field, arena, ctx, &mut data, direction, opts);
            }
        }
        if direction == Direction::Inverse {
            ctx.scale_by_n_inv(&mut data);
        }
        Ok(data)
    }

    fn variant(&self) -> Variant {
        Variant::BitReversed
    }
}

fn run_in_place<M: TwiddleMul>(
    mul: &M,
    arena: &TransformArena,
    ctx: &NttContext,
    data: &mut [u64],
    direction: Direction,
    opts: &TransformOptions,
) {
    let n = data.len();
    let modulus = ctx.modulus();
    let twiddles: &[u64] =
        arena.alloc_from_iter(ctx.twiddles(direction).iter().map(|&t| mul.lift(t)));

    bit_reverse_permutation(data);

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let step = n / size;
        let butterflies = |block: &mut [u64]| {
            let (lo, hi) = block.split_at_mut(half);
            for (j, (u, v)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                let x = *u;
                let t = mul.mul(*v, twiddles[j * step]);
                *u = add_mod(x, t, modulus);
                *v = sub_mod(x, t, modulus);
            }
        };
        if opts.parallel_for(n) {
            data.par_chunks_mut(size).for_each(butterflies);
        } else {
            data.chunks_mut(size).for_each(butterflies);
        }
        size *= 2;
    }
}

/// Reorder `data` so that index `i` holds the element at the bit-reversal of `i`.
///
/// `data.len()` must be a power of two.
pub fn bit_reverse_permutation(data: &mut [u64]) {
    let n = data.len();
    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            data.swap(i, j);
        }
    }
}
