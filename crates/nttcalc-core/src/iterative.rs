//! Iterative radix-2 transform over two ping-pong buffers.
//!
//! Stage `ns = 1, 2, 4, …` reads buffer `a` and writes buffer `b`: for each
//! `j < n/2`, with twiddle index `k = (j mod ns)·n/(2·ns)`,
//!
//! ```text
//! v0 = a[j]
//! v1 = w^k · a[j + n/2]
//! b[d]      = v0 + v1      d = (j div ns)·2·ns + (j mod ns)
//! b[d + ns] = v0 − v1
//! ```
//!
//! then the buffers swap. Output lands in natural order with no recursion and
//! no permutation pass. Destinations of one stage form disjoint blocks of
//! `2·ns` slots, which is what the parallel strategy splits on.

use rayon::prelude::*;

use crate::arena::TransformArena;
use crate::arith::{add_mod, sub_mod};
use crate::context::NttContext;
use crate::error::NttError;
use crate::montgomery::MontgomeryField;
use crate::multiplier::{MultiplierKind, PlainMul, TwiddleMul};
use crate::options::TransformOptions;
use crate::transform::{CoreTransform, Direction, Variant};

/// Bottom-up butterfly network, O(n log n), power-of-two lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterativeRadix2Transform;

impl IterativeRadix2Transform {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CoreTransform for IterativeRadix2Transform {
    fn transform_core(
        &self,
        arena: &TransformArena,
        ctx: &NttContext,
        data: Vec<u64>,
        direction: Direction,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        let mut out = match opts.multiplier {
            MultiplierKind::Plain => {
                run_network(&PlainMul::new(ctx.modulus()), arena, ctx, data, direction, opts)
            }
            MultiplierKind::Montgomery => {
                let field = MontgomeryField::new(ctx.modulus())?;
                run_network(&field, arena, ctx, data, direction, opts)
            }
        };
        if direction == Direction::Inverse {
            ctx.scale_by_n_inv(&mut out);
        }
        Ok(out)
    }

    fn variant(&self) -> Variant {
        Variant::Iterative
    }
}

fn run_network<M: TwiddleMul>(
    mul: &M,
    arena: &TransformArena,
    ctx: &NttContext,
    mut data: Vec<u64>,
    direction: Direction,
    opts: &TransformOptions,
) -> Vec<u64> {
    let n = data.len();
    let twiddles: &[u64] =
        arena.alloc_from_iter(ctx.twiddles(direction).iter().map(|&t| mul.lift(t)));
    let scratch = arena.alloc_slice(n);

    let mut src: &mut [u64] = &mut data;
    let mut dst: &mut [u64] = &mut *scratch;
    let mut ns = 1;
    while ns < n {
        stage(src, dst, ns, twiddles, mul, ctx.modulus(), opts);
        std::mem::swap(&mut src, &mut dst);
        ns *= 2;
    }

    // An odd number of stages leaves the result in the scratch buffer.
    if n.trailing_zeros() % 2 == 1 {
        data.copy_from_slice(scratch);
    }
    data
}

fn stage<M: TwiddleMul>(
    src: &[u64],
    dst: &mut [u64],
    ns: usize,
    twiddles: &[u64],
    mul: &M,
    modulus: u64,
    opts: &TransformOptions,
) {
    let n = src.len();
    let half = n / 2;
    let twiddle_step = n / (2 * ns);

    let block = |(g, out): (usize, &mut [u64])| {
        for r in 0..ns {
            let j = g * ns + r;
            let v0 = src[j];
            let v1 = mul.mul(src[j + half], twiddles[r * twiddle_step]);
            out[r] = add_mod(v0, v1, modulus);
            out[r + ns] = sub_mod(v0, v1, modulus);
        }
    };

    if opts.parallel_for(n) {
        dst.par_chunks_mut(2 * ns).enumerate().for_each(block);
    } else {
        dst.chunks_mut(2 * ns).enumerate().for_each(block);
    }
}
