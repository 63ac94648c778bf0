//! Recursive radix-2 Cooley-Tukey transform.
//!
//! Each call transforms the even- and odd-indexed halves and merges them with
//! one butterfly per output pair. The halves are never materialized: a level
//! reads its input through an `(offset, stride)` view of the original data and
//! writes into its slice of a single output buffer.
//!
//! Every level uses the root re-derived for its own sub-length (see
//! [`NttContext::level_roots`]).

use crate::arena::TransformArena;
use crate::arith::{add_mod, mul_mod, sub_mod};
use crate::context::NttContext;
use crate::error::NttError;
use crate::options::TransformOptions;
use crate::transform::{CoreTransform, Direction, Variant};

/// Recursive even/odd decomposition, O(n log n), power-of-two lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveRadix2Transform;

impl RecursiveRadix2Transform {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CoreTransform for RecursiveRadix2Transform {
    fn transform_core(
        &self,
        _arena: &TransformArena,
        ctx: &NttContext,
        data: Vec<u64>,
        direction: Direction,
        opts: &TransformOptions,
    ) -> Result<Vec<u64>, NttError> {
        let levels = ctx.level_roots()?;
        let roots = match direction {
            Direction::Forward => &levels.forward,
            Direction::Inverse => &levels.inverse,
        };

        let mut out = vec![0; data.len()];
        let view = StridedView {
            data: &data,
            offset: 0,
            stride: 1,
        };
        recurse(view, &mut out, roots, ctx.modulus(), opts);

        // Scaling happens once, at the outermost level.
        if direction == Direction::Inverse {
            ctx.scale_by_n_inv(&mut out);
        }
        Ok(out)
    }

    fn variant(&self) -> Variant {
        Variant::Recursive
    }
}

/// Elements `data[offset + i·stride]` for `i < len`.
#[derive(Clone, Copy)]
struct StridedView<'a> {
    data: &'a [u64],
    offset: usize,
    stride: usize,
}

impl StridedView<'_> {
    fn even(self) -> Self {
        Self {
            stride: self.stride * 2,
            ..self
        }
    }

    fn odd(self) -> Self {
        Self {
            offset: self.offset + self.stride,
            stride: self.stride * 2,
            ..self
        }
    }
}

/// Transform the `out.len()` elements of `view` into `out`.
fn recurse(
    view: StridedView<'_>,
    out: &mut [u64],
    roots: &[u64],
    modulus: u64,
    opts: &TransformOptions,
) {
    let len = out.len();
    if len == 1 {
        out[0] = view.data[view.offset];
        return;
    }

    let half = len / 2;
    let (even, odd) = out.split_at_mut(half);
    if opts.parallel_for(len) {
        rayon::join(
            || recurse(view.even(), even, roots, modulus, opts),
            || recurse(view.odd(), odd, roots, modulus, opts),
        );
    } else {
        recurse(view.even(), even, roots, modulus, opts);
        recurse(view.odd(), odd, roots, modulus, opts);
    }

    let w = roots[len.trailing_zeros() as usize];
    let mut wk = 1;
    for (e, o) in even.iter_mut().zip(odd.iter_mut()) {
        let p = *e;
        let q = mul_mod(wk, *o, modulus);
        *e = add_mod(p, q, modulus);
        *o = sub_mod(p, q, modulus);
        wk = mul_mod(wk, w, modulus);
    }
}
