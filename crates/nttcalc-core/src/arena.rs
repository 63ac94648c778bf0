//! Scratch arena for transform temporaries.
//!
//! Uses bumpalo for O(1) allocation of ping-pong buffers and lifted twiddle
//! tables. One arena can serve many transforms; reset it between batches.

use bumpalo::Bump;

/// Bump arena for transform scratch buffers.
pub struct TransformArena {
    bump: Bump,
}

impl TransformArena {
    /// Create a new arena with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena sized for transforms of length `n` (two buffers plus twiddles).
    #[must_use]
    pub fn for_length(n: usize) -> Self {
        Self {
            bump: Bump::with_capacity(n.saturating_mul(3) * std::mem::size_of::<u64>()),
        }
    }

    /// Allocate a zero-filled slice of residues.
    pub fn alloc_slice(&self, len: usize) -> &mut [u64] {
        self.bump.alloc_slice_fill_default(len)
    }

    /// Allocate a slice filled from an iterator of known length.
    pub fn alloc_from_iter<I>(&self, iter: I) -> &mut [u64]
    where
        I: IntoIterator<Item = u64>,
        I::IntoIter: ExactSizeIterator,
    {
        self.bump.alloc_slice_fill_iter(iter)
    }

    /// Reset the arena, deallocating all buffers at once.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Get the number of bytes currently allocated.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for TransformArena {
    fn default() -> Self {
        Self::new()
    }
}
