//! Transform options.

use crate::constants::DEFAULT_PARALLEL_THRESHOLD;
use crate::multiplier::MultiplierKind;

/// How the independent work inside a transform is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Everything on the calling thread.
    #[default]
    Sequential,
    /// Butterfly stages, recursive halves and naive rows are spread over rayon.
    Parallel,
}

/// Options for a single transform call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Twiddle multiplication strategy (iterative and bit-reversed variants).
    pub multiplier: MultiplierKind,
    /// Sequential or rayon-parallel execution.
    pub strategy: ExecutionStrategy,
    /// Lengths below this run sequentially even under the parallel strategy.
    pub parallel_threshold: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            multiplier: MultiplierKind::Plain,
            strategy: ExecutionStrategy::Sequential,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl TransformOptions {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.parallel_threshold == 0 {
            self.parallel_threshold = DEFAULT_PARALLEL_THRESHOLD;
        }
        self
    }

    /// Returns true if work of length `len` should be split across threads.
    #[must_use]
    pub fn parallel_for(&self, len: usize) -> bool {
        self.strategy == ExecutionStrategy::Parallel && len >= self.parallel_threshold
    }
}
