//! Transform orchestration: variant selection, parallel execution and
//! cross-checking.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::debug;

use nttcalc_core::{
    Direction, NttContext, NttError, Transform, TransformArena, TransformFactory, TransformOptions,
};

/// Output of one variant: the transformed sequence and the round trip back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Result of the requested direction.
    pub values: Vec<u64>,
    /// Result of applying the opposite direction to `values`.
    pub round_trip: Vec<u64>,
}

/// Result of running a single variant.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Variant name.
    pub variant: String,
    /// The computed output or a structured error.
    pub outcome: Result<TransformOutput, NttError>,
    /// Time spent in both transforms.
    pub duration: Duration,
}

/// Get transforms to run based on the `--algo` selection.
pub fn get_transforms_to_run(
    algo: &str,
    factory: &dyn TransformFactory,
) -> Result<Vec<Arc<dyn Transform>>, NttError> {
    match algo {
        "all" => factory
            .available()
            .into_iter()
            .map(|name| factory.get(name))
            .collect(),
        name => Ok(vec![factory.get(name)?]),
    }
}

/// Run every transform on `seq` in `direction`, then back.
pub fn execute_transforms(
    transforms: &[Arc<dyn Transform>],
    ctx: &NttContext,
    seq: &[u64],
    direction: Direction,
    opts: &TransformOptions,
) -> Vec<TransformResult> {
    if transforms.len() == 1 {
        return vec![run_one(transforms[0].as_ref(), ctx, seq, direction, opts)];
    }

    // Multiple transforms: run in parallel using rayon
    transforms
        .par_iter()
        .map(|t| run_one(t.as_ref(), ctx, seq, direction, opts))
        .collect()
}

fn run_one(
    transform: &dyn Transform,
    ctx: &NttContext,
    seq: &[u64],
    direction: Direction,
    opts: &TransformOptions,
) -> TransformResult {
    let start = Instant::now();
    let arena = TransformArena::for_length(seq.len());
    let outcome = transform
        .apply_in(&arena, ctx, seq, direction, opts)
        .and_then(|values| {
            let round_trip = transform.apply_in(&arena, ctx, &values, direction.opposite(), opts)?;
            Ok(TransformOutput { values, round_trip })
        });
    let duration = start.elapsed();

    debug!(
        variant = transform.name(),
        ok = outcome.is_ok(),
        micros = duration.as_micros(),
        "variant finished"
    );
    TransformResult {
        variant: transform.name().to_string(),
        outcome,
        duration,
    }
}

/// Cross-check results: every successful round trip must reproduce
/// `expected`, and every successful variant must agree with the first.
///
/// Returns the first error if no variant succeeded.
pub fn analyze_results(results: &[TransformResult], expected: &[u64]) -> Result<(), NttError> {
    let valid: Vec<(&str, &TransformOutput)> = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok().map(|o| (r.variant.as_str(), o)))
        .collect();

    let Some(&(_, first)) = valid.first() else {
        return Err(results
            .iter()
            .find_map(|r| r.outcome.as_ref().err().cloned())
            .unwrap_or_else(|| NttError::Config("no transforms selected".into())));
    };

    for &(variant, output) in &valid {
        if output.round_trip != expected {
            return Err(NttError::RoundTripFailed {
                variant: variant.to_string(),
            });
        }
    }
    if valid.iter().any(|(_, output)| output.values != first.values) {
        return Err(NttError::Mismatch);
    }
    Ok(())
}

/// First per-variant error, if any variant failed.
#[must_use]
pub fn first_error(results: &[TransformResult]) -> Option<&NttError> {
    results.iter().find_map(|r| r.outcome.as_ref().err())
}
