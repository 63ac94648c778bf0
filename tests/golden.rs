//! Golden file integration tests.
//!
//! Reads tests/testdata/ntt_golden.json and verifies that the derived modulus
//! and root match, and that every applicable variant produces the recorded
//! forward transform and inverts it exactly.

use std::sync::Arc;

use serde::Deserialize;

use nttcalc_core::bitrev::BitReversedTransform;
use nttcalc_core::iterative::IterativeRadix2Transform;
use nttcalc_core::naive::NaiveTransform;
use nttcalc_core::recursive::RecursiveRadix2Transform;
use nttcalc_core::{
    find_modulus, find_primitive_root, ntt_forward, ntt_inverse, CoreTransform, Direction,
    ExecutionStrategy, MultiplierKind, NttContext, NttTransform, Transform, TransformArena,
    TransformOptions, Variant,
};

// ---------------------------------------------------------------------------
// Golden data structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    cases: Vec<GoldenCase>,
}

#[derive(Deserialize)]
struct GoldenCase {
    digit_bound: u64,
    modulus: u64,
    root: u64,
    input: Vec<u64>,
    forward: Vec<u64>,
}

fn load_golden_data() -> GoldenData {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/ntt_golden.json");
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

fn applicable(case: &GoldenCase) -> Vec<Variant> {
    Variant::ALL
        .into_iter()
        .filter(|v| !v.requires_power_of_two() || case.input.len().is_power_of_two())
        .collect()
}

fn all_options() -> Vec<TransformOptions> {
    let mut opts = Vec::new();
    for multiplier in [MultiplierKind::Plain, MultiplierKind::Montgomery] {
        for strategy in [ExecutionStrategy::Sequential, ExecutionStrategy::Parallel] {
            opts.push(TransformOptions {
                multiplier,
                strategy,
                parallel_threshold: 2,
            });
        }
    }
    opts
}

// ---------------------------------------------------------------------------
// Golden: parameter search
// ---------------------------------------------------------------------------

#[test]
fn golden_modulus_and_root() {
    let data = load_golden_data();
    for case in &data.cases {
        let n = case.input.len();
        let modulus = find_modulus(case.digit_bound, n).unwrap();
        assert_eq!(modulus, case.modulus, "modulus mismatch for n={n}");
        let root = find_primitive_root(n, modulus).unwrap();
        assert_eq!(root, case.root, "root mismatch for n={n}");

        let ctx = NttContext::new(case.digit_bound, n).unwrap();
        assert_eq!(ctx.modulus(), case.modulus);
        assert_eq!(ctx.root(), case.root);
    }
}

// ---------------------------------------------------------------------------
// Golden: forward values and round trips, every variant and option
// ---------------------------------------------------------------------------

#[test]
fn golden_forward_every_variant() {
    let data = load_golden_data();
    for case in &data.cases {
        let ctx = NttContext::new(case.digit_bound, case.input.len()).unwrap();
        for variant in applicable(case) {
            for opts in all_options() {
                let fwd = ctx.forward(&case.input, variant, &opts).unwrap();
                assert_eq!(fwd, case.forward, "{variant} forward mismatch, {opts:?}");
                let back = ctx.inverse(&fwd, variant, &opts).unwrap();
                assert_eq!(back, case.input, "{variant} round trip mismatch, {opts:?}");
            }
        }
    }
}

#[test]
fn golden_free_functions() {
    let data = load_golden_data();
    for case in &data.cases {
        for variant in applicable(case) {
            let fwd = ntt_forward(&case.input, case.modulus, case.root, variant).unwrap();
            assert_eq!(fwd, case.forward, "{variant} forward mismatch");
            let back = ntt_inverse(&case.forward, case.modulus, case.root, variant).unwrap();
            assert_eq!(back, case.input, "{variant} inverse mismatch");
        }
    }
}

// ---------------------------------------------------------------------------
// Golden: core transforms directly, one shared arena
// ---------------------------------------------------------------------------

#[test]
fn golden_core_transforms_share_an_arena() {
    let cores: Vec<Arc<dyn CoreTransform>> = vec![
        Arc::new(NaiveTransform::new()),
        Arc::new(RecursiveRadix2Transform::new()),
        Arc::new(IterativeRadix2Transform::new()),
        Arc::new(BitReversedTransform::new()),
    ];
    let data = load_golden_data();
    let mut arena = TransformArena::new();
    for case in data.cases.iter().filter(|c| c.input.len().is_power_of_two()) {
        let ctx = NttContext::new(case.digit_bound, case.input.len()).unwrap();
        for core in &cores {
            let transform = NttTransform::new(Arc::clone(core));
            let fwd = transform
                .apply_in(&arena, &ctx, &case.input, Direction::Forward, &TransformOptions::default())
                .unwrap();
            assert_eq!(fwd, case.forward, "{} forward mismatch", transform.name());
        }
        arena.reset();
    }
}
