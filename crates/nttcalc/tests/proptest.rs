//! Property-based tests for the driver pipeline.

use proptest::prelude::*;

use nttcalc_core::{exit_codes, DefaultFactory, Direction, NttContext, TransformOptions};
use nttcalc_lib::app::run_transforms;
use nttcalc_lib::config::AppConfig;
use nttcalc_lib::orchestrator::{analyze_results, execute_transforms, get_transforms_to_run};

fn config(values: &[u64], base: u64, extra: &[&str]) -> AppConfig {
    use clap::Parser;
    let values = values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let base = base.to_string();
    let mut argv = vec!["nttcalc", "--values", values.as_str(), "--base", base.as_str()];
    argv.extend_from_slice(extra);
    AppConfig::try_parse_from(argv).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Every variant agrees and round trips for random digit sequences.
    #[test]
    fn all_variants_cross_check(
        base in 3u64..=256,
        log_n in 0u32..=6,
        seed in any::<u64>(),
    ) {
        let n = 1usize << log_n;
        let seq: Vec<u64> = (0..n as u64)
            .map(|i| seed.wrapping_mul(i + 1).wrapping_add(i) % base)
            .collect();
        let ctx = NttContext::new(base - 1, n).unwrap();
        let factory = DefaultFactory::new();
        let transforms = get_transforms_to_run("all", &factory).unwrap();
        for direction in [Direction::Forward, Direction::Inverse] {
            let results = execute_transforms(
                &transforms,
                &ctx,
                &seq,
                direction,
                &TransformOptions::default(),
            );
            prop_assert_eq!(analyze_results(&results, &seq), Ok(()));
        }
    }

    /// Padding any sequence lets every variant run successfully.
    #[test]
    fn padded_runs_succeed(values in prop::collection::vec(0u64..10, 1..40)) {
        let (report, code) = run_transforms(&config(&values, 10, &["--pad"])).unwrap();
        prop_assert_eq!(code, exit_codes::SUCCESS);
        prop_assert!(report.length.is_power_of_two());
        prop_assert!(report.length >= values.len());
        prop_assert!(report.results.iter().all(|r| r.round_trip_ok == Some(true)));
    }
}
