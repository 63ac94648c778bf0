//! Application configuration from CLI flags and environment.

use clap::Parser;

use nttcalc_core::{
    pad_to_power_of_two, Direction, ExecutionStrategy, MultiplierKind, NttError, SearchLimits,
    TransformOptions,
};

/// NttCalc-rs: number-theoretic transform driver.
#[derive(Parser, Debug)]
#[command(name = "nttcalc", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Comma-separated input sequence (digits, least significant first).
    #[arg(long, default_value = "4,1,4,2,1,3,5,6", env = "NTTCALC_VALUES")]
    pub values: String,

    /// Digit base of the input; the modulus is sized for digits up to base - 1.
    #[arg(short, long, default_value = "10", env = "NTTCALC_BASE")]
    pub base: u64,

    /// Transform variant: naive, recursive, iterative, bitrev, or all.
    #[arg(long, default_value = "all")]
    pub algo: String,

    /// Run the inverse transform instead of the forward one.
    #[arg(short, long)]
    pub inverse: bool,

    /// Use Montgomery multiplication for twiddle factors.
    #[arg(long)]
    pub montgomery: bool,

    /// Spread butterfly stages over the rayon thread pool.
    #[arg(long)]
    pub parallel: bool,

    /// Minimum length for parallel work (0 = default).
    #[arg(long, default_value = "0")]
    pub threshold: usize,

    /// Zero-pad the input to the next power of two.
    #[arg(long)]
    pub pad: bool,

    /// Maximum modulus candidates to test (0 = default).
    #[arg(long, default_value = "0")]
    pub max_search: u64,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (only output the transformed sequences).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// The input sequence, zero-padded when `--pad` is set.
    pub fn sequence(&self) -> Result<Vec<u64>, NttError> {
        let seq = parse_values(&self.values)?;
        Ok(if self.pad {
            pad_to_power_of_two(&seq)
        } else {
            seq
        })
    }

    /// Largest digit value, the bound the modulus search is sized for.
    pub fn digit_bound(&self) -> Result<u64, NttError> {
        if self.base < 3 {
            return Err(NttError::Config(format!(
                "base must be at least 3, got {}",
                self.base
            )));
        }
        Ok(self.base - 1)
    }

    /// Transform options from the command-line flags.
    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            multiplier: if self.montgomery {
                MultiplierKind::Montgomery
            } else {
                MultiplierKind::Plain
            },
            strategy: if self.parallel {
                ExecutionStrategy::Parallel
            } else {
                ExecutionStrategy::Sequential
            },
            parallel_threshold: self.threshold,
        }
        .normalize()
    }

    /// Modulus search limits from the command-line flags.
    #[must_use]
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_candidates: self.max_search,
        }
        .normalize()
    }

    /// Direction of the primary transform.
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.inverse {
            Direction::Inverse
        } else {
            Direction::Forward
        }
    }
}

/// Parse a comma-separated list like "4, 1, 4, 2".
fn parse_values(s: &str) -> Result<Vec<u64>, NttError> {
    let values = s
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u64>()
                .map_err(|_| NttError::Config(format!("invalid value in sequence: {v:?}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.is_empty() {
        return Err(NttError::Config("input sequence is empty".into()));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> AppConfig {
        let mut argv = vec!["nttcalc"];
        argv.extend_from_slice(args);
        AppConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn parse_values_formats() {
        assert_eq!(parse_values("4,1,4,2"), Ok(vec![4, 1, 4, 2]));
        assert_eq!(parse_values(" 7 , 8,9 "), Ok(vec![7, 8, 9]));
        assert_eq!(parse_values("5,"), Ok(vec![5]));
    }

    #[test]
    fn parse_values_rejects_garbage() {
        assert!(matches!(parse_values("1,x,3"), Err(NttError::Config(_))));
        assert!(matches!(parse_values("-1"), Err(NttError::Config(_))));
        assert!(matches!(parse_values(""), Err(NttError::Config(_))));
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.sequence(), Ok(vec![4, 1, 4, 2, 1, 3, 5, 6]));
        assert_eq!(cfg.digit_bound(), Ok(9));
        assert_eq!(cfg.algo, "all");
        assert_eq!(cfg.direction(), Direction::Forward);
        assert_eq!(cfg.transform_options(), TransformOptions::default());
        assert_eq!(cfg.search_limits(), SearchLimits::default());
    }

    #[test]
    fn flags_map_to_options() {
        let cfg = config(&["--montgomery", "--parallel", "--threshold", "64", "--inverse"]);
        let opts = cfg.transform_options();
        assert_eq!(opts.multiplier, MultiplierKind::Montgomery);
        assert_eq!(opts.strategy, ExecutionStrategy::Parallel);
        assert_eq!(opts.parallel_threshold, 64);
        assert_eq!(cfg.direction(), Direction::Inverse);
    }

    #[test]
    fn padding_and_base() {
        let cfg = config(&["--values", "3,1,4,1,5,9", "--pad", "--base", "256"]);
        assert_eq!(cfg.sequence(), Ok(vec![3, 1, 4, 1, 5, 9, 0, 0]));
        assert_eq!(cfg.digit_bound(), Ok(255));
        assert!(matches!(
            config(&["--base", "2"]).digit_bound(),
            Err(NttError::Config(_))
        ));
    }
}
