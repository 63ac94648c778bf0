//! Result presentation: human-readable text or JSON.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use nttcalc_core::{Direction, NttContext, NttError, TransformOptions};

use crate::orchestrator::TransformResult;
use crate::output::{format_duration, format_plain, format_sequence};
use crate::version;

/// Everything a run produced, in a serializable shape.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub version: String,
    pub length: usize,
    pub digit_bound: u64,
    pub modulus: u64,
    pub root: u64,
    pub root_inv: u64,
    pub n_inv: u64,
    pub direction: &'static str,
    pub multiplier: &'static str,
    pub parallel: bool,
    pub input: Vec<u64>,
    pub results: Vec<VariantReport>,
    /// `None` when every check passed.
    pub cross_check_error: Option<String>,
}

/// One variant's line in a [`Report`].
#[derive(Debug, Clone, Serialize)]
pub struct VariantReport {
    pub variant: String,
    pub output: Option<Vec<u64>>,
    pub round_trip_ok: Option<bool>,
    pub error: Option<String>,
    pub duration_us: u128,
}

impl Report {
    /// Assemble a report from a finished run.
    #[must_use]
    pub fn new(
        ctx: &NttContext,
        digit_bound: u64,
        direction: Direction,
        opts: &TransformOptions,
        input: &[u64],
        results: &[TransformResult],
        cross_check: &Result<(), NttError>,
    ) -> Self {
        let expected = ctx.reduce(input);
        let results = results
            .iter()
            .map(|r| VariantReport {
                variant: r.variant.clone(),
                output: r.outcome.as_ref().ok().map(|o| o.values.clone()),
                round_trip_ok: r.outcome.as_ref().ok().map(|o| o.round_trip == expected),
                error: r.outcome.as_ref().err().map(ToString::to_string),
                duration_us: r.duration.as_micros(),
            })
            .collect();

        Self {
            version: version::version().to_string(),
            length: ctx.len(),
            digit_bound,
            modulus: ctx.modulus(),
            root: ctx.root(),
            root_inv: ctx.root_inv(),
            n_inv: ctx.n_inv(),
            direction: direction.name(),
            multiplier: opts.multiplier.name(),
            parallel: opts.parallel_for(ctx.len()),
            input: input.to_vec(),
            results,
            cross_check_error: cross_check.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a finished run.
    fn present(&self, report: &Report, out: &mut dyn Write) -> Result<()>;

    /// Present an error that stopped the run before any transform.
    fn present_error(&self, error: &NttError, out: &mut dyn Write) -> Result<()>;
}

/// Text presenter for terminals.
pub struct CliPresenter {
    verbose: bool,
    quiet: bool,
}

impl CliPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ResultPresenter for CliPresenter {
    fn present(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        if self.quiet {
            for result in &report.results {
                if let Some(values) = &result.output {
                    writeln!(out, "{}", format_plain(values))?;
                }
            }
            return Ok(out.flush()?);
        }

        writeln!(
            out,
            "Modulus: {} (n = {}, digit bound {})",
            report.modulus, report.length, report.digit_bound
        )?;
        writeln!(out, "Root: {}", report.root)?;
        if self.verbose {
            writeln!(out, "Inverse root: {}", report.root_inv)?;
            writeln!(out, "Inverse length: {}", report.n_inv)?;
            writeln!(
                out,
                "Multiplier: {}, parallel: {}",
                report.multiplier, report.parallel
            )?;
        }
        writeln!(out, "Input: {}", format_sequence(&report.input, self.verbose))?;

        for result in &report.results {
            writeln!(out)?;
            writeln!(out, "Variant: {}", result.variant)?;
            match (&result.output, &result.error) {
                (Some(values), _) => {
                    writeln!(
                        out,
                        "{}: {}",
                        capitalize(report.direction),
                        format_sequence(values, self.verbose)
                    )?;
                    let status = if result.round_trip_ok == Some(true) {
                        "OK"
                    } else {
                        "FAILED"
                    };
                    writeln!(out, "Round trip: {status}")?;
                }
                (None, Some(error)) => writeln!(out, "Error: {error}")?,
                (None, None) => {}
            }
        }

        if report.results.len() > 1 {
            writeln!(out, "\nComparison Results:")?;
            writeln!(out, "{:-<60}", "")?;
            for result in &report.results {
                let status = if result.error.is_some() { "ERROR" } else { "OK" };
                writeln!(
                    out,
                    "  {:<20} {:>10} [{}]",
                    result.variant,
                    format_duration(std::time::Duration::from_micros(
                        u64::try_from(result.duration_us).unwrap_or(u64::MAX)
                    )),
                    status,
                )?;
            }
        }

        match &report.cross_check_error {
            Some(error) => writeln!(out, "\nCross-check failed: {error}")?,
            None if report.results.len() > 1 => writeln!(out, "\nAll variants agree.")?,
            None => {}
        }
        Ok(out.flush()?)
    }

    fn present_error(&self, error: &NttError, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Error: {error}")?;
        Ok(())
    }
}

/// JSON presenter for scripts.
pub struct JsonPresenter;

impl ResultPresenter for JsonPresenter {
    fn present(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        Ok(out.flush()?)
    }

    fn present_error(&self, error: &NttError, out: &mut dyn Write) -> Result<()> {
        let body = serde_json::json!({ "error": error.to_string() });
        writeln!(out, "{body}")?;
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
