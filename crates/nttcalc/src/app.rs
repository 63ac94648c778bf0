//! Application entry point and dispatch.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Command, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::{debug, warn};

use nttcalc_core::{exit_codes, DefaultFactory, NttContext, NttError};

use crate::config::AppConfig;
use crate::errors::exit_code;
use crate::orchestrator::{analyze_results, execute_transforms, first_error, get_transforms_to_run};
use crate::presenter::{CliPresenter, JsonPresenter, Report, ResultPresenter};

/// Run the application and return the process exit code.
pub fn run(config: &AppConfig) -> Result<i32> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = AppConfig::command();
        generate_completion(&mut cmd, shell, &mut io::stdout());
        return Ok(exit_codes::SUCCESS);
    }

    let presenter: Box<dyn ResultPresenter> = if config.json {
        Box::new(JsonPresenter)
    } else {
        Box::new(CliPresenter::new(config.verbose, config.quiet))
    };

    match run_transforms(config) {
        Ok((report, code)) => {
            presenter.present(&report, &mut io::stdout().lock())?;
            Ok(code)
        }
        Err(err) => {
            presenter.present_error(&err, &mut io::stderr().lock())?;
            Ok(exit_code(&err))
        }
    }
}

/// Build the context, run the selected variants and cross-check them.
///
/// Errors returned here stop the run before any output; per-variant failures
/// are part of the report and only decide the exit code.
pub fn run_transforms(config: &AppConfig) -> Result<(Report, i32), NttError> {
    let seq = config.sequence()?;
    let digit_bound = config.digit_bound()?;
    let opts = config.transform_options();
    let direction = config.direction();

    let ctx = NttContext::with_limits(digit_bound, seq.len(), &config.search_limits())?;
    debug!(
        length = ctx.len(),
        modulus = ctx.modulus(),
        root = ctx.root(),
        "transform context ready"
    );

    let factory = DefaultFactory::new();
    let transforms = get_transforms_to_run(&config.algo, &factory)?;
    let results = execute_transforms(&transforms, &ctx, &seq, direction, &opts);

    let cross_check = analyze_results(&results, &ctx.reduce(&seq));
    if let Err(e) = &cross_check {
        warn!(error = %e, "cross-check failed");
    }

    let code = match (&cross_check, first_error(&results)) {
        (Err(e), _) | (Ok(()), Some(e)) => exit_code(e),
        (Ok(()), None) => exit_codes::SUCCESS,
    };
    let report = Report::new(&ctx, digit_bound, direction, &opts, &seq, &results, &cross_check);
    Ok((report, code))
}

/// Generate shell completion script.
pub fn generate_completion(cmd: &mut Command, shell: Shell, out: &mut dyn Write) {
    generate(shell, cmd, "nttcalc", out);
}
