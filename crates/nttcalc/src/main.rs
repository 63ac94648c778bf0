//! NttCalc-rs: number-theoretic transform driver.

use anyhow::Result;
use nttcalc_core::exit_codes;
use nttcalc_lib::{app, config};

fn main() -> Result<()> {
    // Initialize tracing on stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Parse CLI args and run
    let config = config::AppConfig::parse();
    let code = app::run(&config)?;
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
