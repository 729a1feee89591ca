mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, parse};
use crate::commands::{Outcome, OutputOptions, execute};
use crate::logging::{TracingConfig, init_tracing};
use keyshim::{CredentialShim, KeyringBinding, ShimConfig};
use miette::IntoDiagnostic;
use std::io::Write;

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    let code = match run_main().await {
        Ok(outcome) => outcome.exit_code(),
        Err(error) => {
            eprintln!("{error:?}");
            1
        }
    };
    std::process::exit(code);
}

async fn run_main() -> miette::Result<Outcome> {
    let cli = parse();

    init_tracing(&TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
    })?;

    // Loading the native store blocks on the platform keychain.
    let config = shim_config(&cli);
    let shim = tokio::task::spawn_blocking(move || {
        CredentialShim::init(&config, &KeyringBinding::load)
    })
    .await
    .into_diagnostic()?
    .into_diagnostic()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    let outcome = execute(
        cli.command,
        &shim,
        OutputOptions { json: cli.json },
        &mut input,
        &mut out,
    )
    .await?;
    out.flush().into_diagnostic()?;
    Ok(outcome)
}

/// Environment configuration with command-line overrides applied
fn shim_config(cli: &Cli) -> ShimConfig {
    let mut config = ShimConfig::from_env();
    if cli.disable {
        config = config.with_disabled(true);
    }
    if let Some(labels) = &cli.fallback_labels {
        config = config.with_fallback_labels(labels.clone());
    }
    config
}
