//! Command execution against an initialized shim

use crate::cli::Commands;
use keyshim::{CredentialBinding, CredentialShim};
use miette::{IntoDiagnostic, Result};
use std::io::{BufRead, Write};
use tracing::instrument;

/// What a command produced, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Missing,
}

impl Outcome {
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Missing => 2,
        }
    }
}

/// Output options shared by all commands
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

#[instrument(skip_all, fields(binding = shim.binding_name()))]
pub async fn execute(
    command: Commands,
    shim: &CredentialShim,
    options: OutputOptions,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome> {
    match command {
        Commands::Get { service, account } => {
            let password = shim.get_password(&service, &account).await.into_diagnostic()?;
            write_secret(out, password.as_deref(), options)
        }
        Commands::Set {
            service,
            account,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => read_password(input)?,
            };
            shim.set_password(&service, &account, &password).await.into_diagnostic()?;
            if options.json {
                writeln!(out, "{}", serde_json::json!({ "stored": true })).into_diagnostic()?;
            }
            Ok(Outcome::Success)
        }
        Commands::Delete { service, account } => {
            let deleted = shim.delete_password(&service, &account).await.into_diagnostic()?;
            if options.json {
                writeln!(out, "{}", serde_json::json!({ "deleted": deleted })).into_diagnostic()?;
            } else {
                writeln!(out, "{deleted}").into_diagnostic()?;
            }
            Ok(Outcome::Success)
        }
        Commands::FindCredentials { service } => {
            let credentials = shim.find_credentials(&service).await.into_diagnostic()?;
            if options.json {
                let json = serde_json::to_string(&credentials).into_diagnostic()?;
                writeln!(out, "{json}").into_diagnostic()?;
            } else {
                for credential in &credentials {
                    writeln!(out, "{}\t{}", credential.account, credential.password)
                        .into_diagnostic()?;
                }
            }
            Ok(Outcome::Success)
        }
        Commands::FindPassword { service } => {
            let password = shim.find_password(&service).await.into_diagnostic()?;
            write_secret(out, password.as_deref(), options)
        }
        Commands::Labels => {
            let labels = shim.fallback_labels();
            if options.json {
                let json = serde_json::to_string(labels).into_diagnostic()?;
                writeln!(out, "{json}").into_diagnostic()?;
            } else {
                for label in labels {
                    writeln!(out, "{}\t{}", label.service, label.account).into_diagnostic()?;
                }
            }
            Ok(Outcome::Success)
        }
    }
}

fn write_secret(
    out: &mut impl Write,
    password: Option<&str>,
    options: OutputOptions,
) -> Result<Outcome> {
    if options.json {
        writeln!(out, "{}", serde_json::json!({ "password": password })).into_diagnostic()?;
    } else if let Some(password) = password {
        writeln!(out, "{password}").into_diagnostic()?;
    }

    Ok(if password.is_some() {
        Outcome::Success
    } else {
        Outcome::Missing
    })
}

/// Read one line from `input`, without its line ending
fn read_password(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).into_diagnostic()?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(miette::miette!("No password given on stdin"));
    }
    Ok(password.to_string())
}
