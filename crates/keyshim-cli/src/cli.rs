//! Command-line argument definitions
//!
//! Global flags control logging and output format, and override the
//! environment configuration read by the library.

use crate::logging::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "keyshim")]
#[command(about = "Look up OS keychain credentials, falling back to well-known labels")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        help = "Use the no-op secret store (overrides KEYSHIM_DISABLE_KEYCHAIN)"
    )]
    pub disable: bool,

    #[arg(
        long,
        global = true,
        value_name = "JSON",
        help = "Fallback labels as a JSON array (overrides KEYSHIM_FALLBACK_LABELS)"
    )]
    pub fallback_labels: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Look up a password, trying fallback labels on a miss")]
    Get { service: String, account: String },
    #[command(about = "Store a password")]
    Set {
        service: String,
        account: String,
        #[arg(long, help = "Password to store; read from stdin when omitted")]
        password: Option<String>,
    },
    #[command(about = "Delete a stored password")]
    Delete { service: String, account: String },
    #[command(about = "List credentials stored under a service")]
    FindCredentials { service: String },
    #[command(about = "Print any password stored under a service")]
    FindPassword { service: String },
    #[command(about = "Print the effective fallback labels")]
    Labels,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from(["keyshim", "get", "Chrome Safe Storage", "Chrome"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Get {
                service: "Chrome Safe Storage".to_string(),
                account: "Chrome".to_string(),
            }
        );
        assert!(!cli.disable);
        assert!(cli.fallback_labels.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "keyshim",
            "labels",
            "--disable",
            "--json",
            "--fallback-labels",
            r#"[{"service":"Foo","account":"Bar"}]"#,
        ])
        .unwrap();
        assert_eq!(cli.command, Commands::Labels);
        assert!(cli.disable);
        assert!(cli.json);
        assert_eq!(
            cli.fallback_labels.as_deref(),
            Some(r#"[{"service":"Foo","account":"Bar"}]"#)
        );
    }

    #[test]
    fn test_parse_set_without_password() {
        let cli = Cli::try_parse_from(["keyshim", "set", "svc", "acct"]).unwrap();
        assert!(matches!(cli.command, Commands::Set { password: None, .. }));
    }

    #[test]
    fn test_parse_find_credentials() {
        let cli = Cli::try_parse_from(["keyshim", "find-credentials", "svc"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::FindCredentials {
                service: "svc".to_string()
            }
        );
    }

    #[test]
    fn test_missing_account_rejected() {
        assert!(Cli::try_parse_from(["keyshim", "get", "svc"]).is_err());
    }
}
