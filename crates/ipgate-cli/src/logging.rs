//! Log setup: stderr always, plus an append-only file for `serve` when asked.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::args::{Cli, Command};

pub const LOG_FILE_ENV: &str = "IPGATE_LOG_FILE";

/// Log file for this invocation: the `--log-file` flag, else `IPGATE_LOG_FILE`.
/// Only `serve` writes one.
pub fn log_file_for(cli: &Cli, env_value: Option<OsString>) -> Option<PathBuf> {
    match &cli.cmd {
        Command::Serve(args) => args
            .log_file
            .clone()
            .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from)),
        _ => None,
    }
}

/// Install the global subscriber. `RUST_LOG` filters both outputs.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_flag_beats_env() {
        let cli = parse(&["ipgate", "serve", "--log-file", "flag.log"]);
        let path = log_file_for(&cli, Some("env.log".into()));
        assert_eq!(path, Some(PathBuf::from("flag.log")));
    }

    #[test]
    fn test_env_used_without_flag() {
        let cli = parse(&["ipgate", "serve"]);
        assert_eq!(
            log_file_for(&cli, Some("env.log".into())),
            Some(PathBuf::from("env.log"))
        );
        assert_eq!(log_file_for(&cli, Some("".into())), None);
        assert_eq!(log_file_for(&cli, None), None);
    }

    #[test]
    fn test_check_never_logs_to_file() {
        let cli = parse(&["ipgate", "check"]);
        assert_eq!(log_file_for(&cli, Some("env.log".into())), None);
    }
}
