//! Tracing subscriber setup for the CLI.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. `--verbose` forces debug output; otherwise `RUST_LOG` is
//! honoured, falling back to info.

use anyhow::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stdout,
    Stderr,
    /// Append to a file (no ANSI colors).
    File(PathBuf),
}

impl LogTarget {
    /// Parse the `--log` option: 0/off, 1/stdout, 2/stderr, or a filename.
    pub fn parse(s: &str) -> Self {
        match s {
            "0" | "off" => LogTarget::Off,
            "1" | "stdout" => LogTarget::Stdout,
            "2" | "stderr" => LogTarget::Stderr,
            filename => LogTarget::File(PathBuf::from(filename)),
        }
    }
}

/// Max level for the given verbosity.
pub fn level_for(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::INFO }
}

/// Filter for the given verbosity and `RUST_LOG` value.
pub fn env_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let default = || EnvFilter::new(level_for(verbose).as_str().to_lowercase());
    match rust_log {
        Some(directives) if !verbose => EnvFilter::try_new(directives).unwrap_or_else(|_| default()),
        _ => default(),
    }
}

/// Install the global subscriber.
pub fn init(target: &LogTarget, verbose: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = || env_filter(verbose, rust_log.as_deref());
    match target {
        LogTarget::Off => {}
        LogTarget::Stdout => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogTarget::Stderr => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}
