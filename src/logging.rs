//! Logging setup for numport.
//!
//! Interactive wizard: logs go to `<state>/logs/numport-{datetime}.log` so the
//! alternate screen stays clean. Subcommands log to stderr.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Where log records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

impl LogTarget {
    /// File output only while the terminal is owned by the wizard
    pub fn select(config: &Config, interactive: bool) -> Self {
        if interactive && config.logging.to_file {
            LogTarget::File
        } else {
            LogTarget::Stderr
        }
    }
}

/// Keeps the background writer alive; dropping it flushes buffered records
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,
    pub log_file_path: Option<PathBuf>,
}

pub fn log_file_name(now: DateTime<Utc>) -> String {
    format!("numport-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

/// `RUST_LOG` wins over `--debug`, which wins over the configured level
fn filter_directive(config: &Config, debug_override: bool) -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if debug_override {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        }
    })
}

pub fn init_logging(
    config: &Config,
    interactive: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let filter = EnvFilter::try_new(filter_directive(config, debug_override))
        .context("Invalid log filter")?;

    match LogTarget::select(config, interactive) {
        LogTarget::File => {
            let logs_dir = config.logs_path();
            std::fs::create_dir_all(&logs_dir).with_context(|| {
                format!("Failed to create log directory {}", logs_dir.display())
            })?;

            let file_name = log_file_name(Utc::now());
            let log_file_path = logs_dir.join(&file_name);
            let appender = tracing_appender::rolling::never(&logs_dir, &file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();

            Ok(LoggingHandle {
                _guard: Some(guard),
                log_file_path: Some(log_file_path),
            })
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();

            Ok(LoggingHandle {
                _guard: None,
                log_file_path: None,
            })
        }
    }
}
