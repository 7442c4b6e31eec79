//! Tracing setup: a rolling log file for diagnostics and a quiet stderr feed.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE_PREFIX: &str = "standup.log";
pub const LOG_DIR_ENV: &str = "STANDUP_LOG_DIR";
pub const CONSOLE_FILTER_ENV: &str = "STANDUP_LOG";

const DEFAULT_FILE_DIRECTIVE: &str = "info,standup_cli=debug";
const DEFAULT_CONSOLE_DIRECTIVE: &str = "warn";

/// Where logs go and how much of them each sink keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub dir: PathBuf,
    pub file_directive: String,
    pub console_directive: String,
}

impl LogSettings {
    /// Resolve from `STANDUP_LOG_DIR`, `RUST_LOG` and `STANDUP_LOG`.
    pub fn from_env() -> Result<Self> {
        let dir = match env::var_os(LOG_DIR_ENV).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_log_dir()?,
        };

        Ok(Self {
            dir,
            file_directive: directive(env::var(EnvFilter::DEFAULT_ENV).ok(), DEFAULT_FILE_DIRECTIVE),
            console_directive: directive(env::var(CONSOLE_FILTER_ENV).ok(), DEFAULT_CONSOLE_DIRECTIVE),
        })
    }
}

/// An unset or blank variable falls back to `default`.
fn directive(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

/// A directive the filter parser rejects is replaced by `default`.
fn build_filter(directive: &str, default: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("Ignoring log filter '{}': {}", directive, e);
        EnvFilter::new(default)
    })
}

fn default_log_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "standup-cli", "standup-cli")
        .context("Could not determine home directory for logs")?;
    Ok(dirs.data_dir().join("logs"))
}

fn prepare_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("Could not create log directory {}", dir.display()))
}

/// Install the global subscriber. Returns the guard that flushes the file
/// writer on drop and the directory the log file lives in.
pub fn init() -> Result<(WorkerGuard, PathBuf)> {
    init_with(LogSettings::from_env()?)
}

fn init_with(settings: LogSettings) -> Result<(WorkerGuard, PathBuf)> {
    prepare_dir(&settings.dir)?;

    let appender = tracing_appender::rolling::daily(&settings.dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(build_filter(&settings.file_directive, DEFAULT_FILE_DIRECTIVE));

    // Interactive output stays clean; only warnings reach the terminal by default.
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(build_filter(&settings.console_directive, DEFAULT_CONSOLE_DIRECTIVE));

    tracing_subscriber::registry().with(file).with(console).try_init()?;
    tracing::debug!("Writing logs to {}", settings.dir.display());

    Ok((guard, settings.dir))
}

/// Test-writer subscriber; safe to call from every test.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer().with_filter(EnvFilter::new("debug")))
        .try_init();
}
