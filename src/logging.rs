use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "brewguide.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Pick the filter directive: explicit flag, then `RUST_LOG`, then the default.
pub fn filter_directive(flag: Option<&str>) -> String {
    flag.map(str::to_owned)
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Send all tracing output to `dir/brewguide.log`; the terminal belongs to
/// the UI. Keep the returned guard alive until exit so buffered lines get
/// flushed.
pub fn init_file_logging(dir: &Path, directive: &str) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(directive).context("invalid log level")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;

    Ok(guard)
}
