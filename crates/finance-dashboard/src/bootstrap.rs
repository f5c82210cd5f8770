use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use finance_core::settings::APP_DIR_NAME;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default data file names looked up in the working directory, in order.
pub const DEFAULT_DATA_FILES: [&str; 2] = ["finances_data.xlsx", "finances_data.csv"];

/// Sample file shipped under `data/`, used when nothing else is found.
pub const SAMPLE_DATA_FILE: &str = "finances_sample.csv";

/// Default log file name under `~/.finance-dashboard/logs/`.
pub const LOG_FILE_NAME: &str = "finance-dashboard.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.finance-dashboard`, or `./.finance-dashboard` without a home directory.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Ensure the `~/.finance-dashboard/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.finance-dashboard/`
/// - `~/.finance-dashboard/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let dir = app_dir();
    std::fs::create_dir_all(dir.join("logs"))
        .with_context(|| format!("cannot create {}", dir.display()))?;
    Ok(())
}

/// Log file used when `--log-file` is not given.
pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join(LOG_FILE_NAME)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a Python-style level name to a tracing filter directive.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// The terminal belongs to the dashboard, so logs are appended to `log_file`
/// (or [`default_log_file`]) without ANSI colours. With `to_stderr` (the
/// `--json` mode) they go to stderr instead, keeping stdout clean.
pub fn setup_logging(
    log_level: &str,
    log_file: Option<&Path>,
    to_stderr: bool,
) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (stderr_layer, file_layer) = if to_stderr {
        let layer = fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr);
        (Some(layer), None)
    } else {
        let path = log_file
            .map(Path::to_path_buf)
            .unwrap_or_else(default_log_file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        let layer = fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialised")?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Pick the data file.
///
/// An explicit path (from `--file`, `FINANCES_DATA_FILE` or the last-used
/// settings) is returned as is, so a missing file is reported rather than
/// silently replaced. Otherwise the first existing file among
/// 1. `<cwd>/finances_data.xlsx`, `<cwd>/finances_data.csv`
/// 2. `<cwd>/data/finances_data.xlsx`, `<cwd>/data/finances_data.csv`
/// 3. `<cwd>/data/finances_sample.csv`
///
/// is returned, or `None`.
pub fn discover_data_path(explicit: Option<PathBuf>, cwd: &Path) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    let data_dir = cwd.join("data");
    DEFAULT_DATA_FILES
        .iter()
        .map(|name| cwd.join(name))
        .chain(DEFAULT_DATA_FILES.iter().map(|name| data_dir.join(name)))
        .chain(std::iter::once(data_dir.join(SAMPLE_DATA_FILE)))
        .find(|p| p.is_file())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
