//! Tracing setup and log file housekeeping.
//!
//! Diagnostics always go to stderr, filtered by `RUST_LOG` (default
//! `warn`, so the shell output stays clean). With `--log-file`, a JSON
//! layer also writes to `.tsh/logs/<YYYYMMDD_HHMMSS>.log` under the
//! project directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_RETENTION_DAYS: u64 = 3;

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// the program exits.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
pub fn init_tracing(root: &Path, log_to_file: bool) -> Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    if !log_to_file {
        tracing_subscriber::registry().with(stderr_layer).init();
        return Ok(None);
    }

    let (writer, guard) = open_log_writer(root)?;
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(env_filter()),
        )
        .init();
    Ok(Some(guard))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn logs_dir(root: &Path) -> PathBuf {
    root.join(tsh_core::PROJECT_DIR).join("logs")
}

fn open_log_writer(root: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let dir = logs_dir(root);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let path = dir.join(format!("{}.log", format_utc_timestamp(SystemTime::now())));
    let file = fs::File::create(&path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;

    Ok(tracing_appender::non_blocking(file))
}

/// Delete `.log` files older than three days from `.tsh/logs/`.
///
/// Failures are reported on stderr and otherwise ignored; tracing is not
/// initialized yet when this runs.
pub fn cleanup_old_logs(root: &Path) {
    let dir = logs_dir(root);
    let Ok(entries) = fs::read_dir(&dir) else {
        return;
    };
    let cutoff = SystemTime::now() - Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60);

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }
        let expired = entry
            .metadata()
            .and_then(|m| m.modified())
            .is_ok_and(|modified| modified < cutoff);
        if expired && let Err(e) = fs::remove_file(&path) {
            eprintln!("warning: failed to remove old log file {}: {e}", path.display());
        }
    }
}

/// `YYYYMMDD_HHMMSS` in UTC.
fn format_utc_timestamp(time: SystemTime) -> String {
    let secs = time.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let (year, month, day) = civil_from_days(secs / 86_400);
    let rem = secs % 86_400;

    format!(
        "{year:04}{month:02}{day:02}_{:02}{:02}{:02}",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Gregorian date for a day count since 1970-01-01 (Hinnant's algorithm).
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe as i64 + era * 400 + i64::from(month <= 2);

    (year as u64, month, day)
}
