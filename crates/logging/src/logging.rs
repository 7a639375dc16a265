use crate::{AppError, ResultExt};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder as RollingBuilder, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[path = "config.rs"]
mod config;
#[path = "retention.rs"]
mod retention;

pub use config::resolve_log_level;
pub use retention::{cleanup_expired_logs, cleanup_expired_logs_with_duration};

const DEFAULT_KEEP_DAYS: u64 = 7;
const LOG_DIR_NAME: &str = "logs";
const LOG_FILE_PREFIX: &str = "dockd";

#[derive(Debug, Clone)]
pub struct LoggingGuard {
    log_dir: PathBuf,
    level: String,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn level(&self) -> &str {
        &self.level
    }
}

fn worker_guard_slot() -> &'static Mutex<Option<WorkerGuard>> {
    static SLOT: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(None))
}

pub fn init_logging(data_dir: &Path) -> Result<LoggingGuard, AppError> {
    let log_dir = data_dir.join(LOG_DIR_NAME);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log dir: {}", log_dir.display()))
        .with_code("log_dir_create_failed", "failed to create log directory")
        .with_ctx("logDir", log_dir.display().to_string())?;
    cleanup_expired_logs(&log_dir, DEFAULT_KEEP_DAYS)?;

    let level = resolve_log_level();
    if tracing::dispatcher::has_been_set() {
        return Ok(LoggingGuard { log_dir, level });
    }

    let file_appender = RollingBuilder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .with_context(|| format!("failed to build log appender: {}", log_dir.display()))
        .with_code("log_appender_create_failed", "failed to create log writer")
        .with_ctx("logDir", log_dir.display().to_string())?;
    let (file_writer, worker_guard) = tracing_appender::non_blocking(file_appender);

    if let Ok(mut slot) = worker_guard_slot().lock() {
        *slot = Some(worker_guard);
    }

    let env_filter = EnvFilter::new(level.clone());
    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(file_writer)
        .with_current_span(false)
        .with_span_list(false);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);
    #[cfg(debug_assertions)]
    let subscriber = subscriber.with(
        tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(true)
            .with_target(true)
            .with_writer(std::io::stderr),
    );

    subscriber
        .try_init()
        .with_context(|| format!("failed to init log subscriber: level={level}"))
        .with_code("log_subscriber_init_failed", "failed to initialize log subscriber")
        .with_ctx("logLevel", level.clone())?;

    Ok(LoggingGuard { log_dir, level })
}

#[cfg(test)]
#[path = "../tests/logging/logging_tests.rs"]
mod tests;
