use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking writers flushing. Hold it until the process exits.
pub struct LogGuard {
    _file: WorkerGuard,
    _stdout: WorkerGuard,
}

pub fn init_logging(log_dir: &str, service_name: &str) -> Result<LogGuard, anyhow::Error> {
    let rotated = rotate_logs_on_startup(log_dir, service_name);
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, format!("{service_name}.log"));
    let (non_blocking_file, file_guard) = non_blocking(file_appender);
    let (non_blocking_stdout, stdout_guard) = non_blocking(std::io::stdout());

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let console_layer = fmt::layer()
        .with_writer(non_blocking_stdout)
        .with_ansi(true)
        .with_target(false);

    // RUST_LOG overrides
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    info!("Logging initialized - logs will be written to {log_dir}/{service_name}.log");

    report_rotation(rotated);

    Ok(LogGuard {
        _file: file_guard,
        _stdout: stdout_guard,
    })
}

fn report_rotation(rotated: Result<Option<String>, anyhow::Error>) {
    match rotated {
        Ok(Some(backup_file)) => info!("Previous log file backed up to: {backup_file}"),
        Ok(None) => {}
        Err(e) => warn!("Failed to back up previous log file: {e}"),
    }
}

/// Move last run's log aside as `<service>.<timestamp>.log`.
pub fn rotate_logs_on_startup(log_dir: &str, service_name: &str) -> Result<Option<String>, anyhow::Error> {
    let log_file = format!("{log_dir}/{service_name}.log");

    if !Path::new(&log_file).exists() {
        return Ok(None);
    }

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let backup_file = format!("{log_dir}/{service_name}.{timestamp}.log");
    std::fs::rename(&log_file, &backup_file)?;

    Ok(Some(backup_file))
}
