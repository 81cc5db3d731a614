use crate::cli::Args;
use crate::config::Config;
use crate::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sets up logging for the pipeline.
///
/// Logs go to stdout (info level, debug with --debug) and to a daily rolling
/// log file. A custom log file path can come from --log-file or the config.
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub fn setup_logging(args: &Args, config: &Config) -> Result<(String, WorkerGuard), AppError> {
    let custom_log_path = args.log_file.as_ref().or(config.log_file_path.as_ref());
    let (log_dir, log_file_name) = match custom_log_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path.parent().unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("cfbd-pipeline.log");
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), "cfbd-pipeline.log".to_string()),
    };

    // Create log directory if it doesn't exist
    if !Path::new(&log_dir).exists() {
        std::fs::create_dir_all(&log_dir).map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    // Set up a rolling file appender that creates a new log file each day
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must be kept alive for the duration of the program
    // to ensure logs are flushed properly
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_directive = if args.debug {
        "cfbd_pipeline=debug"
    } else {
        "cfbd_pipeline=info"
    };

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(stdout)
                .with_ansi(true)
                .with_filter(
                    EnvFilter::from_default_env()
                        .add_directive(stdout_directive.parse().map_err(|e| {
                            AppError::log_setup_error(format!("Invalid log directive: {e}"))
                        })?),
                ),
        )
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    EnvFilter::from_default_env().add_directive(
                        "cfbd_pipeline=info".parse().map_err(|e| {
                            AppError::log_setup_error(format!("Invalid log directive: {e}"))
                        })?,
                    ),
                ),
        )
        .init();

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}
