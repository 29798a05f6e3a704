//! Logging setup for the dashboard.

use chrono::Local;
use std::fs::{self, OpenOptions};

use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::setting::SETTINGS;
use super::utility::get_folder_path;

/// Convert the integer log level from settings to a tracing Level
pub fn level_from_int(level: i64) -> Level {
    match level {
        ..=10 => Level::DEBUG,
        11..=20 => Level::INFO,
        21..=30 => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Initialize the logger from the global settings.
///
/// Console and file output are each toggled by `log.console` and `log.file`;
/// the file layer appends to a per-day log under the data directory.
pub fn init_logger() {
    if !SETTINGS.get_bool("log.active").unwrap_or(true) {
        return;
    }

    let log_level = SETTINGS.get_int("log.level").unwrap_or(20);
    let log_console = SETTINGS.get_bool("log.console").unwrap_or(true);
    let log_file = SETTINGS.get_bool("log.file").unwrap_or(true);

    let level = level_from_int(log_level);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::registry().with(filter);

    if log_console {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(true);

        if log_file {
            if let Some(file) = open_log_file() {
                let file_layer = fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false);

                subscriber.with(fmt_layer).with(file_layer).init();
                return;
            }
        }

        subscriber.with(fmt_layer).init();
    } else if log_file {
        if let Some(file) = open_log_file() {
            let file_layer = fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false);

            subscriber.with(file_layer).init();
        }
    }
}

/// Open the log file for today, creating the log folder if needed
fn open_log_file() -> Option<fs::File> {
    let log_path = get_log_file_path();

    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok()
}

/// Get the log file path for today
fn get_log_file_path() -> PathBuf {
    let log_folder = get_folder_path("log");
    let today = Local::now().format("%Y%m%d").to_string();
    let filename = format!("dashboard_{}.log", today);
    log_folder.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_int() {
        assert_eq!(level_from_int(10), Level::DEBUG);
        assert_eq!(level_from_int(20), Level::INFO);
        assert_eq!(level_from_int(30), Level::WARN);
        assert_eq!(level_from_int(40), Level::ERROR);
    }
}
