//! Logging setup
//!
//! Both modes read the level from `NOTELAB_LOG` and stay silent without it.
//! One-shot commands log to stderr; the TUI owns the terminal, so it logs to
//! a file instead.

use std::fs::File;

use notelab_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NOTELAB_LOG";

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("notelab_core={},notelab_cli={}", level, level))
}

/// Initialize stderr logging for one-shot commands
pub fn init_cli_logging() {
    let Ok(level) = std::env::var(LOG_ENV) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&level))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize file logging for TUI mode
///
/// Logs to `config.log_file`, or `{data_dir}/debug.log` by default.
pub fn init_tui_logging(config: &Config) {
    let Ok(level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
