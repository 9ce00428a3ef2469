// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! File-based logging bootstrap.
//!
//! The terminal UI owns stdout/stderr, so log records only ever go to rotating files. Until
//! [`init_logging`] runs, every `log` call in the crate is a no-op. Initialisation is idempotent
//! for the same level and directory and refuses to switch either afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

pub const LEVEL_ENV: &str = "ANTHEM_LOG_LEVEL";
pub const DIR_ENV: &str = "ANTHEM_LOG_DIR";

const LOG_FILE_BASENAME: &str = "anthem";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: Mutex<Option<LoggingState>> = Mutex::new(None);

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel { level: String },
    InvalidDir { dir: PathBuf },
    CreateDir { dir: PathBuf, source: std::io::Error },
    Backend { source: flexi_logger::FlexiLoggerError },
    Conflict { field: &'static str, active: String, requested: String },
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLevel { level } => {
                write!(f, "unsupported log level {level:?}; expected trace|debug|info|warn|error")
            }
            Self::InvalidDir { dir } => write!(f, "log dir must be an absolute path, got {dir:?}"),
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log dir {dir:?}: {source}")
            }
            Self::Backend { source } => write!(f, "cannot start logger: {source}"),
            Self::Conflict { field, active, requested } => write!(
                f,
                "logging already initialised with {field} {active:?}; refusing to switch to {requested:?}"
            ),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend { source } => Some(source),
            _ => None,
        }
    }
}

/// `debug` in debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("anthem-logs")
}

/// Starts the file logger once per process.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    let mut state = LOGGING_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(active) = state.as_ref() {
        if active.log_dir != log_dir {
            return Err(LoggingError::Conflict {
                field: "dir",
                active: active.log_dir.display().to_string(),
                requested: log_dir.display().to_string(),
            });
        }
        if active.level != level {
            return Err(LoggingError::Conflict {
                field: "level",
                active: active.level.to_owned(),
                requested: level.to_owned(),
            });
        }
        return Ok(());
    }

    std::fs::create_dir_all(&log_dir)
        .map_err(|source| LoggingError::CreateDir { dir: log_dir.clone(), source })?;

    let logger = Logger::try_with_str(level)
        .map_err(|source| LoggingError::Backend { source })?
        .log_to_file(FileSpec::default().directory(log_dir.as_path()).basename(LOG_FILE_BASENAME))
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|source| LoggingError::Backend { source })?;

    install_panic_hook();

    log::info!(
        "event=app_start module=logging status=ok platform={} build_mode={} version={}",
        std::env::consts::OS,
        if cfg!(debug_assertions) { "debug" } else { "release" },
        env!("CARGO_PKG_VERSION")
    );
    log::info!(
        "event=logging_init module=logging status=ok level={level} log_dir={}",
        log_dir.display()
    );

    *state = Some(LoggingState { level, log_dir, _logger: logger });
    Ok(())
}

/// Active `(level, dir)`, if logging was started.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    let state = LOGGING_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    state.as_ref().map(|state| (state.level, state.log_dir.clone()))
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(LoggingError::UnsupportedLevel { level: level.trim().to_owned() }),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    if log_dir.as_os_str().is_empty() || !log_dir.is_absolute() {
        return Err(LoggingError::InvalidDir { dir: log_dir.to_path_buf() });
    }
    Ok(log_dir.to_path_buf())
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_owned());
        let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
            (*message).to_owned()
        } else if let Some(message) = info.payload().downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_owned()
        };
        let payload = payload.chars().take(MAX_PANIC_PAYLOAD_CHARS).collect::<String>();
        log::error!(
            "event=panic_captured module=logging status=error location={location} payload={payload:?}"
        );
        log::logger().flush();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{init_logging, logging_status, normalize_level, LoggingError};

    #[test]
    fn level_names_are_normalised() {
        assert_eq!(normalize_level(" WARNING ").expect("level"), "warn");
        assert_eq!(normalize_level("Trace").expect("level"), "trace");
        assert!(matches!(normalize_level("loud"), Err(LoggingError::UnsupportedLevel { .. })));
    }

    #[test]
    fn relative_dir_is_rejected() {
        let err = init_logging("info", Path::new("logs")).expect_err("relative");
        assert!(matches!(err, LoggingError::InvalidDir { .. }));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let dir = std::env::temp_dir().join(format!("anthem-logging-test-{}", std::process::id()));
        init_logging("debug", &dir).expect("first init");
        init_logging("debug", &dir).expect("same config again");
        assert_eq!(logging_status().map(|(level, _)| level), Some("debug"));

        let err = init_logging("info", &dir).expect_err("level switch");
        assert!(matches!(err, LoggingError::Conflict { field: "level", .. }));
        let err = init_logging("debug", &dir.join("other")).expect_err("dir switch");
        assert!(matches!(err, LoggingError::Conflict { field: "dir", .. }));
    }
}
