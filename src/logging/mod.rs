//! Tracing subscriber initialization.
//!
//! The viewer owns the terminal, so logs go to a file; follow them with
//! `tail -f` in another terminal. Filtering honours `RUST_LOG` and defaults
//! to [`DEFAULT_FILTER`].
//!
//! Useful directives:
//! - `RUST_LOG=waterflow::layout=debug` - one line per layout pass
//! - `RUST_LOG=waterflow::layout=trace` - one line per laid-out section

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Log path has no usable file name
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// A log file location split the way the file appender wants it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// Directory holding the file (created if missing).
    pub directory: PathBuf,
    /// File name inside `directory`.
    pub file_name: String,
}

impl LogFile {
    /// Split `path` and make sure its directory exists.
    ///
    /// A bare file name resolves to the current directory.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `path` has no UTF-8 file name, `DirectoryCreation`
    /// if the directory cannot be created.
    pub fn prepare(path: &Path) -> Result<Self, LoggingError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?
            .to_string();

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
            path: directory.clone(),
            source,
        })?;

        Ok(Self {
            directory,
            file_name,
        })
    }
}

/// Filter from `RUST_LOG`, or `default` when unset or unparseable.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize the global tracing subscriber writing to `log_path`.
///
/// # Errors
///
/// Returns `LoggingError` if the log directory cannot be prepared or a
/// global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let log_file = LogFile::prepare(log_path)?;
    let appender = tracing_appender::rolling::never(&log_file.directory, &log_file.file_name);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
