//! Error types for the waterflow application.
//!
//! Every module defines its own error enum with `thiserror`; [`AppError`]
//! collects them so the binary can propagate with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`ConfigError`] - Config file read/parse failures, out-of-range values
//!   - [`LoggingError`] - Log file setup failures
//!   - [`FeedError`] - Feed file read/decode failures
//!   - [`LayoutError`] - Layout configuration rejected by the engine
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery
//!
//! All of these are fatal at startup. Once the viewer runs, feed reload and
//! layout failures are reported in the status bar and the previous cards
//! stay on screen; only terminal errors end the session.

use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::feed::FeedError;
pub use crate::layout::LayoutError;
pub use crate::logging::LoggingError;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The feed could not be loaded.
    #[error("Failed to load feed: {0}")]
    Feed(#[from] FeedError),

    /// The layout engine rejected its configuration.
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
