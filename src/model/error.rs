//! Error types for swipedeck.
//!
//! The engine itself never fails: missing cards, delegates, or subscribers
//! turn operations into no-ops. Errors only come from the terminal host,
//! which reads files, owns the terminal, and installs the log subscriber.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`crate::config::ConfigError`] - Config file read/parse failures
//!   - [`crate::logging::LoggingError`] - Log directory or subscriber failures
//!   - [`DeckError`] - Deck file failures
//!   - [`crate::view::TuiError`] - Terminal failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Every variant is fatal: the terminal is restored and the message printed.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The deck could not be loaded.
    #[error("Failed to load deck: {0}")]
    Deck(#[from] DeckError),

    /// Terminal or rendering failure.
    #[error("Terminal error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

/// Errors encountered when loading demo cards from a deck file.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The deck file does not exist.
    #[error("Deck file not found: {path}")]
    FileNotFound {
        /// The path that was tried.
        path: PathBuf,
    },

    /// The deck file is not a JSON array of cards.
    ///
    /// `message` is the `serde_json` error text, which carries line and column.
    #[error("Invalid deck JSON in {path}: {message}")]
    InvalidJson {
        /// The deck file.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },

    /// The deck parsed but holds no cards.
    #[error("Deck {path} contains no cards")]
    Empty {
        /// The deck file.
        path: PathBuf,
    },

    /// Generic I/O error while reading the deck.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
