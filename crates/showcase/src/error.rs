//! Error types for showcase operations.
//!
//! Geometric aborts (a target scrolled mostly off-screen) are not errors; the
//! controller dismisses silently. [`ShowcaseError`] covers configuration
//! problems and caller mistakes.

use std::io;

use thiserror::Error;

/// The main error type for showcase operations.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid color: {0}")]
    Color(String),

    /// `show` was called before any successful `setup`.
    #[error("Showcase has not been set up with a target")]
    NotSetUp,

    #[error("Unknown button id {0}")]
    UnknownButton(usize),
}
