//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. The goal and streak
//! calculations are total and never produce one.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Store error: {0}")]
    Store(String),

    /// A stored blob exists but does not parse. Never overwritten silently.
    #[error("Corrupt data under key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Advice request failed: {0}")]
    Advice(String),

    #[error("UI error: {0}")]
    Ui(String),

    /// The user pressed Ctrl-C at a prompt.
    #[error("Interrupted by user")]
    Interrupted,

    #[error("Configuration error: {0}")]
    Config(String),
}
