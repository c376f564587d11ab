//! Error types for the redressal pipeline.
//!
//! Rule engines never surface errors; they fall back to defined defaults.
//! The variants here cover the hard failures: rejected input, a missing
//! model artifact on the training path, and collaborator I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedressError {
    /// User input rejected before the pipeline runs.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Model artifact missing or corrupt. Fatal on the training/offline
    /// path; the serving path falls back to a default category instead.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Training error: {0}")]
    Training(String),
}

pub type Result<T> = std::result::Result<T, RedressError>;
