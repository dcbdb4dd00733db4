//! Error types for hp12c-engine
//!
//! None of these reach the caller of [`Calculator::press_key`](crate::Calculator::press_key):
//! invalid computations become the `Error` value in X, and unknown keys are
//! logged and ignored. They exist so the individual engines can report *why*
//! something failed, and so [`Calculator::try_press_key`](crate::Calculator::try_press_key)
//! can surface the diagnostic.

use thiserror::Error;

/// Engine diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Function not implemented: {0}")]
    Unimplemented(String),

    #[error("Invalid number entry: {0}")]
    InvalidEntry(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn unknown_key(token: impl Into<String>) -> Self {
        Self::UnknownKey(token.into())
    }

    pub fn unimplemented(label: impl Into<String>) -> Self {
        Self::Unimplemented(label.into())
    }

    pub fn invalid_entry(msg: impl Into<String>) -> Self {
        Self::InvalidEntry(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
