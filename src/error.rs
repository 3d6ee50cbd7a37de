//! Error types shared across the crate.
//!
//! None of these are fatal: every failure degrades to a missing or stale
//! overlay and is reported through `tracing`.

use thiserror::Error;

/// Failures from the host window system (bounds, visibility, monitor queries).
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("overlay window is gone")]
    Destroyed,

    #[error("failed to create overlay window: {0}")]
    Create(String),

    #[error("failed to query displays: {0}")]
    Displays(String),

    #[error("window operation `{op}` failed: {reason}")]
    Operation { op: &'static str, reason: String },
}

impl WindowError {
    pub fn op(op: &'static str, reason: impl ToString) -> Self {
        WindowError::Operation {
            op,
            reason: reason.to_string(),
        }
    }
}

/// Rejected `show` arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid notification type: {0}")]
    UnknownKind(String),

    #[error("message must be a string")]
    MessageNotString,

    #[error("message must not be empty")]
    EmptyMessage,
}

/// Problems reading the options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Audio device and sample failures.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output available: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("failed to read sound {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode sound: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("failed to play sound: {0}")]
    Play(#[from] rodio::PlayError),
}
