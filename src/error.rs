//! Error types.
//!
//! Only the edges of the crate can fail: loading configuration, talking to
//! an audio backend, drawing, and writing exported files. Pitch mapping and
//! the note list are infallible.

use thiserror::Error;

/// Invalid or unreadable grid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("candidate range must be non-negative, got {0}")]
    NegativeRange(i32),

    #[error("middle index must be non-negative, got {0}")]
    NegativeMiddleIndex(i32),

    #[error("{field} must be at most {max}, got {value}")]
    GridTooLarge {
        field: &'static str,
        value: i32,
        max: i32,
    },
}

/// Failures reported by a synthesizer backend.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("audio backend failed to start: {0}")]
    Start(String),

    #[error("audio backend rejected tone at {frequency_hz:.2} Hz: {reason}")]
    Trigger { frequency_hz: f64, reason: String },
}

/// Failures while drawing the staff or a single note.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("note #{sequence} has non-finite coordinates ({x}, {y})")]
    NonFiniteNote { sequence: u64, x: f64, y: f64 },

    #[error("staff geometry is not drawable: {0}")]
    Geometry(String),
}

/// Failures while writing an exported drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
