//! Input validation errors.
//!
//! Every variant describes malformed collaborator output. Callers surface
//! these as fatal: no partial result is produced.

use thiserror::Error;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed or inconsistent input handed to the planner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{kind} {index} starts after it ends ({start:.3}s > {end:.3}s)")]
    InvalidSpan {
        kind: &'static str,
        index: usize,
        start: f64,
        end: f64,
    },

    #[error("{kind} {index} has a non-finite timestamp")]
    NonFiniteTime { kind: &'static str, index: usize },

    #[error("Expected {segments} relevance scores, got {scores}")]
    ScoreCountMismatch { segments: usize, scores: usize },

    #[error("Relevance score for segment {0} is NaN")]
    NonFiniteScore(usize),

    #[error("Clip count must be at least 1")]
    InvalidClipCount,

    #[error("Target clip length must be positive and finite, got {0}")]
    InvalidTargetLength(f64),

    #[error("Invalid duration bounds: min={min:?} max={max:?}")]
    InvalidDurationBounds { min: Option<f64>, max: Option<f64> },

    #[error("Frame dimensions must be at least 2x2, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Target aspect ratio must be positive and finite, got {0}")]
    InvalidTargetAspect(f64),
}
