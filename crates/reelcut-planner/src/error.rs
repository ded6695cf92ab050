//! Error types for clip planning.

use reelcut_models::ValidationError;
use thiserror::Error;

use crate::relevance::RelevanceError;

/// Result type for planning operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors that can occur while planning clips.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Relevance scoring failed: {0}")]
    Relevance(#[from] RelevanceError),
}

impl PlannerError {
    /// Whether the caller handed in malformed data (as opposed to a
    /// collaborator failing).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
