//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Planning failed: {0}")]
    Planner(#[from] reelcut_planner::PlannerError),

    #[error("Media error: {0}")]
    Media(#[from] reelcut_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn invalid_job(msg: impl Into<String>) -> Self {
        Self::InvalidJob(msg.into())
    }

    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WorkerError::Io(_) | WorkerError::Media(reelcut_media::MediaError::Timeout(_))
        )
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkerError::InvalidJob(_) => "invalid_job",
            WorkerError::Planner(e) if e.is_invalid_input() => "invalid_input",
            WorkerError::Planner(_) => "relevance",
            WorkerError::Media(_) => "media",
            WorkerError::Io(_) => "io",
            WorkerError::Json(_) => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_media::MediaError;
    use reelcut_models::ValidationError;
    use reelcut_planner::PlannerError;

    #[test]
    fn test_retryable() {
        assert!(WorkerError::from(MediaError::Timeout(30)).is_retryable());
        assert!(!WorkerError::from(MediaError::FfprobeNotFound).is_retryable());
        assert!(!WorkerError::invalid_job("no source").is_retryable());
    }

    #[test]
    fn test_kind() {
        let err = WorkerError::from(PlannerError::from(ValidationError::InvalidClipCount));
        assert_eq!(err.kind(), "invalid_input");
        assert_eq!(WorkerError::invalid_job("x").kind(), "invalid_job");
    }
}
