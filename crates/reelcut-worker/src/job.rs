//! Job input and output documents.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reelcut_models::{
    AspectRatio, ClipSpec, EncodingConfig, FrameSize, PixelAspect, SelectionConfig, Transcript,
};
use reelcut_planner::CropGeometry;

/// Unique job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the source video is and what it looks like.
///
/// An explicit `frame` skips probing. A `path` is probed when `frame` is
/// absent and is also what render commands read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub frame: Option<FrameSize>,
    #[serde(default)]
    pub pixel_aspect: Option<PixelAspect>,
}

/// One planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanJob {
    /// Caller-chosen id; generated when missing
    #[serde(default)]
    pub job_id: Option<JobId>,
    pub transcript: Transcript,
    /// One relevance score per transcript segment
    pub scores: Vec<f64>,
    pub source: SourceSpec,
    /// Overrides the worker's selection policy
    #[serde(default)]
    pub selection: Option<SelectionConfig>,
    /// Overrides the worker's output aspect
    #[serde(default)]
    pub target_aspect: Option<AspectRatio>,
    #[serde(default)]
    pub encoding: Option<EncodingConfig>,
}

/// One planned clip with everything needed to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipOutput {
    /// 1-based position in seed order
    pub index: usize,
    pub spec: ClipSpec,
    pub output_file: String,
    /// Arguments for `ffmpeg`; absent when the job has no source path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg_args: Option<Vec<String>>,
    pub captions_srt: String,
}

/// Result document written for each job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutput {
    pub job_id: JobId,
    pub created_at: DateTime<Utc>,
    pub geometry: CropGeometry,
    pub clips: Vec<ClipOutput>,
}
