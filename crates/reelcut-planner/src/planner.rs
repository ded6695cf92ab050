//! End-to-end clip planning for one source video.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use reelcut_models::{ClipSpec, FrameSize, PixelAspect, SelectionConfig, Transcript};

use crate::crop::{plan_crop, CropGeometry, DEFAULT_TARGET_ASPECT};
use crate::emit::emit_with_timing;
use crate::error::PlannerResult;
use crate::relevance::RelevanceProvider;
use crate::window::WindowExpander;

/// Planner output: the shared crop plus one spec per selected window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipPlan {
    pub geometry: CropGeometry,
    pub clips: Vec<ClipSpec>,
}

impl ClipPlan {
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Sum of clip durations in seconds.
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(ClipSpec::duration).sum()
    }
}

/// Runs selection, rebasing and crop planning with an injected scorer.
#[derive(Clone)]
pub struct ClipPlanner {
    config: SelectionConfig,
    target_aspect: f64,
    relevance: Arc<dyn RelevanceProvider>,
}

impl ClipPlanner {
    pub fn new(config: SelectionConfig, relevance: Arc<dyn RelevanceProvider>) -> Self {
        Self {
            config,
            target_aspect: DEFAULT_TARGET_ASPECT,
            relevance,
        }
    }

    /// Set the output aspect ratio (width / height).
    pub fn with_target_aspect(mut self, target_aspect: f64) -> Self {
        self.target_aspect = target_aspect;
        self
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn target_aspect(&self) -> f64 {
        self.target_aspect
    }

    /// Plan clips for a transcript recorded on a `frame`-sized source.
    pub fn plan(
        &self,
        transcript: &Transcript,
        frame: FrameSize,
        pixel_aspect: Option<PixelAspect>,
    ) -> PlannerResult<ClipPlan> {
        transcript.validate()?;

        let geometry = plan_crop(frame.width, frame.height, pixel_aspect, self.target_aspect)?;

        let scores = self.relevance.score(&transcript.segments)?;
        debug!(
            provider = self.relevance.name(),
            segments = transcript.segments.len(),
            "Segments scored"
        );

        let windows = WindowExpander::new(self.config.clone()).select(&transcript.segments, &scores)?;
        let clips = emit_with_timing(
            &windows,
            geometry.rect,
            &transcript.words,
            self.config.word_timing,
        );

        info!(
            clips = clips.len(),
            requested = self.config.num_clips,
            crop_width = geometry.rect.width(),
            crop_height = geometry.rect.height(),
            word_timing = self.config.word_timing.as_str(),
            "Clip plan ready"
        );

        Ok(ClipPlan { geometry, clips })
    }
}
