//! Clip planning core.
//!
//! This crate turns a scored transcript and source frame metadata into
//! clip specifications:
//! - Seed selection and alternating window growth ([`window`])
//! - Word extraction and clip-relative rebasing ([`rebase`])
//! - Pixel-aspect-aware centered crop geometry ([`crop`])
//! - Aggregation into [`ClipSpec`](reelcut_models::ClipSpec)s ([`emit`])
//!
//! Everything here is synchronous and deterministic. Scoring models are
//! injected through [`RelevanceProvider`]; the planner never owns them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reelcut_planner::{ClipPlanner, PrecomputedScores};
//!
//! let planner = ClipPlanner::new(config, Arc::new(PrecomputedScores::new(scores)));
//! let plan = planner.plan(&transcript, frame, pixel_aspect)?;
//! ```

pub mod crop;
pub mod emit;
pub mod error;
pub mod planner;
pub mod rebase;
pub mod relevance;
pub mod window;

pub use crop::{
    compute_crop, plan_crop, CropGeometry, PixelAspectCorrection, CROP_GRID,
    DEFAULT_TARGET_ASPECT,
};
pub use emit::{emit, emit_with_timing};
pub use error::{PlannerError, PlannerResult};
pub use planner::{ClipPlan, ClipPlanner};
pub use rebase::{rebase, rebase_symmetric, rebase_with};
pub use relevance::{
    cosine_similarity, Embedder, PrecomputedScores, RelevanceError, RelevanceProvider,
    TopicSimilarity,
};
pub use window::{rank_segments, select_clips, WindowExpander};
