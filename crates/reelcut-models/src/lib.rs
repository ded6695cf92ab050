//! Shared data models for the reelcut clip planner.
//!
//! This crate provides Serde-serializable types for:
//! - Transcript segments and word tokens
//! - Clip windows and final clip specifications
//! - Frame geometry, pixel aspect ratios and crop rectangles
//! - Selection and encoding configuration

pub mod aspect;
pub mod clip;
pub mod encoding;
pub mod error;
pub mod geometry;
pub mod selection;
pub mod timestamp;
pub mod transcript;
pub mod window;

// Re-export common types
pub use aspect::{AspectRatio, AspectRatioParseError};
pub use clip::{ClipSpec, WordTiming};
pub use encoding::EncodingConfig;
pub use error::{ValidationError, ValidationResult};
pub use geometry::{CropRect, FrameSize, PixelAspect, PixelAspectParseError};
pub use selection::SelectionConfig;
pub use transcript::{Segment, Transcript, Word};
pub use window::ClipWindow;
