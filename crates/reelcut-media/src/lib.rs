//! FFprobe metadata and FFmpeg command building for planned clips.
//!
//! This crate provides:
//! - Source probing with sample aspect ratio detection
//! - Type-safe FFmpeg command building
//! - Crop filter chains for anamorphic and square-pixel sources
//! - Per-clip render commands and SubRip captions

pub mod captions;
pub mod command;
pub mod error;
pub mod filters;
pub mod probe;
pub mod render;

pub use captions::to_srt;
pub use command::{check_ffprobe, FfmpegCommand};
pub use error::{MediaError, MediaResult};
pub use filters::{clip_filter_chain, crop_filter, scale_filter};
pub use probe::{parse_probe_output, probe_video, probe_video_with_timeout, VideoInfo};
pub use render::build_clip_command;
