//! Encoder settings for rendering clip specifications.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// H.264 through libx264.
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
pub const DEFAULT_PRESET: &str = "fast";
/// Visually lossless for libx264.
pub const DEFAULT_CRF: u8 = 18;
pub const DEFAULT_AUDIO_BITRATE: &str = "128k";

/// Audio codec name that keeps the source track untouched.
pub const AUDIO_COPY: &str = "copy";

/// How a planned clip is encoded. Every field may be omitted in a job
/// document; missing fields take the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EncodingConfig {
    /// FFmpeg video encoder name
    pub codec: String,
    /// Encoder speed/size trade-off ("ultrafast" .. "veryslow")
    pub preset: String,
    /// Constant Rate Factor, 0-51, lower is better
    pub crf: u8,
    /// FFmpeg audio encoder name, or "copy"
    pub audio_codec: String,
    /// Ignored when the audio track is copied
    pub audio_bitrate: String,
    /// Appended verbatim after the encoder options
    pub extra_args: Vec<String>,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl EncodingConfig {
    /// Fast drafts for reviewing candidate clips before the final render.
    pub fn for_preview() -> Self {
        Self {
            preset: "ultrafast".to_string(),
            crf: 28,
            ..Default::default()
        }
    }

    /// Keep the source audio stream untouched.
    pub fn with_audio_copy(mut self) -> Self {
        self.audio_codec = AUDIO_COPY.to_string();
        self
    }

    pub fn copies_audio(&self) -> bool {
        self.audio_codec == AUDIO_COPY
    }
}
