//! Configuration for clip window selection.
//!
//! The defaults are the permissive policy: overlapping windows are
//! allowed, no duration bounds are enforced and only word starts are rebased.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clip::WordTiming;
use crate::error::{ValidationError, ValidationResult};

/// Default number of clips per source video.
pub const DEFAULT_NUM_CLIPS: usize = 4;

/// Default target clip length in seconds.
pub const DEFAULT_TARGET_LEN: f64 = 15.0;

/// Shortest clip the strict policy keeps (seconds).
pub const STRICT_MIN_CLIP_LEN: f64 = 10.0;

/// Longest window the strict policy keeps (seconds).
pub const STRICT_MAX_WINDOW_LEN: f64 = 180.0;

/// Window selection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SelectionConfig {
    /// Number of seed segments (and therefore clips) to select.
    pub num_clips: usize,

    /// Windows stop growing once they reach this many seconds.
    pub target_len: f64,

    /// Windows shorter than this are dropped after growth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_clip_len: Option<f64>,

    /// Windows longer than this are dropped after growth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_window_len: Option<f64>,

    /// Allow windows from different seeds to share segments.
    ///
    /// - `true` (default): seeds grow independently, windows may overlap
    /// - `false`: consumed segments are neither reseeded nor absorbed again
    pub allow_overlap: bool,

    /// How word timestamps are rebased into clip time.
    pub word_timing: WordTiming,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            num_clips: DEFAULT_NUM_CLIPS,
            target_len: DEFAULT_TARGET_LEN,
            min_clip_len: None,
            max_window_len: None,
            allow_overlap: true,
            word_timing: WordTiming::StartOnly,
        }
    }
}

impl SelectionConfig {
    /// Non-overlapping windows bounded to 10..=180 seconds with symmetric
    /// word timing.
    pub fn strict() -> Self {
        Self {
            min_clip_len: Some(STRICT_MIN_CLIP_LEN),
            max_window_len: Some(STRICT_MAX_WINDOW_LEN),
            allow_overlap: false,
            word_timing: WordTiming::Symmetric,
            ..Default::default()
        }
    }

    /// Builder-style setter for the clip count.
    pub fn with_num_clips(mut self, num_clips: usize) -> Self {
        self.num_clips = num_clips;
        self
    }

    /// Builder-style setter for the target length.
    pub fn with_target_len(mut self, target_len: f64) -> Self {
        self.target_len = target_len;
        self
    }

    /// Builder-style setter for both duration bounds.
    pub fn with_duration_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_clip_len = min;
        self.max_window_len = max;
        self
    }

    /// Builder-style setter for the overlap policy.
    pub fn with_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self
    }

    /// Builder-style setter for word timing.
    pub fn with_word_timing(mut self, word_timing: WordTiming) -> Self {
        self.word_timing = word_timing;
        self
    }

    /// Check that the parameters describe a selectable policy.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.num_clips == 0 {
            return Err(ValidationError::InvalidClipCount);
        }
        if !self.target_len.is_finite() || self.target_len <= 0.0 {
            return Err(ValidationError::InvalidTargetLength(self.target_len));
        }

        let bad_bound = |b: Option<f64>| b.is_some_and(|v| !v.is_finite() || v <= 0.0);
        let inverted = matches!(
            (self.min_clip_len, self.max_window_len),
            (Some(min), Some(max)) if min > max
        );
        if bad_bound(self.min_clip_len) || bad_bound(self.max_window_len) || inverted {
            return Err(ValidationError::InvalidDurationBounds {
                min: self.min_clip_len,
                max: self.max_window_len,
            });
        }
        Ok(())
    }

    /// Whether a grown window of `duration` seconds passes the bounds.
    pub fn accepts_duration(&self, duration: f64) -> bool {
        self.min_clip_len.map_or(true, |min| duration >= min)
            && self.max_window_len.map_or(true, |max| duration <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectionConfig::default();
        assert_eq!(config.num_clips, 4);
        assert!((config.target_len - 15.0).abs() < f64::EPSILON);
        assert!(config.allow_overlap);
        assert_eq!(config.word_timing, WordTiming::StartOnly);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = SelectionConfig::strict();
        assert!(!config.allow_overlap);
        assert!(config.accepts_duration(10.0));
        assert!(config.accepts_duration(180.0));
        assert!(!config.accepts_duration(9.9));
        assert!(!config.accepts_duration(180.5));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SelectionConfig::default()
            .with_num_clips(2)
            .with_target_len(30.0)
            .with_overlap(false);
        assert_eq!(config.num_clips, 2);
        assert!((config.target_len - 30.0).abs() < f64::EPSILON);
        assert!(!config.allow_overlap);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert_eq!(
            SelectionConfig::default().with_num_clips(0).validate(),
            Err(ValidationError::InvalidClipCount)
        );
        assert!(matches!(
            SelectionConfig::default().with_target_len(0.0).validate(),
            Err(ValidationError::InvalidTargetLength(_))
        ));
        assert!(matches!(
            SelectionConfig::default()
                .with_target_len(f64::INFINITY)
                .validate(),
            Err(ValidationError::InvalidTargetLength(_))
        ));
        assert!(matches!(
            SelectionConfig::default()
                .with_duration_bounds(Some(60.0), Some(30.0))
                .validate(),
            Err(ValidationError::InvalidDurationBounds { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SelectionConfig = serde_json::from_str(r#"{"num_clips": 7}"#).unwrap();
        assert_eq!(config.num_clips, 7);
        assert!(config.allow_overlap);
        assert!(config.min_clip_len.is_none());
    }
}
