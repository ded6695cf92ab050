//! Transcript models produced by the transcription collaborator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// A timed transcript unit, typically one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Spoken text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Segment {
    /// Create a new segment.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A single timed word token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Word {
    /// Word text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Word {
    /// Create a new word.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Segment and word streams for one source video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transcript {
    /// Ordered, non-overlapping sentence segments
    pub segments: Vec<Segment>,
    /// Ordered word tokens (may be empty when the ASR has no word timing)
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Transcript {
    /// Create a transcript from segments and words.
    pub fn new(segments: Vec<Segment>, words: Vec<Word>) -> Self {
        Self { segments, words }
    }

    /// Check shape invariants of both streams.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_segments(&self.segments)?;
        validate_words(&self.words)
    }

    /// Span covered by the segments, from the first start to the last end.
    pub fn duration(&self) -> f64 {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => (last.end - first.start).max(0.0),
            _ => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Reject segments with non-finite times or `start > end`.
pub fn validate_segments(segments: &[Segment]) -> ValidationResult<()> {
    for (index, segment) in segments.iter().enumerate() {
        check_span("segment", index, segment.start, segment.end)?;
    }
    Ok(())
}

/// Reject words with non-finite times or `start > end`.
pub fn validate_words(words: &[Word]) -> ValidationResult<()> {
    for (index, word) in words.iter().enumerate() {
        check_span("word", index, word.start, word.end)?;
    }
    Ok(())
}

fn check_span(kind: &'static str, index: usize, start: f64, end: f64) -> ValidationResult<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ValidationError::NonFiniteTime { kind, index });
    }
    if start > end {
        return Err(ValidationError::InvalidSpan {
            kind,
            index,
            start,
            end,
        });
    }
    Ok(())
}
