//! Clip windows selected from the transcript.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_seconds;

/// A source-relative time range grown around a seed segment.
///
/// Created once by the window expander and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipWindow {
    /// Start time in seconds (source-relative)
    pub start: f64,
    /// End time in seconds (source-relative)
    pub end: f64,
    /// Concatenated text of the absorbed segments
    pub text: String,
    /// Contiguous, ascending indices of the absorbed segments
    pub source_segment_indices: Vec<usize>,
}

impl ClipWindow {
    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Index of the first absorbed segment.
    pub fn first_segment(&self) -> Option<usize> {
        self.source_segment_indices.first().copied()
    }

    /// Index of the last absorbed segment.
    pub fn last_segment(&self) -> Option<usize> {
        self.source_segment_indices.last().copied()
    }

    /// Whether the segment indices form a gap-free ascending run.
    pub fn is_contiguous(&self) -> bool {
        self.source_segment_indices
            .windows(2)
            .all(|pair| pair[1] == pair[0] + 1)
    }

    /// Whether two windows share any part of the timeline.
    pub fn overlaps(&self, other: &ClipWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for ClipWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({:.1}s)",
            format_seconds(self.start),
            format_seconds(self.end),
            self.duration()
        )
    }
}
