//! Final clip specifications handed to the renderer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ClipWindow, CropRect, Word};

/// How word timestamps were moved into clip-relative time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WordTiming {
    /// Only `start` is shifted by the window start; `end` stays
    /// source-relative. Existing overlay consumers read this form.
    #[default]
    StartOnly,
    /// Both `start` and `end` are shifted.
    Symmetric,
}

impl WordTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordTiming::StartOnly => "start_only",
            WordTiming::Symmetric => "symmetric",
        }
    }
}

/// One output clip: what to trim, what to crop, and the words to overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipSpec {
    /// Source-relative time window
    pub window: ClipWindow,
    /// Crop rectangle, shared by every clip of the same source
    pub crop: CropRect,
    /// Words with timestamps relative to `window.start`
    pub words: Vec<Word>,
    /// Rebasing policy that produced `words`
    #[serde(default)]
    pub word_timing: WordTiming,
}

impl ClipSpec {
    /// Trim duration in seconds.
    pub fn duration(&self) -> f64 {
        self.window.duration()
    }

    /// Clip-relative end of a word, whatever policy produced it.
    pub fn relative_word_end(&self, word: &Word) -> f64 {
        match self.word_timing {
            WordTiming::StartOnly => word.end - self.window.start,
            WordTiming::Symmetric => word.end,
        }
    }
}
