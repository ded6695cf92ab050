//! Assemble clip specifications.

use reelcut_models::{ClipSpec, ClipWindow, CropRect, Word, WordTiming};

use crate::rebase::rebase_with;

/// One spec per window, in window order, with start-only word rebasing.
pub fn emit(windows: &[ClipWindow], crop: CropRect, words: &[Word]) -> Vec<ClipSpec> {
    emit_with_timing(windows, crop, words, WordTiming::StartOnly)
}

/// One spec per window, in window order.
pub fn emit_with_timing(
    windows: &[ClipWindow],
    crop: CropRect,
    words: &[Word],
    word_timing: WordTiming,
) -> Vec<ClipSpec> {
    windows
        .iter()
        .map(|window| ClipSpec {
            window: window.clone(),
            crop,
            words: rebase_with(words, window, word_timing),
            word_timing,
        })
        .collect()
}
