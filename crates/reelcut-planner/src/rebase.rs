//! Word extraction and clip-relative rebasing.
//!
//! Words are taken with a prefix scan over the full word stream: skip words
//! that start before the window, include the rest in order, and stop right
//! after the first included word that reaches the window end. Each window
//! scans the stream from the beginning; there is no shared cursor.
//!
//! [`WordTiming::StartOnly`] shifts only `start` and leaves `end`
//! source-relative; [`WordTiming::Symmetric`] shifts both edges. Overlay
//! renderers disagree on which one they expect, so both remain available.

use reelcut_models::{ClipWindow, Word, WordTiming};

/// Rebase with the start-only policy.
pub fn rebase(words: &[Word], window: &ClipWindow) -> Vec<Word> {
    rebase_with(words, window, WordTiming::StartOnly)
}

/// Rebase both `start` and `end` into clip time.
pub fn rebase_symmetric(words: &[Word], window: &ClipWindow) -> Vec<Word> {
    rebase_with(words, window, WordTiming::Symmetric)
}

/// Extract the words of `window` and move them into clip time.
pub fn rebase_with(words: &[Word], window: &ClipWindow, timing: WordTiming) -> Vec<Word> {
    let mut rebased = Vec::new();

    for word in words {
        if word.start < window.start {
            continue;
        }

        let end = match timing {
            WordTiming::StartOnly => word.end,
            WordTiming::Symmetric => word.end - window.start,
        };
        rebased.push(Word {
            text: word.text.clone(),
            start: word.start - window.start,
            end,
        });

        if word.end >= window.end {
            break;
        }
    }

    rebased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: f64, end: f64) -> ClipWindow {
        ClipWindow {
            start,
            end,
            text: String::new(),
            source_segment_indices: vec![0],
        }
    }

    fn words() -> Vec<Word> {
        vec![
            Word::new("one", 0.0, 0.8),
            Word::new("two", 1.0, 1.9),
            Word::new("three", 2.0, 3.1),
            Word::new("four", 3.2, 4.0),
            Word::new("five", 4.1, 5.0),
        ]
    }

    #[test]
    fn test_start_only_rebasing() {
        let rebased = rebase(&words(), &window(1.0, 3.0));
        let texts: Vec<&str> = rebased.iter().map(|w| w.text.as_str()).collect();
        // "three" ends past the window end: included, then the scan stops
        assert_eq!(texts, vec!["two", "three"]);
        assert!((rebased[0].start - 0.0).abs() < 1e-9);
        assert!((rebased[0].end - 1.9).abs() < 1e-9);
        assert!((rebased[1].start - 1.0).abs() < 1e-9);
        assert!((rebased[1].end - 3.1).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_rebasing() {
        let rebased = rebase_symmetric(&words(), &window(1.0, 3.0));
        assert_eq!(rebased.len(), 2);
        assert!((rebased[0].end - 0.9).abs() < 1e-9);
        assert!((rebased[1].end - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_word_straddling_window_start_is_skipped() {
        let rebased = rebase(&words(), &window(0.5, 2.5));
        assert_eq!(rebased[0].text, "two");
        assert!(rebased.iter().all(|w| w.start >= 0.0));
    }

    #[test]
    fn test_scan_includes_first_word_past_gap() {
        // No word ends inside the window, so the next word after it is the
        // boundary word.
        let stream = vec![Word::new("a", 0.0, 1.0), Word::new("b", 10.0, 11.0)];
        let rebased = rebase(&stream, &window(2.0, 5.0));
        assert_eq!(rebased.len(), 1);
        assert_eq!(rebased[0].text, "b");
        assert!((rebased[0].start - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_windows_rescan_independently() {
        let stream = words();
        let late = rebase(&stream, &window(3.2, 5.0));
        let early = rebase(&stream, &window(0.0, 0.8));
        assert_eq!(late.len(), 2);
        assert_eq!(early.len(), 1);
        assert_eq!(early[0].text, "one");
    }

    #[test]
    fn test_empty_when_no_words_in_range() {
        assert!(rebase(&words(), &window(6.0, 9.0)).is_empty());
        assert!(rebase(&[], &window(0.0, 9.0)).is_empty());
    }
}
