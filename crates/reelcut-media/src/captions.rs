//! SubRip captions for planned clips.

use reelcut_models::timestamp::format_srt_timestamp;
use reelcut_models::ClipSpec;

/// One SubRip cue per word, in clip time.
///
/// Word ends are normalized through [`ClipSpec::relative_word_end`] so the
/// cues are correct under either word-timing policy. Ends past the clip are
/// clamped to its duration.
pub fn to_srt(spec: &ClipSpec) -> String {
    let duration = spec.duration();
    let mut srt = String::new();

    for (i, word) in spec.words.iter().enumerate() {
        let start = word.start.min(duration);
        let end = spec.relative_word_end(word).clamp(start, duration);
        srt.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_srt_timestamp(start),
            format_srt_timestamp(end),
            word.text.trim()
        ));
    }

    srt
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_models::{ClipWindow, CropRect, Word, WordTiming};

    fn spec(timing: WordTiming, words: Vec<Word>) -> ClipSpec {
        ClipSpec {
            window: ClipWindow {
                start: 10.0,
                end: 20.0,
                text: String::new(),
                source_segment_indices: vec![0],
            },
            crop: CropRect::new(0, 0, 2, 2),
            words,
            word_timing: timing,
        }
    }

    #[test]
    fn test_start_only_words_are_normalized() {
        // Start-only output keeps ends in source time.
        let srt = to_srt(&spec(
            WordTiming::StartOnly,
            vec![Word::new("hello", 0.0, 10.5), Word::new("world", 0.6, 11.25)],
        ));
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:00,500\nhello\n\n\
             2\n00:00:00,600 --> 00:00:01,250\nworld\n\n"
        );
    }

    #[test]
    fn test_symmetric_words() {
        let srt = to_srt(&spec(WordTiming::Symmetric, vec![Word::new("hi", 1.0, 2.0)]));
        assert_eq!(srt, "1\n00:00:01,000 --> 00:00:02,000\nhi\n\n");
    }

    #[test]
    fn test_boundary_word_is_clamped() {
        let srt = to_srt(&spec(WordTiming::Symmetric, vec![Word::new("late", 9.5, 11.0)]));
        assert!(srt.contains("00:00:09,500 --> 00:00:10,000"));
    }

    #[test]
    fn test_cues_are_numbered_and_trimmed() {
        let srt = to_srt(&spec(
            WordTiming::Symmetric,
            vec![Word::new(" a ", 0.0, 1.0), Word::new("b\n", 1.0, 2.0)],
        ));
        let cues: Vec<&str> = srt.split("\n\n").filter(|c| !c.is_empty()).collect();
        assert_eq!(cues.len(), 2);
        assert!(cues[0].starts_with("1\n") && cues[0].ends_with("\na"));
        assert!(cues[1].starts_with("2\n") && cues[1].ends_with("\nb"));
    }

    #[test]
    fn test_no_words() {
        assert!(to_srt(&spec(WordTiming::StartOnly, Vec::new())).is_empty());
    }
}
