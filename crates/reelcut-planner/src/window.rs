//! Clip window selection.
//!
//! The most relevant segments become seeds. Each seed grows into a window by
//! absorbing neighbors, alternating sides and starting on the left, until
//! the window reaches the target length or runs out of neighbors.
//!
//! ```text
//!   segments:  [ 0 ][ 1 ][  2  ][  3  ][   4   ]
//!   seed 1:         ###
//!   step 1:    <####           (left)
//!   step 2:    #########>      (right)
//!   step 3:    ---------       (left exhausted, turn passes)
//!   step 4:    ###############>  (right) -> target reached
//! ```
//!
//! With the default policy seeds are independent, so two windows may
//! cover the same segments. Disabling `allow_overlap` makes consumed
//! segments unavailable to later seeds.

use std::cmp::Ordering;
use std::collections::VecDeque;

use tracing::{debug, trace};

use reelcut_models::transcript::validate_segments;
use reelcut_models::{ClipWindow, Segment, SelectionConfig, ValidationError};

use crate::error::PlannerResult;

/// Which side the next absorption attempt targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Grows relevance seeds into clip windows.
#[derive(Debug, Clone, Default)]
pub struct WindowExpander {
    config: SelectionConfig,
}

impl WindowExpander {
    /// Create an expander for the given selection policy.
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Select up to `num_clips` windows, ordered by seed relevance.
    ///
    /// Empty `segments` yields an empty result. Mismatched score counts,
    /// NaN scores and inverted segment spans are rejected.
    pub fn select(&self, segments: &[Segment], scores: &[f64]) -> PlannerResult<Vec<ClipWindow>> {
        self.config.validate()?;
        validate_segments(segments)?;
        if scores.len() != segments.len() {
            return Err(ValidationError::ScoreCountMismatch {
                segments: segments.len(),
                scores: scores.len(),
            }
            .into());
        }
        if let Some(index) = scores.iter().position(|s| s.is_nan()) {
            return Err(ValidationError::NonFiniteScore(index).into());
        }

        if segments.is_empty() {
            debug!("No segments to select from");
            return Ok(Vec::new());
        }

        let ranking = rank_segments(scores);
        let mut consumed = vec![false; segments.len()];
        let mut windows = Vec::with_capacity(self.config.num_clips.min(segments.len()));
        let mut seeds_grown = 0;

        for seed in ranking {
            if seeds_grown == self.config.num_clips {
                break;
            }
            if !self.config.allow_overlap && consumed[seed] {
                trace!(seed, "Seed already inside an earlier window, skipping");
                continue;
            }
            seeds_grown += 1;

            let window = self.grow(segments, seed, &consumed);
            let duration = window.duration();
            if duration <= 0.0 {
                debug!(seed, window = %window, "Dropping empty window");
                continue;
            }
            if !self.config.accepts_duration(duration) {
                debug!(
                    seed,
                    duration,
                    min = ?self.config.min_clip_len,
                    max = ?self.config.max_window_len,
                    "Dropping window outside duration bounds"
                );
                continue;
            }

            if !self.config.allow_overlap {
                for &index in &window.source_segment_indices {
                    consumed[index] = true;
                }
            }

            debug!(seed, score = scores[seed], window = %window, "Selected clip window");
            windows.push(window);
        }

        Ok(windows)
    }

    /// Grow a single seed. `consumed` segments act as hard boundaries when
    /// overlap is disabled.
    fn grow(&self, segments: &[Segment], seed: usize, consumed: &[bool]) -> ClipWindow {
        let last = segments.len() - 1;
        let available = |index: usize| self.config.allow_overlap || !consumed[index];

        let mut left = seed;
        let mut right = seed;
        let mut start = segments[seed].start;
        let mut end = segments[seed].end;
        let mut texts: VecDeque<&str> = VecDeque::from([segments[seed].text.as_str()]);
        let mut side = Side::Left;

        while end - start < self.config.target_len {
            let can_left = left > 0 && available(left - 1);
            let can_right = right < last && available(right + 1);
            if !can_left && !can_right {
                break;
            }

            match side {
                Side::Left if can_left => {
                    left -= 1;
                    texts.push_front(&segments[left].text);
                    start = segments[left].start;
                }
                Side::Right if can_right => {
                    right += 1;
                    texts.push_back(&segments[right].text);
                    end = segments[right].end;
                }
                // Blocked on this side: the turn passes to the other one.
                _ => {}
            }
            side = side.flip();
        }

        ClipWindow {
            start,
            end,
            text: texts.into_iter().collect::<Vec<_>>().join(" "),
            source_segment_indices: (left..=right).collect(),
        }
    }
}

/// Segment indices ordered by descending score, lower index first on ties.
pub fn rank_segments(scores: &[f64]) -> Vec<usize> {
    let mut ranking: Vec<usize> = (0..scores.len()).collect();
    ranking.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    ranking
}

/// Select windows with the default policy: independent seeds, no
/// duration bounds.
pub fn select_clips(
    segments: &[Segment],
    scores: &[f64],
    num_clips: usize,
    target_len: f64,
) -> PlannerResult<Vec<ClipWindow>> {
    let config = SelectionConfig::default()
        .with_num_clips(num_clips)
        .with_target_len(target_len);
    WindowExpander::new(config).select(segments, scores)
}
