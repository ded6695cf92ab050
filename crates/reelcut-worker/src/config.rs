//! Worker configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use reelcut_models::{AspectRatio, SelectionConfig, WordTiming};

/// Worker configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    /// Directory that receives one sub-directory per job
    pub work_dir: PathBuf,
    /// Selection policy used when a job does not bring its own
    pub selection: SelectionConfig,
    /// Output aspect used when a job does not bring its own
    pub target_aspect: AspectRatio,
    /// Upper bound for a single ffprobe call
    pub probe_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("/tmp/reelcut"),
            selection: SelectionConfig::default(),
            target_aspect: AspectRatio::PORTRAIT,
            probe_timeout: Duration::from_secs(30),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Unset or unparseable values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut selection = defaults.selection;
        if let Some(num_clips) = parse_var(&lookup, "REELCUT_NUM_CLIPS") {
            selection.num_clips = num_clips;
        }
        if let Some(target_len) = parse_var(&lookup, "REELCUT_TARGET_LEN") {
            selection.target_len = target_len;
        }
        if let Some(allow_overlap) = parse_var(&lookup, "REELCUT_ALLOW_OVERLAP") {
            selection.allow_overlap = allow_overlap;
        }
        if let Some(true) = parse_var::<bool, _>(&lookup, "REELCUT_SYMMETRIC_WORD_TIMING") {
            selection.word_timing = WordTiming::Symmetric;
        }

        let target_aspect = match lookup("REELCUT_TARGET_ASPECT") {
            Some(value) => value.parse().unwrap_or_else(|e| {
                warn!(value = %value, error = %e, "Ignoring REELCUT_TARGET_ASPECT");
                defaults.target_aspect
            }),
            None => defaults.target_aspect,
        };

        Self {
            work_dir: lookup("REELCUT_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            selection,
            target_aspect,
            probe_timeout: Duration::from_secs(
                parse_var(&lookup, "REELCUT_PROBE_TIMEOUT_SECS")
                    .unwrap_or(defaults.probe_timeout.as_secs()),
            ),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(WorkerConfig::from_lookup(lookup(&[])), WorkerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = WorkerConfig::from_lookup(lookup(&[
            ("REELCUT_WORK_DIR", "/data/jobs"),
            ("REELCUT_NUM_CLIPS", "6"),
            ("REELCUT_TARGET_LEN", "30.5"),
            ("REELCUT_ALLOW_OVERLAP", "false"),
            ("REELCUT_SYMMETRIC_WORD_TIMING", "true"),
            ("REELCUT_TARGET_ASPECT", "4:5"),
            ("REELCUT_PROBE_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(config.work_dir, PathBuf::from("/data/jobs"));
        assert_eq!(config.selection.num_clips, 6);
        assert!((config.selection.target_len - 30.5).abs() < 1e-9);
        assert!(!config.selection.allow_overlap);
        assert_eq!(config.selection.word_timing, WordTiming::Symmetric);
        assert_eq!(config.target_aspect, AspectRatio::INSTAGRAM_PORTRAIT);
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_garbage_falls_back() {
        let config = WorkerConfig::from_lookup(lookup(&[
            ("REELCUT_NUM_CLIPS", "many"),
            ("REELCUT_TARGET_ASPECT", "portrait"),
        ]));
        assert_eq!(config.selection.num_clips, 4);
        assert_eq!(config.target_aspect, AspectRatio::PORTRAIT);
    }
}
