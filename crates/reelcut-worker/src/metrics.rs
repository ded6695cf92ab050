//! Worker metrics.
//!
//! Recorded through the `metrics` facade; the embedding process decides
//! which exporter (if any) is installed.

use metrics::counter;

/// Metric names as constants for consistency.
pub mod names {
    pub const JOBS_COMPLETED_TOTAL: &str = "reelcut_jobs_completed_total";
    pub const JOBS_FAILED_TOTAL: &str = "reelcut_jobs_failed_total";
    pub const CLIPS_PLANNED_TOTAL: &str = "reelcut_clips_planned_total";
    pub const DEGRADED_GEOMETRY_TOTAL: &str = "reelcut_degraded_geometry_total";
}

pub fn record_job_completed() {
    counter!(names::JOBS_COMPLETED_TOTAL).increment(1);
}

/// Record a failed job, labelled by error kind.
pub fn record_job_failed(kind: &'static str) {
    counter!(names::JOBS_FAILED_TOTAL, "kind" => kind).increment(1);
}

pub fn record_clips_planned(count: usize) {
    counter!(names::CLIPS_PLANNED_TOTAL).increment(count as u64);
}

/// Square-encoded source cropped without pixel aspect correction.
pub fn record_degraded_geometry() {
    counter!(names::DEGRADED_GEOMETRY_TOTAL).increment(1);
}
