//! Batch clip planning worker.
//!
//! This crate provides:
//! - Job documents (`PlanJob` in, `PlanOutput` out)
//! - Environment-driven configuration
//! - Source probing, planning and caption/command emission per job
//! - Structured job logging and metrics

pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod metrics;
pub mod processor;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use job::{ClipOutput, JobId, PlanJob, PlanOutput, SourceSpec};
pub use logging::JobLogger;
pub use processor::{PlanProcessor, PLAN_FILE_NAME};
