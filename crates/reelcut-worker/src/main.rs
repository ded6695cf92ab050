//! Clip planning worker binary.
//!
//! Usage: `reelcut-worker <job.json>...`

use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reelcut_worker::{PlanProcessor, WorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive(
        "reelcut=info"
            .parse::<Directive>()
            .context("invalid default log directive")?,
    );

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let job_files: Vec<String> = std::env::args().skip(1).collect();
    if job_files.is_empty() {
        bail!("usage: reelcut-worker <job.json>...");
    }

    info!("Starting reelcut-worker");

    match reelcut_media::check_ffprobe() {
        Ok(path) => info!(ffprobe = %path.display(), "Found ffprobe"),
        Err(e) => warn!("{}; jobs must give an explicit source frame", e),
    }

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);
    tokio::fs::create_dir_all(&config.work_dir)
        .await
        .with_context(|| format!("cannot create work dir {}", config.work_dir.display()))?;

    let processor = PlanProcessor::new(config);
    let mut failed = 0usize;
    for job_file in &job_files {
        match processor.process_file(job_file).await {
            Ok(plan_path) => info!(job_file = %job_file, plan = %plan_path.display(), "Job done"),
            Err(e) => {
                error!(job_file = %job_file, retryable = e.is_retryable(), "Job failed: {}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} jobs failed", failed, job_files.len());
    }

    info!("Worker finished");
    Ok(())
}
