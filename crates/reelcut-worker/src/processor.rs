//! Plan job processing.
//!
//! Reads a job document, resolves the source frame (explicit or probed),
//! runs the clip planner and writes the plan plus per-clip captions under
//! `{work_dir}/{job_id}/`.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, Instrument};

use reelcut_media::{build_clip_command, probe_video_with_timeout, to_srt};
use reelcut_models::{FrameSize, PixelAspect};
use reelcut_planner::{ClipPlanner, PixelAspectCorrection, PrecomputedScores};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::job::{ClipOutput, JobId, PlanJob, PlanOutput, SourceSpec};
use crate::logging::JobLogger;
use crate::metrics;

/// File name of the plan document inside a job directory.
pub const PLAN_FILE_NAME: &str = "plan.json";

/// Turns plan jobs into plan documents.
#[derive(Debug, Clone)]
pub struct PlanProcessor {
    config: WorkerConfig,
}

impl PlanProcessor {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Load a job document from disk and run it. Returns the path of the
    /// written plan.
    pub async fn process_file(&self, path: impl AsRef<Path>) -> WorkerResult<PathBuf> {
        let path = path.as_ref();
        let job = match load_job(path).await {
            Ok(job) => job,
            Err(e) => {
                metrics::record_job_failed(e.kind());
                return Err(e);
            }
        };
        debug!(path = %path.display(), "Loaded plan job");
        self.run(job).await
    }

    /// Run a job end to end, recording metrics for the outcome.
    pub async fn run(&self, job: PlanJob) -> WorkerResult<PathBuf> {
        let job_id = job.job_id.clone().unwrap_or_default();
        let logger = JobLogger::new(&job_id, "plan_clips");
        let span = logger.create_span();

        let result = async {
            logger.log_start(&format!("{} segments", job.transcript.segments.len()));
            let output = self.process(&job_id, job, &logger).await?;
            self.write_output(&output).await
        }
        .instrument(span)
        .await;

        match &result {
            Ok(path) => {
                metrics::record_job_completed();
                logger.log_completion(&format!("plan written to {}", path.display()));
            }
            Err(e) => {
                metrics::record_job_failed(e.kind());
                logger.log_error(&e.to_string());
            }
        }
        result
    }

    /// Plan clips for one job without touching the work directory.
    pub async fn process(
        &self,
        job_id: &JobId,
        job: PlanJob,
        logger: &JobLogger,
    ) -> WorkerResult<PlanOutput> {
        let job_dir = self.job_dir(job_id)?;
        let (frame, pixel_aspect) = self.resolve_frame(&job.source).await?;

        let selection = job.selection.unwrap_or_else(|| self.config.selection.clone());
        let target_aspect = job.target_aspect.unwrap_or(self.config.target_aspect);
        let planner = ClipPlanner::new(selection, Arc::new(PrecomputedScores::new(job.scores)))
            .with_target_aspect(target_aspect.as_f64());

        let plan = planner.plan(&job.transcript, frame, pixel_aspect)?;

        if let PixelAspectCorrection::Degraded { reason } = &plan.geometry.correction {
            metrics::record_degraded_geometry();
            logger.log_warning(&format!("crop computed on raw frame: {}", reason));
        }
        metrics::record_clips_planned(plan.clips.len());
        logger.log_progress(&format!(
            "{} clips planned for {} source",
            plan.clips.len(),
            frame
        ));

        let encoding = job.encoding.unwrap_or_default();
        let clips = plan
            .clips
            .into_iter()
            .enumerate()
            .map(|(i, spec)| {
                let index = i + 1;
                let output_file = format!("clip_{:02}.mp4", index);
                let ffmpeg_args = job.source.path.as_ref().map(|source| {
                    build_clip_command(
                        source,
                        job_dir.join(&output_file),
                        &spec,
                        &plan.geometry,
                        &encoding,
                    )
                    .build_args()
                });
                let captions_srt = to_srt(&spec);
                ClipOutput {
                    index,
                    spec,
                    output_file,
                    ffmpeg_args,
                    captions_srt,
                }
            })
            .collect();

        Ok(PlanOutput {
            job_id: job_id.clone(),
            created_at: Utc::now(),
            geometry: plan.geometry,
            clips,
        })
    }

    /// Write the plan document and one `.srt` per clip.
    pub async fn write_output(&self, output: &PlanOutput) -> WorkerResult<PathBuf> {
        let job_dir = self.job_dir(&output.job_id)?;
        tokio::fs::create_dir_all(&job_dir).await?;

        for clip in &output.clips {
            let srt_path = job_dir.join(format!("clip_{:02}.srt", clip.index));
            tokio::fs::write(&srt_path, clip.captions_srt.as_bytes()).await?;
        }

        let plan_path = job_dir.join(PLAN_FILE_NAME);
        tokio::fs::write(&plan_path, serde_json::to_vec_pretty(output)?).await?;
        Ok(plan_path)
    }

    /// Job ids name a single directory directly under the work dir.
    fn job_dir(&self, job_id: &JobId) -> WorkerResult<PathBuf> {
        let mut components = Path::new(job_id.as_str()).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.config.work_dir.join(name)),
            _ => Err(WorkerError::invalid_job(format!(
                "job id {:?} is not a plain directory name",
                job_id.as_str()
            ))),
        }
    }

    async fn resolve_frame(
        &self,
        source: &SourceSpec,
    ) -> WorkerResult<(FrameSize, Option<PixelAspect>)> {
        if let Some(frame) = source.frame {
            return Ok((frame, source.pixel_aspect));
        }

        let path = source
            .path
            .as_ref()
            .ok_or_else(|| WorkerError::invalid_job("source needs a path or a frame"))?;
        let info = probe_video_with_timeout(path, self.config.probe_timeout.as_secs()).await?;

        // An explicit pixel aspect wins over whatever the container reports.
        Ok((info.frame(), source.pixel_aspect.or(info.sample_aspect_ratio)))
    }
}

async fn load_job(path: &Path) -> WorkerResult<PlanJob> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_models::{CropRect, Segment, SelectionConfig, Transcript, Word};

    fn processor(work_dir: &Path) -> PlanProcessor {
        PlanProcessor::new(WorkerConfig {
            work_dir: work_dir.to_path_buf(),
            selection: SelectionConfig::default()
                .with_num_clips(2)
                .with_target_len(10.0),
            ..Default::default()
        })
    }

    fn job(source: SourceSpec) -> PlanJob {
        let bounds = [(0.0, 2.0), (2.0, 5.0), (5.0, 9.0), (9.0, 14.0), (14.0, 20.0)];
        let segments = bounds
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| Segment::new(format!("s{}", i), start, end))
            .collect();
        let words = bounds
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| Word::new(format!("w{}", i), start, end))
            .collect();

        PlanJob {
            job_id: Some(JobId("job-1".to_string())),
            transcript: Transcript::new(segments, words),
            scores: vec![0.1, 0.9, 0.2, 0.8, 0.1],
            source,
            selection: None,
            target_aspect: None,
            encoding: None,
        }
    }

    fn frame_source(width: u32, height: u32) -> SourceSpec {
        SourceSpec {
            frame: Some(FrameSize::new(width, height)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_process_file_writes_plan_and_captions() {
        let dir = tempfile::tempdir().unwrap();
        let job_path = dir.path().join("job.json");
        let job = job(frame_source(1920, 1080));
        tokio::fs::write(&job_path, serde_json::to_vec(&job).unwrap())
            .await
            .unwrap();

        let plan_path = processor(dir.path()).process_file(&job_path).await.unwrap();
        assert_eq!(plan_path, dir.path().join("job-1").join(PLAN_FILE_NAME));

        let output: PlanOutput =
            serde_json::from_slice(&tokio::fs::read(&plan_path).await.unwrap()).unwrap();
        assert_eq!(output.job_id.as_str(), "job-1");
        assert_eq!(output.clips.len(), 2);
        assert_eq!(output.geometry.rect, CropRect::new(656, 0, 1264, 1080));
        assert!(output.clips.iter().all(|c| c.ffmpeg_args.is_none()));

        let srt = tokio::fs::read_to_string(dir.path().join("job-1").join("clip_01.srt"))
            .await
            .unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,000\nw0\n"));
        assert!(dir.path().join("job-1").join("clip_02.srt").exists());
    }

    #[tokio::test]
    async fn test_source_path_produces_ffmpeg_args() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = frame_source(1920, 1080);
        source.path = Some(PathBuf::from("/videos/source.mp4"));

        let processor = processor(dir.path());
        let job = job(source);
        let logger = JobLogger::new(&JobId("job-1".to_string()), "plan_clips");
        let output = processor
            .process(&JobId("job-1".to_string()), job, &logger)
            .await
            .unwrap();

        let args = output.clips[1].ffmpeg_args.as_ref().unwrap();
        assert!(args.contains(&"/videos/source.mp4".to_string()));
        assert!(args.contains(&"setsar=1,crop=608:1080:656:0".to_string()));
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "5.000");
        assert!(args
            .last()
            .unwrap()
            .ends_with(&format!("job-1/{}", output.clips[1].output_file)));
    }

    #[tokio::test]
    async fn test_job_overrides_worker_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = job(frame_source(1080, 1080));
        job.selection = Some(SelectionConfig::strict().with_num_clips(1));
        job.source.pixel_aspect = Some(PixelAspect::new(4, 3));

        let logger = JobLogger::new(&JobId::new(), "plan_clips");
        let output = processor(dir.path())
            .process(&JobId::new(), job, &logger)
            .await
            .unwrap();

        assert_eq!(output.clips.len(), 1);
        assert_eq!(output.geometry.effective, FrameSize::new(1440, 1080));
        assert_eq!(
            output.clips[0].spec.word_timing,
            reelcut_models::WordTiming::Symmetric
        );
    }

    #[tokio::test]
    async fn test_missing_source_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let err = processor(dir.path())
            .run(job(SourceSpec::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::InvalidJob(_)));
        assert!(!dir.path().join("job-1").exists());
    }

    #[tokio::test]
    async fn test_invalid_scores_fail_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = job(frame_source(1920, 1080));
        job.scores.pop();

        let err = processor(dir.path()).run(job).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
        assert!(!dir.path().join("job-1").exists());
    }

    #[tokio::test]
    async fn test_missing_source_video() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceSpec {
            path: Some(dir.path().join("missing.mp4")),
            ..Default::default()
        };
        let err = processor(dir.path()).run(job(source)).await.unwrap_err();
        assert!(matches!(
            err,
            WorkerError::Media(reelcut_media::MediaError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_job_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = processor(dir.path())
            .process_file(dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::Io(_)));
        assert_eq!(err.kind(), "io");
    }

    #[tokio::test]
    async fn test_malformed_job_file() {
        let dir = tempfile::tempdir().unwrap();
        let job_path = dir.path().join("job.json");
        tokio::fs::write(&job_path, b"{not json").await.unwrap();

        let err = processor(dir.path())
            .process_file(&job_path)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "json");
    }

    #[tokio::test]
    async fn test_job_id_must_stay_inside_work_dir() {
        let root = tempfile::tempdir().unwrap();
        let work_dir = root.path().join("work");
        let outside = root.path().join("outside");
        let processor = processor(&work_dir);

        let ids = [
            outside.to_string_lossy().to_string(),
            "..".to_string(),
            "../outside".to_string(),
            "nested/job".to_string(),
            String::new(),
        ];
        for id in ids {
            let mut plan_job = job(frame_source(1920, 1080));
            plan_job.job_id = Some(JobId(id.clone()));
            let err = processor.run(plan_job).await.unwrap_err();
            assert!(matches!(err, WorkerError::InvalidJob(_)), "id {:?}", id);
        }

        assert!(!outside.exists());
        assert!(!work_dir.exists());
    }
}
