//! FFprobe video information.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use reelcut_models::{FrameSize, PixelAspect};

use crate::command::check_ffprobe;
use crate::error::{MediaError, MediaResult};

/// Video file information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate (fps)
    pub fps: f64,
    /// Video codec
    pub codec: String,
    /// Sample (pixel) aspect ratio, when the container reports a usable one
    pub sample_aspect_ratio: Option<PixelAspect>,
}

impl VideoInfo {
    /// Stored frame size.
    pub fn frame(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    sample_aspect_ratio: Option<String>,
}

/// Probe a video file for information.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<VideoInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    check_ffprobe()?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "FFprobe failed",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    let info = parse_probe_output(&output.stdout)?;
    debug!(
        path = %path.display(),
        frame = %info.frame(),
        sar = ?info.sample_aspect_ratio,
        "Probed source video"
    );
    Ok(info)
}

/// Probe with an upper bound on how long ffprobe may run.
pub async fn probe_video_with_timeout(
    path: impl AsRef<Path>,
    timeout_secs: u64,
) -> MediaResult<VideoInfo> {
    tokio::time::timeout(Duration::from_secs(timeout_secs), probe_video(path))
        .await
        .map_err(|_| MediaError::Timeout(timeout_secs))?
}

/// Parse `ffprobe -print_format json -show_format -show_streams` output.
pub fn parse_probe_output(stdout: &[u8]) -> MediaResult<VideoInfo> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    // Find video stream
    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::invalid_video("No video stream found"))?;

    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let fps = video_stream
        .avg_frame_rate
        .as_ref()
        .or(video_stream.r_frame_rate.as_ref())
        .and_then(|r| parse_frame_rate(r))
        .unwrap_or(30.0);

    let sample_aspect_ratio = video_stream
        .sample_aspect_ratio
        .as_deref()
        .and_then(parse_sample_aspect_ratio);

    Ok(VideoInfo {
        duration,
        width: video_stream.width.unwrap_or(0),
        height: video_stream.height.unwrap_or(0),
        fps,
        codec: video_stream.codec_name.clone().unwrap_or_default(),
        sample_aspect_ratio,
    })
}

/// Parse frame rate string (e.g., "30/1" or "29.97").
fn parse_frame_rate(s: &str) -> Option<f64> {
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den > 0.0 {
            return Some(num / den);
        }
    }
    s.parse().ok()
}

/// Parse an ffprobe SAR string such as "4:3". FFprobe reports "N/A" or
/// "0:1" when the container does not know.
fn parse_sample_aspect_ratio(s: &str) -> Option<PixelAspect> {
    match s.parse::<PixelAspect>() {
        Ok(par) if par.is_valid() => Some(par),
        Ok(par) => {
            warn!(sar = %par, "Ignoring unusable sample aspect ratio");
            None
        }
        Err(e) => {
            warn!(sar = s, error = %e, "Unparseable sample aspect ratio");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBE_JSON: &str = r#"{
        "streams": [
            {"codec_type": "audio", "codec_name": "aac"},
            {
                "codec_type": "video",
                "codec_name": "h264",
                "width": 1080,
                "height": 1080,
                "avg_frame_rate": "30000/1001",
                "sample_aspect_ratio": "4:3"
            }
        ],
        "format": {"duration": "62.500000", "size": "1048576"}
    }"#;

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
        assert!(parse_frame_rate("0/0").is_none());
    }

    #[test]
    fn test_parse_sample_aspect_ratio() {
        assert_eq!(parse_sample_aspect_ratio("4:3"), Some(PixelAspect::new(4, 3)));
        assert_eq!(parse_sample_aspect_ratio("1:1"), Some(PixelAspect::SQUARE));
        assert_eq!(parse_sample_aspect_ratio("0:1"), None);
        assert_eq!(parse_sample_aspect_ratio("N/A"), None);
    }

    #[test]
    fn test_parse_probe_output() {
        let info = parse_probe_output(PROBE_JSON.as_bytes()).unwrap();
        assert_eq!(info.frame(), FrameSize::new(1080, 1080));
        assert_eq!(info.codec, "h264");
        assert_eq!(info.sample_aspect_ratio, Some(PixelAspect::new(4, 3)));
        assert!((info.duration - 62.5).abs() < 1e-9);
        assert!((info.fps - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_probe_output_without_video() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {}}"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes()),
            Err(MediaError::InvalidVideo(_))
        ));
    }

    #[test]
    fn test_missing_video_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp4");
        let result = tokio_test::block_on(probe_video(&missing));
        assert!(matches!(result, Err(MediaError::FileNotFound(p)) if p == missing));
    }
}
