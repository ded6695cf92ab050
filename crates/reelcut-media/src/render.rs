//! Render commands for planned clips.
//!
//! Commands are configured here and handed to whoever runs FFmpeg; nothing
//! in this module spawns a process.

use std::path::Path;
use tracing::debug;

use reelcut_models::{ClipSpec, EncodingConfig};
use reelcut_planner::CropGeometry;

use crate::command::FfmpegCommand;
use crate::filters::clip_filter_chain;

/// Trim-and-crop command for one clip.
///
/// Seeks on the input side so the encode starts at the keyframe before
/// `spec.window.start`, then limits the output to the clip duration.
pub fn build_clip_command(
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    spec: &ClipSpec,
    geometry: &CropGeometry,
    encoding: &EncodingConfig,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new(source, output)
        .seek(spec.window.start)
        .duration(spec.duration())
        .video_filter(clip_filter_chain(geometry))
        .video_codec(&encoding.codec)
        .preset(&encoding.preset)
        .crf(encoding.crf)
        .audio_codec(&encoding.audio_codec);
    if !encoding.copies_audio() {
        cmd = cmd.audio_bitrate(&encoding.audio_bitrate);
    }
    let cmd = cmd
        .output_args(encoding.extra_args.iter().cloned())
        .output_arg("-movflags")
        .output_arg("+faststart");

    debug!(
        output = %cmd.output().display(),
        window = %spec.window,
        "Built clip render command"
    );
    cmd
}
