//! FFmpeg video filter definitions.

use reelcut_models::{CropRect, FrameSize};
use reelcut_planner::CropGeometry;

/// `crop=W:H:X:Y` for a planned rectangle.
pub fn crop_filter(rect: &CropRect) -> String {
    format!(
        "crop={}:{}:{}:{}",
        rect.width(),
        rect.height(),
        rect.x1,
        rect.y1
    )
}

/// Exact resize to `frame`.
pub fn scale_filter(frame: FrameSize) -> String {
    format!("scale={}:{}", frame.width, frame.height)
}

/// Full `-vf` chain for a crop plan.
///
/// Anamorphic sources are first scaled to their display size so the crop
/// rectangle (computed in display coordinates) lands where it should.
/// `setsar=1` keeps players from stretching the result a second time.
pub fn clip_filter_chain(geometry: &CropGeometry) -> String {
    let mut filters = Vec::with_capacity(3);
    if geometry.needs_rescale() {
        filters.push(scale_filter(geometry.effective));
    }
    filters.push("setsar=1".to_string());
    filters.push(crop_filter(&geometry.rect));
    filters.join(",")
}
