//! Aspect-ratio-aware crop geometry.
//!
//! Produces one centered crop rectangle per source video.
//!
//! # Anamorphic sources
//!
//! Some containers store square-encoded frames (e.g. 1080x1080) with a
//! non-square sample aspect ratio. Before cropping, such frames are
//! expanded to their display size:
//!
//! - `num > den`: width becomes `width * num / den`
//! - otherwise: height becomes `height * den / num`
//!
//! When the ratio is missing or unusable the raw dimensions are used and the
//! result is flagged as [`PixelAspectCorrection::Degraded`].
//!
//! # Grid snapping
//!
//! Horizontal crops snap their width to [`CROP_GRID`]. Vertical crops are
//! only snapped to even sizes (libx264 needs even dimensions).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use reelcut_models::{CropRect, FrameSize, PixelAspect, ValidationError};

use crate::error::PlannerResult;

/// Pixel grid for the width of horizontal crops.
pub const CROP_GRID: u32 = 16;

/// Portrait 9:16.
pub const DEFAULT_TARGET_ASPECT: f64 = 9.0 / 16.0;

/// What happened to the pixel aspect ratio while planning the crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PixelAspectCorrection {
    /// Frame is not square-encoded or already has square pixels.
    NotNeeded,
    /// Frame was expanded to its display size.
    Applied { pixel_aspect: PixelAspect },
    /// Correction was wanted but impossible; raw dimensions were used.
    Degraded { reason: String },
}

/// Crop plan for one source video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CropGeometry {
    /// Stored frame size
    pub source: FrameSize,
    /// Display frame size the rectangle refers to
    pub effective: FrameSize,
    /// Centered crop rectangle in effective coordinates
    pub rect: CropRect,
    pub correction: PixelAspectCorrection,
}

impl CropGeometry {
    /// The renderer must rescale to `effective` before applying `rect`.
    pub fn needs_rescale(&self) -> bool {
        self.source != self.effective
    }
}

/// Compute the crop rectangle only.
pub fn compute_crop(
    width: u32,
    height: u32,
    pixel_aspect: Option<PixelAspect>,
    target_aspect: f64,
) -> PlannerResult<CropRect> {
    plan_crop(width, height, pixel_aspect, target_aspect).map(|geometry| geometry.rect)
}

/// Correct for pixel aspect and compute a centered crop for `target_aspect`
/// (width / height).
pub fn plan_crop(
    width: u32,
    height: u32,
    pixel_aspect: Option<PixelAspect>,
    target_aspect: f64,
) -> PlannerResult<CropGeometry> {
    if width < 2 || height < 2 {
        return Err(ValidationError::InvalidDimensions { width, height }.into());
    }
    if !target_aspect.is_finite() || target_aspect <= 0.0 {
        return Err(ValidationError::InvalidTargetAspect(target_aspect).into());
    }

    let source = FrameSize::new(width, height);
    let (effective, correction) = effective_frame(source, pixel_aspect);
    let rect = centered_crop(effective, target_aspect);

    debug!(
        source = %source,
        effective = %effective,
        crop = format!("{}x{}+{}+{}", rect.width(), rect.height(), rect.x1, rect.y1),
        "Crop geometry planned"
    );

    Ok(CropGeometry {
        source,
        effective,
        rect,
        correction,
    })
}

fn effective_frame(
    source: FrameSize,
    pixel_aspect: Option<PixelAspect>,
) -> (FrameSize, PixelAspectCorrection) {
    if !source.is_square() {
        return (source, PixelAspectCorrection::NotNeeded);
    }

    let par = match pixel_aspect {
        Some(par) if par.is_valid() && par.is_square() => {
            return (source, PixelAspectCorrection::NotNeeded);
        }
        Some(par) if par.is_valid() => par,
        Some(par) => {
            return degraded(source, format!("malformed pixel aspect {}", par));
        }
        None => return degraded(source, "pixel aspect unavailable".to_string()),
    };

    let (width, height) = (source.width as u64, source.height as u64);
    let (num, den) = (par.num as u64, par.den as u64);
    let corrected = if num > den {
        u32::try_from(width * num / den).map(|w| FrameSize::new(w, source.height))
    } else {
        u32::try_from(height * den / num).map(|h| FrameSize::new(source.width, h))
    };

    match corrected {
        Ok(effective) => (effective, PixelAspectCorrection::Applied { pixel_aspect: par }),
        Err(_) => degraded(source, format!("pixel aspect {} overflows frame size", par)),
    }
}

fn degraded(source: FrameSize, reason: String) -> (FrameSize, PixelAspectCorrection) {
    warn!(
        frame = %source,
        reason = %reason,
        "Square-encoded frame without usable pixel aspect, cropping raw dimensions"
    );
    (source, PixelAspectCorrection::Degraded { reason })
}

fn centered_crop(frame: FrameSize, target_aspect: f64) -> CropRect {
    if frame.aspect() > target_aspect {
        // Wider than target: keep full height, cut the sides.
        let crop_w = snap_to_grid(frame.height as f64 * target_aspect, frame.width);
        let crop_h = make_even(frame.height);
        let x1 = (frame.width - crop_w) / 2;
        let y1 = (frame.height - crop_h) / 2;
        CropRect::new(x1, y1, x1 + crop_w, y1 + crop_h)
    } else {
        // Taller than (or equal to) target: keep full width, cut top/bottom.
        let ideal_h = (frame.width as f64 / target_aspect).floor() as u32;
        let crop_h = make_even(ideal_h.min(frame.height)).max(2);
        let crop_w = make_even(frame.width);
        let x1 = (frame.width - crop_w) / 2;
        let y1 = (frame.height - crop_h) / 2;
        CropRect::new(x1, y1, x1 + crop_w, y1 + crop_h)
    }
}

/// Nearest multiple of [`CROP_GRID`] not exceeding `limit`; tiny frames fall
/// back to an even size.
fn snap_to_grid(ideal: f64, limit: u32) -> u32 {
    let units = (ideal / CROP_GRID as f64).round() as u32;
    let mut snapped = units.saturating_mul(CROP_GRID);
    if snapped > limit {
        snapped = (limit / CROP_GRID) * CROP_GRID;
    }
    if snapped == 0 {
        snapped = make_even((ideal.floor() as u32).min(limit)).max(2);
    }
    snapped
}

/// Round down to the nearest even number.
#[inline]
fn make_even(value: u32) -> u32 {
    (value / 2) * 2
}
