//! Frame geometry: frame sizes, pixel aspect ratios and crop rectangles.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel (sample) aspect ratio as reported by the container, e.g. `4:3`.
///
/// A value other than 1:1 means stored pixels are not displayed square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PixelAspect {
    pub num: u32,
    pub den: u32,
}

impl PixelAspect {
    /// Square pixels.
    pub const SQUARE: PixelAspect = PixelAspect { num: 1, den: 1 };

    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// Both terms non-zero.
    pub fn is_valid(&self) -> bool {
        self.num != 0 && self.den != 0
    }

    /// Numerator equals denominator (covers 1:1, 2:2, ...).
    pub fn is_square(&self) -> bool {
        self.num == self.den
    }
}

impl fmt::Display for PixelAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

impl FromStr for PixelAspect {
    type Err = PixelAspectParseError;

    /// Parse the FFprobe `sample_aspect_ratio` form (`"N:D"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (num, den) = s
            .split_once(':')
            .ok_or_else(|| PixelAspectParseError::InvalidFormat(s.to_string()))?;
        let num = num
            .trim()
            .parse()
            .map_err(|_| PixelAspectParseError::InvalidNumber(num.to_string()))?;
        let den = den
            .trim()
            .parse()
            .map_err(|_| PixelAspectParseError::InvalidNumber(den.to_string()))?;
        Ok(PixelAspect { num, den })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixelAspectParseError {
    #[error("Invalid pixel aspect format: {0}, expected 'N:D'")]
    InvalidFormat(String),
    #[error("Invalid number in pixel aspect: {0}")]
    InvalidNumber(String),
}

/// A pixel crop rectangle, corners `(x1, y1)` inclusive and `(x2, y2)` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct CropRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRect {
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Both sides divisible by 2 (libx264 requirement).
    pub fn has_even_sides(&self) -> bool {
        self.width() % 2 == 0 && self.height() % 2 == 0
    }

    /// Fully contained in a frame of the given size.
    pub fn fits_within(&self, frame: FrameSize) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2 && self.x2 <= frame.width && self.y2 <= frame.height
    }
}
