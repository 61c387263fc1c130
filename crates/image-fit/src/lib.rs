//! Image Fit - aspect-preserving placement of images inside boxes
//!
//! This crate provides:
//! - `fit_contain`: scale an image so it fits entirely inside a box
//! - `fit_cover`: scale an image so it fills a box, overflowing one axis
//! - `place`: derive the ratio from pixel dimensions, fit, and center
//!
//! Units are whatever the caller uses for the box (inches, points); the
//! image only contributes its aspect ratio.
//!
//! # Example
//!
//! ```
//! use image_fit::{place, FitMode, ImageSize};
//!
//! // 3:4 portrait photo in a 4.2 x 5.9 box
//! let fit = place(FitMode::Contain, ImageSize::new(3000, 4000), 4.2, 5.9).unwrap();
//! assert!((fit.width - 4.2).abs() < 1e-9);
//! assert!((fit.height - 5.6).abs() < 1e-9);
//! assert!((fit.offset_top - 0.15).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while fitting an image
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for fit operations
pub type Result<T> = std::result::Result<T, FitError>;

/// Intrinsic pixel size of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height
    ///
    /// Zero-area images have no ratio and yield `InvalidGeometry`.
    pub fn aspect_ratio(&self) -> Result<f64> {
        if self.width == 0 || self.height == 0 {
            return Err(FitError::InvalidGeometry(format!(
                "image has zero area ({}x{})",
                self.width, self.height
            )));
        }
        Ok(self.width as f64 / self.height as f64)
    }
}

/// Scaling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Fit entirely inside the box, possibly leaving margin
    #[default]
    Contain,
    /// Fill the box entirely, possibly overflowing one axis
    Cover,
}

/// Output size and offset relative to the box origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub width: f64,
    pub height: f64,
    pub offset_left: f64,
    pub offset_top: f64,
}

impl Fit {
    /// Center a `width` x `height` result inside a `box_w` x `box_h` box
    ///
    /// Offsets are negative on an axis where the result is larger than the box.
    pub fn centered(width: f64, height: f64, box_w: f64, box_h: f64) -> Self {
        Self {
            width,
            height,
            offset_left: (box_w - width) / 2.0,
            offset_top: (box_h - height) / 2.0,
        }
    }

    /// Whether the result extends past the box on either axis
    pub fn overflows(&self) -> bool {
        self.offset_left < 0.0 || self.offset_top < 0.0
    }
}

fn check_ratio(ratio: f64) -> Result<()> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(FitError::InvalidGeometry(format!(
            "aspect ratio must be positive and finite, got {ratio}"
        )));
    }
    Ok(())
}

fn check_box(width: f64, height: f64) -> Result<()> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(FitError::InvalidGeometry(format!(
            "box must have positive finite dimensions, got {width} x {height}"
        )));
    }
    Ok(())
}

/// Largest `(w, h)` with ratio `ratio` that fits inside `max_w` x `max_h`
///
/// Fills the box width first and falls back to the box height when the
/// resulting height would exceed `max_h`.
pub fn fit_contain(ratio: f64, max_w: f64, max_h: f64) -> Result<(f64, f64)> {
    check_ratio(ratio)?;
    check_box(max_w, max_h)?;

    let mut w = max_w;
    let mut h = max_w / ratio;
    if h > max_h {
        h = max_h;
        w = max_h * ratio;
    }
    Ok((w, h))
}

/// Smallest `(w, h)` with ratio `ratio` that covers `box_w` x `box_h`
///
/// Images relatively wider than the box (including an exact ratio match)
/// are bound by height and overflow horizontally; taller images are bound
/// by width and overflow vertically.
pub fn fit_cover(ratio: f64, box_w: f64, box_h: f64) -> Result<(f64, f64)> {
    check_ratio(ratio)?;
    check_box(box_w, box_h)?;

    let box_ratio = box_w / box_h;
    if ratio >= box_ratio {
        Ok((box_h * ratio, box_h))
    } else {
        Ok((box_w, box_w / ratio))
    }
}

/// Fit `image` into a `box_w` x `box_h` box under `mode` and center it
pub fn place(mode: FitMode, image: ImageSize, box_w: f64, box_h: f64) -> Result<Fit> {
    let ratio = image.aspect_ratio()?;
    let (w, h) = match mode {
        FitMode::Contain => fit_contain(ratio, box_w, box_h)?,
        FitMode::Cover => fit_cover(ratio, box_w, box_h)?,
    };
    Ok(Fit::centered(w, h, box_w, box_h))
}
