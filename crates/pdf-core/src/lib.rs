//! PDF Core - Presentation PDF authoring
//!
//! This crate provides functionality for:
//! - Creating blank documents and adding pages of any size
//! - Page backgrounds and filled, stroked or rounded rectangles with opacity
//! - Inserting images (JPEG, PNG), stretched or fitted with contain/cover
//! - Embedding and subsetting TrueType fonts (CJK included)
//! - Inserting text at specific coordinates
//! - Presentation page transitions
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{units::inches, Align, Color, ImageScaleMode, PdfDocument};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_page(inches(13.333), inches(7.5))?;
//! doc.set_background(page, Color::from_rgb(0x1A, 0x1A, 0x2E))?;
//! doc.add_font("jhenghei", &std::fs::read("msjh.ttf")?)?;
//! doc.set_font("jhenghei", 24.0)?;
//! doc.insert_text("朝聖之路", page, 100.0, 120.0, Align::Left)?;
//! doc.insert_image_scaled(&photo, page, 72.0, 200.0, 300.0, 300.0, ImageScaleMode::Contain)?;
//! doc.save("deck.pdf")?;
//! ```

mod document;
mod font;
mod image;
mod shape;
mod text;
mod transition;

pub use document::{Color, PdfDocument};
pub use font::{FontData, FontFamily, FontFamilyBuilder, FontWeight, LineMetrics};
pub use image::{image_dimensions, ImageDimensions, ImageScaleMode};
pub use shape::{Rect, ShapeStyle, Stroke};
pub use text::{generate_text_operators, TextRenderContext};
pub use transition::{
    Direction, Motion, Orientation, Transition, TransitionKind, TransitionSpeed,
};

pub use image_fit::{Fit, FitError};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Font subset error: {0}")]
    FontSubsetError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] FitError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Length conversions into PDF points
pub mod units {
    /// Points per inch
    pub const POINTS_PER_INCH: f64 = 72.0;

    /// Convert inches to points
    pub fn inches(value: f64) -> f64 {
        value * POINTS_PER_INCH
    }

    /// Convert points to inches
    pub fn to_inches(points: f64) -> f64 {
        points / POINTS_PER_INCH
    }
}
