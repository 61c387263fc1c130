//! Camino Deck - the Camino de Santiago photo deck as a presentation PDF
//!
//! This crate provides:
//! - Slide authoring helpers on a 13.333 x 7.5 inch canvas (backgrounds,
//!   cover and contain images, overlays, text boxes, panels)
//! - Image asset access with a configurable missing-asset policy
//! - The 18-slide Camino deck with its page transitions
//! - A JSON-serialisable run summary
//!
//! # Example
//!
//! ```ignore
//! use camino_deck::{camino, DeckConfig, MissingAssetPolicy};
//!
//! let config = DeckConfig::new("img", "msjh.ttc", "朝聖之路.pdf")
//!     .with_missing_assets(MissingAssetPolicy::Skip)
//!     .validated()?;
//! let summary = camino::render(&config)?;
//! println!("{} slides", summary.slides.len());
//! ```

pub mod assets;
pub mod camino;
mod config;
mod deck;
pub mod palette;
mod slide;
mod summary;

pub use assets::{DirectorySource, ImageSource, MissingAssetPolicy};
pub use config::DeckConfig;
pub use deck::{Deck, SLIDE_HEIGHT, SLIDE_WIDTH};
pub use slide::{Slide, Spacing, TextFrame, TextStyle};
pub use summary::{DeckSummary, PlacedImage, SlideSummary, TransitionSummary};

use thiserror::Error;

/// Errors that can occur while building the deck
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Asset {name}: {reason}")]
    Asset { name: String, reason: String },

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] pdf_core::FitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for deck operations
pub type Result<T> = std::result::Result<T, DeckError>;
