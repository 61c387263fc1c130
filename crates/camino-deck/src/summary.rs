//! Run summary

use crate::Result;
use pdf_core::{Transition, TransitionKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What was built, slide by slide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub slides: Vec<SlideSummary>,
    /// Images left out under the skip policy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_assets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSummary {
    /// Slide number (1-indexed)
    pub number: usize,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionSummary>,
    #[serde(default)]
    pub images: Vec<PlacedImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSummary {
    pub effect: String,
    /// Effect duration in seconds
    pub duration: f32,
    /// Auto-advance delay in seconds, click-only when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_after: Option<f32>,
}

impl From<&Transition> for TransitionSummary {
    fn from(transition: &Transition) -> Self {
        let effect = match transition.kind {
            TransitionKind::Push(d) | TransitionKind::Wipe(d) | TransitionKind::Cover(d) => {
                format!("{} {d:?}", transition.kind.style_name())
            }
            kind => kind.style_name().to_string(),
        };
        Self {
            effect: effect.to_lowercase(),
            duration: transition.speed.seconds(),
            advance_after: transition.display_seconds(),
        }
    }
}

/// An image as drawn on a slide, in inches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedImage {
    pub name: String,
    /// "contain" or "cover"
    pub mode: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DeckSummary {
    /// Number of images placed across all slides
    pub fn image_count(&self) -> usize {
        self.slides.iter().map(|s| s.images.len()).sum()
    }

    /// Write the summary as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
