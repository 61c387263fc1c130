//! Deck: a presentation PDF of widescreen slides

use crate::assets::{ImageSource, MissingAssetPolicy};
use crate::slide::Slide;
use crate::summary::{DeckSummary, SlideSummary};
use crate::Result;
use pdf_core::units::inches;
use pdf_core::{FontFamilyBuilder, PdfDocument, Transition};
use std::path::Path;
use tracing::info;

/// Slide width in inches (16:9)
pub const SLIDE_WIDTH: f64 = 13.333;
/// Slide height in inches
pub const SLIDE_HEIGHT: f64 = 7.5;

/// Font family all slide text is set in
pub(crate) const FONT_FAMILY: &str = "deck";

/// A deck under construction
pub struct Deck<S> {
    pub(crate) doc: PdfDocument,
    pub(crate) source: S,
    pub(crate) policy: MissingAssetPolicy,
    pub(crate) skipped: Vec<String>,
    slides: Vec<SlideSummary>,
}

impl<S: ImageSource> Deck<S> {
    /// Create an empty deck reading images from `source`
    ///
    /// # Arguments
    /// * `source` - Where slide images are loaded from
    /// * `fonts` - Font family for all slide text (regular, optional bold)
    pub fn new(source: S, fonts: FontFamilyBuilder) -> Result<Self> {
        let mut doc = PdfDocument::new();
        doc.register_font_family(FONT_FAMILY, fonts)?;

        Ok(Self {
            doc,
            source,
            policy: MissingAssetPolicy::default(),
            skipped: Vec::new(),
            slides: Vec::new(),
        })
    }

    pub fn with_missing_assets(mut self, policy: MissingAssetPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Title shown by viewers; the deck opens in full screen
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.doc.set_title(title)?;
        self.doc.set_full_screen(true)?;
        Ok(())
    }

    /// Append a slide drawn by `build`
    ///
    /// # Returns
    /// The new slide's number (1-indexed)
    pub fn add_slide<F>(&mut self, title: &str, build: F) -> Result<usize>
    where
        F: FnOnce(&mut Slide<'_, S>) -> Result<()>,
    {
        let number = self
            .doc
            .add_page(inches(SLIDE_WIDTH), inches(SLIDE_HEIGHT))?;

        let mut slide = Slide::new(self, number, title);
        build(&mut slide)?;
        let summary = slide.finish()?;

        info!(
            slide = number,
            title,
            images = summary.images.len(),
            "Built slide"
        );
        self.slides.push(summary);
        Ok(number)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Give slide `i + 1` the transition `transitions[i]`
    ///
    /// Slides beyond the end of `transitions` keep no transition.
    ///
    /// # Returns
    /// How many slides received a transition
    pub fn apply_transitions(&mut self, transitions: &[Transition]) -> Result<usize> {
        let mut applied = 0;
        for (slide, transition) in self.slides.iter_mut().zip(transitions) {
            self.doc.set_transition(slide.number, transition)?;
            slide.transition = Some(transition.into());
            applied += 1;
        }

        info!("Added transitions to {} slides.", self.slides.len());
        Ok(applied)
    }

    /// Summary of everything built so far
    pub fn summary(&self) -> DeckSummary {
        DeckSummary {
            slides: self.slides.clone(),
            skipped_assets: self.skipped.clone(),
        }
    }

    pub fn document(&self) -> &PdfDocument {
        &self.doc
    }

    /// Save the deck to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        Ok(self.doc.to_bytes()?)
    }

    /// Save the deck to a file
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<DeckSummary> {
        self.doc.save(path)?;
        Ok(self.summary())
    }
}
