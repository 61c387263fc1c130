//! Slide authoring helpers
//!
//! All positions and sizes are in inches from the top-left corner of a
//! 13.333 x 7.5 inch slide, except font sizes, spacing and line widths which
//! are in points.

use crate::assets::{ImageSource, MissingAssetPolicy};
use crate::deck::{Deck, FONT_FAMILY, SLIDE_HEIGHT, SLIDE_WIDTH};
use crate::palette::{Rgb, GOLD, NAVY, WHITE};
use crate::summary::{PlacedImage, SlideSummary};
use crate::{DeckError, Result};
use cjk_text::try_wrap_text;
use pdf_core::units::{inches, to_inches};
use pdf_core::{Align, FontWeight, ImageScaleMode, PdfDocument, PdfError, Rect, ShapeStyle};
use tracing::{debug, warn};

/// Horizontal text box inset
const INSET_X: f64 = 0.1;
/// Vertical text box inset
const INSET_Y: f64 = 0.05;
/// Line height as a multiple of the font size
const LINE_SPACING: f64 = 1.2;
/// Thickness of the gold accent bar, in points
const GOLD_LINE_WIDTH: f64 = 2.5;
/// Rounded panel corner radius relative to the shorter side
const PANEL_CORNER: f64 = 0.16667;

/// Paragraph formatting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f32,
    pub color: Rgb,
    pub bold: bool,
    pub align: Align,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 18.0,
            color: WHITE,
            bold: false,
            align: Align::Left,
        }
    }
}

impl TextStyle {
    pub fn new(size: f32, color: Rgb) -> Self {
        Self {
            size,
            color,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Space around a paragraph, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub before: f64,
    pub after: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            before: 6.0,
            after: 6.0,
        }
    }
}

impl Spacing {
    /// No extra space
    pub fn none() -> Self {
        Self {
            before: 0.0,
            after: 0.0,
        }
    }

    /// Custom space before, default space after
    pub fn before(points: f64) -> Self {
        Self {
            before: points,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Paragraph {
    text: String,
    style: TextStyle,
    spacing: Spacing,
}

/// A word-wrapped text box made of paragraphs
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    /// Text box whose first paragraph is `text`
    pub fn new(left: f64, top: f64, width: f64, height: f64, text: &str, style: TextStyle) -> Self {
        Self {
            left,
            top,
            width,
            height,
            paragraphs: vec![Paragraph {
                text: text.to_string(),
                style,
                spacing: Spacing::none(),
            }],
        }
    }

    /// Append a paragraph
    pub fn add_para(&mut self, text: &str, style: TextStyle, spacing: Spacing) -> &mut Self {
        self.paragraphs.push(Paragraph {
            text: text.to_string(),
            style,
            spacing,
        });
        self
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Lay out and draw the frame, returning the text height in points
    pub(crate) fn render(&self, doc: &mut PdfDocument, page: usize) -> Result<f64> {
        let wrap_width = inches(self.width - 2.0 * INSET_X);
        let origin = inches(self.top + INSET_Y);
        let mut y = origin;

        for (index, para) in self.paragraphs.iter().enumerate() {
            if index > 0 {
                y += self.paragraphs[index - 1].spacing.after + para.spacing.before;
            }

            doc.set_font(FONT_FAMILY, para.style.size)?;
            doc.set_font_weight(if para.style.bold {
                FontWeight::Bold
            } else {
                FontWeight::Regular
            });
            doc.set_text_color(para.style.color.into());

            let metrics = doc.line_metrics()?;
            let lines = try_wrap_text(&para.text, wrap_width, |s| doc.get_text_width(s))?;

            let line_height = para.style.size as f64 * LINE_SPACING;
            let half_leading = (line_height - (metrics.ascent - metrics.descent)) / 2.0;
            let x = match para.style.align {
                Align::Left => inches(self.left + INSET_X),
                Align::Center => inches(self.left + self.width / 2.0),
                Align::Right => inches(self.left + self.width - INSET_X),
            };

            for line in &lines {
                if !line.is_empty() {
                    let baseline = y + half_leading + metrics.ascent;
                    doc.insert_text(line, page, x, baseline, para.style.align)?;
                }
                y += line_height;
            }
        }

        let used = y - origin;
        if used > inches(self.height) {
            debug!(
                page,
                used_inches = to_inches(used),
                box_inches = self.height,
                "Text overflows its box"
            );
        }
        Ok(used)
    }
}

/// A slide being built
///
/// Drawing calls paint in call order. The text box returned by
/// [`Slide::add_textbox`] takes paragraphs until the next drawing call.
pub struct Slide<'d, S: ImageSource> {
    deck: &'d mut Deck<S>,
    summary: SlideSummary,
    pending: Option<TextFrame>,
}

impl<'d, S: ImageSource> Slide<'d, S> {
    pub(crate) fn new(deck: &'d mut Deck<S>, number: usize, title: &str) -> Self {
        Self {
            deck,
            summary: SlideSummary {
                number,
                title: title.to_string(),
                transition: None,
                images: Vec::new(),
            },
            pending: None,
        }
    }

    /// Slide number (1-indexed)
    pub fn number(&self) -> usize {
        self.summary.number
    }

    /// Solid background colour
    pub fn add_bg(&mut self, color: Rgb) -> Result<()> {
        self.flush_text()?;
        self.deck
            .doc
            .set_background(self.summary.number, color.into())?;
        Ok(())
    }

    /// Image covering the whole slide, overflow cropped
    pub fn add_image_cover(&mut self, name: &str) -> Result<()> {
        self.flush_text()?;
        self.place_image(
            name,
            0.0,
            0.0,
            SLIDE_WIDTH,
            SLIDE_HEIGHT,
            ImageScaleMode::Cover,
        )
    }

    /// Navy wash over the whole slide
    ///
    /// `alpha` is the overlay's transparency: 0.6 lets 60% of what is
    /// underneath show through.
    pub fn add_overlay(&mut self, alpha: f32) -> Result<()> {
        self.flush_text()?;
        let style = ShapeStyle::filled(NAVY.into()).with_opacity(1.0 - alpha);
        self.draw_rect(0.0, 0.0, SLIDE_WIDTH, SLIDE_HEIGHT, &style)
    }

    /// Image scaled to fit inside a box and centered in it
    pub fn add_img_contain(
        &mut self,
        name: &str,
        left: f64,
        top: f64,
        box_width: f64,
        box_height: f64,
    ) -> Result<()> {
        self.flush_text()?;
        self.place_image(
            name,
            left,
            top,
            box_width,
            box_height,
            ImageScaleMode::Contain,
        )
    }

    /// Word-wrapped text box, more paragraphs can be added to the result
    pub fn add_textbox(
        &mut self,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        text: &str,
        style: TextStyle,
    ) -> Result<&mut TextFrame> {
        self.flush_text()?;
        Ok(self
            .pending
            .insert(TextFrame::new(left, top, width, height, text, style)))
    }

    /// Thin gold accent bar
    pub fn add_gold_line(&mut self, left: f64, top: f64, width: f64) -> Result<()> {
        self.flush_text()?;
        let height = to_inches(GOLD_LINE_WIDTH);
        self.draw_rect(left, top, width, height, &ShapeStyle::filled(GOLD.into()))
    }

    /// Rounded rectangle behind a quote, with an optional outline
    /// (colour, width in points)
    pub fn add_panel(
        &mut self,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        fill: Rgb,
        outline: Option<(Rgb, f64)>,
    ) -> Result<()> {
        self.flush_text()?;
        let radius = inches(width.min(height)) * PANEL_CORNER;
        let mut style = ShapeStyle::filled(fill.into()).with_corner_radius(radius);
        if let Some((color, line_width)) = outline {
            style = style.with_stroke(color.into(), line_width);
        }
        self.draw_rect(left, top, width, height, &style)
    }

    fn draw_rect(
        &mut self,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        style: &ShapeStyle,
    ) -> Result<()> {
        let rect = Rect::new(inches(left), inches(top), inches(width), inches(height));
        self.deck.doc.draw_rect(self.summary.number, rect, style)?;
        Ok(())
    }

    fn place_image(
        &mut self,
        name: &str,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<()> {
        let data = match self.deck.source.load(name) {
            Ok(data) => data,
            Err(err) => return self.skip_or_fail(name, err),
        };

        let result = self.deck.doc.insert_image_scaled(
            &data,
            self.summary.number,
            inches(left),
            inches(top),
            inches(width),
            inches(height),
            mode,
        );

        let fit = match result {
            Ok(fit) => fit,
            Err(PdfError::Geometry(err)) => return self.skip_or_fail(name, err.into()),
            Err(PdfError::ImageError(reason)) => {
                let err = DeckError::Asset {
                    name: name.to_string(),
                    reason,
                };
                return self.skip_or_fail(name, err);
            }
            Err(err) => return Err(err.into()),
        };

        let placed = PlacedImage {
            name: name.to_string(),
            mode: match mode {
                ImageScaleMode::Cover => "cover",
                ImageScaleMode::Contain => "contain",
                ImageScaleMode::Stretch => "stretch",
            }
            .to_string(),
            left: left + to_inches(fit.offset_left),
            top: top + to_inches(fit.offset_top),
            width: to_inches(fit.width),
            height: to_inches(fit.height),
        };
        debug!(
            slide = self.summary.number,
            image = name,
            width = placed.width,
            height = placed.height,
            "Placed image"
        );
        self.summary.images.push(placed);
        Ok(())
    }

    fn skip_or_fail(&mut self, name: &str, err: DeckError) -> Result<()> {
        match self.deck.policy {
            MissingAssetPolicy::Abort => Err(err),
            MissingAssetPolicy::Skip => {
                warn!(
                    slide = self.summary.number,
                    image = name,
                    error = %err,
                    "Skipping image"
                );
                self.deck.skipped.push(name.to_string());
                Ok(())
            }
        }
    }

    /// Draw the open text box, if any
    fn flush_text(&mut self) -> Result<()> {
        if let Some(frame) = self.pending.take() {
            frame.render(&mut self.deck.doc, self.summary.number)?;
        }
        Ok(())
    }

    /// Draw anything still open and hand back the slide's summary
    pub(crate) fn finish(mut self) -> Result<SlideSummary> {
        self.flush_text()?;
        Ok(self.summary)
    }
}
