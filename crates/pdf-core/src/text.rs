//! Text rendering utilities

use crate::document::Color;

/// Stroke width of synthetic bold, relative to the font size
const SYNTHETIC_BOLD_STROKE: f32 = 0.03;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text color (RGB)
    pub color: Color,
    /// Embolden a regular face by stroking the glyph outlines
    pub synthetic_bold: bool,
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, Tf, Td, Tj, ET) to render text
/// starting at a position. Alignment is resolved by the caller.
///
/// # Arguments
/// * `hex` - Hex-encoded glyph ids (e.g., "<00410042>")
/// * `x` - X coordinate of the text start in points (PDF coordinates, from left)
/// * `y` - Baseline Y coordinate in points (PDF coordinates, from bottom)
/// * `ctx` - Text rendering context
pub fn generate_text_operators(hex: &str, x: f64, y: f64, ctx: &TextRenderContext) -> Vec<u8> {
    let mut ops = String::new();
    let Color { r, g, b } = ctx.color;

    if ctx.synthetic_bold {
        // Line width outlives ET, keep it scoped
        ops.push_str("q\n");
    }

    ops.push_str("BT\n");
    ops.push_str(&format!("{r} {g} {b} rg\n"));

    if ctx.synthetic_bold {
        // Fill and stroke glyphs in the text color
        ops.push_str(&format!(
            "2 Tr\n{r} {g} {b} RG\n{} w\n",
            ctx.font_size * SYNTHETIC_BOLD_STROKE
        ));
    }

    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{x} {y} Td\n"));
    ops.push_str(&format!("{hex} Tj\n"));
    ops.push_str("ET\n");

    if ctx.synthetic_bold {
        ops.push_str("Q\n");
    }

    ops.into_bytes()
}
