//! Vector shapes: filled and stroked rectangles, optionally rounded

use crate::document::Color;

/// Bezier control point distance for approximating a quarter circle
const KAPPA: f64 = 0.5523;

/// Rectangle in points, measured from the top-left corner of the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Outline of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in points
    pub width: f64,
}

/// How a shape is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// Fill color, `None` leaves the interior unpainted
    pub fill: Option<Color>,
    /// Fill opacity (0.0 - 1.0)
    pub fill_opacity: f32,
    pub stroke: Option<Stroke>,
    /// Corner radius in points (0 = square corners)
    pub corner_radius: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: None,
            fill_opacity: 1.0,
            stroke: None,
            corner_radius: 0.0,
        }
    }
}

impl ShapeStyle {
    /// Solid fill with no outline
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    /// Whether painting needs an ExtGState for transparency
    pub fn is_translucent(&self) -> bool {
        self.fill.is_some() && self.fill_opacity < 1.0
    }

    /// Path painting operator for this style
    fn paint_operator(&self) -> &'static str {
        match (self.fill.is_some(), self.stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            (false, true) => "S",
            (false, false) => "n",
        }
    }
}

/// Generate path construction operators for a rectangle
///
/// # Arguments
/// * `x`, `y` - Lower-left corner in PDF coordinates (from bottom)
/// * `width`, `height` - Size in points
/// * `radius` - Corner radius, clamped to half the shorter side
pub fn rect_path(x: f64, y: f64, width: f64, height: f64, radius: f64) -> String {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    if r == 0.0 {
        return format!("{x} {y} {width} {height} re\n");
    }

    let k = r * KAPPA;
    let right = x + width;
    let top = y + height;

    let mut path = String::new();
    path.push_str(&format!("{} {} m\n", x + r, y));
    path.push_str(&format!("{} {} l\n", right - r, y));
    path.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        right - r + k,
        y,
        right,
        y + r - k,
        right,
        y + r
    ));
    path.push_str(&format!("{} {} l\n", right, top - r));
    path.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        right,
        top - r + k,
        right - r + k,
        top,
        right - r,
        top
    ));
    path.push_str(&format!("{} {} l\n", x + r, top));
    path.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        x + r - k,
        top,
        x,
        top - r + k,
        x,
        top - r
    ));
    path.push_str(&format!("{} {} l\n", x, y + r));
    path.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        x,
        y + r - k,
        x + r - k,
        y,
        x + r,
        y
    ));
    path.push_str("h\n");
    path
}

/// Generate operators to paint a rectangle
///
/// # Arguments
/// * `x`, `y` - Lower-left corner in PDF coordinates (from bottom)
/// * `width`, `height` - Size in points
/// * `style` - Fill, stroke and corner radius
/// * `gs_name` - ExtGState resource carrying the fill opacity, if any
pub fn generate_shape_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: &ShapeStyle,
    gs_name: Option<&str>,
) -> Vec<u8> {
    let mut ops = String::from("q\n");

    if let Some(gs) = gs_name {
        ops.push_str(&format!("/{gs} gs\n"));
    }
    if let Some(fill) = style.fill {
        ops.push_str(&format!("{} {} {} rg\n", fill.r, fill.g, fill.b));
    }
    if let Some(stroke) = style.stroke {
        ops.push_str(&format!(
            "{} {} {} RG\n{} w\n",
            stroke.color.r, stroke.color.g, stroke.color.b, stroke.width
        ));
    }

    ops.push_str(&rect_path(x, y, width, height, style.corner_radius));
    ops.push_str(style.paint_operator());
    ops.push_str("\nQ\n");

    ops.into_bytes()
}
