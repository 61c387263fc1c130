//! Deck colour palette

use pdf_core::Color;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_rgb(rgb.0, rgb.1, rgb.2)
    }
}

pub const NAVY: Rgb = Rgb(0x1A, 0x1A, 0x2E);
pub const GOLD: Rgb = Rgb(0xC9, 0xA8, 0x4C);
pub const GOLD_LIGHT: Rgb = Rgb(0xE8, 0xD5, 0x90);
pub const CREAM: Rgb = Rgb(0xF8, 0xF4, 0xEB);
pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
pub const TERRACOTTA: Rgb = Rgb(0xB5, 0x56, 0x1A);
pub const TEXT_DARK: Rgb = Rgb(0x3A, 0x35, 0x30);
pub const TEXT_LIGHT: Rgb = Rgb(0x6B, 0x61, 0x58);
pub const SUBTLE: Rgb = Rgb(0xBB, 0xBB, 0xCC);
pub const DIM: Rgb = Rgb(0xAA, 0xAA, 0xBB);

/// Quote panel fill on cream slides
pub const QUOTE_PANEL: Rgb = Rgb(0xEF, 0xE8, 0xD8);
/// Verse panel fill and outline on navy slides
pub const VERSE_PANEL: Rgb = Rgb(0x25, 0x25, 0x3A);
pub const VERSE_OUTLINE: Rgb = Rgb(0x40, 0x3A, 0x28);
/// Scripture reference
pub const CITATION: Rgb = Rgb(0x99, 0x99, 0xAA);
