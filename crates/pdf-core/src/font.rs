//! Font handling for PDF documents

use crate::{PdfError, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use subsetter::GlyphRemapper;
use tracing::debug;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Vertical metrics of a font at a given size, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from baseline to the top of the tallest glyphs (positive)
    pub ascent: f64,
    /// Distance from baseline to the bottom of descenders (negative)
    pub descent: f64,
    /// Recommended extra space between lines
    pub line_gap: f64,
}

/// Subsetted font program with its glyph id mapping
#[derive(Debug, Clone)]
struct FontSubset {
    data: Vec<u8>,
    /// Original glyph id -> glyph id in the subset
    gid_map: HashMap<u16, u16>,
}

/// Font data structure for embedded fonts
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Raw font file data (TTF, OTF or a collection)
    pub font_data: Vec<u8>,
    /// Face index within a font collection
    pub face_index: u32,
    /// Characters used (for subsetting)
    pub used_chars: HashSet<char>,
    /// Parsed font face
    face: Option<ttf_parser::Face<'static>>,
    subset: Option<FontSubset>,
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Descriptor key for the font program ("FontFile2" or "FontFile3")
    pub font_file_key: &'static str,
    /// Font file stream
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

/// Font family with a regular and an optional bold face
#[derive(Debug, Clone)]
pub struct FontFamily {
    pub regular: FontData,
    pub bold: Option<FontData>,
}

impl FontFamily {
    /// Get the font data for the specified weight
    ///
    /// Falls back to regular if the family has no bold face.
    pub fn get_variant(&self, weight: FontWeight) -> &FontData {
        match weight {
            FontWeight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontWeight::Regular => &self.regular,
        }
    }

    /// Whether `weight` has to be emboldened at render time
    pub fn needs_synthetic_bold(&self, weight: FontWeight) -> bool {
        weight == FontWeight::Bold && self.bold.is_none()
    }

    /// All faces of the family
    pub fn variants(&self) -> impl Iterator<Item = &FontData> {
        std::iter::once(&self.regular).chain(self.bold.as_ref())
    }

    pub fn variants_mut(&mut self) -> impl Iterator<Item = &mut FontData> {
        std::iter::once(&mut self.regular).chain(self.bold.as_mut())
    }
}

/// Builder for registering font families
#[derive(Clone, Default)]
pub struct FontFamilyBuilder {
    regular: Option<Vec<u8>>,
    bold: Option<Vec<u8>>,
    face_index: u32,
}

impl FontFamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regular(mut self, font_data: Vec<u8>) -> Self {
        self.regular = Some(font_data);
        self
    }

    pub fn bold(mut self, font_data: Vec<u8>) -> Self {
        self.bold = Some(font_data);
        self
    }

    /// Face to use when the files are font collections (.ttc)
    pub fn face_index(mut self, index: u32) -> Self {
        self.face_index = index;
        self
    }

    /// Build the FontFamily from the provided font data
    pub fn build(self, family_name: &str) -> Result<FontFamily> {
        let regular = match self.regular {
            Some(data) => FontData::from_bytes(
                &format!("{family_name}-regular"),
                &data,
                self.face_index,
            )?,
            None => {
                return Err(PdfError::FontParseError(
                    "FontFamily must have at least a regular variant".to_string(),
                ))
            }
        };

        let bold = self
            .bold
            .map(|data| {
                FontData::from_bytes(&format!("{family_name}-bold"), &data, self.face_index)
            })
            .transpose()?;

        Ok(FontFamily { regular, bold })
    }
}

impl FontData {
    /// Create font data from TrueType bytes (first face)
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        Self::from_bytes(name, ttf_data, 0)
    }

    /// Create font data from a font file
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `font_data` - TrueType/OpenType file or collection bytes
    /// * `face_index` - Face within a collection (0 for single fonts)
    pub fn from_bytes(name: &str, font_data: &[u8], face_index: u32) -> Result<Self> {
        let data = font_data.to_vec();

        // The parsed face borrows its bytes for the life of the document,
        // fonts are loaded once per document so the leak is bounded
        let static_data: &'static [u8] = Box::leak(data.clone().into_boxed_slice());

        let face = ttf_parser::Face::parse(static_data, face_index)
            .map_err(|e| PdfError::FontParseError(format!("{name}: {e:?}")))?;

        Ok(Self {
            name: name.to_string(),
            font_data: data,
            face_index,
            used_chars: HashSet::new(),
            face: Some(face),
            subset: None,
        })
    }

    /// Add characters to the used set (for subsetting)
    pub fn add_chars(&mut self, text: &str) {
        for c in text.chars() {
            self.used_chars.insert(c);
        }
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face
            .as_ref()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).map(|id| id != 0).unwrap_or(false)
    }

    /// Advance width of a glyph in font units
    fn gid_advance(&self, gid: u16) -> Option<u16> {
        self.face
            .as_ref()
            .and_then(|face| face.glyph_hor_advance(ttf_parser::GlyphId(gid)))
    }

    /// Get glyph advance width, `.notdef` for missing characters
    pub fn glyph_advance(&self, c: char) -> Option<u16> {
        self.gid_advance(self.glyph_id(c).unwrap_or(0))
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.face
            .as_ref()
            .map(|face| face.units_per_em())
            .unwrap_or(1000)
    }

    /// Get font ascender
    pub fn ascender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.ascender())
            .unwrap_or(800)
    }

    /// Get font descender
    pub fn descender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.descender())
            .unwrap_or(-200)
    }

    fn line_gap(&self) -> i16 {
        self.face.as_ref().map(|face| face.line_gap()).unwrap_or(0)
    }

    /// Vertical metrics at `font_size` points
    pub fn line_metrics(&self, font_size: f32) -> LineMetrics {
        let scale = font_size as f64 / self.units_per_em() as f64;
        LineMetrics {
            ascent: self.ascender() as f64 * scale,
            descent: self.descender() as f64 * scale,
            line_gap: self.line_gap() as f64 * scale,
        }
    }

    /// Calculate text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|c| self.glyph_advance(c))
            .map(|w| w as u32)
            .sum()
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let width = self.text_width(text);
        let units_per_em = self.units_per_em() as f32;
        (width as f32 / units_per_em) * font_size
    }

    /// Convert font units to the 1000-unit glyph space used by PDF
    fn to_pdf_units(&self, value: i32) -> i64 {
        (value as f64 * 1000.0 / self.units_per_em() as f64).round() as i64
    }

    /// Whether the font program has CFF outlines (`OTTO` sfnt)
    pub fn is_cff(&self) -> bool {
        let data = &self.font_data;
        let offset = if data.starts_with(b"ttcf") {
            let entry = 12 + 4 * self.face_index as usize;
            match data.get(entry..entry + 4) {
                Some(bytes) => {
                    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize
                }
                None => return false,
            }
        } else {
            0
        };
        data.get(offset..offset + 4) == Some(b"OTTO".as_slice())
    }

    /// Original glyph ids of all used characters, sorted
    fn used_gids(&self) -> Vec<u16> {
        let mut gids: Vec<u16> = self
            .used_chars
            .iter()
            .map(|&c| self.glyph_id(c).unwrap_or(0))
            .collect();
        gids.sort_unstable();
        gids.dedup();
        gids
    }

    /// Create a subset containing only the glyphs of the used characters
    ///
    /// Glyph ids are renumbered; text must afterwards be encoded with
    /// [`FontData::encode_text_hex_remapped`].
    pub fn create_subset(&mut self) -> Result<()> {
        let mut remapper = GlyphRemapper::new();
        remapper.remap(0);

        let mut gid_map = HashMap::new();
        gid_map.insert(0, 0);
        for gid in self.used_gids() {
            gid_map.insert(gid, remapper.remap(gid));
        }

        let data = subsetter::subset(&self.font_data, self.face_index, &remapper)
            .map_err(|e| PdfError::FontSubsetError(format!("{}: {e:?}", self.name)))?;

        debug!(
            font = %self.name,
            glyphs = gid_map.len(),
            original_bytes = self.font_data.len(),
            subset_bytes = data.len(),
            "Subset font"
        );

        self.subset = Some(FontSubset { data, gid_map });
        Ok(())
    }

    /// Glyph id to write for `c`, remapped when a subset exists
    fn output_gid(&self, c: char) -> u16 {
        let gid = self.glyph_id(c).unwrap_or(0);
        match &self.subset {
            Some(subset) => subset.gid_map.get(&gid).copied().unwrap_or(0),
            None => gid,
        }
    }

    /// Encode text as hex string of original glyph ids
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::new();
        for c in text.chars() {
            let gid = self.glyph_id(c).unwrap_or(0);
            result.push_str(&format!("{gid:04X}"));
        }
        format!("<{result}>")
    }

    /// Encode text as hex string of subset glyph ids for the Tj operator
    pub fn encode_text_hex_remapped(&self, text: &str) -> String {
        let mut result = String::new();
        for c in text.chars() {
            result.push_str(&format!("{:04X}", self.output_gid(c)));
        }
        format!("<{result}>")
    }

    /// PostScript name with a subset tag, e.g. `ABCDEF+MicrosoftJhengHei`
    fn base_font_name(&self) -> String {
        let ps_name = self
            .face
            .as_ref()
            .and_then(|face| {
                face.names()
                    .into_iter()
                    .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
                    .and_then(|n| n.to_string())
            })
            .unwrap_or_else(|| self.name.clone());

        let sanitized: String = ps_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();

        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        self.used_gids().hash(&mut hasher);
        let mut hash = hasher.finish();

        let mut tag = String::with_capacity(6);
        for _ in 0..6 {
            tag.push((b'A' + (hash % 26) as u8) as char);
            hash /= 26;
        }

        format!("{tag}+{sanitized}")
    }

    /// Generate all PDF objects needed to embed this font
    pub fn to_pdf_objects(&self) -> Result<FontObjects> {
        let font_name = Object::Name(self.base_font_name().into_bytes());
        let cff = self.is_cff();

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![("Length", (tounicode_content.len() as i32).into())]),
            tounicode_content.into_bytes(),
        );

        let program = self
            .subset
            .as_ref()
            .map(|s| s.data.clone())
            .unwrap_or_else(|| self.font_data.clone());

        let (font_file_key, font_file_stream) = if cff {
            (
                "FontFile3",
                Stream::new(
                    Dictionary::from_iter(vec![("Subtype", "OpenType".into())]),
                    program,
                ),
            )
        } else {
            let length = program.len() as i64;
            (
                "FontFile2",
                Stream::new(
                    Dictionary::from_iter(vec![("Length1", Object::Integer(length))]),
                    program,
                ),
            )
        };

        let (bbox, cap_height) = match &self.face {
            Some(face) => {
                let rect = face.global_bounding_box();
                let cap = face
                    .capital_height()
                    .unwrap_or_else(|| face.ascender());
                (
                    [
                        rect.x_min as i32,
                        rect.y_min as i32,
                        rect.x_max as i32,
                        rect.y_max as i32,
                    ],
                    cap as i32,
                )
            }
            None => (
                [
                    0,
                    self.descender() as i32,
                    self.units_per_em() as i32,
                    self.ascender() as i32,
                ],
                self.ascender() as i32,
            ),
        };

        let font_bbox: Vec<Object> = bbox
            .iter()
            .map(|&v| Object::Integer(self.to_pdf_units(v)))
            .collect();

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()), // Symbolic font
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            (
                "Ascent",
                Object::Integer(self.to_pdf_units(self.ascender() as i32)),
            ),
            (
                "Descent",
                Object::Integer(self.to_pdf_units(self.descender() as i32)),
            ),
            ("CapHeight", Object::Integer(self.to_pdf_units(cap_height))),
            ("StemV", 80.into()),
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let mut cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            (
                "Subtype",
                if cff { "CIDFontType0" } else { "CIDFontType2" }.into(),
            ),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("W", self.generate_widths_array().into()),
            ("DW", 1000.into()),
        ]);
        if !cff {
            cid_font.set("CIDToGIDMap", Object::Name(b"Identity".to_vec()));
        }

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
        ]);

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_key,
            font_file_stream,
            tounicode_stream,
        })
    }

    /// Generate /W array for glyph widths, keyed by output glyph id
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut widths = Vec::new();
        if self.face.is_none() {
            return widths;
        }

        let mut entries: Vec<(u16, u16)> = self
            .used_gids()
            .into_iter()
            .map(|gid| {
                let out = match &self.subset {
                    Some(subset) => subset.gid_map.get(&gid).copied().unwrap_or(0),
                    None => gid,
                };
                (out, gid)
            })
            .collect();
        entries.sort_unstable();

        // Individual mapping format: [gid1 [width1] gid2 [width2] ...]
        for (out, gid) in entries {
            let advance = self.gid_advance(gid).unwrap_or(0) as i32;
            widths.push((out as i64).into());
            widths.push(vec![Object::Integer(self.to_pdf_units(advance))].into());
        }

        widths
    }

    /// Generate ToUnicode CMap stream content
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");

        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let mut char_list: Vec<char> = self.used_chars.iter().copied().collect();
        char_list.sort_by_key(|c| *c as u32);

        // At most 100 entries per bfchar section
        for chunk in char_list.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for &c in chunk {
                let gid = self.output_gid(c);
                let mut utf16 = [0u16; 2];
                let unicode: String = c
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04X}> <{unicode}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}
