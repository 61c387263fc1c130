//! PDF Document builder

use crate::font::LineMetrics;
use crate::image::{
    calculate_placement, generate_clipped_image_operators, generate_image_operators,
    image_dimensions, ImageDimensions, ImageScaleMode, ImageXObject,
};
use crate::shape::{generate_shape_operators, Rect, ShapeStyle};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::transition::Transition;
use crate::{Align, Fit, FitError, FontData, FontFamily, FontFamilyBuilder, FontWeight};
use crate::{PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// A buffered text operation for deferred encoding
///
/// Text is buffered during rendering and encoded during save,
/// after fonts have been subsetted and glyph IDs remapped.
#[derive(Debug, Clone)]
struct BufferedTextOp {
    /// The text to render
    text: String,
    /// Font name (e.g., "jhenghei-bold")
    font_name: String,
    /// Font resource name (e.g., "F1")
    font_resource_name: String,
    /// X coordinate (in PDF coordinates, alignment already applied)
    x: f64,
    /// Baseline Y coordinate (in PDF coordinates)
    y: f64,
    /// Font size in points
    font_size: f32,
    /// Text color
    color: Color,
    synthetic_bold: bool,
}

/// Page content in painting order
#[derive(Debug, Clone)]
enum ContentOp {
    Raw(Vec<u8>),
    Text(BufferedTextOp),
}

/// Bookkeeping for one page
#[derive(Debug)]
struct PageState {
    id: ObjectId,
    width: f64,
    height: f64,
    background: Option<Color>,
    content: Vec<ContentOp>,
    /// Font name -> resource name
    fonts: HashMap<String, String>,
    /// Image data hash -> resource name
    images: HashMap<u64, String>,
}

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// PDF Document builder providing high-level drawing operations
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    pages_id: ObjectId,
    catalog_id: ObjectId,
    info_id: Option<ObjectId>,
    pages: Vec<PageState>,
    /// Registered font families
    font_families: HashMap<String, FontFamily>,
    /// Current font family name
    current_family: Option<String>,
    /// Current font weight
    current_weight: FontWeight,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Next font resource number
    next_font_resource: u32,
    /// Embedded images (data hash -> PDF object ID, pixel size)
    embedded_images: HashMap<u64, (ObjectId, ImageDimensions)>,
    /// Next image resource number
    next_image_resource: u32,
    /// Graphics states by quantised fill opacity (resource name, object ID)
    graphics_states: HashMap<u32, (String, ObjectId)>,
    /// Set once fonts and content have been written out
    finalized: bool,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with no pages
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.new_object_id();
        let catalog_id = inner.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        inner.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Kids", Object::Array(vec![])),
                ("Count", Object::Integer(0)),
            ])),
        );
        inner.trailer.set("Root", Object::Reference(catalog_id));

        Self {
            inner,
            pages_id,
            catalog_id,
            info_id: None,
            pages: Vec::new(),
            font_families: HashMap::new(),
            current_family: None,
            current_weight: FontWeight::Regular,
            current_font_size: 12.0,
            current_text_color: Color::black(),
            next_font_resource: 1,
            embedded_images: HashMap::new(),
            next_image_resource: 1,
            graphics_states: HashMap::new(),
            finalized: false,
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Size of a page in points (width, height)
    pub fn page_size(&self, page: usize) -> Result<(f64, f64)> {
        let state = self.page(page)?;
        Ok((state.width, state.height))
    }

    /// Append a blank page and return its number (1-indexed)
    ///
    /// # Arguments
    /// * `width` - Page width in points
    /// * `height` - Page height in points
    pub fn add_page(&mut self, width: f64, height: f64) -> Result<usize> {
        self.ensure_open()?;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(FitError::InvalidGeometry(format!(
                "page must have positive finite dimensions, got {width} x {height}"
            ))
            .into());
        }

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width as f32),
                    Object::Real(height as f32),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
        ]);
        let id = self.inner.add_object(page_dict);

        self.pages.push(PageState {
            id,
            width,
            height,
            background: None,
            content: Vec::new(),
            fonts: HashMap::new(),
            images: HashMap::new(),
        });

        let kids: Vec<Object> = self
            .pages
            .iter()
            .map(|p| Object::Reference(p.id))
            .collect();
        let pages_dict = self.inner.get_object_mut(self.pages_id)?.as_dict_mut()?;
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(self.pages.len() as i64));

        Ok(self.pages.len())
    }

    /// Set the document title shown by viewers
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.ensure_open()?;

        let info = Dictionary::from_iter(vec![
            ("Title", text_string(title)),
            ("Producer", Object::string_literal("pdf-core")),
        ]);
        match self.info_id {
            Some(id) => {
                self.inner.objects.insert(id, Object::Dictionary(info));
            }
            None => {
                let id = self.inner.add_object(info);
                self.inner.trailer.set("Info", Object::Reference(id));
                self.info_id = Some(id);
            }
        }

        let catalog = self.inner.get_object_mut(self.catalog_id)?.as_dict_mut()?;
        catalog.set(
            "ViewerPreferences",
            Dictionary::from_iter(vec![("DisplayDocTitle", Object::Boolean(true))]),
        );
        Ok(())
    }

    /// Open the document in full screen (presentation) mode
    pub fn set_full_screen(&mut self, full_screen: bool) -> Result<()> {
        self.ensure_open()?;
        let mode: &[u8] = if full_screen {
            b"FullScreen"
        } else {
            b"UseNone"
        };
        let catalog = self.inner.get_object_mut(self.catalog_id)?.as_dict_mut()?;
        catalog.set("PageMode", Object::Name(mode.to_vec()));
        Ok(())
    }

    /// Fill the whole page with `color`, beneath all other content
    pub fn set_background(&mut self, page: usize, color: Color) -> Result<()> {
        self.ensure_open()?;
        self.page_mut(page)?.background = Some(color);
        Ok(())
    }

    /// Draw a rectangle
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `rect` - Position and size in points, from the top-left corner
    /// * `style` - Fill, opacity, stroke and corner radius
    pub fn draw_rect(&mut self, page: usize, rect: Rect, style: &ShapeStyle) -> Result<()> {
        self.ensure_open()?;
        let page_height = self.page(page)?.height;

        let gs_name = if style.is_translucent() {
            Some(self.get_or_create_graphics_state(style.fill_opacity, page)?)
        } else {
            None
        };

        let pdf_y = page_height - rect.y - rect.height;
        let operators = generate_shape_operators(
            rect.x,
            pdf_y,
            rect.width,
            rect.height,
            style,
            gs_name.as_deref(),
        );
        self.page_mut(page)?.content.push(ContentOp::Raw(operators));
        Ok(())
    }

    /// Set the transition played when `page` is shown
    pub fn set_transition(&mut self, page: usize, transition: &Transition) -> Result<()> {
        self.ensure_open()?;
        let page_id = self.page(page)?.id;

        let page_dict = self.inner.get_object_mut(page_id)?.as_dict_mut()?;
        page_dict.set("Trans", transition.to_dictionary());
        match transition.display_seconds() {
            Some(seconds) => page_dict.set("Dur", Object::Real(seconds)),
            None => {
                page_dict.remove(b"Dur");
            }
        }
        Ok(())
    }

    /// Add a single-face font
    ///
    /// # Arguments
    /// * `name` - Family name used with [`PdfDocument::set_font`]
    /// * `font_data` - TrueType/OpenType file bytes
    pub fn add_font(&mut self, name: &str, font_data: &[u8]) -> Result<()> {
        self.register_font_family(name, FontFamilyBuilder::new().regular(font_data.to_vec()))
    }

    /// Register a font family with regular and optional bold faces
    pub fn register_font_family(&mut self, name: &str, builder: FontFamilyBuilder) -> Result<()> {
        self.ensure_open()?;
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        let family = builder.build(name)?;
        debug!(
            family = name,
            bold_face = family.bold.is_some(),
            "Registered font family"
        );
        self.font_families.insert(name.to_string(), family);
        Ok(())
    }

    /// Set the current font family and size
    pub fn set_font(&mut self, family: &str, size: f32) -> Result<()> {
        if !self.font_families.contains_key(family) {
            return Err(PdfError::FontNotFound(family.to_string()));
        }
        self.current_family = Some(family.to_string());
        self.current_font_size = size;
        Ok(())
    }

    /// Set the current font size in points
    pub fn set_font_size(&mut self, size: f32) {
        self.current_font_size = size;
    }

    /// Set the current font weight
    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.current_weight = weight;
    }

    /// Set the current text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Current family, or `FontNotFound` if none has been set
    fn current_family(&self) -> Result<&FontFamily> {
        let family_name = self
            .current_family
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("No font family set".to_string()))?;
        self.font_families
            .get(family_name)
            .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))
    }

    /// Face used for the current weight
    fn current_font(&self) -> Result<&FontData> {
        Ok(self.current_family()?.get_variant(self.current_weight))
    }

    /// Get font data by name
    fn get_font_data(&self, name: &str) -> Result<&FontData> {
        self.font_families
            .values()
            .flat_map(|family| family.variants())
            .find(|variant| variant.name == name)
            .ok_or_else(|| PdfError::FontNotFound(name.to_string()))
    }

    fn get_font_data_mut(&mut self, name: &str) -> Result<&mut FontData> {
        self.font_families
            .values_mut()
            .flat_map(|family| family.variants_mut())
            .find(|variant| variant.name == name)
            .ok_or_else(|| PdfError::FontNotFound(name.to_string()))
    }

    /// Get current font's text width for a string
    ///
    /// # Returns
    /// Width in points at the current font size
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        Ok(self
            .current_font()?
            .text_width_points(text, self.current_font_size) as f64)
    }

    /// Vertical metrics of the current font at the current size
    pub fn line_metrics(&self) -> Result<LineMetrics> {
        Ok(self.current_font()?.line_metrics(self.current_font_size))
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.ensure_open()?;
        let page_height = self.page(page)?.height;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let (font_name, synthetic_bold, text_width) = {
            let family = self.current_family()?;
            let font = family.get_variant(self.current_weight);
            (
                font.name.clone(),
                family.needs_synthetic_bold(self.current_weight),
                font.text_width_points(text, self.current_font_size) as f64,
            )
        };

        // Track characters used in font for subsetting
        self.get_font_data_mut(&font_name)?.add_chars(text);

        let font_resource_name = self.get_or_create_font_ref(&font_name, page)?;

        let start_x = match align {
            Align::Left => x,
            Align::Center => x - text_width / 2.0,
            Align::Right => x - text_width,
        };

        let op = BufferedTextOp {
            text: text.to_string(),
            font_name,
            font_resource_name,
            x: start_x,
            y: page_height - y,
            font_size: self.current_font_size,
            color: self.current_text_color,
            synthetic_bold,
        };
        self.page_mut(page)?.content.push(ContentOp::Text(op));
        Ok(())
    }

    /// Get or create a font resource name for a specific page
    ///
    /// The font itself is embedded at save time when all characters are known.
    fn get_or_create_font_ref(&mut self, font_name: &str, page: usize) -> Result<String> {
        let next = self.next_font_resource;
        let fonts = &mut self.page_mut(page)?.fonts;

        if let Some(resource_name) = fonts.get(font_name) {
            return Ok(resource_name.clone());
        }

        let resource_name = format!("F{next}");
        fonts.insert(font_name.to_string(), resource_name.clone());
        self.next_font_resource += 1;
        Ok(resource_name)
    }

    /// Insert an image stretched to fill the box
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `width` - Image width in points
    /// * `height` - Image height in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)?;
        Ok(())
    }

    /// Insert an image with scaling mode
    ///
    /// With `Cover` the part of the image outside the box is clipped.
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - Box X coordinate in points
    /// * `y` - Box Y coordinate in points (from top)
    /// * `width` - Box width in points
    /// * `height` - Box height in points
    /// * `mode` - Scaling mode
    ///
    /// # Returns
    /// Where the image was drawn, relative to the box
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<Fit> {
        self.ensure_open()?;
        let page_height = self.page(page)?.height;

        // Geometry is checked before anything is embedded
        let data_hash = hash_bytes(data);
        let dims = match self.embedded_images.get(&data_hash) {
            Some((_, dims)) => *dims,
            None => image_dimensions(data)?,
        };
        let fit = calculate_placement(dims, width, height, mode)?;

        let image_resource_name = self.get_or_create_image_ref(data, data_hash, page)?;

        let draw_x = x + fit.offset_left;
        let draw_y = page_height - (y + fit.offset_top) - fit.height;
        let operators = if fit.overflows() {
            generate_clipped_image_operators(
                &image_resource_name,
                (x, page_height - y - height, width, height),
                draw_x,
                draw_y,
                fit.width,
                fit.height,
            )
        } else {
            generate_image_operators(&image_resource_name, draw_x, draw_y, fit.width, fit.height)
        };
        self.page_mut(page)?.content.push(ContentOp::Raw(operators));

        Ok(fit)
    }

    /// Get or create an image reference for a specific page
    ///
    /// Returns the resource name (e.g., "Im1"). Images are deduplicated by
    /// hash of their data.
    fn get_or_create_image_ref(
        &mut self,
        data: &[u8],
        data_hash: u64,
        page: usize,
    ) -> Result<String> {
        if let Some(name) = self.page(page)?.images.get(&data_hash) {
            return Ok(name.clone());
        }

        let image_id = match self.embedded_images.get(&data_hash) {
            Some((id, _)) => *id,
            None => {
                let xobject = ImageXObject::from_bytes(data)?;
                let dims = xobject.dimensions();
                let id = self.inner.add_object(xobject.to_pdf_stream());
                debug!(
                    width = dims.width,
                    height = dims.height,
                    color_space = %xobject.color_space,
                    bytes = xobject.data.len(),
                    "Embedded image"
                );
                self.embedded_images.insert(data_hash, (id, dims));
                id
            }
        };

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;

        self.add_page_resource(page, "XObject", &resource_name, image_id)?;
        self.page_mut(page)?
            .images
            .insert(data_hash, resource_name.clone());
        Ok(resource_name)
    }

    /// Get or create an ExtGState with the given fill opacity for a page
    fn get_or_create_graphics_state(&mut self, opacity: f32, page: usize) -> Result<String> {
        let key = (opacity * 1000.0).round() as u32;

        let (name, id) = match self.graphics_states.get(&key) {
            Some(entry) => entry.clone(),
            None => {
                let name = format!("GS{}", self.graphics_states.len() + 1);
                let id = self.inner.add_object(Dictionary::from_iter(vec![
                    ("Type", Object::Name(b"ExtGState".to_vec())),
                    ("ca", Object::Real(opacity)),
                    ("CA", Object::Real(opacity)),
                ]));
                self.graphics_states.insert(key, (name.clone(), id));
                (name, id)
            }
        };

        self.add_page_resource(page, "ExtGState", &name, id)?;
        Ok(name)
    }

    /// Save the document to a file
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Save the document to bytes
    ///
    /// Writing appends a cross-reference stream object, so the finalized
    /// document is written from a copy and every call yields the same bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;
        let mut buffer = Vec::new();
        self.inner
            .clone()
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Write fonts and page content into the document, once
    fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }

        // 1. Subset fonts (creates subsets with only used glyphs)
        self.subset_fonts()?;

        // 2. Encode text with remapped glyph IDs and write content streams
        self.flush_content()?;

        // 3. Embed subsetted fonts into PDF
        self.embed_fonts()?;

        self.finalized = true;
        debug!(
            pages = self.pages.len(),
            objects = self.inner.objects.len(),
            version = %self.inner.version,
            "Finalized document"
        );
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finalized {
            return Err(PdfError::SaveError(
                "document has already been saved".to_string(),
            ));
        }
        Ok(())
    }

    /// Names of fonts that have been used for text
    fn used_font_names(&self) -> Vec<String> {
        let mut font_names: Vec<String> = self
            .font_families
            .values()
            .flat_map(|family| family.variants())
            .filter(|font| !font.used_chars.is_empty())
            .map(|font| font.name.clone())
            .collect();
        font_names.sort();
        font_names
    }

    /// Create subsets for all fonts that have been used
    fn subset_fonts(&mut self) -> Result<()> {
        for font_name in self.used_font_names() {
            self.get_font_data_mut(&font_name)?.create_subset()?;
        }
        Ok(())
    }

    /// Render each page's buffered content into a compressed content stream
    fn flush_content(&mut self) -> Result<()> {
        for index in 0..self.pages.len() {
            let mut content = Vec::new();

            let page = &self.pages[index];
            let page_id = page.id;
            if let Some(color) = page.background {
                content.extend(generate_shape_operators(
                    0.0,
                    0.0,
                    page.width,
                    page.height,
                    &ShapeStyle::filled(color),
                    None,
                ));
            }

            for op in &page.content {
                match op {
                    ContentOp::Raw(operators) => content.extend_from_slice(operators),
                    ContentOp::Text(text_op) => {
                        let font_data = self.get_font_data(&text_op.font_name)?;
                        let text_hex = font_data.encode_text_hex_remapped(&text_op.text);
                        let ctx = TextRenderContext {
                            font_name: text_op.font_resource_name.clone(),
                            font_size: text_op.font_size,
                            color: text_op.color,
                            synthetic_bold: text_op.synthetic_bold,
                        };
                        content.extend(generate_text_operators(
                            &text_hex, text_op.x, text_op.y, &ctx,
                        ));
                    }
                }
            }

            if content.is_empty() {
                continue;
            }

            let compressed = deflate(&content)?;
            let stream = Stream::new(
                Dictionary::from_iter(vec![("Filter", Object::Name(b"FlateDecode".to_vec()))]),
                compressed,
            )
            .with_compression(false);
            let stream_id = self.inner.add_object(stream);
            self.inner
                .get_object_mut(page_id)?
                .as_dict_mut()?
                .set("Contents", Object::Reference(stream_id));
        }
        Ok(())
    }

    /// Embed all used fonts and reference them from the pages using them
    fn embed_fonts(&mut self) -> Result<()> {
        let mut embedded: HashMap<String, ObjectId> = HashMap::new();
        for font_name in self.used_font_names() {
            let id = self.embed_font_object(&font_name)?;
            embedded.insert(font_name, id);
        }

        let page_fonts: Vec<(usize, String, String)> = self
            .pages
            .iter()
            .enumerate()
            .flat_map(|(index, page)| {
                page.fonts
                    .iter()
                    .map(move |(font, resource)| (index + 1, font.clone(), resource.clone()))
            })
            .collect();

        for (page, font_name, resource_name) in page_fonts {
            let font_id = *embedded
                .get(&font_name)
                .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
            self.add_page_resource(page, "Font", &resource_name, font_id)?;
        }
        Ok(())
    }

    /// Embed a single font object into the PDF
    fn embed_font_object(&mut self, font_name: &str) -> Result<ObjectId> {
        let font_data = self.get_font_data(font_name)?;
        let cff = font_data.is_cff();
        let glyphs = font_data.used_chars.len();

        // Generate all PDF objects for the font
        let font_objects = font_data.to_pdf_objects()?;
        let program_bytes = font_objects.font_file_stream.content.len();

        // Add font file stream
        let font_file_id = self.inner.add_object(font_objects.font_file_stream);

        // Update font descriptor with font file reference
        let mut font_descriptor = font_objects.font_descriptor;
        font_descriptor.set(font_objects.font_file_key, Object::Reference(font_file_id));
        let font_descriptor_id = self.inner.add_object(font_descriptor);

        // Update CIDFont with font descriptor reference
        let mut cid_font = font_objects.cid_font;
        cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
        let cid_font_id = self.inner.add_object(cid_font);

        // Update Type0 font with CIDFont and ToUnicode references
        let mut type0_font = font_objects.type0_font;
        type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );

        let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);
        type0_font.set("ToUnicode", Object::Reference(tounicode_id));

        let type0_font_id = self.inner.add_object(type0_font);

        // OpenType font programs in FontFile3 need PDF 1.6
        if cff {
            self.inner.version = "1.6".to_string();
        }

        debug!(
            font = font_name,
            chars = glyphs,
            program_bytes,
            cff,
            "Embedded font"
        );
        Ok(type0_font_id)
    }

    /// Register `id` under `/Resources/<category>/<name>` of a page
    fn add_page_resource(
        &mut self,
        page: usize,
        category: &str,
        name: &str,
        id: ObjectId,
    ) -> Result<()> {
        let page_id = self.page(page)?.id;
        let page_dict = self.inner.get_object_mut(page_id)?.as_dict_mut()?;

        if !page_dict.has(b"Resources") {
            page_dict.set("Resources", Dictionary::new());
        }
        let resources = page_dict.get_mut(b"Resources")?.as_dict_mut()?;

        if !resources.has(category.as_bytes()) {
            resources.set(category, Dictionary::new());
        }
        resources
            .get_mut(category.as_bytes())?
            .as_dict_mut()?
            .set(name, Object::Reference(id));
        Ok(())
    }

    fn page(&self, page: usize) -> Result<&PageState> {
        let page_count = self.pages.len();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(&self.pages[page - 1])
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut PageState> {
        let page_count = self.pages.len();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(&mut self.pages[page - 1])
    }
}

/// PDF text string in UTF-16BE with byte order mark
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn hash_bytes(data: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    data.hash(&mut hasher);
    hasher.finish()
}

/// Zlib-compress data for a `FlateDecode` stream
pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{Direction, TransitionKind, TransitionSpeed};
    use image::{DynamicImage, RgbImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const SLIDE_W: f64 = 959.976;
    const SLIDE_H: f64 = 540.0;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([200, 120, 40]),
        ));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn page_dict(doc: &PdfDocument, page: usize) -> &Dictionary {
        let id = doc.pages[page - 1].id;
        doc.inner().get_object(id).unwrap().as_dict().unwrap()
    }

    fn page_content(doc: &PdfDocument, page: usize) -> String {
        let contents = page_dict(doc, page)
            .get(b"Contents")
            .unwrap()
            .as_reference()
            .unwrap();
        let stream = doc.inner().get_object(contents).unwrap().as_stream().unwrap();
        String::from_utf8(stream.decompressed_content().unwrap()).unwrap()
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = PdfDocument::new();
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.inner().version, "1.5");
    }

    #[test]
    fn test_add_page_numbers_and_tree() {
        let mut doc = PdfDocument::new();
        assert_eq!(doc.add_page(SLIDE_W, SLIDE_H).unwrap(), 1);
        assert_eq!(doc.add_page(SLIDE_W, SLIDE_H).unwrap(), 2);

        assert_eq!(doc.inner().get_pages().len(), 2);
        let pages = doc
            .inner()
            .get_object(doc.pages_id)
            .unwrap()
            .as_dict()
            .unwrap();
        assert_eq!(pages.get(b"Count").unwrap().as_i64().unwrap(), 2);
        assert_eq!(doc.page_size(2).unwrap(), (SLIDE_W, SLIDE_H));
    }

    #[test]
    fn test_add_page_rejects_bad_size() {
        let mut doc = PdfDocument::new();
        assert!(matches!(
            doc.add_page(0.0, SLIDE_H),
            Err(PdfError::Geometry(FitError::InvalidGeometry(_)))
        ));
        assert!(matches!(
            doc.add_page(SLIDE_W, f64::NAN),
            Err(PdfError::Geometry(_))
        ));
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_invalid_page_numbers() {
        let mut doc = PdfDocument::new();
        doc.add_page(SLIDE_W, SLIDE_H).unwrap();

        assert!(matches!(
            doc.set_background(0, Color::black()),
            Err(PdfError::InvalidPage(0, 1))
        ));
        assert!(matches!(
            doc.draw_rect(2, Rect::new(0.0, 0.0, 1.0, 1.0), &ShapeStyle::default()),
            Err(PdfError::InvalidPage(2, 1))
        ));
    }

    #[test]
    fn test_background_painted_first() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();

        // Rectangle drawn before the background is set still lands on top
        doc.draw_rect(
            page,
            Rect::new(10.0, 20.0, 100.0, 50.0),
            &ShapeStyle::filled(Color::white()),
        )
        .unwrap();
        doc.set_background(page, Color::rgb(0.0, 0.0, 0.5)).unwrap();
        doc.to_bytes().unwrap();

        let content = page_content(&doc, page);
        let background = content.find("0 0 0.5 rg").unwrap();
        let rect = content.find("1 1 1 rg").unwrap();
        assert!(background < rect);
        // Top-left y = 20 becomes 540 - 20 - 50
        assert!(content.contains("10 470 100 50 re"));
    }

    #[test]
    fn test_translucent_rect_uses_shared_graphics_state() {
        let mut doc = PdfDocument::new();
        let first = doc.add_page(SLIDE_W, SLIDE_H).unwrap();
        let second = doc.add_page(SLIDE_W, SLIDE_H).unwrap();
        let style = ShapeStyle::filled(Color::black()).with_opacity(0.4);

        doc.draw_rect(first, Rect::new(0.0, 0.0, SLIDE_W, SLIDE_H), &style)
            .unwrap();
        doc.draw_rect(second, Rect::new(0.0, 0.0, SLIDE_W, SLIDE_H), &style)
            .unwrap();

        assert_eq!(doc.graphics_states.len(), 1);
        let (_, gs_id) = doc.graphics_states.values().next().unwrap().clone();
        let gs = doc.inner().get_object(gs_id).unwrap().as_dict().unwrap();
        assert!((gs.get(b"ca").unwrap().as_f32().unwrap() - 0.4).abs() < 1e-6);

        let resources = page_dict(&doc, second)
            .get(b"Resources")
            .unwrap()
            .as_dict()
            .unwrap();
        let ext = resources.get(b"ExtGState").unwrap().as_dict().unwrap();
        assert_eq!(ext.get(b"GS1").unwrap().as_reference().unwrap(), gs_id);
    }

    #[test]
    fn test_transition_written_to_page() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();
        let transition = Transition::new(
            TransitionKind::Push(Direction::Left),
            TransitionSpeed::Medium,
        )
        .advance_after(std::time::Duration::from_secs(5));

        doc.set_transition(page, &transition).unwrap();

        let dict = page_dict(&doc, page);
        let trans = dict.get(b"Trans").unwrap().as_dict().unwrap();
        assert_eq!(trans.get(b"S").unwrap().as_name().unwrap(), b"Push");
        assert_eq!(trans.get(b"Di").unwrap().as_i64().unwrap(), 180);
        assert_eq!(dict.get(b"Dur").unwrap().as_f32().unwrap(), 5.0);

        // Replacing with a click-only transition drops the duration
        doc.set_transition(
            page,
            &Transition::new(TransitionKind::Fade, TransitionSpeed::Slow),
        )
        .unwrap();
        assert!(page_dict(&doc, page).get(b"Dur").is_err());
    }

    #[test]
    fn test_image_dedup_across_pages() {
        let mut doc = PdfDocument::new();
        let first = doc.add_page(SLIDE_W, SLIDE_H).unwrap();
        let second = doc.add_page(SLIDE_W, SLIDE_H).unwrap();
        let data = png(40, 30);

        doc.insert_image(&data, first, 0.0, 0.0, 100.0, 100.0).unwrap();
        doc.insert_image(&data, first, 200.0, 0.0, 100.0, 100.0).unwrap();
        doc.insert_image(&data, second, 0.0, 0.0, 100.0, 100.0).unwrap();

        assert_eq!(doc.embedded_images.len(), 1);
        assert_eq!(doc.pages[0].images.len(), 1);
        assert_eq!(doc.pages[1].images.len(), 1);
    }

    #[test]
    fn test_contain_image_centered_in_box() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();

        // 4:3 image into a 300 x 300 box
        let fit = doc
            .insert_image_scaled(
                &png(40, 30),
                page,
                100.0,
                50.0,
                300.0,
                300.0,
                ImageScaleMode::Contain,
            )
            .unwrap();
        assert_eq!(fit.width, 300.0);
        assert_eq!(fit.height, 225.0);
        assert_eq!(fit.offset_top, 37.5);

        doc.to_bytes().unwrap();
        let content = page_content(&doc, page);
        // y = 540 - (50 + 37.5) - 225
        assert!(content.contains("300 0 0 225 100 227.5 cm"));
        assert!(!content.contains(" W n"));
    }

    #[test]
    fn test_cover_image_clipped_to_box() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();

        let fit = doc
            .insert_image_scaled(
                &png(10, 20),
                page,
                0.0,
                0.0,
                SLIDE_W,
                SLIDE_H,
                ImageScaleMode::Cover,
            )
            .unwrap();
        assert!(fit.overflows());
        assert!((fit.width - SLIDE_W).abs() < 1e-9);

        doc.to_bytes().unwrap();
        assert!(page_content(&doc, page).contains("0 0 959.976 540 re W n"));
    }

    #[test]
    fn test_invalid_geometry_embeds_nothing() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();
        let objects_before = doc.inner().objects.len();

        let result = doc.insert_image_scaled(
            &png(10, 10),
            page,
            0.0,
            0.0,
            0.0,
            100.0,
            ImageScaleMode::Contain,
        );

        assert!(matches!(result, Err(PdfError::Geometry(_))));
        assert_eq!(doc.inner().objects.len(), objects_before);
        assert!(doc.embedded_images.is_empty());
    }

    #[test]
    fn test_undecodable_image() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();

        let result = doc.insert_image(b"not an image", page, 0.0, 0.0, 10.0, 10.0);
        assert!(matches!(result, Err(PdfError::ImageError(_))));
    }

    #[test]
    fn test_text_requires_font() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();

        assert!(matches!(
            doc.insert_text("朝聖", page, 0.0, 0.0, Align::Left),
            Err(PdfError::FontNotFound(_))
        ));
        assert!(matches!(
            doc.set_font("missing", 12.0),
            Err(PdfError::FontNotFound(_))
        ));
        assert!(doc.get_text_width("abc").is_err());
    }

    #[test]
    fn test_title_and_full_screen() {
        let mut doc = PdfDocument::new();
        doc.set_title("朝聖之路").unwrap();
        doc.set_full_screen(true).unwrap();

        let info_id = doc.inner().trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.inner().get_object(info_id).unwrap().as_dict().unwrap();
        match info.get(b"Title").unwrap() {
            Object::String(bytes, _) => {
                assert_eq!(&bytes[..4], &[0xFE, 0xFF, 0x67, 0x1D]);
            }
            other => panic!("unexpected title object {other:?}"),
        }

        let catalog = doc
            .inner()
            .get_object(doc.catalog_id)
            .unwrap()
            .as_dict()
            .unwrap();
        assert_eq!(
            catalog.get(b"PageMode").unwrap().as_name().unwrap(),
            b"FullScreen"
        );
    }

    #[test]
    fn test_save_is_idempotent_and_closes_document() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();
        doc.set_background(page, Color::black()).unwrap();

        let first = doc.to_bytes().unwrap();
        let second = doc.to_bytes().unwrap();
        assert!(first.starts_with(b"%PDF-1.5"));
        assert_eq!(first, second);

        assert!(matches!(
            doc.add_page(SLIDE_W, SLIDE_H),
            Err(PdfError::SaveError(_))
        ));
    }

    #[test]
    fn test_saving_leaves_object_table_untouched() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(SLIDE_W, SLIDE_H).unwrap();
        doc.set_background(page, Color::white()).unwrap();

        let first = doc.to_bytes().unwrap();
        let objects = doc.inner().objects.len();
        let max_id = doc.inner().max_id;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pdf");
        doc.save(&path).unwrap();
        let second = doc.to_bytes().unwrap();

        assert_eq!(doc.inner().objects.len(), objects);
        assert_eq!(doc.inner().max_id, max_id);
        assert_eq!(std::fs::read(&path).unwrap(), first);
        assert_eq!(second, first);
    }

    #[test]
    fn test_deflate_roundtrip() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let compressed = deflate(b"q 0 0 1 rg Q").unwrap();
        let mut out = String::new();
        ZlibDecoder::new(&compressed[..])
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "q 0 0 1 rg Q");
    }
}
