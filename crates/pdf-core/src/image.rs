//! Image handling for PDF documents

use crate::{PdfError, Result};
use image::{DynamicImage, ImageDecoder, ImageReader};
use image_fit::{place, Fit, FitError, FitMode, ImageSize};
use lopdf::{Dictionary, Object, Stream};
use std::io::Cursor;

impl From<image::ImageError> for PdfError {
    fn from(err: image::ImageError) -> Self {
        PdfError::ImageError(err.to_string())
    }
}

/// Detected image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Image scaling mode for insert_image_scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageScaleMode {
    /// Stretch to exact dimensions
    #[default]
    Stretch,
    /// Fit within the box, preserving aspect ratio, centered
    Contain,
    /// Fill the box, preserving aspect ratio, centered and clipped to the box
    Cover,
}

impl ImageScaleMode {
    fn fit_mode(self) -> Option<FitMode> {
        match self {
            ImageScaleMode::Stretch => None,
            ImageScaleMode::Contain => Some(FitMode::Contain),
            ImageScaleMode::Cover => Some(FitMode::Cover),
        }
    }
}

/// Calculate where an image lands inside a box
///
/// # Arguments
/// * `dims` - Intrinsic image size in pixels
/// * `box_width`, `box_height` - Target box in points
/// * `mode` - Scaling mode
///
/// # Returns
/// Drawn size and offset from the box's top-left corner, in points
pub fn calculate_placement(
    dims: ImageDimensions,
    box_width: f64,
    box_height: f64,
    mode: ImageScaleMode,
) -> Result<Fit> {
    match mode.fit_mode() {
        Some(fit_mode) => Ok(place(fit_mode, dims.into(), box_width, box_height)?),
        None => {
            if !(box_width.is_finite() && box_height.is_finite())
                || box_width <= 0.0
                || box_height <= 0.0
            {
                return Err(FitError::InvalidGeometry(format!(
                    "box must have positive finite dimensions, got {box_width} x {box_height}"
                ))
                .into());
            }
            Ok(Fit::centered(box_width, box_height, box_width, box_height))
        }
    }
}

/// Detect image format from magic bytes
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    if data.len() < 8 {
        return Err(PdfError::ImageError("Image data too short".to_string()));
    }

    // JPEG starts with FF D8 FF
    if data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
        return Ok(ImageFormat::Jpeg);
    }

    if data[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Ok(ImageFormat::Png);
    }

    Err(PdfError::ImageError("Unknown image format".to_string()))
}

/// Image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl From<ImageDimensions> for ImageSize {
    fn from(dims: ImageDimensions) -> Self {
        ImageSize::new(dims.width, dims.height)
    }
}

/// JPEG info including dimensions and color components
#[derive(Debug, Clone, Copy)]
struct JpegInfo {
    width: u32,
    height: u32,
    num_components: u8,
    /// Adobe APP14 marker present (CMYK stored inverted)
    adobe: bool,
}

/// Image XObject for PDF embedding
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    /// Color space ("DeviceRGB", "DeviceGray", "DeviceCMYK")
    pub color_space: String,
    pub bits_per_component: u8,
    /// PDF filter ("DCTDecode" for JPEG, "FlateDecode" for PNG)
    pub filter: String,
    /// Decode array, set for inverted CMYK JPEGs
    pub decode: Option<Vec<f32>>,
    /// Raw image data (compressed)
    pub data: Vec<u8>,
}

/// Read image dimensions from the file header without decoding pixels
///
/// # Arguments
/// * `data` - Image file bytes (JPEG or PNG)
pub fn image_dimensions(data: &[u8]) -> Result<ImageDimensions> {
    match detect_format(data)? {
        ImageFormat::Jpeg => {
            let info = get_jpeg_info(data)?;
            Ok(ImageDimensions {
                width: info.width,
                height: info.height,
            })
        }
        ImageFormat::Png => get_png_dimensions(data),
    }
}

/// Get JPEG info from the SOF segment
fn get_jpeg_info(data: &[u8]) -> Result<JpegInfo> {
    // SOF segment: marker (2), length (2), precision (1), height (2),
    // width (2), number of components (1)
    let mut adobe = false;
    let mut i = 2;
    while i + 10 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }

        let marker = data[i + 1];

        // Fill bytes and standalone markers carry no length
        if marker == 0xFF {
            i += 1;
            continue;
        }
        if marker == 0x01 || (0xD0..=0xD8).contains(&marker) {
            i += 2;
            continue;
        }

        if marker == 0xEE && &data[i + 4..i + 9] == b"Adobe" {
            adobe = true;
        }

        // SOF markers (baseline, progressive, etc.)
        if (0xC0..=0xCF).contains(&marker) && marker != 0xC4 && marker != 0xC8 && marker != 0xCC {
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            let num_components = data[i + 9];
            return Ok(JpegInfo {
                width,
                height,
                num_components,
                adobe,
            });
        }

        let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if length < 2 {
            break;
        }
        i += 2 + length;
    }

    Err(PdfError::ImageError("Could not parse JPEG info".to_string()))
}

/// Get PNG dimensions from the IHDR chunk
fn get_png_dimensions(data: &[u8]) -> Result<ImageDimensions> {
    // IHDR starts at byte 8: length (4) + "IHDR" (4) + width (4) + height (4)
    if data.len() < 24 {
        return Err(PdfError::ImageError("PNG data too short".to_string()));
    }

    if &data[12..16] != b"IHDR" {
        return Err(PdfError::ImageError(
            "Invalid PNG: IHDR not found".to_string(),
        ));
    }

    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);

    Ok(ImageDimensions { width, height })
}

impl ImageXObject {
    /// Create XObject from image bytes, detecting the format
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match detect_format(data)? {
            ImageFormat::Jpeg => Self::from_jpeg(data),
            ImageFormat::Png => Self::from_png(data),
        }
    }

    /// Create XObject from JPEG data
    ///
    /// JPEG images are embedded directly with the DCTDecode filter.
    pub fn from_jpeg(data: &[u8]) -> Result<Self> {
        let info = get_jpeg_info(data)?;

        let (color_space, decode) = match info.num_components {
            1 => ("DeviceGray", None),
            4 if info.adobe => (
                "DeviceCMYK",
                Some(vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]),
            ),
            4 => ("DeviceCMYK", None),
            _ => ("DeviceRGB", None),
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            color_space: color_space.to_string(),
            bits_per_component: 8,
            filter: "DCTDecode".to_string(),
            decode,
            data: data.to_vec(),
        })
    }

    /// Create XObject from PNG data
    ///
    /// PNG images are decoded and re-encoded as raw samples with FlateDecode.
    /// Alpha channels are blended onto a white background.
    pub fn from_png(data: &[u8]) -> Result<Self> {
        let cursor = Cursor::new(data);
        let reader = ImageReader::new(cursor).with_guessed_format()?;
        let decoder = reader.into_decoder()?;

        let dims = decoder.dimensions();
        let color_type = decoder.color_type();

        let image = DynamicImage::from_decoder(decoder)?;

        let (raw_data, color_space) = match color_type {
            image::ColorType::L8 | image::ColorType::L16 => {
                let gray = image.to_luma8();
                (gray.into_raw(), "DeviceGray")
            }
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = image.to_luma_alpha8();
                let gray_data = la
                    .pixels()
                    .map(|pixel| blend_on_white(pixel[0], pixel[1]))
                    .collect();
                (gray_data, "DeviceGray")
            }
            image::ColorType::Rgba8 | image::ColorType::Rgba16 => {
                let rgba = image.to_rgba8();
                let mut rgb_data = Vec::with_capacity((dims.0 * dims.1 * 3) as usize);
                for pixel in rgba.pixels() {
                    rgb_data.push(blend_on_white(pixel[0], pixel[3]));
                    rgb_data.push(blend_on_white(pixel[1], pixel[3]));
                    rgb_data.push(blend_on_white(pixel[2], pixel[3]));
                }
                (rgb_data, "DeviceRGB")
            }
            _ => {
                let rgb = image.to_rgb8();
                (rgb.into_raw(), "DeviceRGB")
            }
        };

        let data = crate::document::deflate(&raw_data)?;

        Ok(Self {
            width: dims.0,
            height: dims.1,
            color_space: color_space.to_string(),
            bits_per_component: 8,
            filter: "FlateDecode".to_string(),
            decode: None,
            data,
        })
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Convert to lopdf Stream object
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();

        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set(
            "ColorSpace",
            Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", self.bits_per_component as i64);
        dict.set("Filter", Object::Name(self.filter.as_bytes().to_vec()));
        if let Some(decode) = &self.decode {
            dict.set(
                "Decode",
                Object::Array(decode.iter().map(|&v| Object::Real(v)).collect()),
            );
        }
        dict.set("Length", self.data.len() as i64);

        // Already compressed, lopdf must not compress again
        Stream::new(dict, self.data.clone()).with_compression(false)
    }
}

fn blend_on_white(value: u8, alpha: u8) -> u8 {
    let alpha = alpha as f32 / 255.0;
    (value as f32 * alpha + 255.0 * (1.0 - alpha)) as u8
}

/// Generate operators to draw image at position
///
/// # Arguments
/// * `image_name` - Image resource name (e.g., "Im1")
/// * `x` - X coordinate in points
/// * `y` - Y coordinate in points (from bottom, PDF coordinates)
/// * `width` - Image width in points
/// * `height` - Image height in points
pub fn generate_image_operators(
    image_name: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<u8> {
    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n").into_bytes()
}

/// Generate operators to draw an image clipped to a rectangle
///
/// `clip` is `(x, y, width, height)` in PDF coordinates; the image keeps its
/// full drawn size and only the part inside `clip` is visible.
pub fn generate_clipped_image_operators(
    image_name: &str,
    clip: (f64, f64, f64, f64),
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<u8> {
    let (cx, cy, cw, ch) = clip;
    format!(
        "q\n{cx} {cy} {cw} {ch} re W n\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n"
    )
    .into_bytes()
}
