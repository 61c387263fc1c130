//! Integration tests for pdf-core
//!
//! These tests build documents end to end and inspect the saved PDF with lopdf.

use flate2::read::ZlibDecoder;
use lopdf::{Document, Object};
use pdf_core::{
    units::inches, Align, Color, Direction, FontFamilyBuilder, FontWeight, ImageScaleMode,
    PdfDocument, PdfError, Rect, ShapeStyle, Transition, TransitionKind, TransitionSpeed,
};
use pretty_assertions::assert_eq;
use std::io::Read;

/// A TrueType font for text tests, from `PDF_CORE_TEST_FONT` or DejaVu Sans
///
/// Returns `None` when no font is available so font tests can be skipped.
fn get_test_font_data() -> Option<Vec<u8>> {
    let path = std::env::var("PDF_CORE_TEST_FONT")
        .unwrap_or_else(|_| "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string());
    std::fs::read(path).ok()
}

/// Create a minimal JPEG image for testing
fn create_test_jpeg() -> Vec<u8> {
    // Minimal JPEG with SOI, SOF0, and EOI markers
    vec![
        0xFF, 0xD8, // SOI marker
        0xFF, 0xC0, // SOF0 marker (baseline DCT)
        0x00, 0x11, // Length (17 bytes)
        0x08, // Precision (8 bits)
        0x00, 0x20, // Height (32 pixels)
        0x00, 0x18, // Width (24 pixels)
        0x03, // Number of components (RGB)
        0x01, 0x22, 0x00, // Component 1 (Y, subsampling 2x2)
        0x02, 0x11, 0x01, // Component 2 (Cb, subsampling 2x1)
        0x03, 0x11, 0x01, // Component 3 (Cr, subsampling 2x1)
        0xFF, 0xD9, // EOI marker
    ]
}

/// Create a small RGBA PNG image for testing
fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageBuffer, Rgba};

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(width, height, Rgba([20, 40, 200, 128]));
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .expect("Failed to create PNG");
    buffer
}

/// Channel value of `value` at `alpha` composited onto white
fn blend(value: u8, alpha: u8) -> u8 {
    let alpha = alpha as f32 / 255.0;
    (value as f32 * alpha + 255.0 * (1.0 - alpha)) as u8
}

fn slide_document(pages: usize) -> PdfDocument {
    let mut doc = PdfDocument::new();
    for _ in 0..pages {
        doc.add_page(inches(13.333), inches(7.5))
            .expect("Failed to add page");
    }
    doc
}

fn reload(doc: &mut PdfDocument) -> Document {
    let bytes = doc.to_bytes().expect("Failed to save PDF");
    Document::load_mem(&bytes).expect("Failed to re-open PDF")
}

fn page_dict(doc: &Document, page: u32) -> &lopdf::Dictionary {
    let id = doc.get_pages()[&page];
    doc.get_object(id).unwrap().as_dict().unwrap()
}

fn page_content(doc: &Document, page: u32) -> String {
    let id = doc.get_pages()[&page];
    String::from_utf8(doc.get_page_content(id).unwrap()).unwrap()
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> &'a lopdf::Dictionary {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap().as_dict().unwrap(),
        other => other.as_dict().unwrap(),
    }
}

#[test]
fn test_widescreen_pages_roundtrip() {
    let mut doc = slide_document(3);
    let saved = reload(&mut doc);

    assert_eq!(saved.get_pages().len(), 3);
    let media_box = page_dict(&saved, 2).get(b"MediaBox").unwrap().as_array().unwrap();
    let width = media_box[2].as_float().unwrap();
    let height = media_box[3].as_float().unwrap();
    assert!((width - 959.976).abs() < 1e-3);
    assert!((height - 540.0).abs() < 1e-3);
}

#[test]
fn test_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.pdf");

    let mut doc = slide_document(1);
    doc.set_background(1, Color::from_rgb(0x1A, 0x1A, 0x2E))
        .unwrap();
    doc.save(&path).expect("Failed to save PDF");

    let saved = Document::load(&path).expect("Failed to load saved PDF");
    assert_eq!(saved.get_pages().len(), 1);
}

#[test]
fn test_transitions_on_every_page() {
    let mut doc = slide_document(2);
    let fade = Transition::new(TransitionKind::Fade, TransitionSpeed::Slow);
    let push_left = TransitionKind::Push(Direction::Left);
    let push = Transition::new(push_left, TransitionSpeed::Medium);
    doc.set_transition(1, &fade).unwrap();
    doc.set_transition(2, &push).unwrap();

    let saved = reload(&mut doc);

    let trans = resolve_dict(&saved, page_dict(&saved, 1).get(b"Trans").unwrap());
    assert_eq!(trans.get(b"S").unwrap().as_name().unwrap(), b"Fade");
    assert_eq!(trans.get(b"D").unwrap().as_float().unwrap(), 1.0);

    let trans = resolve_dict(&saved, page_dict(&saved, 2).get(b"Trans").unwrap());
    assert_eq!(trans.get(b"S").unwrap().as_name().unwrap(), b"Push");
    assert_eq!(trans.get(b"Di").unwrap().as_i64().unwrap(), 180);
    assert_eq!(trans.get(b"D").unwrap().as_float().unwrap(), 0.75);
}

#[test]
fn test_overlay_opacity_graphics_state() {
    let mut doc = slide_document(1);
    let navy = Color::from_rgb(0x1A, 0x1A, 0x2E);
    doc.draw_rect(
        1,
        Rect::new(0.0, 0.0, inches(13.333), inches(7.5)),
        &ShapeStyle::filled(navy).with_opacity(0.4),
    )
    .unwrap();

    let saved = reload(&mut doc);

    let resources = resolve_dict(&saved, page_dict(&saved, 1).get(b"Resources").unwrap());
    let ext = resolve_dict(&saved, resources.get(b"ExtGState").unwrap());
    let gs = resolve_dict(&saved, ext.get(b"GS1").unwrap());
    assert!((gs.get(b"ca").unwrap().as_float().unwrap() - 0.4).abs() < 1e-6);

    assert!(page_content(&saved, 1).contains("/GS1 gs"));
}

#[test]
fn test_rounded_panel_with_stroke() {
    let mut doc = slide_document(1);
    let style = ShapeStyle::filled(Color::from_rgb(0x25, 0x25, 0x3A))
        .with_stroke(Color::from_rgb(0x40, 0x3A, 0x28), 1.0)
        .with_corner_radius(20.0);
    doc.draw_rect(1, Rect::new(100.0, 100.0, 400.0, 120.0), &style)
        .unwrap();

    let saved = reload(&mut doc);
    let content = page_content(&saved, 1);

    assert!(content.contains("1 w"));
    assert_eq!(content.matches(" c\n").count(), 4);
    assert!(content.contains("\nB\n"));
}

#[test]
fn test_insert_image_jpeg() {
    let mut doc = slide_document(1);
    let fit = doc
        .insert_image_scaled(
            &create_test_jpeg(),
            1,
            72.0,
            72.0,
            300.0,
            300.0,
            ImageScaleMode::Contain,
        )
        .expect("Failed to insert JPEG");

    // 24 x 32 portrait image is bound by the box height
    assert_eq!(fit.height, 300.0);
    assert_eq!(fit.width, 225.0);
    assert_eq!(fit.offset_left, 37.5);

    let saved = reload(&mut doc);
    let resources = resolve_dict(&saved, page_dict(&saved, 1).get(b"Resources").unwrap());
    let xobjects = resolve_dict(&saved, resources.get(b"XObject").unwrap());
    let image_id = xobjects.get(b"Im1").unwrap().as_reference().unwrap();
    let image = saved.get_object(image_id).unwrap().as_stream().unwrap();

    assert_eq!(
        image.dict.get(b"Filter").unwrap().as_name().unwrap(),
        b"DCTDecode"
    );
    assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 24);
    assert_eq!(
        image.dict.get(b"ColorSpace").unwrap().as_name().unwrap(),
        b"DeviceRGB"
    );
}

#[test]
fn test_insert_image_png() {
    let mut doc = slide_document(1);
    doc.insert_image(&create_test_png(16, 8), 1, 0.0, 0.0, 160.0, 80.0)
        .expect("Failed to insert PNG");

    let saved = reload(&mut doc);
    let resources = resolve_dict(&saved, page_dict(&saved, 1).get(b"Resources").unwrap());
    let xobjects = resolve_dict(&saved, resources.get(b"XObject").unwrap());
    let image_id = xobjects.get(b"Im1").unwrap().as_reference().unwrap();
    let image = saved.get_object(image_id).unwrap().as_stream().unwrap();

    assert_eq!(
        image.dict.get(b"Filter").unwrap().as_name().unwrap(),
        b"FlateDecode"
    );
    // Alpha is flattened onto white, three bytes per pixel remain
    let mut samples = Vec::new();
    ZlibDecoder::new(&image.content[..])
        .read_to_end(&mut samples)
        .unwrap();
    assert_eq!(samples.len(), 16 * 8 * 3);
    let first_pixel = [blend(20, 128), blend(40, 128), blend(200, 128)];
    assert_eq!(&samples[..3], &first_pixel);
}

#[test]
fn test_image_deduplication() {
    let mut doc = slide_document(2);
    let png = create_test_png(10, 10);

    for page in 1..=2 {
        doc.insert_image(&png, page, 0.0, 0.0, 50.0, 50.0).unwrap();
    }

    let saved = reload(&mut doc);
    let image_count = saved
        .objects
        .values()
        .filter(|obj| match obj {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false),
            _ => false,
        })
        .count();
    assert_eq!(image_count, 1);
}

#[test]
fn test_cover_image_overflow_is_clipped() {
    let mut doc = slide_document(1);
    // Very tall image over the whole slide
    let fit = doc
        .insert_image_scaled(
            &create_test_png(46, 100),
            1,
            0.0,
            0.0,
            inches(13.333),
            inches(7.5),
            ImageScaleMode::Cover,
        )
        .unwrap();

    assert!((fit.width - inches(13.333)).abs() < 1e-9);
    assert!(fit.height > inches(7.5));
    assert!((fit.offset_top * 2.0 + fit.height - inches(7.5)).abs() < 1e-9);

    let saved = reload(&mut doc);
    assert!(page_content(&saved, 1).contains("re W n"));
}

#[test]
fn test_invalid_page_number() {
    let mut doc = slide_document(1);

    let result = doc.insert_image(&create_test_png(4, 4), 5, 0.0, 0.0, 10.0, 10.0);
    assert!(matches!(result, Err(PdfError::InvalidPage(5, 1))));

    let result = doc.set_transition(
        0,
        &Transition::new(TransitionKind::Dissolve, TransitionSpeed::Slow),
    );
    assert!(matches!(result, Err(PdfError::InvalidPage(0, 1))));
}

#[test]
fn test_zero_box_is_geometry_error() {
    let mut doc = slide_document(1);
    let result = doc.insert_image_scaled(
        &create_test_jpeg(),
        1,
        0.0,
        0.0,
        0.0,
        100.0,
        ImageScaleMode::Cover,
    );
    assert!(matches!(result, Err(PdfError::Geometry(_))));
}

#[test]
fn test_font_not_found() {
    let mut doc = slide_document(1);
    let result = doc.set_font("nonexistent", 12.0);
    assert!(matches!(result, Err(PdfError::FontNotFound(_))));
}

#[test]
fn test_no_font_set() {
    let mut doc = slide_document(1);
    let result = doc.insert_text("Test", 1, 100.0, 100.0, Align::Left);
    assert!(matches!(result, Err(PdfError::FontNotFound(_))));
}

#[test]
fn test_invalid_font_data() {
    let mut doc = slide_document(1);
    let result = doc.add_font("broken", b"definitely not a font");
    assert!(matches!(result, Err(PdfError::FontParseError(_))));
}

#[test]
fn test_insert_text_embeds_subset_font() {
    let Some(font_data) = get_test_font_data() else {
        return;
    };

    let mut doc = slide_document(2);
    doc.add_font("body", &font_data).expect("Failed to add font");
    doc.set_font("body", 24.0).expect("Failed to set font");
    doc.set_text_color(Color::white());
    doc.insert_text("Camino", 1, 72.0, 100.0, Align::Left)
        .expect("Failed to insert text");
    doc.insert_text("Santiago", 2, 72.0, 100.0, Align::Left)
        .expect("Failed to insert text");

    let saved = reload(&mut doc);

    let resources = resolve_dict(&saved, page_dict(&saved, 1).get(b"Resources").unwrap());
    let fonts = resolve_dict(&saved, resources.get(b"Font").unwrap());
    let type0 = resolve_dict(&saved, fonts.get(b"F1").unwrap());
    assert_eq!(type0.get(b"Subtype").unwrap().as_name().unwrap(), b"Type0");
    assert_eq!(
        type0.get(b"Encoding").unwrap().as_name().unwrap(),
        b"Identity-H"
    );
    assert!(type0.get(b"ToUnicode").is_ok());

    let descendants = type0.get(b"DescendantFonts").unwrap().as_array().unwrap();
    let cid_font = resolve_dict(&saved, &descendants[0]);
    assert_eq!(
        cid_font.get(b"Subtype").unwrap().as_name().unwrap(),
        b"CIDFontType2"
    );

    let descriptor = resolve_dict(&saved, cid_font.get(b"FontDescriptor").unwrap());
    let font_file_id = descriptor.get(b"FontFile2").unwrap().as_reference().unwrap();
    let font_file = saved.get_object(font_file_id).unwrap().as_stream().unwrap();
    assert!(font_file.content.len() < font_data.len());

    let base_font = type0.get(b"BaseFont").unwrap().as_name().unwrap();
    assert_eq!(base_font[6], b'+');

    // Second page references the same font under its own resource name
    let resources = resolve_dict(&saved, page_dict(&saved, 2).get(b"Resources").unwrap());
    let fonts = resolve_dict(&saved, resources.get(b"Font").unwrap());
    assert!(fonts.get(b"F2").is_ok());

    let content = page_content(&saved, 1);
    assert!(content.contains("/F1 24 Tf"));
    assert!(content.contains("1 1 1 rg"));
    assert!(content.contains("72 440 Td"));
}

#[test]
fn test_insert_text_alignment() {
    let Some(font_data) = get_test_font_data() else {
        return;
    };

    let mut doc = slide_document(1);
    doc.add_font("body", &font_data).unwrap();
    doc.set_font("body", 18.0).unwrap();

    let width = doc.get_text_width("Finisterre").unwrap();
    assert!(width > 0.0);

    doc.insert_text("Finisterre", 1, 480.0, 200.0, Align::Center)
        .unwrap();
    doc.insert_text("Finisterre", 1, 900.0, 300.0, Align::Right)
        .unwrap();

    let saved = reload(&mut doc);
    let content = page_content(&saved, 1);
    assert!(content.contains(&format!("{} 340 Td", 480.0 - width / 2.0)));
    assert!(content.contains(&format!("{} 240 Td", 900.0 - width)));
}

#[test]
fn test_text_width_scales_with_size() {
    let Some(font_data) = get_test_font_data() else {
        return;
    };

    let mut doc = PdfDocument::new();
    doc.add_font("body", &font_data).unwrap();
    doc.set_font("body", 10.0).unwrap();
    let small = doc.get_text_width("Porto").unwrap();
    doc.set_font_size(20.0);
    let large = doc.get_text_width("Porto").unwrap();

    assert!((large - 2.0 * small).abs() < 1e-3);
    assert_eq!(doc.get_text_width("").unwrap(), 0.0);

    let metrics = doc.line_metrics().unwrap();
    assert!(metrics.ascent > 0.0);
    assert!(metrics.descent < 0.0);
    assert!(metrics.ascent < 20.0);
}

#[test]
fn test_synthetic_bold_without_bold_face() {
    let Some(font_data) = get_test_font_data() else {
        return;
    };

    let mut doc = slide_document(1);
    doc.register_font_family("body", FontFamilyBuilder::new().regular(font_data))
        .unwrap();
    doc.set_font("body", 32.0).unwrap();
    doc.insert_text("Camino", 1, 72.0, 100.0, Align::Left)
        .unwrap();
    doc.set_font_weight(FontWeight::Bold);
    doc.insert_text("Camino", 1, 72.0, 200.0, Align::Left)
        .unwrap();

    let saved = reload(&mut doc);
    let content = page_content(&saved, 1);

    // Both runs share the regular face, only the second is emboldened
    assert_eq!(content.matches("/F1 32 Tf").count(), 2);
    assert_eq!(content.matches("2 Tr").count(), 1);
}

#[test]
fn test_duplicate_family_rejected() {
    let Some(font_data) = get_test_font_data() else {
        return;
    };

    let mut doc = PdfDocument::new();
    doc.add_font("body", &font_data).unwrap();
    assert!(matches!(
        doc.add_font("body", &font_data),
        Err(PdfError::FontAlreadyExists(_))
    ));
}

#[test]
fn test_empty_text_is_noop() {
    let Some(font_data) = get_test_font_data() else {
        return;
    };

    let mut doc = slide_document(1);
    doc.add_font("body", &font_data).unwrap();
    doc.set_font("body", 12.0).unwrap();
    doc.insert_text("", 1, 0.0, 0.0, Align::Left).unwrap();

    let saved = reload(&mut doc);
    // No text means no font is embedded and the page has no content
    assert!(page_dict(&saved, 1).get(b"Contents").is_err());
}

#[test]
fn test_title_round_trips() {
    let mut doc = slide_document(1);
    doc.set_title("朝聖之路").unwrap();
    doc.set_full_screen(true).unwrap();

    let saved = reload(&mut doc);
    let info = resolve_dict(&saved, saved.trailer.get(b"Info").unwrap());
    let title = match info.get(b"Title").unwrap() {
        Object::String(bytes, _) => bytes.clone(),
        other => panic!("unexpected title {other:?}"),
    };
    let units: Vec<u16> = title[2..]
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    assert_eq!(String::from_utf16(&units).unwrap(), "朝聖之路");
}
