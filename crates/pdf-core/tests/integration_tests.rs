//! Integration tests for pdf-core
//!
//! These tests build documents end-to-end and parse the bytes back with lopdf.

use lopdf::{Dictionary, Document};
use pdf_core::{
    wrap_spans, Align, Color, DocumentInfo, FontFamily, FontFamilyBuilder, FontWeight, PageSize,
    PdfDocument, PdfError, Rect, TextSpan,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn load_fonts() -> FontFamily {
    let regular = std::fs::read("../../fonts/DejaVuSans.ttf").expect("Failed to read test font file");
    let bold =
        std::fs::read("../../fonts/DejaVuSans-Bold.ttf").expect("Failed to read test font file");
    FontFamilyBuilder::new()
        .regular(regular)
        .bold(bold)
        .build("DejaVu Sans")
        .unwrap()
}

fn new_document() -> PdfDocument {
    PdfDocument::new(PageSize::A4, load_fonts())
}

/// Build a one-page document exercising every drawing primitive
fn build_sample() -> PdfDocument {
    let mut doc = new_document();
    doc.set_info(DocumentInfo {
        title: Some("Sample CV".to_string()),
        author: Some("Sample Person".to_string()),
        producer: Some("pdf-core".to_string()),
    });

    let page = doc.add_page();
    doc.fill_rect(page, Rect::new(18.0, 25.0, 559.28, 120.0), 8.0, Color::from_rgb(0x20, 0x23, 0x2A))
        .unwrap();
    doc.set_font(FontWeight::Bold, 26.0);
    doc.set_text_color(Color::white());
    doc.insert_text("Sample Person", page, 297.64, 70.0, Align::Center)
        .unwrap();

    doc.set_font(FontWeight::Regular, 11.0);
    doc.insert_text("LinkedIn Profile", page, 100.0, 120.0, Align::Left)
        .unwrap();
    doc.add_link(page, Rect::new(100.0, 110.0, 80.0, 14.0), "https://example.com/in/sample")
        .unwrap();

    doc.stroke_rect(page, Rect::new(18.0, 200.0, 559.28, 80.0), 6.0, Color::black(), 1.0)
        .unwrap();
    doc.draw_line(page, (18.0, 180.0), (577.28, 180.0), Color::from_rgb(0xE0, 0xE0, 0xE0), 1.0)
        .unwrap();

    doc
}

fn page_content(doc: &Document, page_number: u32) -> String {
    let pages = doc.get_pages();
    let page_id = pages[&page_number];
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let contents_id = page.get(b"Contents").unwrap().as_reference().unwrap();
    let stream = doc.get_object(contents_id).unwrap().as_stream().unwrap();
    String::from_utf8(stream.decompressed_content().unwrap()).unwrap()
}

/// Type0 font dictionaries of a page, by resource name
fn page_fonts(doc: &Document, page_number: u32) -> BTreeMap<String, &Dictionary> {
    let page_id = doc.get_pages()[&page_number];
    doc.get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (String::from_utf8(name).unwrap(), font))
        .collect()
}

/// CID to text mapping read from a font's ToUnicode CMap
fn to_unicode(doc: &Document, font: &Dictionary) -> BTreeMap<u16, String> {
    let id = font.get(b"ToUnicode").unwrap().as_reference().unwrap();
    let stream = doc.get_object(id).unwrap().as_stream().unwrap();
    let cmap = String::from_utf8(stream.content.clone()).unwrap();

    cmap.lines()
        .filter_map(|line| {
            let (cid, text) = line.strip_prefix('<')?.split_once("> <")?;
            let text = text.strip_suffix('>')?;
            let units: Vec<u16> = (0..text.len())
                .step_by(4)
                .map(|i| u16::from_str_radix(&text[i..i + 4], 16).unwrap())
                .collect();
            Some((
                u16::from_str_radix(cid, 16).unwrap(),
                String::from_utf16(&units).unwrap(),
            ))
        })
        .collect()
}

#[test]
fn test_round_trip_single_page() {
    let bytes = build_sample().to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();

    assert_eq!(parsed.get_pages().len(), 1);
}

#[test]
fn test_media_box_is_a4() {
    let bytes = build_sample().to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();

    let page_id = parsed.get_pages()[&1];
    let page = parsed.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let width = media_box[2].as_f32().unwrap();
    let height = media_box[3].as_f32().unwrap();

    assert!((width - 595.28).abs() < 0.01);
    assert!((height - 841.89).abs() < 0.01);
}

#[test]
fn test_fonts_are_registered_per_page() {
    let bytes = build_sample().to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();

    let page_id = parsed.get_pages()[&1];
    let page = parsed.get_object(page_id).unwrap().as_dict().unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();

    let mut base_fonts: Vec<String> = fonts
        .iter()
        .map(|(_, obj)| {
            let font = parsed
                .get_object(obj.as_reference().unwrap())
                .unwrap()
                .as_dict()
                .unwrap();
            font.get(b"BaseFont")
                .unwrap()
                .as_name_str()
                .unwrap()
                .to_string()
        })
        .collect();
    base_fonts.sort();

    assert_eq!(base_fonts, vec!["CVBOLD+DejaVuSans-Bold", "CVREGU+DejaVuSans"]);
}

#[test]
fn test_fonts_are_embedded_as_identity_h_subsets() {
    let bytes = build_sample().to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();
    let fonts = page_fonts(&parsed, 1);
    let font = fonts["F1"];

    assert_eq!(font.get(b"Subtype").unwrap().as_name_str().unwrap(), "Type0");
    assert_eq!(font.get(b"Encoding").unwrap().as_name_str().unwrap(), "Identity-H");

    let descendants = font.get(b"DescendantFonts").unwrap().as_array().unwrap();
    let cid_font = parsed
        .get_object(descendants[0].as_reference().unwrap())
        .unwrap()
        .as_dict()
        .unwrap();
    assert_eq!(cid_font.get(b"Subtype").unwrap().as_name_str().unwrap(), "CIDFontType2");

    let descriptor = parsed
        .get_object(cid_font.get(b"FontDescriptor").unwrap().as_reference().unwrap())
        .unwrap()
        .as_dict()
        .unwrap();
    let file = parsed
        .get_object(descriptor.get(b"FontFile2").unwrap().as_reference().unwrap())
        .unwrap()
        .as_stream()
        .unwrap();
    let subset = file.decompressed_content().unwrap();
    let length1 = file.dict.get(b"Length1").unwrap().as_i64().unwrap();
    assert_eq!(subset.len() as i64, length1);
    // Only the drawn glyphs are kept
    assert!(subset.len() < 759_720 / 2);
}

#[test]
fn test_only_used_weights_are_embedded() {
    let mut doc = new_document();
    let page = doc.add_page();
    doc.set_font(FontWeight::Regular, 12.0);
    doc.insert_text("Regular only", page, 50.0, 50.0, Align::Left)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();
    let names: Vec<String> = page_fonts(&parsed, 1).into_keys().collect();
    assert_eq!(names, vec!["F1"]);
}

#[test]
fn test_non_latin1_text_survives() {
    let mut doc = new_document();
    doc.set_info(DocumentInfo {
        author: Some("Łukasz Nguyễn".to_string()),
        ..DocumentInfo::default()
    });
    let page = doc.add_page();
    doc.set_font(FontWeight::Bold, 26.0);
    doc.insert_text("Łukasz Nguyễn", page, 50.0, 50.0, Align::Left)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();

    let fonts = page_fonts(&parsed, 1);
    let unicode = to_unicode(&parsed, fonts["F2"]);
    let content = page_content(&parsed, 1);
    let hex = content
        .split('<')
        .nth(1)
        .and_then(|rest| rest.split('>').next())
        .unwrap();
    let text: String = (0..hex.len())
        .step_by(4)
        .map(|i| unicode[&u16::from_str_radix(&hex[i..i + 4], 16).unwrap()].as_str())
        .collect();
    assert_eq!(text, "Łukasz Nguyễn");
    assert!(!text.contains('?'));

    let info_id = parsed.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = parsed.get_object(info_id).unwrap().as_dict().unwrap();
    let author = info.get(b"Author").unwrap().as_str().unwrap();
    let units: Vec<u16> = author[2..]
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    assert_eq!(&author[..2], &[0xFE, 0xFF]);
    assert_eq!(String::from_utf16(&units).unwrap(), "Łukasz Nguyễn");
}

#[test]
fn test_content_stream_operators() {
    let bytes = build_sample().to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();
    let content = page_content(&parsed, 1);

    assert!(content.contains("/F2 26 Tf"));
    assert!(content.contains("/F1 11 Tf"));
    assert!(content.contains(" Tj"));
    assert!(content.contains(" c\n"), "rounded corners use curves");
    assert!(content.contains("S\nQ"));
}

#[test]
fn test_link_annotation() {
    let bytes = build_sample().to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();

    let page_id = parsed.get_pages()[&1];
    let page = parsed.get_object(page_id).unwrap().as_dict().unwrap();
    let annots = page.get(b"Annots").unwrap().as_array().unwrap();
    assert_eq!(annots.len(), 1);

    let annot = parsed
        .get_object(annots[0].as_reference().unwrap())
        .unwrap()
        .as_dict()
        .unwrap();
    assert_eq!(annot.get(b"Subtype").unwrap().as_name_str().unwrap(), "Link");
    let action = annot.get(b"A").unwrap().as_dict().unwrap();
    let uri = action.get(b"URI").unwrap().as_str().unwrap();
    assert_eq!(uri, b"https://example.com/in/sample");
}

#[test]
fn test_info_dictionary() {
    let bytes = build_sample().to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();

    let info_id = parsed.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = parsed.get_object(info_id).unwrap().as_dict().unwrap();
    assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Sample CV");
    assert!(info.get(b"CreationDate").is_err());
}

#[test]
fn test_output_is_deterministic() {
    let first = build_sample().to_bytes().unwrap();
    let second = build_sample().to_bytes().unwrap();
    assert_eq!(first, second);

    // Serializing the same document twice is also stable
    let doc = build_sample();
    assert_eq!(doc.to_bytes().unwrap(), doc.to_bytes().unwrap());
}

#[test]
fn test_multiple_pages() {
    let mut doc = new_document();
    doc.set_font(FontWeight::Regular, 12.0);
    for n in 1..=3 {
        let page = doc.add_page();
        assert_eq!(page, n);
        doc.insert_text(&format!("Page {n}"), page, 50.0, 50.0, Align::Left)
            .unwrap();
    }

    let bytes = doc.to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 3);
    // P a g e space 1 take IDs 1-6; "2" is 7 and "3" is 8
    assert!(page_content(&parsed, 3).contains("<000100020003000400050008> Tj"));
}

#[test]
fn test_invalid_page_number() {
    let mut doc = new_document();
    doc.add_page();

    let result = doc.fill_rect(2, Rect::new(0.0, 0.0, 1.0, 1.0), 0.0, Color::black());
    assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));

    let result = doc.add_link(0, Rect::new(0.0, 0.0, 1.0, 1.0), "https://example.com");
    assert!(matches!(result, Err(PdfError::InvalidPage(0, 1))));
}

#[test]
fn test_wrapped_paragraph_renders_every_line() {
    let mut doc = new_document();
    let page = doc.add_page();
    doc.set_font(FontWeight::Regular, 10.0);

    let text = "Designed and shipped a component library used by every product team, \
                cutting UI defects and onboarding time across the organisation.";
    let spans = [TextSpan::new(text, FontWeight::Regular, Color::black())];
    let lines = wrap_spans(doc.fonts(), &spans, 10.0, 200.0);
    assert!(lines.len() > 1);

    let mut y = 100.0;
    for line in &lines {
        assert!(line.width <= 200.0);
        doc.insert_spans(&line.spans, page, 50.0, y, 0.0).unwrap();
        y += 13.0;
    }

    let bytes = doc.to_bytes().unwrap();
    let parsed = Document::load_mem(&bytes).unwrap();
    assert_eq!(page_content(&parsed, 1).matches(" Tj").count(), lines.len());
}
