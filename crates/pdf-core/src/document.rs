//! PDF Document builder

use crate::font::{encode_glyphs_hex, FontFamily, FontObjects, FontSubset, FontWeight};
use crate::graphics::{
    generate_fill_operators, generate_line_operators, generate_stroke_operators, Rect,
};
use crate::text::{generate_text_operators, TextRenderContext, TextSpan};
use crate::{fmt_fixed, Align, PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

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

    /// Parse a `#rrggbb` (or `rrggbb`) hex string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Composite `overlay` at `alpha` opacity on top of this color
    pub fn blend(self, overlay: Color, alpha: f32) -> Self {
        let mix = |base: f32, top: f32| base + (top - base) * alpha;
        Self {
            r: mix(self.r, overlay.r),
            g: mix(self.g, overlay.g),
            b: mix(self.b, overlay.b),
        }
    }

    /// Operand string for `rg`/`RG` operators (e.g., "1 0 0")
    pub fn components(&self) -> String {
        format!(
            "{} {} {}",
            fmt_fixed(self.r as f64, 3),
            fmt_fixed(self.g as f64, 3),
            fmt_fixed(self.b as f64, 3)
        )
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

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 (210 × 297 mm)
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Document information dictionary entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
}

/// A URI link annotation
#[derive(Debug, Clone)]
struct LinkAnnotation {
    rect: Rect,
    uri: String,
}

/// Buffered content of a single page
#[derive(Debug, Clone, Default)]
struct Page {
    /// Content stream operators
    content: Vec<u8>,
    /// Font weights referenced by the content stream
    fonts: BTreeSet<FontWeight>,
    /// Link annotations in drawing order
    links: Vec<LinkAnnotation>,
}

/// PDF Document builder providing high-level drawing operations
///
/// Coordinates passed to drawing methods use a top-left origin with y growing
/// downwards; conversion to PDF space happens here. Text `y` is the baseline.
pub struct PdfDocument {
    /// Size shared by every page
    page_size: PageSize,
    /// Pages in order
    pages: Vec<Page>,
    /// Faces text is measured and drawn with
    fonts: FontFamily,
    /// Glyphs drawn so far, per weight
    subsets: BTreeMap<FontWeight, FontSubset>,
    /// Current font weight
    current_font: Option<FontWeight>,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Info dictionary entries
    info: DocumentInfo,
}

impl PdfDocument {
    /// Create an empty document; pages are added with [`PdfDocument::add_page`]
    pub fn new(page_size: PageSize, fonts: FontFamily) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            fonts,
            subsets: BTreeMap::new(),
            current_font: None,
            current_font_size: 12.0,
            current_text_color: Color::default(),
            info: DocumentInfo::default(),
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page dimensions
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Font family used for text
    pub fn fonts(&self) -> &FontFamily {
        &self.fonts
    }

    /// Set the Info dictionary entries
    pub fn set_info(&mut self, info: DocumentInfo) {
        self.info = info;
    }

    /// Append a blank page
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::default());
        self.pages.len()
    }

    /// Set the current font weight and size
    pub fn set_font(&mut self, weight: FontWeight, size: f32) {
        self.current_font = Some(weight);
        self.current_font_size = size;
    }

    /// Set only the font size (keeps current weight)
    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if self.current_font.is_none() {
            return Err(PdfError::FontNotSet);
        }
        self.current_font_size = size;
        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Get current font's text width for a string, in points
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let weight = self.current_font.ok_or(PdfError::FontNotSet)?;
        Ok(self
            .fonts
            .get_variant(weight)
            .text_width_points(text, self.current_font_size))
    }

    /// Insert text at a specific position using the current font and color
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
        let weight = self.current_font.ok_or(PdfError::FontNotSet)?;
        let span = TextSpan::new(text, weight, self.current_text_color);
        let width = span.width(&self.fonts, self.current_font_size);

        let start_x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };

        self.insert_spans(&[span], page, start_x, y, 0.0)?;
        Ok(())
    }

    /// Insert styled spans one after another on a single baseline
    ///
    /// Each span uses the face for its weight and its own color at the
    /// current font size. `word_spacing` is added after every space
    /// character (justification).
    ///
    /// # Returns
    /// The x coordinate where the last span ended
    pub fn insert_spans(
        &mut self,
        spans: &[TextSpan],
        page: usize,
        x: f64,
        y: f64,
        word_spacing: f64,
    ) -> Result<f64> {
        self.check_page(page)?;

        let pdf_y = self.page_size.height - y;
        let font_size = self.current_font_size;
        let mut current_x = x;

        for span in spans {
            // Skip empty text - nothing to render
            if span.text.is_empty() {
                continue;
            }

            let font = self.fonts.get_variant(span.weight);
            let spaces = span.text.chars().filter(|c| *c == ' ').count();
            let advance =
                font.text_width_points(&span.text, font_size) + spaces as f64 * word_spacing;

            let subset = self.subsets.entry(span.weight).or_default();
            let runs: Vec<String> = if word_spacing != 0.0 {
                span.text
                    .split_inclusive(' ')
                    .map(|run| encode_glyphs_hex(&subset.encode(font, run)))
                    .collect()
            } else {
                vec![encode_glyphs_hex(&subset.encode(font, &span.text))]
            };

            let ctx = TextRenderContext {
                font_name: span.weight.resource_name().to_string(),
                font_size,
                text_width: advance,
                color: span.color,
                word_spacing,
            };
            let operators =
                generate_text_operators(&runs, current_x, pdf_y, Align::Left, &ctx);

            let target = &mut self.pages[page - 1];
            target.fonts.insert(span.weight);
            target.content.extend_from_slice(&operators);

            current_x += advance;
        }

        Ok(current_x)
    }

    /// Fill a rectangle (top-left origin) with optional corner radius
    pub fn fill_rect(&mut self, page: usize, rect: Rect, radius: f64, color: Color) -> Result<()> {
        self.check_page(page)?;
        let pdf_y = self.page_size.height - rect.bottom();
        let operators =
            generate_fill_operators(rect.x, pdf_y, rect.width, rect.height, radius, color);
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Stroke a rectangle outline (top-left origin) with optional corner radius
    pub fn stroke_rect(
        &mut self,
        page: usize,
        rect: Rect,
        radius: f64,
        color: Color,
        line_width: f64,
    ) -> Result<()> {
        self.check_page(page)?;
        let pdf_y = self.page_size.height - rect.bottom();
        let operators = generate_stroke_operators(
            rect.x,
            pdf_y,
            rect.width,
            rect.height,
            radius,
            color,
            line_width,
        );
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Draw a straight line between two points (top-left origin)
    pub fn draw_line(
        &mut self,
        page: usize,
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
        line_width: f64,
    ) -> Result<()> {
        self.check_page(page)?;
        let height = self.page_size.height;
        let operators =
            generate_line_operators(from.0, height - from.1, to.0, height - to.1, color, line_width);
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Make an area of a page a clickable link to `uri`
    pub fn add_link(&mut self, page: usize, rect: Rect, uri: &str) -> Result<()> {
        self.check_page(page)?;
        self.pages[page - 1].links.push(LinkAnnotation {
            rect,
            uri: uri.to_string(),
        });
        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize the document to bytes
    ///
    /// Object numbering follows font order and page order, so identical
    /// drawing calls always yield identical bytes. Each weight that drew
    /// text is embedded once, as a subset of the glyphs it drew.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(PdfError::SaveError("document has no pages".to_string()));
        }

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut font_ids: BTreeMap<FontWeight, ObjectId> = BTreeMap::new();
        for (weight, subset) in &self.subsets {
            let objects = subset.to_pdf_objects(self.fonts.get_variant(*weight), *weight)?;
            font_ids.insert(*weight, embed_font(&mut doc, objects));
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let page_id = self.write_page(&mut doc, page, pages_id, &font_ids)?;
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info = self.info_dictionary();
        if !info.is_empty() {
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Add one page (content stream, annotations, page dictionary) to `doc`
    fn write_page(
        &self,
        doc: &mut Document,
        page: &Page,
        pages_id: ObjectId,
        font_ids: &BTreeMap<FontWeight, ObjectId>,
    ) -> Result<ObjectId> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&page.content)?;
        let compressed = encoder.finish()?;
        let contents_id = doc.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            compressed,
        ));

        let mut font_dict = Dictionary::new();
        for font in &page.fonts {
            if let Some(id) = font_ids.get(font) {
                font_dict.set(font.resource_name(), Object::Reference(*id));
            }
        }

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                self.page_size.width.into(),
                self.page_size.height.into(),
            ],
            "Resources" => dictionary! { "Font" => font_dict },
            "Contents" => contents_id,
        };

        if !page.links.is_empty() {
            let mut annots = Vec::with_capacity(page.links.len());
            for link in &page.links {
                let [x1, y1, x2, y2] = link.rect.to_pdf_box(self.page_size.height);
                let annot_id = doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => vec![
                        x1.into(),
                        y1.into(),
                        x2.into(),
                        y2.into(),
                    ],
                    "Border" => vec![0.into(), 0.into(), 0.into()],
                    "A" => dictionary! {
                        "S" => "URI",
                        "URI" => Object::String(link.uri.as_bytes().to_vec(), StringFormat::Literal),
                    },
                });
                annots.push(Object::Reference(annot_id));
            }
            page_dict.set("Annots", annots);
        }

        Ok(doc.add_object(page_dict))
    }

    fn info_dictionary(&self) -> Dictionary {
        let mut info = Dictionary::new();
        let entries = [
            ("Title", &self.info.title),
            ("Author", &self.info.author),
            ("Producer", &self.info.producer),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                info.set(key, text_string(value));
            }
        }
        info
    }

    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    /// Append operators to a page's content stream
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.pages[page - 1].content.extend_from_slice(content);
    }
}

/// Add a font's objects to `doc`, linking them together
///
/// # Returns
/// Id of the Type0 font dictionary
fn embed_font(doc: &mut Document, objects: FontObjects) -> ObjectId {
    let FontObjects {
        mut type0_font,
        mut cid_font,
        mut font_descriptor,
        font_file_stream,
        tounicode_stream,
    } = objects;

    let file_id = doc.add_object(font_file_stream);
    font_descriptor.set("FontFile2", file_id);
    let descriptor_id = doc.add_object(font_descriptor);
    cid_font.set("FontDescriptor", descriptor_id);
    let cid_font_id = doc.add_object(cid_font);
    let tounicode_id = doc.add_object(tounicode_stream);

    type0_font.set("DescendantFonts", vec![Object::Reference(cid_font_id)]);
    type0_font.set("ToUnicode", tounicode_id);
    doc.add_object(type0_font)
}

/// PDF text string: literal when ASCII, UTF-16BE with a byte order mark otherwise
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        Object::string_literal(value)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        bytes.extend(value.encode_utf16().flat_map(u16::to_be_bytes));
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}
