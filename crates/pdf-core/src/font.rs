//! Font handling for PDF documents
//!
//! Fonts are embedded as TrueType subsets. Text is written with the
//! Identity-H encoding: each character becomes the two-byte ID of its glyph
//! in the subset, and a ToUnicode CMap maps those IDs back to text so the
//! PDF stays searchable and copyable.

use crate::{PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Object, Stream};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;
use subsetter::GlyphRemapper;
use ttf_parser::{Face, GlyphId};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    /// PDF resource name used in content streams
    pub fn resource_name(self) -> &'static str {
        match self {
            FontWeight::Regular => "F1",
            FontWeight::Bold => "F2",
        }
    }

    /// Six-letter subset prefix of the embedded font name
    fn subset_tag(self) -> &'static str {
        match self {
            FontWeight::Regular => "CVREGU",
            FontWeight::Bold => "CVBOLD",
        }
    }
}

/// Font data structure for embedded fonts
#[derive(Debug, Clone)]
pub struct FontData {
    /// PostScript name of the font (no spaces)
    pub name: String,
    /// Raw TTF data
    data: &'static [u8],
    /// Parsed font face
    face: Face<'static>,
}

impl FontData {
    /// Create font data from TTF bytes
    ///
    /// Borrowed `'static` data (e.g. from `include_bytes!`) is used in place.
    /// Owned data is leaked, since the parsed face must outlive the document.
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_ttf(name: &str, ttf_data: impl Into<Cow<'static, [u8]>>) -> Result<Self> {
        let data: &'static [u8] = match ttf_data.into() {
            Cow::Borrowed(data) => data,
            Cow::Owned(data) => Box::leak(data.into_boxed_slice()),
        };

        let face = Face::parse(data, 0)
            .map_err(|e| PdfError::FontParseError(format!("{name}: {e:?}")))?;

        Ok(Self {
            name: name.split_whitespace().collect(),
            data,
            face,
        })
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face.glyph_index(c).map(|id| id.0)
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).map(|id| id != 0).unwrap_or(false)
    }

    /// Advance width of a character in font units
    ///
    /// Characters the font lacks are measured as `.notdef`, which is what
    /// gets drawn for them.
    pub fn glyph_advance(&self, c: char) -> u16 {
        self.gid_advance(self.glyph_id(c).unwrap_or(0))
    }

    fn gid_advance(&self, gid: u16) -> u16 {
        self.face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0)
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    /// Get font ascender
    pub fn ascender(&self) -> i16 {
        self.face.ascender()
    }

    /// Get font descender (negative)
    pub fn descender(&self) -> i16 {
        self.face.descender()
    }

    /// Ascender height as a fraction of the font size
    pub fn ascent_ratio(&self) -> f64 {
        self.ascender() as f64 / self.units_per_em() as f64
    }

    /// Descender depth as a positive fraction of the font size
    pub fn descent_ratio(&self) -> f64 {
        -(self.descender() as f64) / self.units_per_em() as f64
    }

    /// Calculate text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().map(|c| self.glyph_advance(c) as u32).sum()
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f64 {
        self.text_width(text) as f64 / self.units_per_em() as f64 * font_size as f64
    }

    /// Scale font units to the 1000-unit glyph space of PDF font dictionaries
    fn to_pdf_units(&self, value: i32) -> i64 {
        (value as f64 * 1000.0 / self.units_per_em() as f64).round() as i64
    }
}

/// Font family with variants
#[derive(Debug, Clone)]
pub struct FontFamily {
    /// Regular variant
    pub regular: FontData,
    /// Bold variant
    pub bold: Option<FontData>,
}

impl FontFamily {
    /// Get the font data for the specified weight
    /// Falls back to regular if requested variant is not available
    pub fn get_variant(&self, weight: FontWeight) -> &FontData {
        match weight {
            FontWeight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontWeight::Regular => &self.regular,
        }
    }

    /// Check if the family has a dedicated face for the weight
    pub fn has_variant(&self, weight: FontWeight) -> bool {
        match weight {
            FontWeight::Bold => self.bold.is_some(),
            FontWeight::Regular => true,
        }
    }
}

/// Builder for font families
#[derive(Default)]
pub struct FontFamilyBuilder {
    regular: Option<Cow<'static, [u8]>>,
    bold: Option<Cow<'static, [u8]>>,
}

impl FontFamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regular(mut self, ttf_data: impl Into<Cow<'static, [u8]>>) -> Self {
        self.regular = Some(ttf_data.into());
        self
    }

    pub fn bold(mut self, ttf_data: impl Into<Cow<'static, [u8]>>) -> Self {
        self.bold = Some(ttf_data.into());
        self
    }

    /// Build the FontFamily from the provided TTF data
    pub fn build(self, family_name: &str) -> Result<FontFamily> {
        let regular = match self.regular {
            Some(ttf_data) => FontData::from_ttf(family_name, ttf_data)?,
            None => {
                return Err(PdfError::FontParseError(
                    "FontFamily must have at least a regular variant".to_string(),
                ))
            }
        };

        let bold = self
            .bold
            .map(|data| FontData::from_ttf(&format!("{family_name}-Bold"), data))
            .transpose()?;

        Ok(FontFamily { regular, bold })
    }
}

/// PDF objects generated for font embedding
///
/// References between the objects are filled in by the document when the
/// objects are added.
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (subset TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

/// Glyphs of one font used by a document
///
/// Subset glyph IDs are handed out in first-use order starting after
/// `.notdef` (always 0), so text can be encoded as soon as it is drawn.
#[derive(Debug, Clone)]
pub struct FontSubset {
    /// Original glyph ID of every subset glyph, indexed by subset ID
    originals: Vec<u16>,
    /// Original glyph ID to subset ID
    remapped: BTreeMap<u16, u16>,
    /// Text each subset glyph stands for
    unicode: BTreeMap<u16, char>,
}

impl Default for FontSubset {
    fn default() -> Self {
        Self {
            originals: vec![0],
            remapped: BTreeMap::from([(0, 0)]),
            unicode: BTreeMap::new(),
        }
    }
}

impl FontSubset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of glyphs besides `.notdef`
    pub fn len(&self) -> usize {
        self.originals.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode text as subset glyph IDs, adding new glyphs to the subset
    pub fn encode(&mut self, font: &FontData, text: &str) -> Vec<u16> {
        text.chars().map(|c| self.glyph(font, c)).collect()
    }

    fn glyph(&mut self, font: &FontData, c: char) -> u16 {
        let original = font.glyph_id(c).unwrap_or(0);
        let cid = match self.remapped.get(&original) {
            Some(&cid) => cid,
            None => {
                let cid = self.originals.len() as u16;
                self.originals.push(original);
                self.remapped.insert(original, cid);
                cid
            }
        };
        if cid != 0 {
            self.unicode.entry(cid).or_insert(c);
        }
        cid
    }

    /// Character a subset glyph was recorded for
    pub fn char_for(&self, cid: u16) -> Option<char> {
        self.unicode.get(&cid).copied()
    }

    /// Generate all PDF objects needed to embed the subset of `font`
    pub fn to_pdf_objects(&self, font: &FontData, weight: FontWeight) -> Result<FontObjects> {
        let base_font = Object::Name(format!("{}+{}", weight.subset_tag(), font.name).into_bytes());

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(Dictionary::new(), tounicode_content.into_bytes());

        let subset = self.subset_font_file(font)?;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&subset)?;
        let font_file_stream = Stream::new(
            dictionary! {
                "Filter" => "FlateDecode",
                "Length1" => subset.len() as i64,
            },
            encoder.finish()?,
        );

        let bbox = font.face.global_bounding_box();
        let font_bbox: Vec<Object> = [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max]
            .into_iter()
            .map(|v| font.to_pdf_units(v as i32).into())
            .collect();
        let cap_height = font.face.capital_height().unwrap_or(font.ascender());

        let font_descriptor = dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => base_font.clone(),
            "Flags" => 4, // Symbolic font
            "FontBBox" => font_bbox,
            "ItalicAngle" => 0,
            "Ascent" => font.to_pdf_units(font.ascender() as i32),
            "Descent" => font.to_pdf_units(font.descender() as i32),
            "CapHeight" => font.to_pdf_units(cap_height as i32),
            "StemV" => 80,
        };

        let cid_font = dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => base_font.clone(),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "W" => self.generate_widths_array(font),
            "DW" => 1000,
            "CIDToGIDMap" => "Identity",
        };

        let type0_font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => base_font,
            "Encoding" => "Identity-H",
        };

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }

    /// Cut the font down to the used glyphs, renumbered to subset IDs
    fn subset_font_file(&self, font: &FontData) -> Result<Vec<u8>> {
        let mut remapper = GlyphRemapper::new();
        for (cid, &original) in self.originals.iter().enumerate() {
            let assigned = remapper.remap(original);
            if assigned as usize != cid {
                return Err(PdfError::FontSubsetError(format!(
                    "{}: glyph {original} remapped to {assigned}, expected {cid}",
                    font.name
                )));
            }
        }

        subsetter::subset(font.data, 0, &remapper)
            .map_err(|e| PdfError::FontSubsetError(format!("{}: {e:?}", font.name)))
    }

    /// /W array: consecutive widths starting at CID 0
    fn generate_widths_array(&self, font: &FontData) -> Vec<Object> {
        let widths: Vec<Object> = self
            .originals
            .iter()
            .map(|&gid| font.to_pdf_units(font.gid_advance(gid) as i32).into())
            .collect();
        vec![0.into(), widths.into()]
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

        let entries: Vec<(&u16, &char)> = self.unicode.iter().collect();
        // bfchar sections are limited to 100 entries
        for chunk in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (cid, c) in chunk {
                let mut units = [0u16; 2];
                let utf16: String = c
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|u| format!("{u:04X}"))
                    .collect();
                cmap.push_str(&format!("<{cid:04X}> <{utf16}>\n"));
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

/// Hex string operand for two-byte glyph codes (e.g., "<00010002>")
pub fn encode_glyphs_hex(codes: &[u16]) -> String {
    let mut result = String::with_capacity(codes.len() * 4 + 2);
    result.push('<');
    for code in codes {
        result.push_str(&format!("{code:04X}"));
    }
    result.push('>');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGULAR: &[u8] = include_bytes!("../../../fonts/DejaVuSans.ttf");
    const BOLD: &[u8] = include_bytes!("../../../fonts/DejaVuSans-Bold.ttf");

    fn family() -> FontFamily {
        FontFamilyBuilder::new()
            .regular(REGULAR)
            .bold(BOLD)
            .build("DejaVu Sans")
            .unwrap()
    }

    #[test]
    fn test_font_from_ttf() {
        let font = FontData::from_ttf("DejaVuSans", REGULAR).unwrap();
        assert_eq!(font.units_per_em(), 2048);
        assert!(font.ascender() > 0);
        assert!(font.descender() < 0);
        assert!(font.has_glyph('Ł'));
        assert!(font.has_glyph('ễ'));
    }

    #[test]
    fn test_invalid_font_data() {
        let result = FontData::from_ttf("broken", vec![0u8; 100]);
        assert!(matches!(result, Err(PdfError::FontParseError(_))));
    }

    #[test]
    fn test_builder_requires_regular() {
        let result = FontFamilyBuilder::new().bold(BOLD).build("DejaVu Sans");
        assert!(matches!(result, Err(PdfError::FontParseError(_))));
    }

    #[test]
    fn test_family_names_and_fallback() {
        let family = family();
        assert_eq!(family.regular.name, "DejaVuSans");
        assert_eq!(family.get_variant(FontWeight::Bold).name, "DejaVuSans-Bold");

        let regular_only = FontFamilyBuilder::new()
            .regular(REGULAR)
            .build("DejaVu Sans")
            .unwrap();
        assert!(!regular_only.has_variant(FontWeight::Bold));
        assert_eq!(regular_only.get_variant(FontWeight::Bold).name, "DejaVuSans");
    }

    #[test]
    fn test_widths_come_from_the_font() {
        let family = family();
        let regular = family.get_variant(FontWeight::Regular);
        let bold = family.get_variant(FontWeight::Bold);

        // "Hello world" is 11481 units at 2048 per em
        assert_eq!(regular.text_width("Hello world"), 11481);
        assert!((regular.text_width_points("Hello world", 10.0) - 56.0595703125).abs() < 1e-9);
        assert!(bold.text_width("Hello world") > regular.text_width("Hello world"));
        assert!(regular.text_width_points("Łukasz Nguyễn", 10.0) > 0.0);
    }

    #[test]
    fn test_subset_ids_in_first_use_order() {
        let family = family();
        let font = family.get_variant(FontWeight::Regular);
        let mut subset = FontSubset::new();
        assert!(subset.is_empty());

        assert_eq!(subset.encode(font, "abba"), vec![1, 2, 2, 1]);
        assert_eq!(subset.encode(font, "Łb"), vec![3, 2]);
        assert_eq!(subset.len(), 3);
        assert_eq!(subset.char_for(3), Some('Ł'));
        assert_eq!(subset.char_for(0), None);
    }

    #[test]
    fn test_missing_glyph_uses_notdef() {
        let family = family();
        let font = family.get_variant(FontWeight::Regular);
        let mut subset = FontSubset::new();
        // Private use area, not covered by the font
        assert_eq!(subset.encode(font, "\u{E000}"), vec![0]);
        assert!(subset.is_empty());
        assert_eq!(font.glyph_advance('\u{E000}'), font.gid_advance(0));
    }

    #[test]
    fn test_tounicode_maps_subset_ids() {
        let family = family();
        let font = family.get_variant(FontWeight::Regular);
        let mut subset = FontSubset::new();
        subset.encode(font, "Łukasz Nguyễn");

        let cmap = subset.generate_tounicode_cmap();
        assert!(cmap.contains("<0001> <0141>")); // Ł
        assert!(cmap.contains("<0006> <007A>")); // z
        assert!(cmap.contains("<000B> <1EC5>")); // ễ
        assert!(cmap.contains("12 beginbfchar"));
    }

    #[test]
    fn test_tounicode_surrogate_pairs() {
        let family = family();
        let font = family.get_variant(FontWeight::Regular);
        let mut subset = FontSubset::new();
        subset.encode(font, "a");
        subset.unicode.insert(1, '😀');
        assert!(subset.generate_tounicode_cmap().contains("<0001> <D83DDE00>"));
    }

    #[test]
    fn test_widths_array_is_scaled() {
        let family = family();
        let font = family.get_variant(FontWeight::Regular);
        let mut subset = FontSubset::new();
        subset.encode(font, " ");

        let widths = subset.generate_widths_array(font);
        assert_eq!(widths[0], Object::Integer(0));
        let Object::Array(values) = &widths[1] else {
            panic!("expected width array");
        };
        // notdef, then the space (651 units at 2048 per em)
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], Object::Integer(318));
    }

    #[test]
    fn test_to_pdf_objects() {
        let family = family();
        let font = family.get_variant(FontWeight::Bold);
        let mut subset = FontSubset::new();
        subset.encode(font, "Jordan");

        let objects = subset.to_pdf_objects(font, FontWeight::Bold).unwrap();
        assert_eq!(
            objects.type0_font.get(b"BaseFont").unwrap(),
            &Object::Name(b"CVBOLD+DejaVuSans-Bold".to_vec())
        );
        assert_eq!(
            objects.type0_font.get(b"Encoding").unwrap(),
            &Object::Name(b"Identity-H".to_vec())
        );
        assert_eq!(
            objects.cid_font.get(b"Subtype").unwrap(),
            &Object::Name(b"CIDFontType2".to_vec())
        );

        let file = &objects.font_file_stream;
        let length1 = file.dict.get(b"Length1").unwrap().as_i64().unwrap();
        assert!(length1 > 0);
        assert!((length1 as usize) < BOLD.len());
    }

    #[test]
    fn test_encode_glyphs_hex() {
        assert_eq!(encode_glyphs_hex(&[1, 0x2A, 0x1EC5]), "<0001002A1EC5>");
        assert_eq!(encode_glyphs_hex(&[]), "<>");
    }
}
