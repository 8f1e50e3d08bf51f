//! Typeface bundled for PDF output
//!
//! DejaVu Sans covers Latin, Greek and Cyrillic including the accented and
//! stacked-diacritic letters found in names (`Ł`, `ễ`). The license ships
//! next to the font files in `fonts/LICENSE-DejaVu.txt`.

use pdf_core::{FontFamily, FontFamilyBuilder, PdfError};
use std::sync::OnceLock;

const FAMILY: &str = "DejaVu Sans";
const REGULAR: &[u8] = include_bytes!("../../../../fonts/DejaVuSans.ttf");
const BOLD: &[u8] = include_bytes!("../../../../fonts/DejaVuSans-Bold.ttf");

static BUNDLED: OnceLock<Result<FontFamily, String>> = OnceLock::new();

/// The bundled family, parsed on first use
pub fn bundled() -> pdf_core::Result<&'static FontFamily> {
    BUNDLED
        .get_or_init(|| {
            FontFamilyBuilder::new()
                .regular(REGULAR)
                .bold(BOLD)
                .build(FAMILY)
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| PdfError::FontParseError(e.clone()))
}
