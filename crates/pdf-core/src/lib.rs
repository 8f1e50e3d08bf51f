//! PDF Core - Low-level PDF generation
//!
//! This crate provides functionality for:
//! - Creating fixed-size documents from scratch (A4 by default)
//! - Embedding TrueType font subsets and writing Unicode text with them
//! - Word wrapping styled text runs to a width
//! - Drawing filled/stroked (rounded) rectangles and lines
//! - Adding URI link annotations
//!
//! Serialization is deterministic: the same calls always produce the same bytes.
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, FontFamilyBuilder, FontWeight, PageSize, PdfDocument};
//!
//! let fonts = FontFamilyBuilder::new()
//!     .regular(include_bytes!("fonts/DejaVuSans.ttf").as_slice())
//!     .bold(include_bytes!("fonts/DejaVuSans-Bold.ttf").as_slice())
//!     .build("DejaVu Sans")?;
//!
//! let mut doc = PdfDocument::new(PageSize::A4, fonts);
//! let page = doc.add_page();
//! doc.set_font(FontWeight::Bold, 26.0);
//! doc.insert_text("Hello, World!", page, 297.64, 60.0, Align::Center)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod graphics;
mod text;

pub use document::{Color, DocumentInfo, PageSize, PdfDocument};
pub use font::{
    encode_glyphs_hex, FontData, FontFamily, FontFamilyBuilder, FontObjects, FontSubset, FontWeight,
};
pub use graphics::Rect;
pub use text::{generate_text_operators, wrap_spans, TextRenderContext, TextSpan, WrappedLine};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("No font set")]
    FontNotSet,

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Font subset error: {0}")]
    FontSubsetError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Format a coordinate for a content stream (at most two decimals, no trailing zeros)
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_fixed(value, 2)
}

/// Format with a fixed number of decimals, trimming trailing zeros
pub(crate) fn fmt_fixed(value: f64, places: usize) -> String {
    let s = format!("{value:.places$}");
    if places == 0 {
        return s;
    }
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(595.28), "595.28");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.33");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(-12.5), "-12.5");
    }
}
