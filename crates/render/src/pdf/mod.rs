//! PDF renderer: CV data to a paginated A4 document

pub mod fonts;
mod layout;
mod styles;

pub use layout::{DrawOp, PdfLayout, TextRun};
pub use styles::{Insets, PdfStyles};

use crate::Result;
use cv_data::CvData;
use pdf_core::{DocumentInfo, FontFamily, PdfDocument};
use tracing::debug;

const PRODUCER: &str = concat!("cv-render ", env!("CARGO_PKG_VERSION"));

/// Projects [`CvData`] into PDF bytes
///
/// Output depends only on the data, the styles and the fonts: rendering
/// the same CV twice yields identical bytes. Text is set in the bundled
/// DejaVu Sans unless other fonts are given.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    styles: PdfStyles,
    fonts: Option<FontFamily>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with custom sizes and spacing
    pub fn with_styles(styles: PdfStyles) -> Self {
        Self {
            styles,
            fonts: None,
        }
    }

    /// Set text in `fonts` instead of the bundled family
    pub fn with_fonts(mut self, fonts: FontFamily) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn styles(&self) -> &PdfStyles {
        &self.styles
    }

    /// Family text is measured and drawn with
    pub fn fonts(&self) -> Result<&FontFamily> {
        match &self.fonts {
            Some(fonts) => Ok(fonts),
            None => Ok(fonts::bundled()?),
        }
    }

    /// Position every element without serializing
    pub fn layout(&self, cv: &CvData) -> Result<PdfLayout> {
        cv.validate()?;
        Ok(layout::layout_cv(cv, &self.styles, self.fonts()?))
    }

    /// Render the PDF document
    pub fn render(&self, cv: &CvData) -> Result<Vec<u8>> {
        let name = &cv.personal_info.name;
        debug!(name = %name, profile = %cv.profile, "generating PDF");

        let layout = self.layout(cv)?;

        let mut doc = PdfDocument::new(layout.page_size, self.fonts()?.clone());
        doc.set_info(DocumentInfo {
            title: Some(format!("{name} CV")),
            author: Some(name.clone()),
            producer: Some(PRODUCER.to_string()),
        });
        layout.paint(&mut doc)?;

        let bytes = doc.to_bytes()?;
        debug!(
            bytes = bytes.len(),
            pages = layout.page_count(),
            "PDF generated"
        );
        Ok(bytes)
    }
}
