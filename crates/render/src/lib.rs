//! Render - screen and PDF projections of CV data
//!
//! This crate provides:
//! - A screen renderer producing an HTML tree and page, with print media rules
//! - A PDF renderer laying the same data out on A4 pages
//! - The section outline both renderers consume, so they agree on order,
//!   labels and which optional fields appear
//! - Profile themes and the download file name
//!
//! # Example
//!
//! ```ignore
//! use cv_data::{ProfileKey, ProfileRegistry};
//! use render::{pdf_filename, HeaderState, PdfRenderer, ScreenRenderer};
//!
//! let registry = ProfileRegistry::builtin()?;
//! let cv = registry.get(ProfileKey::Sdet);
//! let html = ScreenRenderer::new().render_page(cv, &HeaderState::new(ProfileKey::Sdet));
//! let pdf = PdfRenderer::new().render(cv)?;
//! std::fs::write(pdf_filename(cv, ProfileKey::Sdet), pdf)?;
//! ```

mod filename;
pub mod html;
pub mod outline;
pub mod pdf;
mod theme;

pub use filename::pdf_filename;
pub use html::{HeaderState, Node, ScreenRenderer};
pub use pdf::{PdfLayout, PdfRenderer, PdfStyles};
pub use theme::Theme;

use thiserror::Error;

/// Errors that can occur while rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("Data error: {0}")]
    Data(#[from] cv_data::CvError),
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;
