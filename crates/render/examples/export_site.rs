//! Export every built-in profile as a static page and a PDF
//!
//! Usage: cargo run -p render --example export_site [OUTPUT_DIR]
//!
//! Writes `index-<profile>.html` and `<Name>_CV_<profile>.pdf` for each
//! profile into OUTPUT_DIR (default `dist`). Set `RUST_LOG=debug` for details.

use anyhow::Context;
use cv_data::ProfileRegistry;
use render::{pdf_filename, HeaderState, PdfRenderer, ScreenRenderer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let registry = ProfileRegistry::builtin()?;
    let screen = ScreenRenderer::new();
    let pdf = PdfRenderer::new();

    for (key, cv) in registry.iter() {
        let html_path = out_dir.join(format!("index-{key}.html"));
        let page = screen.render_page(cv, &HeaderState::new(key));
        std::fs::write(&html_path, page)
            .with_context(|| format!("writing {}", html_path.display()))?;

        let pdf_path = out_dir.join(pdf_filename(cv, key));
        let bytes = pdf.render(cv)?;
        std::fs::write(&pdf_path, &bytes)
            .with_context(|| format!("writing {}", pdf_path.display()))?;

        info!(
            profile = %key,
            html = %html_path.display(),
            pdf = %pdf_path.display(),
            "exported profile"
        );
    }

    Ok(())
}
