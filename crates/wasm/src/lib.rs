//! WASM bindings for the CV portfolio
//!
//! This crate provides JavaScript-friendly API for:
//! - Switching between the built-in CV profiles
//! - Rendering the page (header toolbar and CV) into a mount element
//! - Printing and downloading the selected profile as PDF
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { CvApp } from 'cv-wasm';
//!
//! await init();
//!
//! const app = new CvApp('app');
//! const wire = () => {
//!   app.render();
//!   document.getElementById('profile-select').onchange = (e) => {
//!     app.selectProfile(e.target.value);
//!     wire();
//!   };
//!   document.getElementById('print-resume').onclick = () => app.print();
//!   document.getElementById('download-pdf').onclick = async () => {
//!     const filename = await app.downloadPdf();
//!     if (filename) console.log(`saved ${filename}`);
//!   };
//! };
//! wire();
//! ```

mod controller;
mod host;

pub use controller::{ArtifactBuilder, Controller, DownloadOutcome, GenerationState};
pub use host::{BrowserHost, Host, HostError};

use cv_data::{ProfileKey, ProfileRegistry};
use render::Theme;
use serde::Serialize;
use std::rc::Rc;
use std::sync::Once;
use wasm_bindgen::prelude::*;

// Initialize panic hook and tracing output for the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    static TRACING: Once = Once::new();
    TRACING.call_once(tracing_wasm::set_as_global_default);
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Entry of the profile picker
#[derive(Debug, Clone, Serialize)]
struct ProfileOption {
    key: &'static str,
    label: &'static str,
    color: &'static str,
}

impl From<ProfileKey> for ProfileOption {
    fn from(key: ProfileKey) -> Self {
        Self {
            key: key.as_str(),
            label: key.label(),
            color: Theme::for_key(key).primary,
        }
    }
}

/// The CV page controller
#[wasm_bindgen]
pub struct CvApp {
    controller: Rc<Controller<BrowserHost>>,
    mount_id: String,
}

#[wasm_bindgen]
impl CvApp {
    /// Create the app with the built-in profiles
    ///
    /// @param mountId - Id of the element `render()` writes into
    /// @returns CvApp instance, starting on the frontend profile
    #[wasm_bindgen(constructor)]
    pub fn new(mount_id: &str) -> Result<CvApp, JsValue> {
        let registry = ProfileRegistry::builtin().map_err(to_js)?;
        Ok(CvApp {
            controller: Rc::new(Controller::new(registry, BrowserHost)),
            mount_id: mount_id.to_string(),
        })
    }

    /// Available profiles
    ///
    /// @returns Array of { key, label, color }
    pub fn profiles(&self) -> Result<JsValue, JsValue> {
        let options: Vec<ProfileOption> = ProfileKey::ALL.into_iter().map(Into::into).collect();
        serde_wasm_bindgen::to_value(&options).map_err(to_js)
    }

    /// Key of the selected profile ("frontend" or "sdet")
    #[wasm_bindgen(js_name = selectedProfile)]
    pub fn selected_profile(&self) -> String {
        self.controller.selected().as_str().to_string()
    }

    /// Switch profile
    ///
    /// @param key - "frontend" or "sdet"
    #[wasm_bindgen(js_name = selectProfile)]
    pub fn select_profile(&self, key: &str) -> Result<(), JsValue> {
        self.controller.select_profile_str(key).map_err(to_js)
    }

    /// Write the header toolbar and CV into the mount element
    pub fn render(&self) -> Result<(), JsValue> {
        let mount = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&self.mount_id))
            .ok_or_else(|| to_js(format!("No element with id {:?}", self.mount_id)))?;
        mount.set_inner_html(&self.controller.render_app());
        Ok(())
    }

    /// Standalone HTML document for the selected profile
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&self) -> String {
        self.controller.render_page()
    }

    /// Open the browser print dialog
    pub fn print(&self) {
        self.controller.print();
    }

    /// Generate the selected profile's PDF and save it
    ///
    /// The download button is disabled and repainted before generation
    /// starts. Failures are logged to the console.
    ///
    /// @returns Promise of the saved filename, or undefined if nothing was saved
    #[wasm_bindgen(js_name = downloadPdf)]
    pub fn download_pdf(&self) -> js_sys::Promise {
        let controller = Rc::clone(&self.controller);
        wasm_bindgen_futures::future_to_promise(async move {
            Ok(match controller.download_pdf().await {
                DownloadOutcome::Delivered(filename) => JsValue::from(filename),
                DownloadOutcome::Failed(_) | DownloadOutcome::Busy => JsValue::UNDEFINED,
            })
        })
    }

    #[wasm_bindgen(js_name = isGenerating)]
    pub fn is_generating(&self) -> bool {
        self.controller.is_generating()
    }

    /// PDF of the selected profile
    ///
    /// @returns PDF bytes as Uint8Array
    #[wasm_bindgen(js_name = pdfBytes)]
    pub fn pdf_bytes(&self) -> Result<Vec<u8>, JsValue> {
        self.controller.pdf_bytes().map_err(to_js)
    }

    /// Download filename for the selected profile
    #[wasm_bindgen(js_name = pdfFilename)]
    pub fn pdf_filename(&self) -> String {
        self.controller.pdf_filename()
    }
}
