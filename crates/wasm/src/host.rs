//! Host environment collaborators (printing, saving files, header controls)

use render::HeaderState;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Errors reported by a [`Host`]
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Print failed: {0}")]
    Print(String),

    #[error("Save failed: {0}")]
    Save(String),
}

/// Side effects the controller delegates to its environment
pub trait Host {
    /// Completes once the host had a chance to repaint
    type Yield: Future<Output = ()>;

    /// Open the print dialog for the current page
    fn print(&self) -> Result<(), HostError>;

    /// Offer `bytes` to the user as a file named `filename`
    fn save_file(&self, bytes: &[u8], filename: &str) -> Result<(), HostError>;

    /// Reflect the generation state on the download control
    fn set_download_busy(&self, busy: bool);

    /// Give control back to the event loop before a long computation
    fn yield_to_ui(&self) -> Self::Yield;

    /// Surface a failure to the user or developer console
    fn report_error(&self, _message: &str) {}
}

/// [`Host`] backed by the browser DOM
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl Host for BrowserHost {
    type Yield = Pin<Box<dyn Future<Output = ()>>>;

    fn print(&self) -> Result<(), HostError> {
        let window = web_sys::window().ok_or_else(|| HostError::Print("no window".into()))?;
        window.print().map_err(|e| HostError::Print(js_message(&e)))
    }

    fn save_file(&self, bytes: &[u8], filename: &str) -> Result<(), HostError> {
        let save_err = |e: JsValue| HostError::Save(js_message(&e));

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| HostError::Save("no document".into()))?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("application/pdf");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(save_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(save_err)?;

        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(save_err)?
            .dyn_into()
            .map_err(|_| HostError::Save("anchor element expected".into()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);

        // Some browsers only follow links that are attached to the document
        let body = document.body();
        if let Some(body) = &body {
            body.append_child(&anchor).map_err(save_err)?;
        }
        anchor.click();
        if body.is_some() {
            anchor.remove();
        }

        web_sys::Url::revoke_object_url(&url).map_err(save_err)
    }

    fn set_download_busy(&self, busy: bool) {
        let button = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("download-pdf"))
            .and_then(|e| e.dyn_into::<web_sys::HtmlButtonElement>().ok());

        if let Some(button) = button {
            let state = HeaderState {
                generating: busy,
                ..HeaderState::default()
            };
            button.set_disabled(busy);
            button.set_text_content(Some(state.download_label()));
        }
    }

    fn yield_to_ui(&self) -> Self::Yield {
        // A zero timeout resolves on a later task, after the browser repaints
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().map(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
            });
            if !matches!(scheduled, Some(Ok(_))) {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        Box::pin(async move {
            let _ = JsFuture::from(promise).await;
        })
    }

    fn report_error(&self, message: &str) {
        web_sys::console::error_1(&JsValue::from_str(message));
    }
}
