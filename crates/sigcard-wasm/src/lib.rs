//! WASM bindings for email signature contact extraction.
//!
//! This crate lets a JavaScript mail add-in call the extraction core.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use sigcard_core::models::config::ExtractionConfig;
use sigcard_core::{ContactRecord, ExtractionResult, SenderIdentity, SignatureScanner};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert an HTML body to plain text.
#[wasm_bindgen]
pub fn normalize_html(html: &str) -> String {
    sigcard_core::normalize(html)
}

/// Extract the first French phone number in local format, or "".
#[wasm_bindgen]
pub fn extract_phone_fr(text: &str) -> String {
    sigcard_core::extract_phone_fr(text)
}

/// Guess a full name from a signature, or return `fallback`.
#[wasm_bindgen]
pub fn guess_full_name(text: &str, fallback: &str) -> String {
    sigcard_core::guess_full_name(text, fallback)
}

/// Scan an HTML body and return `{ fullName, phone, email }`.
#[wasm_bindgen]
pub fn scan_message(html: &str, sender_email: &str, sender_name: &str) -> Result<JsValue, JsValue> {
    let sender = SenderIdentity::new(sender_email, sender_name);
    let report = SignatureScanner::new().scan(html, &sender);
    report_degraded(report.degraded);

    serde_wasm_bindgen::to_value(&report.result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Scan the body returned by a host callback.
///
/// `get_body` must return a promise resolving to the HTML body. A rejected
/// promise or a non-string value fails the scan.
#[wasm_bindgen]
pub async fn scan_from_host(
    get_body: Function,
    sender_email: String,
    sender_name: String,
) -> Result<JsValue, JsValue> {
    let promise: Promise = get_body
        .call0(&JsValue::NULL)
        .map_err(|e| body_error(&e))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("failed to retrieve message body: getBody did not return a promise"))?;

    let html = JsFuture::from(promise)
        .await
        .map_err(|e| body_error(&e))?
        .as_string()
        .ok_or_else(|| JsValue::from_str("failed to retrieve message body: body is not a string"))?;

    scan_message(&html, &sender_email, &sender_name)
}

/// Build the contact-creation payload from reviewed field values.
#[wasm_bindgen]
pub fn contact_payload(full_name: &str, phone: &str, email: &str) -> Result<JsValue, JsValue> {
    let fields = ExtractionResult {
        full_name: full_name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    };

    serde_wasm_bindgen::to_value(&ContactRecord::from_fields(&fields))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Signature scanner class for hosts that tune the name windows.
#[wasm_bindgen]
pub struct Scanner {
    config: ExtractionConfig,
}

#[wasm_bindgen]
impl Scanner {
    /// Create a scanner with default windows.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Lines inspected after a signature marker.
    #[wasm_bindgen]
    pub fn set_boundary_window(&mut self, lines: usize) {
        self.config.boundary_window = lines;
    }

    /// Lines inspected at the end of the body without a marker.
    #[wasm_bindgen]
    pub fn set_tail_window(&mut self, lines: usize) {
        self.config.tail_window = lines;
    }

    /// Scan an HTML body.
    #[wasm_bindgen]
    pub fn scan(&self, html: &str, sender_email: &str, sender_name: &str) -> Result<JsValue, JsValue> {
        let sender = SenderIdentity::new(sender_email, sender_name);
        let report = SignatureScanner::from_config(&self.config).scan(html, &sender);
        report_degraded(report.degraded);

        serde_wasm_bindgen::to_value(&report.result).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

fn body_error(cause: &JsValue) -> JsValue {
    let detail = cause.as_string().unwrap_or_else(|| format!("{:?}", cause));
    JsValue::from_str(&format!("failed to retrieve message body: {}", detail))
}

fn report_degraded(degraded: bool) {
    if degraded {
        web_sys::console::warn_1(&JsValue::from_str("sigcard: markup conversion failed, raw body was scanned"));
    }
}
