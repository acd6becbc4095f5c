//! Daybrew - opens the pages you want, on the days you want them.
//!
//! Built with Rust + WASM. The model lives in [`days`], [`validate`],
//! [`settings`], [`storage`], and [`operations`]; the host glue in
//! [`browser`] and [`action`].

pub mod action;
pub mod browser;
pub mod days;
pub mod operations;
pub mod settings;
pub mod storage;
pub mod validate;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Check a candidate page URL for JavaScript access. Returns the rejection
/// message, or nothing if the page is acceptable.
#[wasm_bindgen]
pub fn validate_page(page: &str) -> Option<String> {
    validate::validate(page).err().map(|e| e.to_string())
}

/// Open the pages saved for the given weekday (0 = Sunday), or for today.
#[wasm_bindgen]
pub async fn open_pages(day: Option<u8>) -> Result<(), JsValue> {
    action::open_pages(day).await.map_err(|e| JsValue::from_str(&e))
}

/// Toggle one day flag for a page and persist the change.
#[wasm_bindgen]
pub async fn set_page_day(page: &str, day: u8, enabled: bool) -> Result<(), JsValue> {
    action::set_page_day(page, day, enabled)
        .await
        .map_err(|e| JsValue::from_str(&e))
}
