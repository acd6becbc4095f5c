//! JS bridge to the WebExtension host.
//!
//! Every host capability the crate touches comes through `host.js`: the
//! sync key/value store, the runtime message channel, tab manipulation, and
//! the toolbar badge/popup used for failure reports. The wrappers marshal
//! through serde and normalize errors to plain strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::settings::Settings;
use crate::storage::{SettingsSnapshot, StoredSettings, SyncMessage};

#[wasm_bindgen(module = "/host.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(defaults: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(partial: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendMessage(message: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str, pinned: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTabs(ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn reloadTab(id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setBadgeText(text: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setPopup(path: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setLocalErrors(errors: JsValue) -> Result<(), JsValue>;
}

/// Pull the message out of a rejected host call.
fn js_error_message(err: &JsValue) -> String {
    match err.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{err:?}"),
    }
}

// Storage payloads must cross as plain JS objects (maps included), not as
// the `Map` instances serde-wasm-bindgen produces by default.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize: {e}"))
}

/// Read the persisted settings, falling back to defaults for anything the
/// store has never seen.
pub async fn load_stored() -> Result<StoredSettings, String> {
    let defaults = to_js(&StoredSettings::default())?;
    let stored = getStorage(defaults)
        .await
        .map_err(|e| format!("Failed to read storage: {}", js_error_message(&e)))?;
    serde_wasm_bindgen::from_value(stored).map_err(|e| format!("Failed to parse storage: {e}"))
}

/// Load a fresh [`Settings`] from the persisted snapshot.
pub async fn load_settings() -> Result<Settings, String> {
    let stored = load_stored().await?;
    Ok(Settings::from_parts(stored.pages, stored.order))
}

/// Persist the filtered snapshot and, from the primary context, broadcast it
/// so other live contexts replace their in-memory copy wholesale.
///
/// A failed write is logged and swallowed: in-memory state stays valid and
/// sibling operations must not be aborted by one bad write. The broadcast is
/// fire-and-forget; nobody listening is not an error.
pub async fn save_settings(settings: &Settings, primary: bool) {
    let snapshot = settings.snapshot();
    persist(&snapshot).await;
    if primary {
        broadcast(SyncMessage::save(snapshot)).await;
    }
}

async fn persist(snapshot: &SettingsSnapshot) {
    match to_js(snapshot) {
        Ok(payload) => {
            if let Err(e) = setStorage(payload).await {
                log::error!("settings write failed: {}", js_error_message(&e));
            }
        }
        Err(e) => log::error!("settings write failed: {e}"),
    }
}

async fn broadcast(message: SyncMessage) {
    match to_js(&message) {
        Ok(payload) => {
            if let Err(e) = sendMessage(payload).await {
                log::debug!("no context received the settings sync: {}", js_error_message(&e));
            }
        }
        Err(e) => log::debug!("settings sync not sent: {e}"),
    }
}

/// Every open tab, across all windows.
pub async fn current_tabs() -> Result<Vec<crate::operations::TabState>, String> {
    let tabs = queryTabs()
        .await
        .map_err(|e| format!("Failed to query tabs: {}", js_error_message(&e)))?;
    serde_wasm_bindgen::from_value(tabs).map_err(|e| format!("Failed to parse tabs: {e}"))
}

/// Open one page as a new tab. Errors carry the host's raw message so the
/// caller can translate the known shapes.
pub async fn create_tab(url: &str, pinned: bool) -> Result<(), String> {
    createTab(url, pinned)
        .await
        .map_err(|e| js_error_message(&e))
}

pub async fn remove_tabs(ids: &[i32]) -> Result<(), String> {
    let ids = to_js(&ids)?;
    removeTabs(ids).await.map_err(|e| js_error_message(&e))
}

pub async fn reload_tab(id: i32) -> Result<(), String> {
    reloadTab(id).await.map_err(|e| js_error_message(&e))
}

pub async fn set_badge_text(text: &str) -> Result<(), String> {
    setBadgeText(text).await.map_err(|e| js_error_message(&e))
}

pub async fn set_popup(path: &str) -> Result<(), String> {
    setPopup(path).await.map_err(|e| js_error_message(&e))
}

/// Replace the stored failure report shown by the report popup.
pub async fn set_local_errors(errors: &[String]) -> Result<(), String> {
    let errors = to_js(&errors)?;
    setLocalErrors(errors).await.map_err(|e| js_error_message(&e))
}
