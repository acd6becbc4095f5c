//! Persisted settings shapes.
//!
//! These types mirror the host's sync-storage layout exactly, so a snapshot
//! round-trips byte-for-byte: `order` and `pages` hold the saved pages,
//! `view` remembers the last preferences view, and `options` carries the
//! open-action behavior toggles. Every field defaults, so a fresh profile
//! deserializes from an empty object.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::days::Days;

/// Which preferences view was last used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Days,
    Pages,
}

/// Which pre-existing tabs the open action closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseTabsMode {
    /// Every tab in the active window.
    #[default]
    Active,
    /// Unpinned tabs in the active window.
    Unpinned,
    /// Tabs still showing the new-tab page, in any window.
    Newtab,
    /// Every tab in every window.
    All,
}

/// Which windows count when deciding a page is already open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipWindowMode {
    #[default]
    Active,
    All,
}

/// Which already-open tabs are eligible for an in-place reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadTabsMode {
    #[default]
    All,
    Pinned,
    Unpinned,
}

/// Behavior toggles for the open-pages action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredOptions {
    pub randomize: bool,
    pub should_close_tabs: bool,
    pub close_tabs: CloseTabsMode,
    pub open_as_pinned: bool,
    pub skip_open: bool,
    pub skip_window: SkipWindowMode,
    pub reload_open: bool,
    pub reload_tabs: ReloadTabsMode,
}

/// The `{order, pages}` pair: what `save` writes and what gets broadcast to
/// other live contexts after a save.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    pub order: Vec<String>,
    pub pages: HashMap<String, Days>,
}

/// Everything the host has persisted for this extension.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSettings {
    pub order: Vec<String>,
    pub pages: HashMap<String, Days>,
    pub view: ViewMode,
    pub options: StoredOptions,
}

/// Envelope for the cross-context change notification sent after a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncMessage {
    pub message: String,
    pub settings: SettingsSnapshot,
}

impl SyncMessage {
    pub const SAVE: &str = "save";

    pub fn save(settings: SettingsSnapshot) -> Self {
        SyncMessage {
            message: Self::SAVE.to_string(),
            settings,
        }
    }
}
