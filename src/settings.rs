//! The user's page collection: an ordered mapping from page URL to the days
//! it should be opened on.
//!
//! Two invariants hold across every operation: a page appears in the open
//! order at most once, and day masks never carry bits outside the seven
//! legal positions (enforced at every ingest point by [`Days`]). The empty
//! string is a legal placeholder page for a not-yet-filled editor row; it is
//! never persisted, and neither is a page whose mask has gone empty. Both
//! are filtered out by [`Settings::snapshot`].

use std::collections::HashMap;

use thiserror::Error;

use crate::days::Days;
use crate::storage::SettingsSnapshot;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A caller asked to reorder a page it never inserted. This is a logic
    /// defect upstream, not a user-input problem, so it aborts the
    /// operation instead of being silently ignored.
    #[error("cannot swap page that does not exist: {page}")]
    PageNotFound { page: String },
}

/// The ordered page -> days collection behind every surface of the
/// extension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pages: HashMap<String, Days>,
    order: Vec<String>,
}

impl Settings {
    pub fn new() -> Self {
        Settings::default()
    }

    /// Build from already-separated parts, e.g. the fields of a stored
    /// snapshot. Masks arriving through [`Days`] deserialization are already
    /// truncated to the legal range.
    pub fn from_parts(pages: HashMap<String, Days>, order: Vec<String>) -> Self {
        Settings { pages, order }
    }

    pub fn from_snapshot(snapshot: SettingsSnapshot) -> Self {
        Settings::from_parts(snapshot.pages, snapshot.order)
    }

    /// The days a page is set to be opened on, or the empty mask if the page
    /// is unknown.
    pub fn get_days(&self, page: &str) -> Days {
        self.pages.get(page).copied().unwrap_or_default()
    }

    /// The page's position in the open order.
    pub fn index_of(&self, page: &str) -> Option<usize> {
        self.order.iter().position(|p| p == page)
    }

    /// The pages to be opened on a given set of days, in open order. The
    /// empty mask matches every page, so `pages_for_day(Days::empty())`
    /// enumerates everything.
    pub fn pages_for_day(&self, day: Days) -> Vec<&str> {
        self.order
            .iter()
            .filter(|page| self.page_on_day(page, day))
            .map(String::as_str)
            .collect()
    }

    /// Whether a page is opened on each of a given set of days.
    pub fn page_on_day(&self, page: &str, day: Days) -> bool {
        self.get_days(page).contains(day)
    }

    /// Add days to a page's mask, creating the page entry if needed. The
    /// open order is untouched.
    pub fn add_day(&mut self, page: &str, day: Days) {
        let entry = self.pages.entry(page.to_string()).or_default();
        *entry |= day;
    }

    /// Remove days from a page's mask. The page stays present even if its
    /// mask goes empty; the snapshot filter drops it at save time.
    pub fn remove_day(&mut self, page: &str, day: Days) {
        if let Some(mask) = self.pages.get_mut(page) {
            *mask &= !day;
        }
    }

    /// Set or clear a single day flag for a page, appending the page to the
    /// open order on first use. This is the composite every toggle surface
    /// (menu checkbox, grid checkbox) performs.
    pub fn set_day_enabled(&mut self, page: &str, day: Days, enabled: bool) {
        if enabled {
            self.add_day(page, day);
            if self.index_of(page).is_none() {
                self.insert(page, None);
            }
        } else {
            self.remove_day(page, day);
        }
    }

    /// Completely delete all references to a page. Idempotent.
    pub fn delete_page(&mut self, page: &str) {
        if let Some(idx) = self.index_of(page) {
            self.order.remove(idx);
        }
        self.pages.remove(page);
    }

    /// Insert a page at the given position in the open order, or move it
    /// there if it is already listed; `None` appends. Any prior occurrence
    /// is removed first, so the page ends up at exactly one position. If the
    /// page already sits at the requested position this is a no-op.
    pub fn insert(&mut self, page: &str, index: Option<usize>) {
        let idx = index.unwrap_or(self.order.len());
        let prev = self.index_of(page);
        if prev == Some(idx) {
            return; // Nothing to change
        }
        if let Some(p) = prev {
            self.order.remove(p);
        }
        let idx = idx.min(self.order.len());
        self.order.insert(idx, page.to_string());
    }

    /// Swap the open-order positions of two pages. Both must already be
    /// listed; on failure the order is left unmodified.
    pub fn swap(&mut self, a: &str, b: &str) -> Result<(), SettingsError> {
        let ia = self.index_of(a).ok_or_else(|| SettingsError::PageNotFound {
            page: a.to_string(),
        })?;
        let ib = self.index_of(b).ok_or_else(|| SettingsError::PageNotFound {
            page: b.to_string(),
        })?;
        self.order.swap(ia, ib);
        Ok(())
    }

    /// Whether a page has both a mask entry and a position in the open
    /// order. A zero mask still counts; only full absence does not.
    pub fn has(&self, page: &str) -> bool {
        self.pages.contains_key(page) && self.index_of(page).is_some()
    }

    /// Rename a page in place, carrying its mask and order slot over.
    ///
    /// Callers must check [`Settings::has`] for `curr` first: replacing onto
    /// an existing page would overwrite its mask and leave a duplicate in
    /// the open order.
    pub fn replace(&mut self, prev: &str, curr: &str) {
        if prev == curr {
            return; // Nothing to change.
        }
        debug_assert!(!self.has(curr), "replace target already present: {curr}");
        let days = self.pages.remove(prev).unwrap_or_default();
        self.pages.insert(curr.to_string(), days);
        if let Some(idx) = self.index_of(prev) {
            self.order[idx] = curr.to_string();
        }
    }

    /// The persistable view of this collection: open order preserved, with
    /// the empty placeholder page and any page set to open on no days left
    /// out.
    pub fn snapshot(&self) -> SettingsSnapshot {
        let mut snapshot = SettingsSnapshot::default();
        for page in &self.order {
            let days = self.get_days(page);
            if !page.is_empty() && !days.is_empty() {
                snapshot.order.push(page.clone());
                snapshot.pages.insert(page.clone(), days);
            }
        }
        snapshot
    }
}
