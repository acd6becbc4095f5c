//! Planning for the open-pages action.
//!
//! Everything here is pure: given the pages picked for the day, the tabs the
//! host reported, and the saved options, compute exactly which tabs to
//! close, which to reload, and which pages still need a fresh tab. The glue
//! layer then issues those as independent host requests.

use rand::seq::SliceRandom;

use crate::storage::{CloseTabsMode, ReloadTabsMode, SkipWindowMode, StoredOptions};

/// URLs the host uses for a freshly opened, empty tab.
pub const NEW_TAB_URLS: [&str; 3] = ["about:newtab", "about:home", "chrome://newtab/"];

/// A browser tab as reported by the host at planning time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabState {
    pub id: i32,
    pub url: String,
    pub pinned: bool,
    pub in_active_window: bool,
}

/// What the open action should do, computed before any host call is made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenPlan {
    /// Pages to open as new tabs, in final order.
    pub open: Vec<String>,
    /// Pre-existing tabs to close.
    pub close_ids: Vec<i32>,
    /// Already-open tabs to reload in place.
    pub reload_ids: Vec<i32>,
}

/// Shuffle a working copy of the day's pages (Fisher-Yates). The saved open
/// order is never touched; callers pass an owned list.
pub fn shuffle_pages(pages: &mut [String]) {
    pages.shuffle(&mut rand::thread_rng());
}

/// Compute the open plan for the selected pages against the current tab set.
pub fn plan_open(selected: Vec<String>, tabs: &[TabState], options: &StoredOptions) -> OpenPlan {
    let mut plan = OpenPlan::default();

    if options.should_close_tabs {
        plan.close_ids = tabs
            .iter()
            .filter(|tab| match options.close_tabs {
                CloseTabsMode::Active => tab.in_active_window,
                CloseTabsMode::Unpinned => tab.in_active_window && !tab.pinned,
                CloseTabsMode::Newtab => NEW_TAB_URLS.contains(&tab.url.as_str()),
                CloseTabsMode::All => true,
            })
            .map(|tab| tab.id)
            .collect();
    }

    // A tab slated to close no longer counts as "already open" below.
    let surviving: Vec<&TabState> = tabs
        .iter()
        .filter(|tab| !plan.close_ids.contains(&tab.id))
        .collect();

    for page in selected {
        let mut already_open = false;

        if options.skip_open {
            already_open = surviving.iter().any(|tab| {
                tab.url == page
                    && match options.skip_window {
                        SkipWindowMode::Active => tab.in_active_window,
                        SkipWindowMode::All => true,
                    }
            });
        }

        if options.reload_open {
            let mut reloaded = false;
            for tab in surviving.iter().filter(|tab| tab.url == page) {
                let eligible = match options.reload_tabs {
                    ReloadTabsMode::All => true,
                    ReloadTabsMode::Pinned => tab.pinned,
                    ReloadTabsMode::Unpinned => !tab.pinned,
                };
                if eligible {
                    plan.reload_ids.push(tab.id);
                    reloaded = true;
                }
            }
            // A reloaded page is already on screen; don't open it twice.
            already_open = already_open || reloaded;
        }

        if !already_open {
            plan.open.push(page);
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tab(id: i32, url: &str, pinned: bool, in_active_window: bool) -> TabState {
        TabState {
            id,
            url: url.to_string(),
            pinned,
            in_active_window,
        }
    }

    fn pages(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_default_options_open_everything() {
        let plan = plan_open(
            pages(&["https://a.example", "https://b.example"]),
            &[tab(1, "https://a.example", false, true)],
            &StoredOptions::default(),
        );
        assert_eq!(plan.open, pages(&["https://a.example", "https://b.example"]));
        assert!(plan.close_ids.is_empty());
        assert!(plan.reload_ids.is_empty());
    }

    #[test]
    fn test_close_active_window() {
        let options = StoredOptions {
            should_close_tabs: true,
            close_tabs: CloseTabsMode::Active,
            ..Default::default()
        };
        let tabs = [
            tab(1, "https://x.example", false, true),
            tab(2, "https://y.example", true, true),
            tab(3, "https://z.example", false, false),
        ];
        let plan = plan_open(Vec::new(), &tabs, &options);
        assert_eq!(plan.close_ids, vec![1, 2]);
    }

    #[test]
    fn test_close_unpinned_only() {
        let options = StoredOptions {
            should_close_tabs: true,
            close_tabs: CloseTabsMode::Unpinned,
            ..Default::default()
        };
        let tabs = [
            tab(1, "https://x.example", false, true),
            tab(2, "https://y.example", true, true),
        ];
        let plan = plan_open(Vec::new(), &tabs, &options);
        assert_eq!(plan.close_ids, vec![1]);
    }

    #[test]
    fn test_close_newtab_pages_in_any_window() {
        let options = StoredOptions {
            should_close_tabs: true,
            close_tabs: CloseTabsMode::Newtab,
            ..Default::default()
        };
        let tabs = [
            tab(1, "about:newtab", false, true),
            tab(2, "https://x.example", false, true),
            tab(3, "about:newtab", false, false),
        ];
        let plan = plan_open(Vec::new(), &tabs, &options);
        assert_eq!(plan.close_ids, vec![1, 3]);
    }

    #[test]
    fn test_close_all_windows() {
        let options = StoredOptions {
            should_close_tabs: true,
            close_tabs: CloseTabsMode::All,
            ..Default::default()
        };
        let tabs = [
            tab(1, "https://x.example", true, true),
            tab(2, "https://y.example", false, false),
        ];
        let plan = plan_open(Vec::new(), &tabs, &options);
        assert_eq!(plan.close_ids, vec![1, 2]);
    }

    #[test]
    fn test_skip_open_scoped_to_active_window() {
        let options = StoredOptions {
            skip_open: true,
            skip_window: SkipWindowMode::Active,
            ..Default::default()
        };
        let tabs = [
            tab(1, "https://a.example", false, true),
            tab(2, "https://b.example", false, false),
        ];
        let plan = plan_open(pages(&["https://a.example", "https://b.example"]), &tabs, &options);
        // b is only open in another window, which doesn't count here
        assert_eq!(plan.open, pages(&["https://b.example"]));
    }

    #[test]
    fn test_skip_open_across_all_windows() {
        let options = StoredOptions {
            skip_open: true,
            skip_window: SkipWindowMode::All,
            ..Default::default()
        };
        let tabs = [
            tab(1, "https://a.example", false, true),
            tab(2, "https://b.example", false, false),
        ];
        let plan = plan_open(
            pages(&["https://a.example", "https://b.example", "https://c.example"]),
            &tabs,
            &options,
        );
        assert_eq!(plan.open, pages(&["https://c.example"]));
    }

    #[test]
    fn test_skip_ignores_tabs_slated_to_close() {
        let options = StoredOptions {
            should_close_tabs: true,
            close_tabs: CloseTabsMode::Active,
            skip_open: true,
            skip_window: SkipWindowMode::All,
            ..Default::default()
        };
        let tabs = [tab(1, "https://a.example", false, true)];
        let plan = plan_open(pages(&["https://a.example"]), &tabs, &options);
        // The only matching tab is being closed, so the page opens fresh
        assert_eq!(plan.close_ids, vec![1]);
        assert_eq!(plan.open, pages(&["https://a.example"]));
    }

    #[test]
    fn test_reload_open_tabs_instead_of_reopening() {
        let options = StoredOptions {
            reload_open: true,
            reload_tabs: ReloadTabsMode::All,
            ..Default::default()
        };
        let tabs = [
            tab(1, "https://a.example", false, true),
            tab(2, "https://a.example", false, false),
        ];
        let plan = plan_open(pages(&["https://a.example", "https://b.example"]), &tabs, &options);
        assert_eq!(plan.reload_ids, vec![1, 2]);
        assert_eq!(plan.open, pages(&["https://b.example"]));
    }

    #[test]
    fn test_reload_filtered_by_pinned_state() {
        let options = StoredOptions {
            reload_open: true,
            reload_tabs: ReloadTabsMode::Pinned,
            ..Default::default()
        };
        let tabs = [
            tab(1, "https://a.example", true, true),
            tab(2, "https://a.example", false, true),
        ];
        let plan = plan_open(pages(&["https://a.example"]), &tabs, &options);
        assert_eq!(plan.reload_ids, vec![1]);
        // An eligible tab was reloaded, so the page is not reopened
        assert!(plan.open.is_empty());
    }

    #[test]
    fn test_reload_with_no_eligible_tab_still_opens() {
        let options = StoredOptions {
            reload_open: true,
            reload_tabs: ReloadTabsMode::Pinned,
            ..Default::default()
        };
        let tabs = [tab(1, "https://a.example", false, true)];
        let plan = plan_open(pages(&["https://a.example"]), &tabs, &options);
        assert!(plan.reload_ids.is_empty());
        assert_eq!(plan.open, pages(&["https://a.example"]));
    }

    #[test]
    fn test_shuffle_keeps_the_same_pages() {
        let original = pages(&[
            "https://a.example",
            "https://b.example",
            "https://c.example",
            "https://d.example",
        ]);
        let mut shuffled = original.clone();
        shuffle_pages(&mut shuffled);
        assert_eq!(shuffled.len(), original.len());
        assert_eq!(
            shuffled.iter().collect::<HashSet<_>>(),
            original.iter().collect::<HashSet<_>>()
        );
    }
}
