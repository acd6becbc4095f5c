//! The open-pages action and the menu-toggle entry point.
//!
//! Opening runs as a batch of independent host requests: close, reload,
//! then create, in that order. Every request is attempted even when earlier
//! ones fail; failures are translated and consolidated into one report the
//! user sees on the toolbar badge.

use web_sys::console;

use crate::browser;
use crate::days::Days;
use crate::operations::{plan_open, shuffle_pages};
use crate::settings::Settings;
use crate::storage::StoredSettings;
use crate::validate;

/// Where the consolidated failure report lives.
const REPORT_POPUP: &str = "popup/popup.html";

/// Open the user's saved pages for a weekday (0 = Sunday), or for today.
pub async fn open_pages(day_index: Option<u8>) -> Result<(), String> {
    let day = match day_index {
        Some(i) => Days::for_weekday(i).ok_or_else(|| format!("no such weekday index: {i}"))?,
        None => today(),
    };
    let StoredSettings {
        pages,
        order,
        options,
        ..
    } = browser::load_stored().await?;
    let settings = Settings::from_parts(pages, order);

    let mut selected: Vec<String> = settings
        .pages_for_day(day)
        .into_iter()
        .map(str::to_string)
        .collect();
    if options.randomize {
        shuffle_pages(&mut selected);
    }

    let tabs = browser::current_tabs().await?;
    let plan = plan_open(selected, &tabs, &options);
    if plan == Default::default() {
        console::log_1(&"No pages to open today".into());
        return Ok(());
    }

    let mut failures: Vec<String> = Vec::new();
    if !plan.close_ids.is_empty() {
        if let Err(raw) = browser::remove_tabs(&plan.close_ids).await {
            failures.push(validate::translate_error(&raw).to_string());
        }
    }
    for id in &plan.reload_ids {
        if let Err(raw) = browser::reload_tab(*id).await {
            failures.push(validate::translate_error(&raw).to_string());
        }
    }
    for page in &plan.open {
        if let Err(raw) = browser::create_tab(page, options.open_as_pinned).await {
            failures.push(validate::translate_error(&raw).to_string());
        }
    }

    if !failures.is_empty() {
        report_failures(&failures).await;
    }
    Ok(())
}

/// Set or clear one day flag for a page and persist the result. The page is
/// validated first so a bad URL never reaches storage.
pub async fn set_page_day(page: &str, day: u8, enabled: bool) -> Result<(), String> {
    validate::validate(page).map_err(|e| e.to_string())?;
    let day = Days::from_bits_truncate(day);
    let mut settings = browser::load_settings().await?;
    settings.set_day_enabled(page, day, enabled);
    browser::save_settings(&settings, true).await;
    Ok(())
}

fn today() -> Days {
    // getDay is always 0..=6
    Days::for_weekday(js_sys::Date::new_0().get_day() as u8).unwrap_or_default()
}

/// Store the failure list for the report popup, arm the popup, and put the
/// failure count on the badge. Each step is attempted regardless of the
/// others.
async fn report_failures(failures: &[String]) {
    log::warn!("{} host request(s) failed", failures.len());
    if let Err(e) = browser::set_local_errors(failures).await {
        log::error!("could not store the failure report: {e}");
    }
    if let Err(e) = browser::set_badge_text(&failures.len().to_string()).await {
        log::error!("could not set the badge text: {e}");
    }
    if let Err(e) = browser::set_popup(REPORT_POPUP).await {
        log::error!("could not arm the report popup: {e}");
    }
}
