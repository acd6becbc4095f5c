//! Page-URL validation.
//!
//! A page can only be saved if the host would accept it as a tab URL later,
//! so candidates are rejected up front: no scheme, a scheme tabs cannot
//! open, or a string that does not parse as a URL.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

static SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w-]+?:").unwrap());

// Schemes that cannot be opened as ordinary tabs, or that would be a
// security problem to open programmatically.
const DISALLOWED_SCHEMES: [&str; 5] = ["about:", "chrome:", "data:", "file:", "javascript:"];

/// Why a candidate page was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("\"{0}\" is missing a scheme such as \"https://\"")]
    NoScheme(String),
    #[error("pages with the \"{0}\" scheme cannot be opened in a tab")]
    DisallowedScheme(String),
    #[error("\"{0}\" is not a well-formed URL")]
    MalformedUrl(String),
}

/// Check that a candidate page could be opened as a tab.
pub fn validate(page: &str) -> Result<(), ValidationError> {
    let Some(scheme) = SCHEME.find(page) else {
        return Err(ValidationError::NoScheme(page.to_string()));
    };
    let scheme = scheme.as_str();
    if DISALLOWED_SCHEMES.contains(&scheme) {
        return Err(ValidationError::DisallowedScheme(scheme.to_string()));
    }
    if Url::parse(page).is_err() {
        return Err(ValidationError::MalformedUrl(page.to_string()));
    }
    Ok(())
}

/// A failure reported back by the host while opening a tab.
///
/// Validation cannot anticipate every rejection (the host applies its own
/// restrictions), so the two known rejection message shapes are recognized
/// and the offending value pulled out; anything else passes through as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("the host rejected \"{0}\" as an invalid URL")]
    InvalidUrl(String),
    #[error("the host refused to open \"{0}\"")]
    IllegalUrl(String),
    #[error("{0}")]
    Other(String),
}

static NOT_VALID_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?) is not a valid URL\.$").unwrap());
static ILLEGAL_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Illegal URL: (.+?)$").unwrap());

/// Classify a raw host error message.
pub fn translate_error(raw: &str) -> HostError {
    if let Some(caps) = NOT_VALID_URL.captures(raw) {
        return HostError::InvalidUrl(caps[1].to_string());
    }
    if let Some(caps) = ILLEGAL_URL.captures(raw) {
        return HostError::IllegalUrl(caps[1].to_string());
    }
    HostError::Other(raw.to_string())
}
