//! URL utilities.
//!
//! Endpoint validation and resolution of relative endpoints against a base URL.

use url::Url;

use crate::widget::errors::{RemoteSearchError, RemoteSearchResult};

/// Check if a URL is a usable http(s) endpoint
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Parse an absolute http(s) endpoint
pub fn parse_absolute_endpoint(url: &str) -> RemoteSearchResult<Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(RemoteSearchError::Configuration(
            "No url provided: set an absolute or relative url".to_string(),
        ));
    }

    if !is_valid_url(url) {
        return Err(RemoteSearchError::Configuration(format!(
            "Url '{url}' is not an absolute http(s) url"
        )));
    }

    Url::parse(url)
        .map_err(|e| RemoteSearchError::Configuration(format!("Invalid url '{url}': {e}")))
}

/// Resolve a relative endpoint against `base`
///
/// The joined url must still be http(s); a relative endpoint that is itself
/// an absolute url of another scheme is rejected.
pub fn resolve_endpoint(endpoint: &str, base: Option<&str>) -> RemoteSearchResult<Url> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(RemoteSearchError::Configuration(
            "No url provided: set an absolute or relative url".to_string(),
        ));
    }

    let base = base.ok_or_else(|| {
        RemoteSearchError::Configuration(format!(
            "Relative url '{endpoint}' requires a base url"
        ))
    })?;

    if !is_valid_url(base) {
        return Err(RemoteSearchError::Configuration(format!(
            "Base url '{base}' is not an absolute http(s) url"
        )));
    }

    let resolved = Url::parse(base)
        .and_then(|base| base.join(endpoint))
        .map_err(|e| {
            RemoteSearchError::Configuration(format!(
                "Cannot resolve '{endpoint}' against '{base}': {e}"
            ))
        })?;

    if !matches!(resolved.scheme(), "http" | "https") {
        return Err(RemoteSearchError::Configuration(format!(
            "Relative url '{endpoint}' resolves to '{resolved}', not an http(s) url"
        )));
    }
    Ok(resolved)
}
