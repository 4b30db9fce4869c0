//! Utility functions for name normalization and request planning.
//!
//! Everything here is pure: input cleanup, extension ordering, the ordered
//! list of (name, extension) pairs and search URL construction.

use crate::error::ScoutError;
use crate::types::{DOMAIN_PLACEHOLDER, SUPPORTED_EXTENSIONS};
use url::Url;

/// Outcome of normalizing a batch of raw inputs.
#[derive(Debug, Clone, Default)]
pub struct NormalizedNames {
    /// Valid base names, first occurrence order, no duplicates
    pub names: Vec<String>,
    /// Inputs that could not be used
    pub rejected: Vec<ScoutError>,
}

/// Normalize one raw input into a base name.
///
/// Trims, lowercases, drops a URL scheme, a leading `www.`, any path, and
/// everything from the first dot on (`"Example.COM"` -> `"example"`).
pub fn normalize_name(raw: &str) -> Result<String, ScoutError> {
    let mut name = raw.trim().to_lowercase();

    for scheme in ["https://", "http://"] {
        if let Some(rest) = name.strip_prefix(scheme) {
            name = rest.to_string();
        }
    }
    if let Some(rest) = name.strip_prefix("www.") {
        name = rest.to_string();
    }
    if let Some(idx) = name.find('/') {
        name.truncate(idx);
    }
    if let Some(idx) = name.find('.') {
        name.truncate(idx);
    }

    if name.is_empty() {
        return Err(ScoutError::invalid_domain(raw.trim(), "Domain name cannot be empty"));
    }
    if !is_valid_base_name(&name) {
        return Err(ScoutError::invalid_domain(
            raw.trim(),
            "Use 1-63 letters, digits or hyphens, not starting or ending with a hyphen",
        ));
    }

    Ok(name)
}

/// Normalize many inputs, keeping order and dropping duplicates.
pub fn normalize_names<I, S>(inputs: I) -> NormalizedNames
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = NormalizedNames::default();

    for raw in inputs {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            continue;
        }
        match normalize_name(raw) {
            Ok(name) => {
                if !out.names.contains(&name) {
                    out.names.push(name);
                }
            }
            Err(e) => out.rejected.push(e),
        }
    }

    out
}

/// Validate a base domain name (a single DNS label).
pub fn is_valid_base_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 63 {
        return false;
    }

    // Cannot start or end with hyphen
    if name.starts_with('-') || name.ends_with('-') {
        return false;
    }

    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Normalize an extension to its dotted lowercase form (`"COM"` -> `".com"`).
pub fn normalize_extension(raw: &str) -> Result<String, ScoutError> {
    let trimmed = raw.trim().trim_start_matches('.').to_lowercase();
    let ext = format!(".{}", trimmed);

    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(ScoutError::config(format!(
            "Unsupported extension '{}'. Supported: {}",
            raw.trim(),
            SUPPORTED_EXTENSIONS.join(", ")
        )))
    }
}

/// Normalize a selection of extensions and return it in canonical order.
pub fn order_extensions<S: AsRef<str>>(selected: &[S]) -> Result<Vec<String>, ScoutError> {
    let mut wanted = Vec::new();
    for raw in selected {
        wanted.push(normalize_extension(raw.as_ref())?);
    }

    let ordered: Vec<String> = SUPPORTED_EXTENSIONS
        .iter()
        .filter(|ext| wanted.iter().any(|w| w == *ext))
        .map(|ext| ext.to_string())
        .collect();

    if ordered.is_empty() {
        return Err(ScoutError::config("Select at least one extension"));
    }

    Ok(ordered)
}

/// Every (name, extension) pair in checking order: names first, then
/// extensions within a name.
pub fn plan_pairs(names: &[String], extensions: &[String]) -> Vec<(String, String)> {
    names
        .iter()
        .flat_map(|name| {
            extensions
                .iter()
                .map(move |ext| (name.clone(), ext.clone()))
        })
        .collect()
}

/// Check that a search URL template is usable.
pub fn validate_search_url(template: &str) -> Result<(), ScoutError> {
    if !template.contains(DOMAIN_PLACEHOLDER) {
        return Err(ScoutError::config(format!(
            "Search URL must contain the {} placeholder",
            DOMAIN_PLACEHOLDER
        )));
    }
    build_search_url(template, "example.com").map(|_| ())
}

/// Substitute `full_domain` into the template and parse the result.
pub fn build_search_url(template: &str, full_domain: &str) -> Result<Url, ScoutError> {
    let url = Url::parse(&template.replace(DOMAIN_PLACEHOLDER, full_domain))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ScoutError::config(format!(
            "Search URL must use http or https, got '{}'",
            other
        ))),
    }
}

/// Parse a newline-separated list of names.
///
/// Empty lines and `#` comments (whole-line or trailing) are skipped.
pub fn parse_name_list(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let entry = line.split('#').next().unwrap_or("").trim();
            if entry.is_empty() {
                None
            } else {
                Some(entry.to_string())
            }
        })
        .collect()
}
