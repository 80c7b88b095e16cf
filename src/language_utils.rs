//! Language utilities for the language tags sent to the translation service
//!
//! Tags are an ISO 639-1 (2-letter) or ISO 639-2/3 (3-letter) primary subtag,
//! optionally followed by a region subtag, e.g. `en`, `zh-CN`, `pt_BR`.

use anyhow::{Result, anyhow};
use isolang::Language;

/// A parsed language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    /// The ISO language matching the primary subtag
    pub language: Language,
    /// Region subtag in upper case, if present
    pub region: Option<String>,
}

/// Parse and validate a language tag
pub fn parse_language_tag(tag: &str) -> Result<LanguageTag> {
    let trimmed = tag.trim();
    let mut parts = trimmed.splitn(2, ['-', '_']);
    let primary = parts.next().unwrap_or_default().to_lowercase();

    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Invalid language code: {}", tag))?;

    let region = match parts.next() {
        None => None,
        Some(region) if is_region_subtag(region) => Some(region.to_uppercase()),
        Some(region) => return Err(anyhow!("Invalid region '{}' in language code: {}", region, tag)),
    };

    Ok(LanguageTag { language, region })
}

/// Region subtags are two letters (`CN`) or three digits (`419`)
fn is_region_subtag(region: &str) -> bool {
    (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()))
        || (region.len() == 3 && region.chars().all(|c| c.is_ascii_digit()))
}

/// Validate a language tag, discarding the parsed value
pub fn validate_language_code(tag: &str) -> Result<()> {
    parse_language_tag(tag).map(|_| ())
}

/// Get a display name for a language tag, e.g. `Chinese (CN)`
pub fn get_language_name(tag: &str) -> Result<String> {
    let parsed = parse_language_tag(tag)?;
    let name = parsed.language.to_name();

    Ok(match parsed.region {
        Some(region) => format!("{} ({})", name, region),
        None => name.to_string(),
    })
}
