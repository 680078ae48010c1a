//! Cross-document invariants, checked before any per-language output exists.
//!
//! All checks fail fast on the first violation; nothing is aggregated. The
//! messages name the offending language and section because the fix is always
//! an edit to `conf/custom.yml`.

use crate::config::CustomConfig;
use serde_yaml::Sequence;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("languages in site_name and alternate do not match: {site_name:?} != {alternate:?}")]
    LanguageSetMismatch {
        site_name: Vec<String>,
        alternate: Vec<String>,
    },
    #[error("no \"nav-{0}\" sub-section found in the \"nav\" section of the custom config")]
    NavSectionMissing(String),
    #[error("no \"index.md\" found in the \"nav-{0}\" sub-section of the custom config")]
    NavIndexMissing(String),
}

/// The declared language set: `site_name` keys and `alternate` lang codes
/// must match as ordered sequences (reordering one side is a violation too).
/// Returns the canonical language list.
pub fn validate_languages(custom: &CustomConfig) -> Result<Vec<String>, ValidateError> {
    let site_name: Vec<String> = custom.site_name.langs();
    let alternate: Vec<String> = custom
        .custom_extra
        .alternate
        .iter()
        .map(|entry| entry.lang.clone())
        .collect();
    if site_name != alternate {
        return Err(ValidateError::LanguageSetMismatch {
            site_name,
            alternate,
        });
    }
    Ok(site_name)
}

/// The `nav-<lang>` section must exist and be a sequence.
pub fn validate_nav_section<'a>(
    custom: &'a CustomConfig,
    lang: &str,
) -> Result<&'a Sequence, ValidateError> {
    custom
        .nav
        .section(lang)
        .ok_or_else(|| ValidateError::NavSectionMissing(lang.to_owned()))
}

/// Some entry of the section must point at `index.md`. Top-level entries
/// only; nested sub-sections are not scanned.
pub fn validate_nav_index(section: &Sequence, lang: &str) -> Result<(), ValidateError> {
    let has_index = section.iter().any(|entry| {
        entry
            .as_mapping()
            .is_some_and(|page| page.values().any(|target| target.as_str() == Some("index.md")))
    });
    if has_index {
        Ok(())
    } else {
        Err(ValidateError::NavIndexMissing(lang.to_owned()))
    }
}
