//! Lookup helpers over the configuration documents.
//!
//! Two access patterns recur through derivation:
//!
//! - localized lookup (`copyright[es]`), with distinct errors for an absent
//!   section vs. an absent language under an existing section
//! - plugin lookup: find the `{name: settings}` block in the ordered plugin
//!   list by its first key; absence is non-fatal

use crate::config::{Localized, PluginList};
use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("key \"{0}\" not found in custom config")]
    SettingMissing(String),
    #[error("language \"{lang}\" not found for setting \"{key}\" in custom config")]
    TranslationMissing { lang: String, key: String },
    #[error("value for language \"{lang}\" under setting \"{key}\" in custom config is not a string")]
    TranslationNotAString { lang: String, key: String },
}

/// Fetch the localized value `section[lang]`.
///
/// `section` is `None` when the whole block is missing from the custom file;
/// that is reported as a missing setting, not a missing translation. A null
/// value counts as missing too. Scalars that YAML parsed as numbers or
/// booleans (`copyright: {en: 2024}`) are stringified; anything structured is
/// a type error naming the language and key.
pub fn lang_setting(
    section: Option<&Localized>,
    lang: &str,
    key: &str,
) -> Result<String, SettingsError> {
    let section = section.ok_or_else(|| SettingsError::SettingMissing(key.to_owned()))?;
    match section.get(lang) {
        None | Some(Value::Null) => Err(SettingsError::TranslationMissing {
            lang: lang.to_owned(),
            key: key.to_owned(),
        }),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        Some(Value::Bool(value)) => Ok(value.to_string()),
        Some(_) => Err(SettingsError::TranslationNotAString {
            lang: lang.to_owned(),
            key: key.to_owned(),
        }),
    }
}

/// Settings value of the first plugin block whose first key equals `name`.
pub fn list_setting<'a>(list: &'a PluginList, name: &str) -> Option<&'a Value> {
    list.0.iter().find_map(|block| {
        let (key, value) = block.iter().next()?;
        (key.as_str() == Some(name)).then_some(value)
    })
}

/// Mutable variant of [`list_setting`].
pub fn list_setting_mut<'a>(list: &'a mut PluginList, name: &str) -> Option<&'a mut Value> {
    list.0.iter_mut().find_map(|block| {
        let matches = block.iter().next().and_then(|(key, _)| key.as_str()) == Some(name);
        if matches { block.values_mut().next() } else { None }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localized(yaml: &str) -> Localized {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn plugins(yaml: &str) -> PluginList {
        serde_yaml::from_str(yaml).unwrap()
    }

    // =========================================================================
    // lang_setting
    // =========================================================================

    #[test]
    fn lang_setting_returns_localized_value() {
        let section = localized("en: The Handbook\nes: El Manual\n");
        assert_eq!(
            lang_setting(Some(&section), "es", "site_name").unwrap(),
            "El Manual"
        );
    }

    #[test]
    fn lang_setting_absent_section_is_a_missing_key() {
        let err = lang_setting(None, "en", "copyright").unwrap_err();
        assert!(matches!(err, SettingsError::SettingMissing(_)));
        assert_eq!(err.to_string(), "key \"copyright\" not found in custom config");
    }

    #[test]
    fn lang_setting_absent_language_names_both() {
        let section = localized("en: some value\n");
        let err = lang_setting(Some(&section), "pt", "copyright").unwrap_err();
        assert!(matches!(err, SettingsError::TranslationMissing { .. }));
        assert_eq!(
            err.to_string(),
            "language \"pt\" not found for setting \"copyright\" in custom config"
        );
    }

    #[test]
    fn lang_setting_null_value_counts_as_missing() {
        let section = localized("en:\n");
        let err = lang_setting(Some(&section), "en", "copyright").unwrap_err();
        assert!(matches!(err, SettingsError::TranslationMissing { .. }));
    }

    #[test]
    fn lang_setting_stringifies_scalars() {
        let section = localized("en: 2024\nes: true\n");
        assert_eq!(lang_setting(Some(&section), "en", "copyright").unwrap(), "2024");
        assert_eq!(lang_setting(Some(&section), "es", "copyright").unwrap(), "true");
    }

    #[test]
    fn lang_setting_structured_value_is_a_type_error() {
        let section = localized("en:\n  - not\n  - a string\n");
        let err = lang_setting(Some(&section), "en", "copyright").unwrap_err();
        assert!(matches!(err, SettingsError::TranslationNotAString { .. }));
        assert_eq!(
            err.to_string(),
            "value for language \"en\" under setting \"copyright\" in custom config is not a string"
        );
    }

    // =========================================================================
    // list_setting
    // =========================================================================

    #[test]
    fn list_setting_finds_block_by_first_key() {
        let list = plugins("- search:\n    lang: en\n- pdf-export:\n    cover: true\n");
        let search = list_setting(&list, "search").unwrap();
        assert_eq!(search.get("lang").unwrap().as_str(), Some("en"));
    }

    #[test]
    fn list_setting_absent_name_is_none() {
        let list = plugins("- search:\n    lang: en\n");
        assert!(list_setting(&list, "minify").is_none());
    }

    #[test]
    fn list_setting_first_match_wins() {
        let list = plugins("- search:\n    lang: en\n- search:\n    lang: es\n");
        let search = list_setting(&list, "search").unwrap();
        assert_eq!(search.get("lang").unwrap().as_str(), Some("en"));
    }

    #[test]
    fn list_setting_block_with_null_settings() {
        let list = plugins("- search:\n");
        assert!(list_setting(&list, "search").unwrap().is_null());
    }

    #[test]
    fn list_setting_mut_mutates_in_place() {
        let mut list = plugins("- search:\n    lang: en\n");
        if let Some(Value::Mapping(settings)) = list_setting_mut(&mut list, "search") {
            settings.insert("lang".into(), "pt".into());
        }
        let search = list_setting(&list, "search").unwrap();
        assert_eq!(search.get("lang").unwrap().as_str(), Some("pt"));
    }

    #[test]
    fn list_setting_mut_absent_name_is_none() {
        let mut list = plugins("- search:\n    lang: en\n");
        assert!(list_setting_mut(&mut list, "minify").is_none());
    }
}
