//! Per-language configuration derivation.
//!
//! The deriver turns the loaded base + custom documents (already checked for
//! language-set consistency), the pre-derived site URLs, and one language code
//! into that language's fully-resolved document:
//!
//! 1. clone the base document
//! 2. theme language = code
//! 3. `search` plugin lang = code
//! 4. `pdf-export` plugin output path = `pdf/doc-<code>.pdf`
//! 5. `LANG` placeholder substituted in the edit URI
//! 6. docs dir suffixed with `/docs-<code>`
//! 7. free-form remainder overlay (custom wins, reserved keys dropped)
//! 8. localized copyright, site_name, site_description, site_author resolved
//!    in that order (first missing one aborts; the order is user-facing)
//! 9. nav section + index page validated, `nav-<code>` selected
//! 10. site dir: site root for the default language, `/<code>` subtree else
//! 11. PDF cover fields mirror the resolved strings
//! 12. root-relative CSS/JS entries prefixed with the assets folder
//! 13. `custom_extra` (alternate + variables) merged into `extra`
//! 14. `extra.pdf_url` computed, trailing `{"PDF": url}` nav entry appended
//!
//! Plugin-dependent steps (3, 4, 11, 14) skip silently when the block is
//! absent: no plugin, no PDF artifact to configure or link. Rendering and
//! persistence stay outside so the derivation is a pure function of its
//! inputs; [`finalize_docs_dir`] bolts the render step on for the driver.

use crate::config::{self, BaseConfig, CustomConfig, ResolvedConfig};
use crate::paths::{DEFAULT_LANG, Env};
use crate::render::{self, RenderError, RenderOutcome};
use crate::settings::{self, SettingsError};
use crate::validate::{self, ValidateError};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use thiserror::Error;

pub const SEARCH_PLUGIN: &str = "search";
pub const PDF_PLUGIN: &str = "pdf-export";

const ASSETS_FOLDER_KEY: &str = "assets_folder";

#[derive(Error, Debug)]
pub enum DeriveError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Validate(#[from] ValidateError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("YAML value conversion failed: {0}")]
    Value(#[from] serde_yaml::Error),
}

/// Public URLs shared by every language, derived once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    pub repo_url: String,
    pub site_url: String,
    /// Base path prod links live under; empty for sites at a domain root.
    pub base_path: String,
}

impl SiteUrls {
    /// A non-empty `custom_site_url` wins, minus any trailing slash (derived
    /// URLs like the PDF link append their own `/` segments), together with
    /// whatever base path was explicitly configured (default empty).
    /// Otherwise GitHub Pages conventions apply:
    /// `https://<user>.github.io/<name>` under `/<name>`.
    pub fn derive(custom: &CustomConfig) -> Self {
        let repo_url = format!(
            "https://github.com/{}/{}",
            custom.repo_user, custom.repo_name
        );
        let custom_url = custom
            .custom_site_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'));
        match custom_url {
            Some(url) if !url.is_empty() => Self {
                repo_url,
                site_url: url.to_owned(),
                base_path: custom.public_url_base_path.clone().unwrap_or_default(),
            },
            _ => Self {
                site_url: format!(
                    "https://{}.github.io/{}",
                    custom.repo_user, custom.repo_name
                ),
                base_path: format!("/{}", custom.repo_name),
                repo_url,
            },
        }
    }
}

/// In prod the shared assets are served under the public base path, so the
/// `assets_folder` template variable must carry the prefix. No-op locally and
/// when the base document declares no assets folder.
pub fn apply_env_assets_prefix(base: &mut BaseConfig, urls: &SiteUrls, env: Env) {
    if env != Env::Prod {
        return;
    }
    let folder = base
        .extra
        .get(ASSETS_FOLDER_KEY)
        .and_then(Value::as_str)
        .map(str::to_owned);
    if let Some(folder) = folder {
        base.extra.insert(
            ASSETS_FOLDER_KEY.into(),
            format!("{}{}", urls.base_path, folder).into(),
        );
    }
}

/// Derive the resolved document for one language (steps 1 through 14).
pub fn derive_language_config(
    base: &BaseConfig,
    custom: &CustomConfig,
    urls: &SiteUrls,
    lang: &str,
) -> Result<ResolvedConfig, DeriveError> {
    // Steps 2-4: language-qualify the theme and plugin blocks.
    let mut theme = base.theme.clone();
    theme.insert("language".into(), lang.into());

    let mut plugins = base.plugins.clone();
    if let Some(block) = settings::list_setting_mut(&mut plugins, SEARCH_PLUGIN) {
        insert_plugin_setting(block, "lang", lang.into());
    }
    let has_pdf_plugin = settings::list_setting(&plugins, PDF_PLUGIN).is_some();
    if let Some(block) = settings::list_setting_mut(&mut plugins, PDF_PLUGIN) {
        insert_plugin_setting(block, "output_path", format!("pdf/doc-{lang}.pdf").into());
    }

    // Steps 5-6: language-qualified edit link and docs source.
    let edit_uri = base.edit_uri.replace("LANG", lang);
    let docs_dir = format!("{}/docs-{lang}", base.docs_dir);

    // Step 7: free-form overlay.
    let rest = config::overlay_rest(&base.rest, &custom.rest);

    // Step 8: localized lookups. The order fixes which missing piece the
    // user hears about first.
    let copyright = settings::lang_setting(custom.copyright.as_ref(), lang, "copyright")?;
    let site_name = settings::lang_setting(Some(&custom.site_name), lang, "site_name")?;
    let site_description =
        settings::lang_setting(custom.site_description.as_ref(), lang, "site_description")?;
    let site_author = settings::lang_setting(custom.site_author.as_ref(), lang, "site_author")?;

    // Step 9: navigation.
    let section = validate::validate_nav_section(custom, lang)?;
    validate::validate_nav_index(section, lang)?;
    let mut nav = section.clone();

    // Step 10: the default language publishes at the site root.
    let site_dir = if lang == DEFAULT_LANG {
        "../site".to_owned()
    } else {
        format!("../site/{lang}")
    };

    // Step 11: PDF cover metadata mirrors the per-language strings.
    if let Some(block) = settings::list_setting_mut(&mut plugins, PDF_PLUGIN) {
        insert_plugin_setting(block, "cover_title", site_name.as_str().into());
        insert_plugin_setting(block, "cover_subtitle", site_description.as_str().into());
        insert_plugin_setting(block, "author", site_author.as_str().into());
    }

    // Step 12: root-relative assets live under the (possibly env-prefixed)
    // assets folder.
    let assets_folder = base
        .extra
        .get(ASSETS_FOLDER_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();
    let extra_css = prefix_root_relative(&base.extra_css, assets_folder);
    let extra_javascript = prefix_root_relative(&base.extra_javascript, assets_folder);

    // Step 13: the language switcher context joins the template variables.
    let mut extra = base.extra.clone();
    extra.insert(
        "alternate".into(),
        serde_yaml::to_value(&custom.custom_extra.alternate)?,
    );
    for (key, value) in &custom.custom_extra.vars {
        extra.insert(key.clone(), value.clone());
    }

    // Step 14: PDF URL for templates and as the trailing nav entry.
    if has_pdf_plugin {
        let pdf_url = if lang == DEFAULT_LANG {
            format!("{}/pdf/doc-{lang}.pdf", urls.site_url)
        } else {
            format!("{}/{lang}/pdf/doc-{lang}.pdf", urls.site_url)
        };
        extra.insert("pdf_url".into(), pdf_url.as_str().into());
        let mut entry = Mapping::new();
        entry.insert("PDF".into(), pdf_url.into());
        nav.push(Value::Mapping(entry));
    }

    Ok(ResolvedConfig {
        site_name,
        site_description,
        site_author,
        copyright,
        repo_url: urls.repo_url.clone(),
        site_url: urls.site_url.clone(),
        edit_uri,
        docs_dir,
        site_dir,
        theme,
        nav,
        plugins,
        extra_css,
        extra_javascript,
        extra,
        rest,
    })
}

/// Step 15, run by the driver: render the docs tree and repoint `docs_dir`
/// at the fixed copy. `conf_dir` anchors the relative `docs_dir` value.
pub fn finalize_docs_dir(
    config: &mut ResolvedConfig,
    conf_dir: &Path,
) -> Result<RenderOutcome, DeriveError> {
    let source = conf_dir.join(&config.docs_dir);
    let outcome = render::render_docs_tree(&source, &config.extra)?;
    config.docs_dir = fixed_relative(&config.docs_dir);
    Ok(outcome)
}

/// The renderer's `fixed-` naming rule applied to a config-relative path
/// (always `/`-separated, it is a YAML value rather than an OS path).
fn fixed_relative(docs_dir: &str) -> String {
    match docs_dir.rsplit_once('/') {
        Some((parent, name)) => format!("{parent}/fixed-{name}"),
        None => format!("fixed-{docs_dir}"),
    }
}

/// Plugin blocks may carry null settings (`- search:`); promote to a mapping
/// before inserting.
fn insert_plugin_setting(block: &mut Value, key: &str, value: Value) {
    if !block.is_mapping() {
        *block = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(settings) = block {
        settings.insert(key.into(), value);
    }
}

/// `/css/extra.css` → `<assets_folder>/css/extra.css`; entries not starting
/// with `/` (relative paths, full URLs) pass through unchanged.
fn prefix_root_relative(entries: &[String], assets_folder: &str) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            if entry.starts_with('/') {
                format!("{assets_folder}{entry}")
            } else {
                entry.clone()
            }
        })
        .collect()
}
