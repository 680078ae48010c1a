//! Configuration documents: the shared base template and the multilingual
//! custom file.
//!
//! Two YAML inputs drive every run, and one resolved document per language
//! comes out:
//!
//! ```text
//! conf/
//! ├── base.yml           # Generation defaults shared by every language
//! ├── custom.yml         # Translations + site identity, keyed by language
//! ├── mkdocs-en.yml      # Output: resolved document for `en`
//! └── mkdocs-es.yml      # Output: resolved document for `es`
//! ```
//!
//! ## base.yml
//!
//! ```yaml
//! docs_dir: ../page/docs
//! edit_uri: edit/main/page/docs/docs-LANG/
//! theme:
//!   name: material
//! plugins:
//!   - search:
//!       lang: en
//!   - pdf-export:
//!       output_path: pdf/doc-en.pdf
//! extra_css:
//!   - /css/extra.css
//! extra:
//!   assets_folder: /assets
//! markdown_extensions:
//!   - admonition
//! ```
//!
//! ## custom.yml
//!
//! ```yaml
//! repo_user: acme
//! repo_name: handbook
//! site_name:
//!   en: ACME Handbook
//!   es: Manual ACME
//! copyright:
//!   en: © ACME
//!   es: © ACME
//! nav:
//!   nav-en:
//!     - Home: index.md
//!   nav-es:
//!     - Inicio: index.md
//! custom_extra:
//!   alternate:
//!     - name: English
//!       lang: en
//!     - name: Español
//!       lang: es
//! ```
//!
//! Key order is significant throughout: `site_name` declares the canonical
//! language order, and `serde_yaml::Mapping` preserves insertion order from
//! load to write. Unknown top-level keys are not rejected; they flow through
//! the free-form `rest` remainder into the resolved documents (the downstream
//! site builder accepts arbitrary keys such as `markdown_extensions`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Sequence, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML file does not exist: {0}")]
    NotFound(PathBuf),
    #[error("YAML file is not valid YAML: {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML write error: {0}")]
    Emit(#[from] serde_yaml::Error),
}

/// Ordered mapping from language code to a localized string, e.g. the
/// `site_name` block. Declaration order is user-controlled and preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized(pub Mapping);

impl Localized {
    /// Language codes in declaration order. Non-string keys are skipped.
    pub fn langs(&self) -> Vec<String> {
        self.0
            .keys()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    }

    /// Raw value for a language. Interpretation (stringification, type
    /// errors) is the settings accessor's job.
    pub fn get(&self, lang: &str) -> Option<&Value> {
        self.0.get(lang)
    }
}

/// The `nav` block: one `nav-<lang>` section per language, each an ordered
/// sequence of single-entry `{title: target}` page references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavSections(pub Mapping);

impl NavSections {
    /// The page list for one language. A section that exists but is not a
    /// sequence counts as missing.
    pub fn section(&self, lang: &str) -> Option<&Sequence> {
        self.0
            .get(format!("nav-{lang}"))
            .and_then(Value::as_sequence)
    }
}

/// Ordered plugin list; each element is a single-key `{name: settings}` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginList(pub Vec<Mapping>);

impl PluginList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One language-switcher record. `link` is filled in by the language path
/// resolver; maintainers only author `name` and `lang`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateEntry {
    pub name: String,
    pub lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The `custom_extra` block: the alternate list plus free-form template
/// variables exposed to every documentation page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomExtra {
    #[serde(default)]
    pub alternate: Vec<AlternateEntry>,
    #[serde(flatten)]
    pub vars: Mapping,
}

/// Generation defaults shared by every language (`conf/base.yml`).
/// Read-only input; the deriver clones it per language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseConfig {
    /// Documentation root, relative to the directory holding the config file.
    /// Suffixed with `/docs-<lang>` per language.
    pub docs_dir: String,
    /// Edit-link template containing a literal `LANG` placeholder.
    pub edit_uri: String,
    #[serde(default)]
    pub theme: Mapping,
    #[serde(default)]
    pub plugins: PluginList,
    #[serde(default)]
    pub extra_css: Vec<String>,
    #[serde(default)]
    pub extra_javascript: Vec<String>,
    /// Free-form template variables; conventionally carries `assets_folder`.
    #[serde(default)]
    pub extra: Mapping,
    /// Everything else passes through to the resolved documents untouched.
    #[serde(default, flatten)]
    pub rest: Mapping,
}

/// Translations and site identity (`conf/custom.yml`).
///
/// `site_name` is required: its keys declare the language set. The other
/// localized sections are optional at parse time so that their absence can be
/// reported as a missing *setting* rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomConfig {
    pub repo_name: String,
    pub repo_user: String,
    /// Overrides the derived GitHub Pages URL when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_site_url: Option<String>,
    /// Public base path for prod links; derived as `/<repo_name>` when the
    /// site URL itself is derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url_base_path: Option<String>,
    pub site_name: Localized,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_description: Option<Localized>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_author: Option<Localized>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<Localized>,
    #[serde(default)]
    pub nav: NavSections,
    #[serde(default)]
    pub custom_extra: CustomExtra,
    /// Free-form remainder overlaid onto the resolved documents (custom wins
    /// over base; see [`overlay_rest`]).
    #[serde(default, flatten)]
    pub rest: Mapping,
}

impl CustomConfig {
    /// Declared language codes, in `site_name` declaration order.
    pub fn languages(&self) -> Vec<String> {
        self.site_name.langs()
    }
}

/// One fully-derived document per language (`conf/mkdocs-<lang>.yml`).
/// Written fresh each run, never mutated afterwards. Internal-only fields
/// (`custom_extra`, `public_url_base_path`, repo identity) are absent by
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub site_name: String,
    pub site_description: String,
    pub site_author: String,
    pub copyright: String,
    pub repo_url: String,
    pub site_url: String,
    pub edit_uri: String,
    pub docs_dir: String,
    pub site_dir: String,
    pub theme: Mapping,
    pub nav: Sequence,
    #[serde(default, skip_serializing_if = "PluginList::is_empty")]
    pub plugins: PluginList,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_css: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_javascript: Vec<String>,
    pub extra: Mapping,
    #[serde(default, flatten)]
    pub rest: Mapping,
}

// =============================================================================
// Loading, overlaying, writing
// =============================================================================

/// Keys owned by the derivation itself. The free-form remainder may not
/// smuggle these into a resolved document; typed fields always win.
const RESERVED_KEYS: [&str; 20] = [
    "site_name",
    "site_description",
    "site_author",
    "copyright",
    "repo_url",
    "site_url",
    "edit_uri",
    "docs_dir",
    "site_dir",
    "theme",
    "nav",
    "plugins",
    "extra_css",
    "extra_javascript",
    "extra",
    "custom_extra",
    "public_url_base_path",
    "custom_site_url",
    "repo_name",
    "repo_user",
];

/// Overlay the custom remainder on top of the base remainder.
///
/// - Custom keys override base keys (whole-value replacement, no deep merge).
/// - Base keys absent from custom are preserved.
/// - Reserved keys are dropped from both sides.
pub fn overlay_rest(base: &Mapping, custom: &Mapping) -> Mapping {
    let mut merged = Mapping::new();
    for (key, value) in base.iter().chain(custom.iter()) {
        if key.as_str().is_some_and(|k| RESERVED_KEYS.contains(&k)) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    merged
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `conf/base.yml`. The file must exist and parse; a missing file is
/// reported with its path rather than a bare IO error.
pub fn load_base_config(path: &Path) -> Result<BaseConfig, ConfigError> {
    load_yaml(path)
}

/// Load `conf/custom.yml`. Same existence/parse contract as the base file.
pub fn load_custom_config(path: &Path) -> Result<CustomConfig, ConfigError> {
    load_yaml(path)
}

/// Persist one resolved document. Overwrites any previous run's output.
pub fn write_resolved_config(path: &Path, config: &ResolvedConfig) -> Result<(), ConfigError> {
    let yaml = serde_yaml::to_string(config)?;
    fs::write(path, yaml)?;
    Ok(())
}
