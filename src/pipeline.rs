//! The `build-config` driver: from two source documents to one resolved
//! config per language.
//!
//! # Order of Operations
//!
//! 1. Load `conf/base.yml` and `conf/custom.yml`.
//! 2. Validate the language set (`site_name` keys against the `alternate`
//!    switcher entries).
//! 3. Refresh `site/assets/` from `page/assets/`; a project without an
//!    assets folder fails with an error naming it.
//! 4. Patch the CI workflow's `CONFIG_FILES` line (unless skipped).
//! 5. Derive the shared URLs, env-prefix the assets folder, resolve the
//!    language switcher links.
//! 6. Per language, in declaration order: derive the document, render the
//!    docs tree into its `fixed-` copy, write `conf/mkdocs-<lang>.yml`.
//!
//! Step 6 stops at the first bad language: a broken `es` section still
//! leaves a valid freshly written `mkdocs-en.yml` behind, but never a
//! partial `mkdocs-es.yml`.

use crate::config::{self, ConfigError};
use crate::derive::{self, DeriveError, SiteUrls};
use crate::paths::{resolve_language_links, Env, ProjectPaths};
use crate::render;
use crate::validate::{self, ValidateError};
use crate::workflow::{self, WorkflowError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validate(#[from] ValidateError),
    #[error(transparent)]
    Derive(#[from] DeriveError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("failed to copy assets from {src} to {dst}: {source}")]
    AssetsCopy {
        src: PathBuf,
        dst: PathBuf,
        source: std::io::Error,
    },
}

/// Driver knobs, straight from the CLI.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub env: Env,
    pub skip_workflow: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            env: Env::Local,
            skip_workflow: false,
        }
    }
}

/// One written language config, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBuild {
    pub lang: String,
    pub config_file: PathBuf,
    /// The `docs_dir` value written into the config (the rendered copy).
    pub docs_dir: String,
    pub rendered: usize,
    pub copied: usize,
}

/// Everything a `build-config` run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub languages: Vec<String>,
    pub builds: Vec<LanguageBuild>,
    pub workflow_updated: bool,
}

/// Run the whole derivation pipeline for a project.
pub fn build_configs(
    paths: &ProjectPaths,
    options: BuildOptions,
) -> Result<BuildReport, PipelineError> {
    let mut base = config::load_base_config(&paths.base_config_file)?;
    let mut custom = config::load_custom_config(&paths.custom_config_file)?;

    let languages = validate::validate_languages(&custom)?;

    render::copy_tree(&paths.user_assets_dir, &paths.site_assets_dir).map_err(|source| {
        PipelineError::AssetsCopy {
            src: paths.user_assets_dir.clone(),
            dst: paths.site_assets_dir.clone(),
            source,
        }
    })?;

    let workflow_updated = if options.skip_workflow {
        false
    } else {
        workflow::update_workflow_config_files(&paths.workflow_file, &languages)?;
        true
    };

    let urls = SiteUrls::derive(&custom);
    derive::apply_env_assets_prefix(&mut base, &urls, options.env);
    resolve_language_links(&mut custom.custom_extra.alternate, options.env, &urls.base_path);

    let mut builds = Vec::with_capacity(languages.len());
    for lang in &languages {
        let mut resolved = derive::derive_language_config(&base, &custom, &urls, lang)?;
        let outcome = derive::finalize_docs_dir(&mut resolved, &paths.conf_dir)?;
        let config_file = paths.language_config_file(lang);
        config::write_resolved_config(&config_file, &resolved)?;
        builds.push(LanguageBuild {
            lang: lang.clone(),
            config_file,
            docs_dir: resolved.docs_dir.clone(),
            rendered: outcome.rendered,
            copied: outcome.copied,
        });
    }

    Ok(BuildReport {
        languages,
        builds,
        workflow_updated,
    })
}
