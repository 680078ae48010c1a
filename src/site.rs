//! Site building through the external renderer.
//!
//! The static-site engine itself is out of scope here: it consumes one
//! resolved config per language and emits the HTML tree plus the PDF
//! artifact. This module owns what the engine cannot know: the per-language
//! invocation order and the full/incremental split. It is behind a trait so
//! the driver can be tested without the binary installed.

use crate::config::{self, ConfigError};
use crate::paths::ProjectPaths;
use crate::render;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// The first language of a run rebuilds the site tree from scratch; the rest
/// layer their subtrees into it. Full-building a later language would wipe
/// the earlier output, incremental-building the first would leak stale files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Full,
    Incremental,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Full => write!(f, "full"),
            BuildMode::Incremental => write!(f, "incremental"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to start site renderer \"{program}\": {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("site renderer failed on {config_file} ({status}): {stderr}")]
    RendererFailed {
        config_file: PathBuf,
        status: String,
        stderr: String,
    },
}

/// The external site engine: opaque, filesystem side effects only.
pub trait SiteRenderer {
    fn render(&self, config_file: &Path, mode: BuildMode) -> Result<(), SiteError>;
}

/// Shells out to the `mkdocs` binary (or a CLI-compatible replacement).
pub struct MkdocsCli {
    program: PathBuf,
}

impl MkdocsCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SiteRenderer for MkdocsCli {
    fn render(&self, config_file: &Path, mode: BuildMode) -> Result<(), SiteError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("build").arg("--config-file").arg(config_file);
        if mode == BuildMode::Incremental {
            cmd.arg("--dirty");
        }
        let output = cmd.output().map_err(|source| SiteError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(SiteError::RendererFailed {
                config_file: config_file.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(())
    }
}

/// Build every language's site in declared order, then refresh the shared
/// assets copy. Returns the (language, mode) pairs that ran. A renderer
/// failure stops the run; earlier languages' output stays on disk.
pub fn build_site(
    paths: &ProjectPaths,
    renderer: &dyn SiteRenderer,
) -> Result<Vec<(String, BuildMode)>, SiteError> {
    let custom = config::load_custom_config(&paths.custom_config_file)?;
    let mut runs = Vec::new();
    let mut mode = BuildMode::Full;
    for lang in custom.languages() {
        renderer.render(&paths.language_config_file(&lang), mode)?;
        runs.push((lang, mode));
        mode = BuildMode::Incremental;
    }
    render::copy_tree(&paths.user_assets_dir, &paths.site_assets_dir)?;
    Ok(runs)
}
