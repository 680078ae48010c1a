//! Templated mirror of a language's documentation tree.
//!
//! Authored pages may reference template variables (`{{ pdf_url }}`,
//! `{{ org_name }}`, the `alternate` list) that only exist after derivation,
//! so the authored tree is never built directly. Each run produces a sibling
//! copy named `fixed-<dir>`:
//!
//! ```text
//! page/docs/
//! ├── docs-en/            # authored, untouched
//! │   ├── index.md
//! │   └── img/logo.svg
//! └── fixed-docs-en/      # generated: .md templated, the rest byte-copied
//!     ├── index.md
//!     └── img/logo.svg
//! ```
//!
//! The destination is deleted wholesale before rendering, so files removed
//! from the source never linger. Undefined variables render as empty strings
//! (minijinja's lenient default); a malformed template is an error naming the
//! file.

use minijinja::Environment;
use serde_yaml::Mapping;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File extension handled by the template pass; everything else is copied.
pub const MARKUP_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("docs folder not found: {0}")]
    DocsFolderNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("template error in {path}: {source}")]
    Template {
        path: PathBuf,
        source: minijinja::Error,
    },
}

/// What one render produced, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub output_dir: PathBuf,
    /// Markup files that went through the template engine.
    pub rendered: usize,
    /// Files copied byte-for-byte.
    pub copied: usize,
}

/// Destination for a source directory: same parent, name prefixed `fixed-`.
pub fn fixed_docs_dir(source: &Path) -> Result<PathBuf, RenderError> {
    let name = source
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| RenderError::DocsFolderNotFound(source.to_path_buf()))?;
    Ok(source.with_file_name(format!("fixed-{name}")))
}

/// Mirror `source` into its `fixed-` sibling, templating markup files with
/// `vars` and copying everything else verbatim. Returns the destination path
/// and file counts.
pub fn render_docs_tree(source: &Path, vars: &Mapping) -> Result<RenderOutcome, RenderError> {
    if !source.is_dir() {
        return Err(RenderError::DocsFolderNotFound(source.to_path_buf()));
    }
    let output_dir = fixed_docs_dir(source)?;
    if output_dir.exists() {
        fs::remove_dir_all(&output_dir)?;
    }
    fs::create_dir_all(&output_dir)?;

    let env = Environment::new();
    let mut rendered = 0;
    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| RenderError::Io(io::Error::other(err)))?;
        let target = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if is_markup(entry.path()) {
            let text = fs::read_to_string(entry.path())?;
            let page = env.render_str(&text, vars).map_err(|err| RenderError::Template {
                path: entry.path().to_path_buf(),
                source: err,
            })?;
            fs::write(&target, page)?;
            rendered += 1;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(RenderOutcome {
        output_dir,
        rendered,
        copied,
    })
}

fn is_markup(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(MARKUP_EXTENSION)
}

/// Merge-copy `src` into `dst`: directories are created as needed, existing
/// files are overwritten, extra files already in `dst` are left alone.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    if !src.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("directory not found: {}", src.display()),
        ));
    }
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
