//! GitHub Actions workflow patching.
//!
//! CI builds one site per generated config; the workflow file declares the
//! list in a single env line. Patching rewrites exactly that line and marks
//! it, stripping any previous marker first, so applying twice equals applying
//! once:
//!
//! ```text
//!     env:
//!           # Automatically updated, commit and do not change
//!           CONFIG_FILES: conf/mkdocs-es.yml conf/mkdocs-en.yml
//! ```
//!
//! The default language goes last: its build publishes at the site root and
//! must run after every subtree build.

use crate::paths::DEFAULT_LANG;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker comment re-generated above the rewritten line on every run.
pub const AUTO_MARKER: &str = "# Automatically updated, commit and do not change";

/// Column of the env block entries in the workflow file.
const LINE_INDENT: &str = "          ";

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("failed to update workflow file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Rewrite the workflow's `CONFIG_FILES` line for the declared languages.
pub fn update_workflow_config_files(path: &Path, langs: &[String]) -> Result<(), WorkflowError> {
    let io_err = |source| WorkflowError::Io {
        path: path.to_path_buf(),
        source,
    };
    let content = fs::read_to_string(path).map_err(io_err)?;
    fs::write(path, patch_content(&content, langs)).map_err(io_err)?;
    Ok(())
}

/// Pure line rewrite: drop stale marker lines, replace the `CONFIG_FILES`
/// line with a marker + regenerated pair, keep everything else (including a
/// trailing newline) byte-for-byte. Without a `CONFIG_FILES` line this only
/// strips markers.
pub fn patch_content(content: &str, langs: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(AUTO_MARKER) {
            continue;
        }
        if trimmed.starts_with("CONFIG_FILES") {
            lines.push(format!("{LINE_INDENT}{AUTO_MARKER}"));
            lines.push(format!(
                "{LINE_INDENT}CONFIG_FILES: {}",
                config_files_value(langs)
            ));
        } else {
            lines.push(line.to_owned());
        }
    }
    let mut patched = lines.join("\n");
    if content.ends_with('\n') {
        patched.push('\n');
    }
    patched
}

/// `conf/mkdocs-<lang>.yml` per non-default language, default language last.
fn config_files_value(langs: &[String]) -> String {
    let mut files: Vec<String> = langs
        .iter()
        .filter(|lang| lang.as_str() != DEFAULT_LANG)
        .map(|lang| format!("conf/mkdocs-{lang}.yml"))
        .collect();
    files.push(format!("conf/mkdocs-{DEFAULT_LANG}.yml"));
    files.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|code| (*code).to_owned()).collect()
    }

    const WORKFLOW: &str = "\
name: page
jobs:
  build:
    steps:
      - name: build site
        env:
          CONFIG_FILES: conf/mkdocs-en.yml
        run: ./build.sh
";

    #[test]
    fn default_language_only() {
        let patched = patch_content(WORKFLOW, &langs(&["en"]));
        assert!(patched.contains(&format!("{LINE_INDENT}{AUTO_MARKER}\n")));
        assert!(patched.contains("          CONFIG_FILES: conf/mkdocs-en.yml\n"));
    }

    #[test]
    fn non_default_languages_first_default_last() {
        let patched = patch_content(WORKFLOW, &langs(&["en", "es", "pt"]));
        assert!(patched.contains(
            "          CONFIG_FILES: conf/mkdocs-es.yml conf/mkdocs-pt.yml conf/mkdocs-en.yml\n"
        ));
    }

    #[test]
    fn marker_sits_directly_above_the_line() {
        let patched = patch_content(WORKFLOW, &langs(&["en", "es"]));
        let expected = format!(
            "{LINE_INDENT}{AUTO_MARKER}\n{LINE_INDENT}CONFIG_FILES: conf/mkdocs-es.yml conf/mkdocs-en.yml"
        );
        assert!(patched.contains(&expected));
    }

    #[test]
    fn surrounding_lines_and_trailing_newline_survive() {
        let patched = patch_content(WORKFLOW, &langs(&["en"]));
        assert!(patched.starts_with("name: page\n"));
        assert!(patched.contains("        run: ./build.sh\n"));
        assert!(patched.ends_with('\n'));
    }

    #[test]
    fn applying_twice_equals_applying_once() {
        let once = patch_content(WORKFLOW, &langs(&["en", "es"]));
        let twice = patch_content(&once, &langs(&["en", "es"]));
        assert_eq!(once, twice);
    }

    #[test]
    fn language_list_changes_replace_the_old_list() {
        let once = patch_content(WORKFLOW, &langs(&["en", "es"]));
        let updated = patch_content(&once, &langs(&["en", "pt"]));
        assert!(updated.contains("CONFIG_FILES: conf/mkdocs-pt.yml conf/mkdocs-en.yml"));
        assert!(!updated.contains("mkdocs-es.yml"));
        // Still exactly one marker line.
        assert_eq!(updated.matches(AUTO_MARKER).count(), 1);
    }

    #[test]
    fn file_without_config_files_line_only_loses_markers() {
        let content = format!("name: page\n{LINE_INDENT}{AUTO_MARKER}\njobs: {{}}\n");
        let patched = patch_content(&content, &langs(&["en"]));
        assert_eq!(patched, "name: page\njobs: {}\n");
    }

    #[test]
    fn update_rewrites_the_file_in_place() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.yml");
        fs::write(&path, WORKFLOW).unwrap();

        update_workflow_config_files(&path, &langs(&["en", "es"])).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("CONFIG_FILES: conf/mkdocs-es.yml conf/mkdocs-en.yml"));
    }

    #[test]
    fn missing_workflow_file_names_the_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.yml");
        let err = update_workflow_config_files(&path, &langs(&["en"])).unwrap_err();
        assert!(err.to_string().contains("nope.yml"));
    }
}
