//! CLI output formatting for all pipeline stages.
//!
//! # Entity Display Contract
//!
//! Every language follows a consistent two-level pattern across stages:
//!
//! 1. **Header line**: positional index + language code (+ optional detail)
//! 2. **Context lines**: indented `Config:`, `Docs:`, etc.
//!
//! # Output Format
//!
//! ## Build config
//!
//! ```text
//! Languages: en, es
//!
//! 001 en
//!     Config: conf/mkdocs-en.yml
//!     Docs: ../page/docs/fixed-docs-en (3 rendered, 1 copied)
//! 002 es
//!     Config: conf/mkdocs-es.yml
//!     Docs: ../page/docs/fixed-docs-es (3 rendered, 1 copied)
//!
//! Workflow
//!     .github/workflows/page.yml
//! ```
//!
//! ## Build site
//!
//! ```text
//! 001 en (full build)
//! 002 es (incremental build)
//!
//! Built 2 languages into site/
//! ```
//!
//! ## Init
//!
//! ```text
//! Repository: acme/handbook
//!     conf/custom.yml: repo_user, repo_name updated
//!     README.md: replaced (template copy kept as README-orig.md)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.

use crate::pipeline::BuildReport;
use crate::site::BuildMode;
use crate::vcs::InitSummary;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Stage 1: build-config output
// ============================================================================

/// Format config generation output showing what was written per language.
///
/// Config paths are shown relative to the project root; paths outside the
/// root (not expected in practice) are shown verbatim.
pub fn format_build_config(report: &BuildReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Languages: {}", report.languages.join(", ")));
    lines.push(String::new());

    for (i, build) in report.builds.iter().enumerate() {
        let config = build
            .config_file
            .strip_prefix(root)
            .unwrap_or(&build.config_file);
        lines.push(format!("{} {}", format_index(i + 1), build.lang));
        lines.push(format!("    Config: {}", config.display()));
        lines.push(format!(
            "    Docs: {} ({} rendered, {} copied)",
            build.docs_dir, build.rendered, build.copied
        ));
    }

    if report.workflow_updated {
        lines.push(String::new());
        lines.push("Workflow".to_string());
        lines.push("    .github/workflows/page.yml".to_string());
    }

    lines
}

/// Print build-config output to stdout.
pub fn print_build_config(report: &BuildReport, root: &Path) {
    for line in format_build_config(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: build-site output
// ============================================================================

/// Format site build output: one line per language with its build mode.
pub fn format_build_site(builds: &[(String, BuildMode)]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (lang, mode)) in builds.iter().enumerate() {
        lines.push(format!("{} {} ({} build)", format_index(i + 1), lang, mode));
    }
    lines.push(String::new());
    lines.push(format!("Built {} languages into site/", builds.len()));
    lines
}

/// Print build-site output to stdout.
pub fn print_build_site(builds: &[(String, BuildMode)]) {
    for line in format_build_site(builds) {
        println!("{}", line);
    }
}

// ============================================================================
// Init output
// ============================================================================

/// Format init output showing the detected repository identity and what
/// changed on disk.
pub fn format_init(summary: &InitSummary) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Repository: {}/{}",
        summary.repo_user, summary.repo_name
    ));
    lines.push("    conf/custom.yml: repo_user, repo_name updated".to_string());
    if summary.readme_swapped {
        lines.push("    README.md: replaced (template copy kept as README-orig.md)".to_string());
    } else {
        lines.push("    README.md: left unchanged (already initialized)".to_string());
    }
    lines
}

/// Print init output to stdout.
pub fn print_init(summary: &InitSummary) {
    for line in format_init(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
