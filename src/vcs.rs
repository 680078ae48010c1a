//! Repository plumbing: pointing a fresh checkout at its own remote and
//! pulling template updates. Both are thin wrappers over the `git` binary;
//! anything smarter belongs in the user's hands.

use crate::paths::ProjectPaths;
use std::fs;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Template repository new projects are generated from; `update-template`
/// rebases onto its main branch unless overridden.
pub const TEMPLATE_REPO: &str = "https://github.com/polydocs/docs-template";

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("failed to run git {args}: {source}")]
    Spawn {
        args: String,
        source: std::io::Error,
    },
    #[error("git {args} failed ({status}): {stderr}")]
    Git {
        args: String,
        status: String,
        stderr: String,
    },
    #[error("could not parse repository user/name from remote URL: {0}")]
    RemoteUrl(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What `init` changed, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSummary {
    pub repo_user: String,
    pub repo_name: String,
    pub readme_swapped: bool,
}

/// Point `conf/custom.yml` at this repository: read the `origin` remote,
/// rewrite the identity lines in place (every other line survives), and swap
/// in a fresh README once.
pub fn init_project(paths: &ProjectPaths) -> Result<InitSummary, VcsError> {
    let remote = git(&paths.root, &["remote", "get-url", "origin"])?;
    let (repo_user, repo_name) = parse_remote_url(&remote)?;

    let custom = fs::read_to_string(&paths.custom_config_file)?;
    fs::write(
        &paths.custom_config_file,
        rewrite_identity(&custom, &repo_user, &repo_name),
    )?;

    let readme_swapped = swap_readme(&paths.root, &repo_user, &repo_name)?;
    Ok(InitSummary {
        repo_user,
        repo_name,
        readme_swapped,
    })
}

/// Rebase local history onto the upstream template.
pub fn update_from_template(root: &Path, upstream: &str) -> Result<(), VcsError> {
    // Re-adding an existing remote fails; fine on reruns.
    let _ = git(root, &["remote", "add", "upstream", upstream]);
    git(root, &["fetch", "upstream"])?;
    git(root, &["rebase", "-Xours", "upstream/main"])?;
    Ok(())
}

/// Extract `(user, name)` from an SSH (`git@host:user/name.git`) or HTTPS
/// (`https://host/user/name[.git]`) remote URL.
pub fn parse_remote_url(url: &str) -> Result<(String, String), VcsError> {
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let tail = match trimmed.split_once("://") {
        Some((_, rest)) => rest,
        None => trimmed
            .rsplit_once(':')
            .map(|(_, rest)| rest)
            .unwrap_or(trimmed),
    };
    let mut parts = tail.rsplit('/');
    let name = parts.next().filter(|part| !part.is_empty());
    let user = parts.next().filter(|part| !part.is_empty());
    match (user, name) {
        (Some(user), Some(name)) => Ok((user.to_owned(), name.to_owned())),
        _ => Err(VcsError::RemoteUrl(url.to_owned())),
    }
}

/// Replace the values of `repo_user:` / `repo_name:` lines, leaving every
/// other line (comments included) untouched.
fn rewrite_identity(content: &str, repo_user: &str, repo_name: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in content.lines() {
        if line.trim_start().starts_with("repo_user:") {
            lines.push(format!("repo_user: {repo_user}"));
        } else if line.trim_start().starts_with("repo_name:") {
            lines.push(format!("repo_name: {repo_name}"));
        } else {
            lines.push(line.to_owned());
        }
    }
    let mut rewritten = lines.join("\n");
    if content.ends_with('\n') {
        rewritten.push('\n');
    }
    rewritten
}

/// Keep the template's README as `README-orig.md` and write a project one.
/// Runs once: an existing `README-orig.md` means init already happened.
fn swap_readme(root: &Path, repo_user: &str, repo_name: &str) -> Result<bool, VcsError> {
    let readme = root.join("README.md");
    let orig = root.join("README-orig.md");
    if orig.exists() {
        return Ok(false);
    }
    if readme.exists() {
        fs::rename(&readme, &orig)?;
    }
    let content = format!(
        "# {repo_name}\n\n\
         Documentation: <https://{repo_user}.github.io/{repo_name}>\n\n\
         Issues and suggestions: <https://github.com/{repo_user}/{repo_name}/issues>\n"
    );
    fs::write(&readme, content)?;
    Ok(true)
}

fn git(root: &Path, args: &[&str]) -> Result<String, VcsError> {
    let output = Command::new("git")
        .current_dir(root)
        .args(args)
        .output()
        .map_err(|source| VcsError::Spawn {
            args: args.join(" "),
            source,
        })?;
    if !output.status.success() {
        return Err(VcsError::Git {
            args: args.join(" "),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // =========================================================================
    // parse_remote_url
    // =========================================================================

    #[test]
    fn parses_ssh_remote() {
        let (user, name) = parse_remote_url("git@github.com:acme/handbook.git").unwrap();
        assert_eq!(user, "acme");
        assert_eq!(name, "handbook");
    }

    #[test]
    fn parses_https_remote() {
        let (user, name) = parse_remote_url("https://github.com/acme/handbook.git").unwrap();
        assert_eq!(user, "acme");
        assert_eq!(name, "handbook");
    }

    #[test]
    fn parses_https_remote_without_git_suffix() {
        let (user, name) = parse_remote_url("https://github.com/acme/handbook").unwrap();
        assert_eq!(user, "acme");
        assert_eq!(name, "handbook");
    }

    #[test]
    fn tolerates_whitespace_and_trailing_slash() {
        let (user, name) = parse_remote_url("  https://github.com/acme/handbook/\n").unwrap();
        assert_eq!(user, "acme");
        assert_eq!(name, "handbook");
    }

    #[test]
    fn unparseable_remote_is_an_error() {
        let err = parse_remote_url("handbook").unwrap_err();
        assert!(matches!(err, VcsError::RemoteUrl(_)));
        assert!(err.to_string().contains("handbook"));
    }

    // =========================================================================
    // rewrite_identity
    // =========================================================================

    const CUSTOM: &str = "\
# Site identity, filled in by `init`
repo_user: template-user
repo_name: template-name
site_name:
  en: Handbook
";

    #[test]
    fn identity_lines_are_replaced() {
        let rewritten = rewrite_identity(CUSTOM, "acme", "handbook");
        assert!(rewritten.contains("repo_user: acme\n"));
        assert!(rewritten.contains("repo_name: handbook\n"));
        assert!(!rewritten.contains("template-user"));
    }

    #[test]
    fn comments_and_other_lines_survive() {
        let rewritten = rewrite_identity(CUSTOM, "acme", "handbook");
        assert!(rewritten.starts_with("# Site identity"));
        assert!(rewritten.contains("site_name:\n  en: Handbook\n"));
        assert!(rewritten.ends_with('\n'));
    }

    #[test]
    fn content_without_identity_lines_is_unchanged() {
        let content = "site_name:\n  en: Handbook\n";
        assert_eq!(rewrite_identity(content, "acme", "handbook"), content);
    }

    // =========================================================================
    // swap_readme
    // =========================================================================

    #[test]
    fn readme_is_swapped_once() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("README.md"), "template readme\n").unwrap();

        assert!(swap_readme(tmp.path(), "acme", "handbook").unwrap());
        assert_eq!(
            fs::read_to_string(tmp.path().join("README-orig.md")).unwrap(),
            "template readme\n"
        );
        let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
        assert!(readme.contains("https://acme.github.io/handbook"));

        // Second run is a no-op.
        assert!(!swap_readme(tmp.path(), "acme", "handbook").unwrap());
        assert!(fs::read_to_string(tmp.path().join("README.md")).unwrap().contains("acme"));
    }

    #[test]
    fn missing_template_readme_still_writes_one() {
        let tmp = TempDir::new().unwrap();
        assert!(swap_readme(tmp.path(), "acme", "handbook").unwrap());
        assert!(tmp.path().join("README.md").exists());
        assert!(!tmp.path().join("README-orig.md").exists());
    }
}
