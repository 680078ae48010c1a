//! Project layout and language link resolution.
//!
//! Every path the pipeline touches is derived once from the project root and
//! passed explicitly; nothing changes the working directory or resolves
//! locations implicitly. The expected layout:
//!
//! ```text
//! <project>/
//! ├── conf/
//! │   ├── base.yml              # shared generation defaults
//! │   ├── custom.yml            # translations + identity
//! │   └── mkdocs-<lang>.yml     # generated, one per language
//! ├── page/
//! │   ├── assets/               # shared static assets
//! │   └── docs/
//! │       ├── docs-en/          # authored sources
//! │       └── fixed-docs-en/    # generated (templated copy)
//! ├── site/                     # generated site tree
//! └── .github/workflows/page.yml
//! ```

use crate::config::AlternateEntry;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// The language published at the site root instead of a `/<code>` subtree.
pub const DEFAULT_LANG: &str = "en";

/// Link derivation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Env {
    /// Links rooted at `/` for the local preview server.
    Local,
    /// Links rooted at the public base path of the published site.
    Prod,
}

/// Absolute locations of everything the pipeline reads or writes.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub conf_dir: PathBuf,
    pub base_config_file: PathBuf,
    pub custom_config_file: PathBuf,
    pub user_assets_dir: PathBuf,
    pub site_dir: PathBuf,
    pub site_assets_dir: PathBuf,
    pub workflow_file: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: &Path) -> Self {
        let conf_dir = root.join("conf");
        let site_dir = root.join("site");
        Self {
            base_config_file: conf_dir.join("base.yml"),
            custom_config_file: conf_dir.join("custom.yml"),
            user_assets_dir: root.join("page").join("assets"),
            site_assets_dir: site_dir.join("assets"),
            workflow_file: root.join(".github").join("workflows").join("page.yml"),
            root: root.to_path_buf(),
            conf_dir,
            site_dir,
        }
    }

    /// Where the resolved document for `lang` is persisted.
    pub fn language_config_file(&self, lang: &str) -> PathBuf {
        self.conf_dir.join(format!("mkdocs-{lang}.yml"))
    }
}

/// Rewrite each alternate entry's `link` for the target environment.
///
/// The default language lives at the site root, so its code segment is empty:
/// `local` yields `/`, `prod` yields `<base_path>/`. Every other language gets
/// `/<code>` or `<base_path>/<code>`. Order is preserved; the rewritten list
/// feeds the language switcher in every derived document.
pub fn resolve_language_links(alternate: &mut [AlternateEntry], env: Env, base_path: &str) {
    for entry in alternate.iter_mut() {
        let code = if entry.lang == DEFAULT_LANG {
            ""
        } else {
            entry.lang.as_str()
        };
        entry.link = Some(match env {
            Env::Local => format!("/{code}"),
            Env::Prod => format!("{base_path}/{code}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternates() -> Vec<AlternateEntry> {
        vec![
            AlternateEntry {
                name: "English".into(),
                lang: "en".into(),
                link: None,
            },
            AlternateEntry {
                name: "Español".into(),
                lang: "es".into(),
                link: None,
            },
        ]
    }

    #[test]
    fn project_paths_layout() {
        let paths = ProjectPaths::new(Path::new("/work/handbook"));
        assert_eq!(
            paths.base_config_file,
            Path::new("/work/handbook/conf/base.yml")
        );
        assert_eq!(
            paths.custom_config_file,
            Path::new("/work/handbook/conf/custom.yml")
        );
        assert_eq!(
            paths.user_assets_dir,
            Path::new("/work/handbook/page/assets")
        );
        assert_eq!(paths.site_assets_dir, Path::new("/work/handbook/site/assets"));
        assert_eq!(
            paths.workflow_file,
            Path::new("/work/handbook/.github/workflows/page.yml")
        );
    }

    #[test]
    fn language_config_file_is_keyed_by_code() {
        let paths = ProjectPaths::new(Path::new("/work/handbook"));
        assert_eq!(
            paths.language_config_file("pt"),
            Path::new("/work/handbook/conf/mkdocs-pt.yml")
        );
    }

    // =========================================================================
    // resolve_language_links
    // =========================================================================

    #[test]
    fn local_links_are_root_relative() {
        let mut alternate = alternates();
        resolve_language_links(&mut alternate, Env::Local, "/handbook");
        assert_eq!(alternate[0].link.as_deref(), Some("/"));
        assert_eq!(alternate[1].link.as_deref(), Some("/es"));
    }

    #[test]
    fn prod_links_carry_the_base_path() {
        let mut alternate = alternates();
        resolve_language_links(&mut alternate, Env::Prod, "/some-path");
        assert_eq!(alternate[0].link.as_deref(), Some("/some-path/"));
        assert_eq!(alternate[1].link.as_deref(), Some("/some-path/es"));
    }

    #[test]
    fn prod_links_with_empty_base_path() {
        let mut alternate = alternates();
        resolve_language_links(&mut alternate, Env::Prod, "");
        assert_eq!(alternate[0].link.as_deref(), Some("/"));
        assert_eq!(alternate[1].link.as_deref(), Some("/es"));
    }

    #[test]
    fn resolver_overwrites_previous_links() {
        let mut alternate = alternates();
        resolve_language_links(&mut alternate, Env::Prod, "/handbook");
        resolve_language_links(&mut alternate, Env::Local, "/handbook");
        assert_eq!(alternate[0].link.as_deref(), Some("/"));
        assert_eq!(alternate[1].link.as_deref(), Some("/es"));
    }

    #[test]
    fn order_is_preserved() {
        let mut alternate = alternates();
        alternate.reverse();
        resolve_language_links(&mut alternate, Env::Local, "");
        assert_eq!(alternate[0].lang, "es");
        assert_eq!(alternate[1].lang, "en");
    }
}
