//! # Polydocs
//!
//! A config generator and build driver for multi-language documentation
//! sites. One base template plus one multilingual custom file go in; one
//! fully-resolved, internally-consistent site config per language comes out,
//! ready for an external static-site renderer (mkdocs or compatible).
//!
//! # Architecture: Derive, Render, Build
//!
//! A `build-config` run walks the declared languages in order and, for each,
//! derives a resolved document, renders the docs tree, and persists the
//! result:
//!
//! ```text
//! conf/base.yml ──┐
//!                 ├─ validate ─ derive ─ render ──> conf/mkdocs-<lang>.yml
//! conf/custom.yml ┘                                 page/docs/fixed-docs-<lang>/
//! ```
//!
//! `build-site` then feeds every generated config to the external renderer:
//! the first language rebuilds the site tree from scratch, the rest layer
//! their `/<lang>` subtrees into it incrementally.
//!
//! Every cross-document invariant (language set, translations, navigation,
//! docs folder) is checked before output exists for that language, so a
//! broken `custom.yml` fails with a message naming the offending language and
//! setting instead of producing N half-consistent site configs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Typed YAML documents: base, custom, resolved; load/overlay/write |
//! | [`settings`] | Localized and plugin-block lookup helpers |
//! | [`paths`] | Project layout, environment, language switcher links |
//! | [`validate`] | Cross-document invariants: language set, nav section, nav index |
//! | [`derive`] | Per-language derivation of the resolved document |
//! | [`render`] | Templated mirror of a language's docs tree (`fixed-` copy) |
//! | [`pipeline`] | The `build-config` driver |
//! | [`site`] | External-renderer trait + the `build-site` driver |
//! | [`workflow`] | CI workflow `CONFIG_FILES` line patcher |
//! | [`serve`] | Local preview HTTP server |
//! | [`vcs`] | `init` and `update-template` git plumbing |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Typed Documents Over Raw Mappings
//!
//! The base/custom/resolved documents are serde structs with named fields and
//! a `#[serde(flatten)]` free-form remainder, not raw YAML mappings. The
//! overlay is an explicit merge with documented precedence
//! ([`config::overlay_rest`]): derived fields always win, and a custom file
//! cannot silently clobber `site_url` or `nav` through a stray top-level key.
//!
//! ## Declaration Order Is Load-Bearing
//!
//! The key order of `site_name` declares the canonical language order:
//! configs are written in it, the workflow list is generated from it, and the
//! site builds run in it (first full, rest incremental, so the root-published
//! default language never wipes a subtree). `serde_yaml::Mapping` preserves
//! insertion order end to end; nothing re-sorts.
//!
//! ## Fail Fast, No Aggregation
//!
//! Validation stops at the first violation. Fixing one issue may reveal the
//! next on the following run; in exchange every error message points at
//! exactly one language and setting in `conf/custom.yml`. Configs already
//! written for earlier languages stay on disk — they are valid and will be
//! rewritten next run anyway.
//!
//! ## Explicit Paths, No Working-Directory Games
//!
//! All locations derive once from the project root into
//! [`paths::ProjectPaths`] and are passed explicitly. The only relative paths
//! in play are YAML *values* (`docs_dir`, `site_dir`), which are relative to
//! the config file by the renderer's own convention.

pub mod config;
pub mod derive;
pub mod output;
pub mod paths;
pub mod pipeline;
pub mod render;
pub mod serve;
pub mod settings;
pub mod site;
pub mod validate;
pub mod vcs;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_helpers;
