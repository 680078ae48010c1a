//! Shared test utilities for the polydocs test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::setup_fixtures;
//!
//! let (_tmp, paths) = setup_fixtures();
//! let report = pipeline::build_configs(&paths, BuildOptions::default()).unwrap();
//! ```

use crate::paths::ProjectPaths;
use std::path::Path;
use tempfile::TempDir;

/// Copy `fixtures/project/` to a temp directory and return it with its
/// resolved [`ProjectPaths`].
///
/// Tests get an isolated project they can mutate without affecting other
/// tests or the source fixtures. The fixture is a two-language (`en`, `es`)
/// project with a search and a pdf-export plugin, one verbatim asset in the
/// English docs tree, and a CI workflow file.
pub fn setup_fixtures() -> (TempDir, ProjectPaths) {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/project");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    let paths = ProjectPaths::new(tmp.path());
    (tmp, paths)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
