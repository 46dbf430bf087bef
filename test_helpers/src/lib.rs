//! Testing infrastructure shared by the workspace crates.
//!
//! Provides workspace-root discovery, a persistent `test_output/` directory
//! for artifacts that are worth inspecting by eye (rendered maps), and
//! builders that write small CSV datasets in the same layout as the real
//! star and constellation files.
//!
//! # Output Organization
//! ```text
//! test_output/
//! └── skymaps/          # Rendered SVG maps from integration tests
//! ```
//!
//! # Usage
//! ```rust
//! use test_helpers::{output_path, DatasetFixture};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let paths = DatasetFixture::new()
//!     .star(91262, 0.03, 279.2341, 38.78299)
//!     .constellation("Lyr", Some(91262))
//!     .write_to(dir.path())
//!     .unwrap();
//! assert!(paths.stars.exists());
//!
//! let svg_path = output_path("skymaps/lyra.svg");
//! assert!(svg_path.starts_with(test_helpers::get_output_dir()));
//! ```

mod fixtures;

pub use fixtures::DatasetFixture;

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

/// Errors raised while setting up the test environment.
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    /// No `Cargo.toml` with a `[workspace]` section above the current directory.
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// Locate the workspace root by walking up from the current directory.
///
/// The root is the first ancestor whose `Cargo.toml` contains a
/// `[workspace]` section.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {}", e))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {}", e))
            })?;

            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Err(TestHelperError::ProjectRootNotFound(
        "Workspace root not found".to_string(),
    ))
}

static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// `<project_root>/test_output`, created on first use.
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    }

    output_dir
}

/// Path inside the test output directory. Parent directories are created.
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let full = get_output_dir().join(path);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create output subdirectory");
    }
    full
}
