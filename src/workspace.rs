//! Nested module discovery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scans a directory tree for go.mod manifests.
#[derive(Debug)]
pub struct ModuleScanner {
    root: PathBuf,
}

impl ModuleScanner {
    /// Create a new module scanner.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find all go.mod files under the root, excluding vendor/ and .git/ directories.
    pub fn find_manifests(&self) -> Result<Vec<PathBuf>> {
        let mut manifests = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                // Skip vendored dependencies and metadata directories
                !matches!(name.as_ref(), "vendor" | ".git" | "node_modules" | ".cache")
            })
        {
            let entry = entry.context("Failed to read directory entry")?;

            if entry.file_type().is_file() && entry.file_name() == "go.mod" {
                manifests.push(entry.path().to_path_buf());
            }
        }

        manifests.sort();
        Ok(manifests)
    }
}
