//! Version mirroring between a root manifest and a nested module.
//!
//! This module drives a run: load the source manifest, load the target,
//! substitute matching versions, and write the target back. It also provides
//! a read-only drift check used for CI gating.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::gomod::{GoMod, SectionKind};

/// Default source manifest, relative to the module root.
pub const DEFAULT_SOURCE: &str = "go.mod";

/// Default mirror target, the nested simulation module.
pub const DEFAULT_TARGET: &str = "test/simulation/go.mod";

/// Mirrors require/replace versions from one manifest into another.
pub struct ModuleMirror {
    source: PathBuf,
    target: PathBuf,
}

impl ModuleMirror {
    /// Create a mirror between an explicit source/target manifest pair.
    pub fn new(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            target: target.as_ref().to_path_buf(),
        }
    }

    /// Rewrite the target manifest with the source's versions.
    ///
    /// Target entries absent from the source's same-section map are left
    /// untouched. With `dry_run` the rewrite is computed and reported but
    /// the target file is not modified.
    pub fn mirror(&self, dry_run: bool) -> Result<MirrorReport> {
        let source = GoMod::load(&self.source)?;
        let target = GoMod::load(&self.target)?;

        let updated = target.mirrored(&source)?;
        let changes = Self::collect_changes(&source, &target);
        let unchanged = target.require.len() + target.replace.len() - changes.len();

        if !dry_run {
            std::fs::write(&target.path, &updated)
                .with_context(|| format!("Failed to write {}", target.path.display()))?;
        }

        Ok(MirrorReport {
            target: target.path,
            changes,
            unchanged,
            dry_run,
        })
    }

    /// Report target entries whose versions differ from the source.
    ///
    /// Read-only: neither file is modified.
    pub fn check(&self) -> Result<DriftReport> {
        let source = GoMod::load(&self.source)?;
        let target = GoMod::load(&self.target)?;

        let drifts = Self::collect_changes(&source, &target)
            .into_iter()
            .map(|change| VersionDrift {
                section: change.section,
                module: change.module,
                expected: change.new,
                found: change.old,
            })
            .collect();

        Ok(DriftReport {
            source: source.path,
            target: target.path.clone(),
            total_entries: target.require.len() + target.replace.len(),
            drifts,
        })
    }

    fn collect_changes(source: &GoMod, target: &GoMod) -> Vec<VersionChange> {
        let mut changes = Vec::new();

        for kind in [SectionKind::Require, SectionKind::Replace] {
            let mirrored = source.versions(kind);
            let mut entries: Vec<(&String, &String)> = target.versions(kind).iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            for (module, version) in entries {
                if let Some(new_version) = mirrored.get(module) {
                    if new_version != version {
                        changes.push(VersionChange {
                            section: kind,
                            module: module.clone(),
                            old: version.clone(),
                            new: new_version.clone(),
                        });
                    }
                }
            }
        }

        changes
    }
}

/// A single entry rewritten by a mirror run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionChange {
    pub section: SectionKind,
    pub module: String,
    pub old: String,
    pub new: String,
}

/// Report from a mirror run.
#[derive(Debug, Serialize, Deserialize)]
pub struct MirrorReport {
    pub target: PathBuf,
    pub changes: Vec<VersionChange>,
    pub unchanged: usize,
    pub dry_run: bool,
}

impl MirrorReport {
    pub fn print(&self) {
        if self.dry_run {
            println!(
                "{} Dry run mode - no files will be modified\n",
                "Info:".blue().bold()
            );
        }

        if self.changes.is_empty() {
            println!(
                "{} {} already in sync ({} entries)",
                "✓".green().bold(),
                self.target.display().to_string().bright_white(),
                self.unchanged
            );
            return;
        }

        for change in &self.changes {
            println!(
                "  {} {} {} {} {}",
                change.section.as_str().cyan(),
                change.module,
                change.old.dimmed(),
                "→".bright_black(),
                change.new.bright_white()
            );
        }

        let verb = if self.dry_run {
            "would be mirrored"
        } else {
            "mirrored"
        };
        println!(
            "\n{} {} version(s) {} into {}",
            "✓".green().bold(),
            self.changes.len(),
            verb,
            self.target.display().to_string().bright_white()
        );
    }
}

/// A target entry whose version text differs from the source's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDrift {
    pub section: SectionKind,
    pub module: String,
    pub expected: String,
    pub found: String,
}

/// Report from a read-only drift check.
#[derive(Debug, Serialize, Deserialize)]
pub struct DriftReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub total_entries: usize,
    pub drifts: Vec<VersionDrift>,
}

impl DriftReport {
    pub fn has_drift(&self) -> bool {
        !self.drifts.is_empty()
    }

    /// Print a colorized terminal report.
    pub fn print_terminal(&self) {
        if self.drifts.is_empty() {
            println!(
                "{} All mirrored versions are consistent ({} entries)",
                "✓".green().bold(),
                self.total_entries
            );
            return;
        }

        println!("{}", "Version Drift".bright_white().bold());
        for drift in &self.drifts {
            println!(
                "  {} {} {}",
                drift.section.as_str().cyan(),
                drift.module.bright_white(),
                format!("found {}, expected {}", drift.found, drift.expected).dimmed()
            );
        }

        println!(
            "\n{} {} entry(ies) out of sync with {}",
            "✗".red().bold(),
            self.drifts.len(),
            self.source.display()
        );
    }
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod tests;
