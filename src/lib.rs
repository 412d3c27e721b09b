//! Module manifest mirroring for nested simulation builds.
//!
//! This crate keeps the dependency versions of a nested test/simulation
//! module in lockstep with the root go.mod, rewriting matching require and
//! replace entries while leaving everything else untouched.

pub mod gomod;
pub mod mirror;
pub mod workspace;

pub use gomod::{GoMod, SectionKind};
pub use mirror::{DriftReport, MirrorReport, ModuleMirror, VersionChange, VersionDrift};
pub use workspace::ModuleScanner;
