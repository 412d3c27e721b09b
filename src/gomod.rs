//! go.mod manifest parsing and rewriting utilities.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Section of a go.mod file that declares dependency versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Require,
    Replace,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::Replace => "replace",
        }
    }

    /// Section opened by a header line, if any.
    ///
    /// Headers are matched by prefix, so a single-line
    /// `require example.com/foo v1.0.0` directive also switches the active
    /// section; its own tokens are structural and never recorded.
    fn from_header(line: &str) -> Option<Self> {
        if line.starts_with("require") {
            Some(Self::Require)
        } else if line.starts_with("replace") {
            Some(Self::Replace)
        } else {
            None
        }
    }
}

/// A parsed go.mod manifest.
///
/// Holds the raw document alongside the per-section version maps so the
/// rewrite pass can carry every structural line through verbatim.
#[derive(Debug, Clone)]
pub struct GoMod {
    pub path: PathBuf,
    content: String,
    pub require: HashMap<String, String>,
    pub replace: HashMap<String, String>,
}

impl GoMod {
    /// Load and parse a go.mod file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(path, content)
    }

    fn parse(path: &Path, content: String) -> Result<Self> {
        let mut require = HashMap::new();
        let mut replace = HashMap::new();
        let mut section: Option<SectionKind> = None;

        for (idx, line) in content.lines().enumerate() {
            if let Some(kind) = SectionKind::from_header(line) {
                section = Some(kind);
            } else if is_structural(line) {
                // closing delimiter or blank line, section stays active
            } else if let Some(kind) = section {
                let (module, version) = split_entry(line).with_context(|| {
                    format!(
                        "Malformed {} entry at {}:{}",
                        kind.as_str(),
                        path.display(),
                        idx + 1
                    )
                })?;
                match kind {
                    SectionKind::Require => require.insert(module.to_string(), version.to_string()),
                    SectionKind::Replace => replace.insert(module.to_string(), version.to_string()),
                };
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            content,
            require,
            replace,
        })
    }

    /// Version map for one section kind.
    pub fn versions(&self, kind: SectionKind) -> &HashMap<String, String> {
        match kind {
            SectionKind::Require => &self.require,
            SectionKind::Replace => &self.replace,
        }
    }

    /// Rebuild this manifest's document with versions mirrored from `source`.
    ///
    /// Entries whose module appears in the source's same-section map are
    /// re-emitted with the source's version text; everything else, including
    /// headers, delimiters, and entries the source does not know, is carried
    /// through unchanged. The whole document is built in memory, so a
    /// malformed line aborts before any byte reaches disk. Output is
    /// LF-normalized with a trailing newline.
    pub fn mirrored(&self, source: &GoMod) -> Result<String> {
        let mut section: Option<SectionKind> = None;
        let mut updated = String::with_capacity(self.content.len());

        for (idx, line) in self.content.lines().enumerate() {
            if let Some(kind) = SectionKind::from_header(line) {
                section = Some(kind);
                updated.push_str(line);
            } else if is_structural(line) {
                updated.push_str(line);
            } else if let Some(kind) = section {
                let (module, _) = split_entry(line).with_context(|| {
                    format!(
                        "Malformed {} entry at {}:{}",
                        kind.as_str(),
                        self.path.display(),
                        idx + 1
                    )
                })?;
                match source.versions(kind).get(module) {
                    Some(version) => {
                        updated.push('\t');
                        updated.push_str(module);
                        updated.push(' ');
                        updated.push_str(version);
                    }
                    None => updated.push_str(line),
                }
            } else {
                updated.push_str(line);
            }
            updated.push('\n');
        }

        Ok(updated)
    }
}

/// A line that delimits or pads a section block: the closing parenthesis or
/// a fully blank line. Neither resets the active section.
fn is_structural(line: &str) -> bool {
    line == ")" || line.is_empty()
}

/// Split a dependency line into its module path and version text.
///
/// The first whitespace-separated token is the module; the trimmed remainder
/// is carried opaquely as the version. That remainder may itself contain
/// spaces (a replace arrow, a trailing `// indirect` comment), so it is
/// never tokenized further.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (module, rest) = line.trim().split_once(char::is_whitespace)?;
    Some((module, rest.trim_start()))
}

#[cfg(test)]
#[path = "gomod_tests.rs"]
mod tests;
