//! Ignore rules: which repository paths are never linked.
//!
//! Rules come from two places:
//!
//! - [`DEFAULT_IGNORE_PATTERNS`]: OS metadata, VCS directories and editor
//!   backups.  These always win.
//! - the user's ignore file (see [`file`]), one pattern per line, where a
//!   leading `!` re-includes a path the other user patterns excluded.
//!
//! [`IgnoreRules`] combines both into a single keep/ignore verdict per
//! [`PathCandidate`].
pub mod file;
pub mod rules;

use std::collections::HashSet;
use std::path::{Component, Path};

pub use rules::{IgnoreRules, Verdict};

/// Unordered set of distinct pattern strings.
pub type IgnorePatternSet = HashSet<String>;

/// Patterns that are ignored regardless of user configuration.
///
/// Entries without `*` or `?` are compared against the base name exactly;
/// the others are glob-matched against it.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".DS_Store",
    "._.DS_Store",
    "Thumbs.db",
    "Desktop.ini",
    "ehthumbs.db",
    "ehthumbs_vista.db",
    ".git",
    ".svn",
    ".hg",
    "*~",
    ".*.swp",
    ".*.swo",
    "*.bak",
    "*.tmp",
];

/// A path under consideration for linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCandidate {
    /// Path relative to the repository root, `/`-separated.
    pub relative_path: String,
    /// Final path component.
    pub base_name: String,
    /// Whether the path is a directory.
    pub is_dir: bool,
}

impl PathCandidate {
    /// Build a candidate from an explicit relative path.
    #[must_use]
    pub fn new(relative_path: impl Into<String>, is_dir: bool) -> Self {
        let relative_path = relative_path.into();
        let base_name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            relative_path,
            base_name,
            is_dir,
        }
    }

    /// Build a candidate for `path`, made relative to `root`.
    ///
    /// A `path` outside `root` keeps its own components.
    #[must_use]
    pub fn from_path(root: &Path, path: &Path, is_dir: bool) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let joined = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        Self::new(joined, is_dir)
    }
}
