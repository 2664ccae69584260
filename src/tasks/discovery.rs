//! Enumerate linkable paths under the repository, applying ignore rules.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::ignore::{IgnoreRules, PathCandidate, Verdict};

/// A path that should be linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSource {
    /// Absolute path inside the repository.
    pub path: PathBuf,
    /// Path relative to the walked directory; joined onto the destination.
    pub relative: PathBuf,
}

/// Result of one enumeration.
#[derive(Debug, Default)]
pub struct Discovered {
    /// Paths to link, sorted by path.
    pub sources: Vec<LinkSource>,
    /// Paths excluded by ignore rules.  A directory excluded by a default
    /// pattern appears once; its contents are never visited.
    pub ignored: Vec<PathCandidate>,
}

/// Entries directly under `root` whose name starts with `.`.
///
/// Directories are returned as a whole, not recursed into.
///
/// # Errors
///
/// Returns an error if `root` cannot be read.
pub fn dotted_entries(root: &Path, rules: &IgnoreRules) -> Result<Discovered> {
    let mut found = Discovered::default();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("reading directory {}", root.display()))?;
        if !entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let candidate = candidate_for(root, &entry);
        if rules.should_ignore(&candidate) {
            found.ignored.push(candidate);
            continue;
        }
        found.sources.push(LinkSource {
            path: entry.path().to_path_buf(),
            relative: PathBuf::from(entry.file_name()),
        });
    }

    Ok(found)
}

/// Every non-directory entry below `base`, recursively.
///
/// Candidates are matched relative to `root` (so `base = root/HOME` yields
/// `HOME/.config/...`).  Only files are tested against the user's patterns,
/// so a negation can always re-include a file below an ignored directory.
/// Directories matching a default pattern (`.git`, ...) are pruned since
/// no negation overrides a default.  Symlinks inside the tree are not
/// followed and are linked like files.
///
/// # Errors
///
/// Returns an error if any directory in the tree cannot be read.
pub fn tree_files(root: &Path, base: &Path, rules: &IgnoreRules) -> Result<Discovered> {
    let mut found = Discovered::default();
    let mut pruned = Vec::new();

    let walker = WalkDir::new(base)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let candidate = candidate_for(root, entry);
            if matches!(rules.evaluate(&candidate), Verdict::Default(_)) {
                pruned.push(candidate);
                return false;
            }
            true
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("reading directory {}", base.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let candidate = candidate_for(root, &entry);
        if rules.should_ignore(&candidate) {
            found.ignored.push(candidate);
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(base)
            .unwrap_or_else(|_| entry.path())
            .to_path_buf();
        found.sources.push(LinkSource {
            path: entry.path().to_path_buf(),
            relative,
        });
    }

    found.ignored.extend(pruned);
    Ok(found)
}

fn candidate_for(root: &Path, entry: &DirEntry) -> PathCandidate {
    PathCandidate::from_path(root, entry.path(), entry.file_type().is_dir())
}
