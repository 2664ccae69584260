//! File-system helpers shared by link reconciliation.
use std::path::{Component, Path, PathBuf};

use crate::error::LinkError;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), LinkError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| LinkError::from_io(parent, e))?;
    }
    Ok(())
}

/// Remove whatever is at `path`: a file, a symlink (including a dangling
/// one) or an empty directory.  Does nothing if `path` does not exist.
///
/// Directories are removed with [`std::fs::remove_dir`], never recursively,
/// so a populated directory is reported as an error instead of being wiped.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<(), LinkError> {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(());
    };
    let result = if is_dir_like(&meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| LinkError::from_io(path, e))
}

/// Check if metadata represents a directory-like entry.
///
/// On Windows, `symlink_metadata().is_dir()` is `false` for directory
/// symlinks, which still have to be removed with `remove_dir`, so the raw
/// `FILE_ATTRIBUTE_DIRECTORY` bit is checked instead.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

/// Read the target of the symlink at `link`, resolved against the link's
/// parent directory when it is relative.  `None` if `link` is not a symlink.
#[must_use]
pub fn read_link_target(link: &Path) -> Option<PathBuf> {
    let target = std::fs::read_link(link).ok()?;
    Some(resolve_link_target(link, &target))
}

/// Resolve a symlink `target` as the OS would when following `link`.
#[must_use]
pub fn resolve_link_target(link: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    link.parent()
        .map_or_else(|| target.to_path_buf(), |parent| parent.join(target))
}

/// Make `path` absolute against the current directory and resolve `.` and
/// `..` lexically.  Symlinks are not followed.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dotfiles_linker::resources::helpers::fs::normalize;
///
/// # #[cfg(unix)]
/// assert_eq!(normalize(Path::new("/a/./b/../c")), Path::new("/a/c"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    dunce::simplified(&out).to_path_buf()
}

/// Compare two paths after [`normalize`].
///
/// With `case_sensitive` false the comparison is case-folded, matching the
/// default behaviour of Windows and macOS filesystems.
#[must_use]
pub fn paths_equal(a: &Path, b: &Path, case_sensitive: bool) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if case_sensitive {
        a == b
    } else {
        a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
    }
}
