//! Reading the user's ignore file.
//!
//! The format is one pattern per line.  Lines are trimmed and blank lines
//! skipped; there is no comment syntax, so a line starting with `#` is an
//! ordinary pattern.
use std::io;
use std::path::Path;

use super::IgnorePatternSet;

/// Parse ignore-file content into a pattern set.
///
/// # Examples
///
/// ```
/// use dotfiles_linker::ignore::file::parse;
///
/// let set = parse("*.log\r\n\r\n  !keep.log  \n");
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("!keep.log"));
/// ```
#[must_use]
pub fn parse(content: &str) -> IgnorePatternSet {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load patterns from `path`.
///
/// A missing file yields an empty set.
///
/// # Errors
///
/// Returns any I/O error other than [`io::ErrorKind::NotFound`].
pub fn load(path: &Path) -> io::Result<IgnorePatternSet> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(parse(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("ignore file not found: {}", path.display());
            Ok(IgnorePatternSet::new())
        }
        Err(e) => Err(e),
    }
}
