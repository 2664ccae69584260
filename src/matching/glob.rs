//! Case-insensitive single-name wildcard matching (`*` and `?`).

/// Match `text` against a wildcard `pattern`.
///
/// `*` matches zero or more characters and `?` matches exactly one; any
/// other character matches itself.  Both operands are lower-cased first, so
/// `*.BAK` matches `notes.bak`.  The empty pattern matches only the empty
/// text and `*` matches everything.
///
/// # Examples
///
/// ```
/// use dotfiles_linker::matching::glob::wildcard_match;
///
/// assert!(wildcard_match("abcdefg", "a*c*g"));
/// assert!(wildcard_match(".vimrc.swp", ".*.swp"));
/// assert!(!wildcard_match("file.txt", "*.md"));
/// ```
#[must_use]
pub fn wildcard_match(text: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return text.is_empty();
    }
    if pattern == "*" {
        return true;
    }

    let text: Vec<char> = text.to_lowercase().chars().collect();
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    super::star_match(
        &text,
        &pattern,
        |c| *c == '*',
        |p, t| *p == '?' || p == t,
    )
}

/// Whether `pattern` contains a wildcard character.
#[must_use]
pub fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}
