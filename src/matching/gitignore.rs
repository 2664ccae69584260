//! Gitignore-style path patterns.
//!
//! A pattern is split on `/` into segments.  A segment of exactly `**`
//! spans zero or more path segments; any other segment matches exactly one
//! path segment using [`wildcard_match`](super::glob::wildcard_match)
//! semantics.  A trailing `/` restricts the pattern to directories and a
//! single leading `/` is ignored.  Only this subset of gitignore syntax is
//! supported: no character classes, no escapes.

use super::glob::wildcard_match;

/// Segment token that spans zero or more path segments.
pub const DOUBLE_STAR: &str = "**";

/// A parsed gitignore-style pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePattern {
    raw: String,
    negation: bool,
    dir_only: bool,
    segments: Vec<String>,
}

impl IgnorePattern {
    /// Parse a pattern string.
    ///
    /// A single leading `!` marks a negation and is stripped; the remaining
    /// text is kept as [`raw`](Self::raw).  A trailing `/` marks a
    /// directory-only pattern and is stripped; then one leading `/` is
    /// removed and the rest split on `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotfiles_linker::matching::gitignore::{IgnorePattern, matches_path};
    ///
    /// let pattern = IgnorePattern::parse("!/logs/**/");
    /// assert!(pattern.is_negation());
    /// assert_eq!(pattern.raw(), "/logs/**/");
    /// assert!(matches_path("logs/debug", &pattern, true));
    /// assert!(!matches_path("logs/debug", &pattern, false));
    /// ```
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let (negation, raw) = pattern
            .strip_prefix('!')
            .map_or((false, pattern), |rest| (true, rest));
        let (dir_only, body) = raw
            .strip_suffix('/')
            .map_or((false, raw), |rest| (true, rest));
        let body = body.strip_prefix('/').unwrap_or(body);

        Self {
            raw: raw.to_string(),
            negation,
            dir_only,
            segments: body.split('/').map(str::to_string).collect(),
        }
    }

    /// Pattern text without the negation marker.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern started with `!`.
    #[must_use]
    pub const fn is_negation(&self) -> bool {
        self.negation
    }
}

/// Match a path relative to the repository root against `pattern`.
///
/// Directory-only patterns never match when `is_dir` is false.  Native path
/// separators in `relative_path` are treated as `/`.  Negation is not
/// applied here; that is the ignore resolver's job.
///
/// # Examples
///
/// ```
/// use dotfiles_linker::matching::gitignore::{IgnorePattern, matches_path};
///
/// let logs = IgnorePattern::parse("logs/**/*.log");
/// assert!(matches_path("logs/debug/important.log", &logs, false));
/// assert!(matches_path("logs/important.log", &logs, false));
/// assert!(!matches_path("build.txt", &IgnorePattern::parse("build/"), false));
/// ```
#[must_use]
pub fn matches_path(relative_path: &str, pattern: &IgnorePattern, is_dir: bool) -> bool {
    if pattern.dir_only && !is_dir {
        return false;
    }

    let normalized = to_slash(relative_path);
    let path_segments: Vec<&str> = normalized.split('/').collect();
    super::star_match(
        &path_segments,
        &pattern.segments,
        |segment| segment == DOUBLE_STAR,
        |segment, name| match_segment(segment, name),
    )
}

/// Whether `pattern` needs path-aware matching rather than a name match.
#[must_use]
pub fn is_path_pattern(pattern: &str) -> bool {
    pattern.contains('/') || pattern.contains(DOUBLE_STAR)
}

fn match_segment(segment: &str, name: &str) -> bool {
    match segment {
        "" => name.is_empty(),
        "*" => true,
        _ => wildcard_match(name, segment),
    }
}

fn to_slash(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
