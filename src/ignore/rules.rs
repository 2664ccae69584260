//! Ignore/keep resolution for a single [`PathCandidate`].
use super::{IgnorePatternSet, PathCandidate};
use crate::matching::gitignore::{IgnorePattern, is_path_pattern, matches_path};
use crate::matching::glob::{has_wildcard, wildcard_match};

/// Outcome of evaluating one candidate, with the pattern responsible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No pattern matched, or nothing applied.
    Keep,
    /// A default pattern matched; negations cannot override it.
    Default(&'static str),
    /// A user pattern matched and no negation re-included the path.
    User {
        /// First matching user pattern, in sorted order.
        ignored_by: String,
    },
    /// A user pattern matched but a negation re-included the path.
    Negated {
        /// First matching user pattern, in sorted order.
        ignored_by: String,
        /// First matching negation (without the leading `!`).
        kept_by: String,
    },
}

impl Verdict {
    /// Whether the candidate should be left unlinked.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Default(_) | Self::User { .. })
    }
}

/// Default and user patterns combined into one resolver.
///
/// Evaluation order:
///
/// 1. defaults without wildcards, compared with the base name
/// 2. defaults with wildcards, glob-matched against the base name
/// 3. every user pattern that is not a negation
/// 4. every user negation; any hit keeps the path
///
/// Steps 1 and 2 are terminal.  Steps 3 and 4 always evaluate the whole
/// set, so the outcome does not depend on pattern order.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    defaults: &'static [&'static str],
    patterns: Vec<IgnorePattern>,
    negations: Vec<IgnorePattern>,
}

impl IgnoreRules {
    /// Build rules from an explicit default table and the user's patterns.
    ///
    /// Each user pattern is parsed once.  Empty patterns and a bare `!` are
    /// dropped.
    #[must_use]
    pub fn new(defaults: &'static [&'static str], user: &IgnorePatternSet) -> Self {
        let (mut negations, mut patterns): (Vec<_>, Vec<_>) = user
            .iter()
            .map(|pattern| IgnorePattern::parse(pattern))
            .filter(|pattern| !pattern.raw().is_empty())
            .partition(IgnorePattern::is_negation);
        // HashSet order is arbitrary; sort so logs and verdicts are stable.
        patterns.sort_unstable_by(|a, b| a.raw().cmp(b.raw()));
        negations.sort_unstable_by(|a, b| a.raw().cmp(b.raw()));
        Self {
            defaults,
            patterns,
            negations,
        }
    }

    /// Build rules from [`DEFAULT_IGNORE_PATTERNS`](super::DEFAULT_IGNORE_PATTERNS)
    /// and the user's patterns.
    #[must_use]
    pub fn with_defaults(user: &IgnorePatternSet) -> Self {
        Self::new(super::DEFAULT_IGNORE_PATTERNS, user)
    }

    /// Number of user patterns, negations included.
    #[must_use]
    pub const fn user_pattern_count(&self) -> usize {
        self.patterns.len() + self.negations.len()
    }

    /// Whether `candidate` should be left unlinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotfiles_linker::ignore::{IgnorePatternSet, IgnoreRules, PathCandidate};
    ///
    /// let user: IgnorePatternSet = ["*.log", "!special.log"].map(String::from).into();
    /// let rules = IgnoreRules::with_defaults(&user);
    ///
    /// assert!(rules.should_ignore(&PathCandidate::new("other.log", false)));
    /// assert!(!rules.should_ignore(&PathCandidate::new("special.log", false)));
    /// assert!(rules.should_ignore(&PathCandidate::new(".DS_Store", false)));
    /// ```
    #[must_use]
    pub fn should_ignore(&self, candidate: &PathCandidate) -> bool {
        self.evaluate(candidate).is_ignored()
    }

    /// Evaluate `candidate` and report which pattern decided it.
    #[must_use]
    pub fn evaluate(&self, candidate: &PathCandidate) -> Verdict {
        let name = candidate.base_name.as_str();

        if let Some(literal) = self
            .defaults
            .iter()
            .copied()
            .find(|d| !has_wildcard(d) && *d == name)
        {
            tracing::debug!("ignored {}: default pattern {literal}", candidate.relative_path);
            return Verdict::Default(literal);
        }
        if let Some(glob) = self
            .defaults
            .iter()
            .copied()
            .find(|d| has_wildcard(d) && wildcard_match(name, d))
        {
            tracing::debug!("ignored {}: default pattern {glob}", candidate.relative_path);
            return Verdict::Default(glob);
        }

        let mut ignored_by: Option<&str> = None;
        for pattern in &self.patterns {
            if user_pattern_matches(pattern, candidate) {
                let raw = pattern.raw();
                tracing::debug!("ignored {}: pattern {raw}", candidate.relative_path);
                ignored_by = ignored_by.or(Some(raw));
            }
        }

        let mut kept_by: Option<&str> = None;
        for negation in &self.negations {
            if user_pattern_matches(negation, candidate) {
                let raw = negation.raw();
                tracing::debug!("kept {}: pattern !{raw}", candidate.relative_path);
                kept_by = kept_by.or(Some(raw));
            }
        }

        match (ignored_by, kept_by) {
            (None, _) => Verdict::Keep,
            (Some(ignored), None) => Verdict::User {
                ignored_by: ignored.to_string(),
            },
            (Some(ignored), Some(kept)) => Verdict::Negated {
                ignored_by: ignored.to_string(),
                kept_by: kept.to_string(),
            },
        }
    }
}

/// Test one user pattern against `candidate`, ignoring its negation flag.
///
/// Exact base-name equality wins first.  Path patterns are matched against
/// the repository-relative path only; remaining wildcard patterns are
/// glob-matched against the base name.
fn user_pattern_matches(pattern: &IgnorePattern, candidate: &PathCandidate) -> bool {
    let raw = pattern.raw();
    if raw == candidate.base_name {
        return true;
    }
    if is_path_pattern(raw) {
        return matches_path(&candidate.relative_path, pattern, candidate.is_dir);
    }
    has_wildcard(raw) && wildcard_match(&candidate.base_name, raw)
}
