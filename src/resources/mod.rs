//! Idempotent link primitives (classify, decide, apply).
//!
//! A [`symlink::SymlinkResource`] pairs a source inside the repository with a
//! destination on the system.  Reconciling it classifies the destination as
//! a [`LinkState`], turns that into a [`LinkDecision`] and, unless
//! simulating, performs the decision.
pub mod helpers;
pub mod symlink;

use std::fmt;
use std::path::PathBuf;

/// What currently occupies a link destination.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use dotfiles_linker::resources::LinkState;
///
/// let absent = LinkState::Absent;
/// let linked = LinkState::SymlinkToSameSource;
/// let other = LinkState::SymlinkToOtherSource { current: PathBuf::from("/old/.bashrc") };
///
/// assert_ne!(absent, linked);
/// assert_ne!(linked, other);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the destination.
    Absent,
    /// The destination is a symlink that already resolves to the source.
    SymlinkToSameSource,
    /// The destination is a symlink to somewhere else (possibly dangling).
    SymlinkToOtherSource {
        /// Where the existing link points, resolved against its parent.
        current: PathBuf,
    },
    /// The destination is a regular file or directory.
    ExistingFileOrDirectory,
}

/// What reconciliation does (or would do) for one link.
///
/// # Examples
///
/// ```
/// use dotfiles_linker::resources::LinkDecision;
///
/// assert_eq!(LinkDecision::Replace.to_string(), "replace");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDecision {
    /// The destination is already the correct link.
    Skip,
    /// The destination is absent; create the link.
    Create,
    /// The destination is occupied and overwrite is enabled; delete it and
    /// create the link.
    Replace,
    /// The destination is occupied and overwrite is disabled.
    Fail,
}

impl fmt::Display for LinkDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Skip => "skip",
            Self::Create => "create",
            Self::Replace => "replace",
            Self::Fail => "fail",
        })
    }
}
