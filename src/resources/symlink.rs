//! Symlink resource.
use std::io;
use std::path::{Path, PathBuf};

use super::helpers::fs::{ensure_parent_dir, paths_equal, read_link_target, remove_existing};
use super::{LinkDecision, LinkState};
use crate::error::LinkError;

/// Flags controlling [`SymlinkResource::reconcile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOpts {
    /// Replace an occupied destination instead of failing.
    pub overwrite: bool,
    /// Decide only; never touch the filesystem.
    pub simulate: bool,
    /// Compare link targets case-sensitively.
    pub case_sensitive: bool,
}

/// A symlink that should exist at `target` and point to `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Human-readable description of this link.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    /// Classify what currently occupies the destination.
    ///
    /// A dangling symlink counts as present.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination's metadata cannot be read for a
    /// reason other than it not existing.
    pub fn current_state(&self, case_sensitive: bool) -> Result<LinkState, LinkError> {
        match std::fs::symlink_metadata(&self.target) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkState::Absent),
            Err(e) => return Err(LinkError::from_io(&self.target, e)),
        }

        Ok(match read_link_target(&self.target) {
            Some(current) if paths_equal(&current, &self.source, case_sensitive) => {
                LinkState::SymlinkToSameSource
            }
            Some(current) => LinkState::SymlinkToOtherSource { current },
            None => LinkState::ExistingFileOrDirectory,
        })
    }

    /// Decide what [`reconcile`](Self::reconcile) would do, without acting.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`current_state`](Self::current_state).
    pub fn plan(&self, opts: ReconcileOpts) -> Result<LinkDecision, LinkError> {
        Ok(decide(&self.current_state(opts.case_sensitive)?, opts.overwrite))
    }

    /// Bring the destination in line with the source.
    ///
    /// Returns the decision taken.  With `opts.simulate` the decision is
    /// computed and returned but nothing is deleted or created.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::AlreadyExists`] when the destination is occupied
    /// and `opts.overwrite` is false, or the classified I/O error of any
    /// failed metadata read, removal, directory creation or symlink call.
    pub fn reconcile(&self, opts: ReconcileOpts) -> Result<LinkDecision, LinkError> {
        let decision = self.plan(opts)?;
        match decision {
            LinkDecision::Fail => {
                return Err(LinkError::AlreadyExists {
                    path: self.target.clone(),
                });
            }
            LinkDecision::Skip => return Ok(decision),
            LinkDecision::Create | LinkDecision::Replace if opts.simulate => return Ok(decision),
            LinkDecision::Replace => remove_existing(&self.target)?,
            LinkDecision::Create => {}
        }

        ensure_parent_dir(&self.target)?;
        create_symlink(&self.source, &self.target)?;
        Ok(decision)
    }
}

/// Map a destination state to a decision.
///
/// | state | overwrite | decision |
/// |---|---|---|
/// | absent | any | `Create` |
/// | link to source | any | `Skip` |
/// | anything else | false | `Fail` |
/// | anything else | true | `Replace` |
#[must_use]
pub const fn decide(state: &LinkState, overwrite: bool) -> LinkDecision {
    match state {
        LinkState::Absent => LinkDecision::Create,
        LinkState::SymlinkToSameSource => LinkDecision::Skip,
        LinkState::SymlinkToOtherSource { .. } | LinkState::ExistingFileOrDirectory => {
            if overwrite {
                LinkDecision::Replace
            } else {
                LinkDecision::Fail
            }
        }
    }
}

/// Create a symlink at `link` pointing to `source`.
///
/// A directory source gets a directory symlink on platforms that
/// distinguish the two.
fn create_symlink(source: &Path, link: &Path) -> Result<(), LinkError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(source, link);

    #[cfg(windows)]
    let result = if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, link)
    } else {
        std::os::windows::fs::symlink_file(source, link)
    };

    result.map_err(|e| LinkError::from_io(link, e))
}
