//! Error types for link reconciliation.
//!
//! Matching and ignore resolution are total and never fail; every
//! filesystem failure surfaces as a [`LinkError`].  Task code wraps these
//! with [`anyhow::Context`] and the binary converts the chain back into a
//! user-facing line with [`LinkError::describe`].
//!
//! # Error kinds
//!
//! ```text
//! LinkError
//! ├── PermissionDenied   access refused by the OS
//! ├── NotFound           a path or its parent is missing
//! ├── AlreadyExists      destination occupied, overwrite disabled
//! └── Io                 any other read/write/delete/symlink failure
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure while classifying, removing or creating a link.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The OS refused access to `path`.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// Path that could not be accessed.
        path: PathBuf,
    },

    /// `path`, or a directory leading to it, does not exist.
    #[error("not found: {}", path.display())]
    NotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// The destination exists, is not the expected link, and overwriting is
    /// disabled.
    #[error("'{}' already exists; use --force=y to overwrite", path.display())]
    AlreadyExists {
        /// Occupied destination.
        path: PathBuf,
    },

    /// Any other I/O failure.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl LinkError {
    /// Classify an [`io::Error`] raised while operating on `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    /// use dotfiles_linker::error::LinkError;
    ///
    /// let denied = io::Error::from(io::ErrorKind::PermissionDenied);
    /// let err = LinkError::from_io("/etc/hosts", denied);
    /// assert!(matches!(err, LinkError::PermissionDenied { .. }));
    /// assert_eq!(err.kind_label(false), "Permission denied");
    /// ```
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Path the failed operation was acting on.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::AlreadyExists { path }
            | Self::Io { path, .. } => path,
        }
    }

    /// One-line description for the console.
    ///
    /// `is_dir_context` selects "Directory not found" over "File not found".
    #[must_use]
    pub fn describe(&self, is_dir_context: bool) -> String {
        match self {
            Self::AlreadyExists { .. } => self.to_string(),
            Self::Io { .. } => format!("{}: {self}", self.kind_label(is_dir_context)),
            Self::PermissionDenied { path } | Self::NotFound { path } => {
                format!("{}: {}", self.kind_label(is_dir_context), path.display())
            }
        }
    }

    /// User-facing prefix for this kind of error.
    ///
    /// [`NotFound`](Self::NotFound) reads "Directory not found" when
    /// `is_dir_context` is set and "File not found" otherwise.
    #[must_use]
    pub const fn kind_label(&self, is_dir_context: bool) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "Permission denied",
            Self::NotFound { .. } if is_dir_context => "Directory not found",
            Self::NotFound { .. } => "File not found",
            Self::AlreadyExists { .. } => "Already exists",
            Self::Io { .. } => "Unexpected error",
        }
    }
}
