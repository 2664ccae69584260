//! Host platform detection.
use std::fmt;

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-likes without a more specific variant.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is a Unix-like system.
    #[must_use]
    pub const fn is_unix(&self) -> bool {
        matches!(self.os, Os::Linux | Os::MacOs)
    }

    /// Whether the repository's `ROOT/` tree is linked into `/`.
    #[must_use]
    pub const fn links_root_tree(&self) -> bool {
        self.is_unix()
    }

    /// Whether the default filesystem compares paths case-sensitively.
    ///
    /// Windows (NTFS) and macOS (APFS) are case-insensitive by default.
    #[must_use]
    pub const fn case_sensitive_paths(&self) -> bool {
        matches!(self.os, Os::Linux)
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            // Default to Linux for other Unix-like systems
            Os::Linux
        }
    }
}
