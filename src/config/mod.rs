//! Run configuration resolved from CLI flags and environment.
use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::platform::Platform;

/// Everything one linking run needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute repository root.
    pub root: PathBuf,
    /// Absolute home directory that dotted entries and `HOME/` link into.
    pub home: PathBuf,
    /// Ignore file path (resolved against `root`).
    pub ignore_file: PathBuf,
    /// Replace occupied destinations.
    pub overwrite: bool,
    /// Decide but never mutate.
    pub dry_run: bool,
    /// Compare link targets case-sensitively.
    pub case_sensitive: bool,
    /// Directory that `ROOT/` mirrors into.
    pub system_root: PathBuf,
}

impl Config {
    /// Resolve the configuration for this invocation.
    ///
    /// `root` falls back to the current directory and `home` to `HOME`
    /// (`USERPROFILE` on Windows).  Case sensitivity follows the platform
    /// unless `--case-insensitive` is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository root does not exist or is not a
    /// directory, or if no home directory can be determined.
    pub fn resolve(cli: &Cli, platform: &Platform) -> Result<Self> {
        let root = cli
            .root
            .clone()
            .map_or_else(std::env::current_dir, Ok)
            .context("reading current directory")?;
        let root = resolve_root(&root)?;

        let home = cli.home.clone().or_else(default_home).context(
            "cannot determine home directory. Use --home or set DOTFILES_HOME env var",
        )?;
        let home = std::path::absolute(&home)
            .with_context(|| format!("resolving home directory {}", home.display()))?;

        Ok(Self {
            ignore_file: root.join(&cli.ignore_file),
            root,
            home,
            overwrite: cli.force,
            dry_run: cli.dry_run,
            case_sensitive: platform.case_sensitive_paths() && !cli.case_insensitive,
            system_root: cli.system_root.clone(),
        })
    }
}

/// Canonicalize the repository root, requiring an existing directory.
fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = dunce::canonicalize(root)
        .with_context(|| format!("repository root not found: {}", root.display()))?;
    if !resolved.is_dir() {
        bail!("repository root is not a directory: {}", resolved.display());
    }
    Ok(resolved)
}

/// Home directory from the environment.
fn default_home() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
