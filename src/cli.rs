//! Command-line interface.
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Version reported by `--version` and the log file header.
pub const VERSION: &str = match option_env!("DOTFILES_LINKER_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Link dotfiles from a repository into the home directory and `/`.
///
/// Dotted entries at the repository root are linked into the home
/// directory, everything under `HOME/` mirrors into the home directory and
/// everything under `ROOT/` mirrors into `/` (Unix only).
#[derive(Parser, Debug)]
#[command(name = "dotfileslinker", version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Repository root containing the dotfiles
    #[arg(long, env = "DOTFILES_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Home directory to link into
    #[arg(long, env = "DOTFILES_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Ignore file name, relative to the repository root
    #[arg(
        long,
        env = "DOTFILES_IGNORE_FILE",
        default_value = "dotfiles_ignore",
        value_name = "FILE"
    )]
    pub ignore_file: PathBuf,

    /// Overwrite existing files and links (y/n)
    #[arg(
        short = 'f',
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "n",
        default_missing_value = "y",
        value_parser = parse_yes_no,
        value_name = "y|n"
    )]
    pub force: bool,

    /// Show what would change without touching the filesystem
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Compare link targets case-insensitively
    #[arg(long)]
    pub case_insensitive: bool,

    /// Filesystem root that `ROOT/` is mirrored into
    #[arg(long, hide = true, default_value = "/", value_name = "DIR")]
    pub system_root: PathBuf,
}

/// Parse a yes/no flag value.
fn parse_yes_no(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => Err(format!("expected y or n, got '{other}'")),
    }
}
