// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfiles repository, a home
// directory and a stand-in filesystem root, plus a fluent builder so each
// integration test can set up an isolated environment without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use clap::Parser;
use dotfiles_linker::cli::Cli;
use dotfiles_linker::commands;
use dotfiles_linker::logging::Logger;

/// An isolated repository, home and system root backed by a
/// [`tempfile::TempDir`].
///
/// Everything is deleted when dropped.
pub struct IntegrationTestContext {
    /// Keeps the directories alive.
    pub dir: tempfile::TempDir,
    /// Repository root.
    pub repo: PathBuf,
    /// Home directory links are created in.
    pub home: PathBuf,
    /// Directory standing in for `/`.
    pub sysroot: PathBuf,
}

impl IntegrationTestContext {
    /// Create empty `repo/`, `home/` and `sysroot/` directories.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let repo = dir.path().join("repo");
        let home = dir.path().join("home");
        let sysroot = dir.path().join("sysroot");
        for path in [&repo, &home, &sysroot] {
            std::fs::create_dir_all(path).expect("create test dir");
        }
        Self {
            dir,
            repo,
            home,
            sysroot,
        }
    }

    /// Arguments pointing the linker at this context's directories.
    pub fn base_args(&self) -> Vec<String> {
        vec![
            "dotfileslinker".to_string(),
            "--root".to_string(),
            self.repo.display().to_string(),
            "--home".to_string(),
            self.home.display().to_string(),
            "--system-root".to_string(),
            self.sysroot.display().to_string(),
        ]
    }

    /// Parse a [`Cli`] for this context with `extra` flags appended.
    pub fn cli(&self, extra: &[&str]) -> Cli {
        let mut args = self.base_args();
        args.extend(extra.iter().map(|a| (*a).to_string()));
        Cli::parse_from(args)
    }

    /// Run the link command in-process.
    pub fn run(&self, extra: &[&str]) -> anyhow::Result<Arc<Logger>> {
        let log = Arc::new(Logger::new("test"));
        commands::link::run(&self.cli(extra), &log)?;
        Ok(log)
    }

    /// Build a [`Command`] for the compiled binary, with its log file kept
    /// inside the temp directory.
    pub fn command(&self, extra: &[&str]) -> Command {
        let args = self.base_args();
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dotfileslinker"));
        cmd.args(args.iter().skip(1))
            .args(extra)
            .env("XDG_CACHE_HOME", self.dir.path().join("cache"))
            .env_remove("DOTFILES_ROOT")
            .env_remove("DOTFILES_HOME")
            .env_remove("DOTFILES_IGNORE_FILE");
        cmd
    }

    /// Path under the home directory.
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home.join(relative)
    }

    /// Path under the repository.
    pub fn repo_path(&self, relative: &str) -> PathBuf {
        self.repo.join(relative)
    }
}

/// Whether `link` is a symlink that resolves to `source`.
///
/// Both sides are canonicalised: links point into the canonical repository
/// root, which differs from the tempdir path on macOS (`/private/var`).
pub fn is_link_to(link: &Path, source: &Path) -> bool {
    std::fs::read_link(link).is_ok()
        && matches!(
            (dunce::canonicalize(link), dunce::canonicalize(source)),
            (Ok(resolved), Ok(expected)) if resolved == expected
        )
}

/// Whether anything (including a dangling symlink) exists at `path`.
pub fn entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Fluent builder for [`IntegrationTestContext`].
///
/// Allows individual tests to populate the repository and home directory
/// before the context is finalised.
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with empty directories.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `relative` inside the repository.
    pub fn with_repo_file(self, relative: &str, content: &str) -> Self {
        write_file(&self.ctx.repo.join(relative), content);
        self
    }

    /// Write the default ignore file with one pattern per line.
    pub fn with_ignore_patterns(self, patterns: &[&str]) -> Self {
        let content = patterns.join("\n");
        write_file(&self.ctx.repo.join("dotfiles_ignore"), &content);
        self
    }

    /// Write a pre-existing user file into the home directory.
    pub fn with_home_file(self, relative: &str, content: &str) -> Self {
        write_file(&self.ctx.home.join(relative), content);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}
