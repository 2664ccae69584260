#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `link` command.
//!
//! These tests build a throwaway repository, home directory and system root,
//! run the whole command (in-process, and through the compiled binary for
//! exit codes and console output) and inspect the resulting links.

mod common;

use common::*;
use dotfiles_linker::error::LinkError;
use dotfiles_linker::logging::TaskStatus;

// ---------------------------------------------------------------------------
// Linking
// ---------------------------------------------------------------------------

#[test]
fn links_repository_dotfiles_and_home_tree() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "export EDITOR=vim")
        .with_repo_file(".vim/colors/dark.vim", "")
        .with_repo_file("README.md", "# dotfiles")
        .with_repo_file("HOME/.config/nvim/init.vim", "set nu")
        .build();

    ctx.run(&[]).unwrap();

    assert!(is_link_to(&ctx.home_path(".bashrc"), &ctx.repo_path(".bashrc")));
    assert!(is_link_to(&ctx.home_path(".vim"), &ctx.repo_path(".vim")));
    assert!(is_link_to(
        &ctx.home_path(".config/nvim/init.vim"),
        &ctx.repo_path("HOME/.config/nvim/init.vim")
    ));
    assert!(!entry_exists(&ctx.home_path("README.md")));
    assert!(
        !entry_exists(&ctx.home_path("HOME")),
        "HOME itself is not a dotted entry"
    );
}

#[cfg(unix)]
#[test]
fn links_root_tree_into_system_root() {
    let ctx = TestContextBuilder::new()
        .with_repo_file("ROOT/etc/profile.d/custom.sh", "export X=1")
        .build();

    let log = ctx.run(&[]).unwrap();

    assert!(is_link_to(
        &ctx.sysroot.join("etc/profile.d/custom.sh"),
        &ctx.repo_path("ROOT/etc/profile.d/custom.sh")
    ));
    let root_task = log
        .task_entries()
        .into_iter()
        .find(|t| t.name == "Link ROOT tree")
        .unwrap();
    assert_eq!(root_task.status, TaskStatus::Ok);
}

#[test]
fn missing_home_and_root_directories_are_skipped() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "")
        .build();

    let log = ctx.run(&[]).unwrap();

    let home_task = log
        .task_entries()
        .into_iter()
        .find(|t| t.name == "Link HOME tree")
        .unwrap();
    assert_eq!(home_task.status, TaskStatus::Skipped);
    assert_eq!(log.failure_count(), 0);
}

#[test]
fn second_run_is_idempotent() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "")
        .with_repo_file("HOME/.profile", "")
        .build();

    ctx.run(&[]).unwrap();
    let log = ctx.run(&[]).unwrap();

    let first = &log.task_entries()[0];
    assert_eq!(first.message.as_deref(), Some("1 already linked"));
    assert!(is_link_to(&ctx.home_path(".bashrc"), &ctx.repo_path(".bashrc")));
}

// ---------------------------------------------------------------------------
// Overwrite
// ---------------------------------------------------------------------------

#[test]
fn existing_file_aborts_without_force() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "repo")
        .with_home_file(".bashrc", "mine")
        .build();

    let err = ctx.run(&[]).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LinkError>(),
        Some(LinkError::AlreadyExists { .. })
    ));
    assert_eq!(
        std::fs::read_to_string(ctx.home_path(".bashrc")).unwrap(),
        "mine"
    );
}

#[test]
fn existing_file_replaced_with_force() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "repo")
        .with_home_file(".bashrc", "mine")
        .build();

    ctx.run(&["--force=y"]).unwrap();

    assert!(is_link_to(&ctx.home_path(".bashrc"), &ctx.repo_path(".bashrc")));
    assert_eq!(
        std::fs::read_to_string(ctx.home_path(".bashrc")).unwrap(),
        "repo"
    );
}

#[test]
fn force_n_behaves_like_default() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "repo")
        .with_home_file(".bashrc", "mine")
        .build();

    assert!(ctx.run(&["--force=n"]).is_err());
}

#[test]
fn links_created_before_a_failure_stay_in_place() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".aliases", "")
        .with_repo_file(".bashrc", "repo")
        .with_home_file(".bashrc", "mine")
        .build();

    assert!(ctx.run(&[]).is_err());
    assert!(is_link_to(&ctx.home_path(".aliases"), &ctx.repo_path(".aliases")));
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn dry_run_makes_no_changes() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "repo")
        .with_repo_file("HOME/.config/app/settings.json", "{}")
        .with_home_file(".gitconfig", "mine")
        .with_repo_file(".gitconfig", "repo")
        .build();

    let log = ctx.run(&["--dry-run", "--force"]).unwrap();

    assert!(!entry_exists(&ctx.home_path(".bashrc")));
    assert!(!entry_exists(&ctx.home_path(".config")));
    assert_eq!(
        std::fs::read_to_string(ctx.home_path(".gitconfig")).unwrap(),
        "mine"
    );
    let first = &log.task_entries()[0];
    assert_eq!(first.status, TaskStatus::DryRun);
    assert_eq!(first.message.as_deref(), Some("1 would create, 1 would replace"));
}

// ---------------------------------------------------------------------------
// Ignore rules
// ---------------------------------------------------------------------------

#[test]
fn ignore_file_patterns_and_negations() {
    let ctx = TestContextBuilder::new()
        .with_ignore_patterns(&["*.log", "!special.log", "HOME/build/**"])
        .with_repo_file("HOME/logs/special.log", "")
        .with_repo_file("HOME/logs/other.log", "")
        .with_repo_file("HOME/build/output.bin", "")
        .with_repo_file("HOME/build.txt", "")
        .build();

    ctx.run(&[]).unwrap();

    assert!(entry_exists(&ctx.home_path("logs/special.log")));
    assert!(!entry_exists(&ctx.home_path("logs/other.log")));
    assert!(!entry_exists(&ctx.home_path("build")));
    assert!(entry_exists(&ctx.home_path("build.txt")));
}

#[test]
fn negation_reincludes_files_below_an_ignored_directory() {
    let ctx = TestContextBuilder::new()
        .with_ignore_patterns(&["HOME/.config/**", "!HOME/.config/nvim/**"])
        .with_repo_file("HOME/.config/nvim/init.vim", "")
        .with_repo_file("HOME/.config/fish/config.fish", "")
        .build();

    ctx.run(&[]).unwrap();

    assert!(is_link_to(
        &ctx.home_path(".config/nvim/init.vim"),
        &ctx.repo_path("HOME/.config/nvim/init.vim")
    ));
    assert!(!entry_exists(&ctx.home_path(".config/fish")));
}

#[test]
fn name_globs_do_not_exclude_directory_contents() {
    let ctx = TestContextBuilder::new()
        .with_ignore_patterns(&["*.d"])
        .with_repo_file("HOME/.config/conf.d/net", "")
        .with_repo_file("HOME/.config/conf.d/sshd", "")
        .build();

    ctx.run(&[]).unwrap();

    assert!(entry_exists(&ctx.home_path(".config/conf.d/net")));
    assert!(entry_exists(&ctx.home_path(".config/conf.d/sshd")));
}

#[test]
fn defaults_cannot_be_negated() {
    let ctx = TestContextBuilder::new()
        .with_ignore_patterns(&["!.DS_Store", "!*.bak"])
        .with_repo_file(".DS_Store", "")
        .with_repo_file(".zshrc.bak", "")
        .with_repo_file(".zshrc", "")
        .build();

    ctx.run(&[]).unwrap();

    assert!(!entry_exists(&ctx.home_path(".DS_Store")));
    assert!(!entry_exists(&ctx.home_path(".zshrc.bak")));
    assert!(entry_exists(&ctx.home_path(".zshrc")));
}

#[test]
fn git_directory_is_never_linked() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".git/HEAD", "ref: refs/heads/main")
        .with_repo_file("HOME/.config/plugin/.git/HEAD", "")
        .with_repo_file("HOME/.config/plugin/init.lua", "")
        .build();

    ctx.run(&[]).unwrap();

    assert!(!entry_exists(&ctx.home_path(".git")));
    assert!(!entry_exists(&ctx.home_path(".config/plugin/.git")));
    assert!(entry_exists(&ctx.home_path(".config/plugin/init.lua")));
}

#[test]
fn dotted_ignore_file_is_linked_unless_excluded() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".linkignore", ".secret\n")
        .with_repo_file(".secret", "")
        .build();

    ctx.run(&["--ignore-file", ".linkignore"]).unwrap();

    assert!(entry_exists(&ctx.home_path(".linkignore")));
    assert!(!entry_exists(&ctx.home_path(".secret")));
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

#[test]
fn binary_succeeds_and_reports_completion() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "")
        .build();

    let output = ctx.command(&[]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All operations completed."), "{stdout}");
    assert!(is_link_to(&ctx.home_path(".bashrc"), &ctx.repo_path(".bashrc")));
}

#[test]
fn binary_dry_run_reports_no_changes() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "")
        .build();

    let output = ctx.command(&["-d"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[DRY RUN]"), "{stdout}");
    assert!(
        stdout.contains("Dry run completed successfully. No changes were made."),
        "{stdout}"
    );
    assert!(!entry_exists(&ctx.home_path(".bashrc")));
}

#[test]
fn binary_exits_one_on_conflict() {
    let ctx = TestContextBuilder::new()
        .with_repo_file(".bashrc", "repo")
        .with_home_file(".bashrc", "mine")
        .build();

    let output = ctx.command(&[]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists; use --force=y to overwrite"), "{stderr}");
}

#[test]
fn binary_exits_one_on_missing_root() {
    let ctx = IntegrationTestContext::new();
    std::fs::remove_dir(&ctx.repo).unwrap();

    let output = ctx.command(&[]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn binary_prints_version() {
    let ctx = IntegrationTestContext::new();
    let output = ctx.command(&["--version"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("dotfileslinker "));
}
