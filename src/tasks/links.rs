//! Tasks that mirror the repository into the home directory and the filesystem root.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::discovery::{self, Discovered};
use super::{Context, Task, TaskResult, TaskStats};
use crate::resources::LinkDecision;
use crate::resources::symlink::SymlinkResource;

/// Directory under the repository mirrored into the home directory.
pub const HOME_DIR: &str = "HOME";
/// Directory under the repository mirrored into the filesystem root.
pub const ROOT_DIR: &str = "ROOT";

/// Link dotted entries at the repository root into the home directory.
#[derive(Debug)]
pub struct LinkRepositoryDotfiles;

impl Task for LinkRepositoryDotfiles {
    fn name(&self) -> &str {
        "Link repository dotfiles"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let found = discovery::dotted_entries(&ctx.config.root, &ctx.rules)?;
        Ok(link_all(ctx, &found, &ctx.config.home)?.finish(ctx))
    }
}

/// Mirror `<repo>/HOME/` into the home directory.
#[derive(Debug)]
pub struct LinkHomeTree;

impl Task for LinkHomeTree {
    fn name(&self) -> &str {
        "Link HOME tree"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        link_tree(ctx, HOME_DIR, &ctx.config.home)
    }
}

/// Mirror `<repo>/ROOT/` into `/`.
#[derive(Debug)]
pub struct LinkRootTree;

impl Task for LinkRootTree {
    fn name(&self) -> &str {
        "Link ROOT tree"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.links_root_tree()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        link_tree(ctx, ROOT_DIR, &ctx.config.system_root)
    }
}

/// Link every file under `<repo>/<dir>` into `dest`.
fn link_tree(ctx: &Context, dir: &str, dest: &Path) -> Result<TaskResult> {
    let base = ctx.config.root.join(dir);
    if !base.is_dir() {
        return Ok(TaskResult::Skipped(format!(
            "{dir} directory not found: {}",
            base.display()
        )));
    }

    ctx.log.debug(&format!("processing {dir} directory: {}", base.display()));
    let found = discovery::tree_files(&ctx.config.root, &base, &ctx.rules)?;
    Ok(link_all(ctx, &found, dest)?.finish(ctx))
}

/// Reconcile each discovered source against `dest/<relative>`.
///
/// Stops at the first failure; links created before it stay in place.
fn link_all(ctx: &Context, found: &Discovered, dest: &Path) -> Result<TaskStats> {
    let mut stats = TaskStats::default();
    let opts = ctx.reconcile_opts();

    for candidate in &found.ignored {
        ctx.log.debug(&format!("ignored: {}", candidate.relative_path));
        stats.ignored += 1;
    }

    ctx.log.debug(&format!(
        "found {} entries to link into {}",
        found.sources.len(),
        dest.display()
    ));

    for source in &found.sources {
        let resource = SymlinkResource::new(source.path.clone(), dest.join(&source.relative));
        let decision = resource
            .reconcile(opts)
            .with_context(|| format!("linking {}", resource.description()))?;

        match decision {
            LinkDecision::Skip => {
                ctx.log
                    .debug(&format!("already linked: {}", resource.description()));
                stats.already_linked += 1;
            }
            LinkDecision::Create => {
                stats.created += 1;
                report(ctx, "link", &resource);
            }
            LinkDecision::Replace => {
                stats.replaced += 1;
                report(ctx, "replace", &resource);
            }
            // reconcile() surfaces Fail as an error
            LinkDecision::Fail => {}
        }
    }

    Ok(stats)
}

fn report(ctx: &Context, verb: &str, resource: &SymlinkResource) {
    if ctx.config.dry_run {
        ctx.log
            .dry_run(&format!("would {verb} {}", resource.description()));
    } else {
        ctx.log.success(&format!("{verb}: {}", resource.description()));
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::LinkError;
    use crate::platform::Os;
    use crate::tasks::test_helpers::{Layout, make_context, make_platform_context};

    fn is_link_to(link: &Path, source: &Path) -> bool {
        std::fs::read_link(link).is_ok()
            && matches!(
                (dunce::canonicalize(link), dunce::canonicalize(source)),
                (Ok(resolved), Ok(expected)) if resolved == expected
            )
    }

    fn stats(result: TaskResult) -> TaskStats {
        match result {
            TaskResult::Ok(stats) | TaskResult::DryRun(stats) => stats,
            TaskResult::Skipped(reason) => panic!("unexpected skip: {reason}"),
        }
    }

    // -----------------------------------------------------------------------
    // LinkRepositoryDotfiles
    // -----------------------------------------------------------------------

    #[test]
    fn repository_dotfiles_link_into_home() {
        let layout = Layout::new();
        let bashrc = layout.repo_file(".bashrc", "alias ll='ls -l'");
        layout.repo_file(".vim/vimrc", "set nu");
        layout.repo_file("README.md", "# dotfiles");
        let (ctx, _log) = make_context(layout.config(), &[]);

        let result = LinkRepositoryDotfiles.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok(_)));
        assert_eq!(stats(result).created, 2);
        assert!(is_link_to(&layout.home.join(".bashrc"), &bashrc));
        assert!(is_link_to(&layout.home.join(".vim"), &layout.repo.join(".vim")));
        assert!(!layout.home.join("README.md").exists());
    }

    #[test]
    fn repository_dotfiles_second_run_is_noop() {
        let layout = Layout::new();
        layout.repo_file(".bashrc", "");
        let (ctx, _log) = make_context(layout.config(), &[]);

        LinkRepositoryDotfiles.run(&ctx).unwrap();
        let second = stats(LinkRepositoryDotfiles.run(&ctx).unwrap());
        assert_eq!(second.created, 0);
        assert_eq!(second.already_linked, 1);
    }

    #[test]
    fn repository_dotfiles_respect_ignore_rules() {
        let layout = Layout::new();
        layout.repo_file(".git/HEAD", "ref: refs/heads/main");
        layout.repo_file(".gitignore", "target/");
        layout.repo_file(".zshrc", "");
        let (ctx, _log) = make_context(layout.config(), &[".gitignore"]);

        let result = stats(LinkRepositoryDotfiles.run(&ctx).unwrap());
        assert_eq!(result.created, 1);
        assert_eq!(result.ignored, 2);
        assert!(std::fs::symlink_metadata(layout.home.join(".git")).is_err());
        assert!(std::fs::symlink_metadata(layout.home.join(".gitignore")).is_err());
    }

    #[test]
    fn existing_file_without_force_fails() {
        let layout = Layout::new();
        layout.repo_file(".bashrc", "repo");
        std::fs::write(layout.home.join(".bashrc"), "mine").unwrap();
        let (ctx, _log) = make_context(layout.config(), &[]);

        let err = LinkRepositoryDotfiles.run(&ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LinkError>(),
            Some(LinkError::AlreadyExists { .. })
        ));
        assert_eq!(
            std::fs::read_to_string(layout.home.join(".bashrc")).unwrap(),
            "mine"
        );
    }

    #[test]
    fn existing_file_with_force_is_replaced() {
        let layout = Layout::new();
        let bashrc = layout.repo_file(".bashrc", "repo");
        std::fs::write(layout.home.join(".bashrc"), "mine").unwrap();
        let mut config = layout.config();
        config.overwrite = true;
        let (ctx, _log) = make_context(config, &[]);

        let result = stats(LinkRepositoryDotfiles.run(&ctx).unwrap());
        assert_eq!(result.replaced, 1);
        assert!(is_link_to(&layout.home.join(".bashrc"), &bashrc));
    }

    #[test]
    fn dry_run_changes_nothing() {
        let layout = Layout::new();
        layout.repo_file(".bashrc", "");
        layout.repo_file("HOME/.config/app.toml", "");
        let mut config = layout.config();
        config.dry_run = true;
        let (ctx, _log) = make_context(config, &[]);

        let result = LinkRepositoryDotfiles.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun(_)));
        assert_eq!(stats(result).created, 1);
        let result = LinkHomeTree.run(&ctx).unwrap();
        assert_eq!(stats(result).created, 1);

        assert!(std::fs::symlink_metadata(layout.home.join(".bashrc")).is_err());
        assert!(!layout.home.join(".config").exists());
    }

    // -----------------------------------------------------------------------
    // LinkHomeTree / LinkRootTree
    // -----------------------------------------------------------------------

    #[test]
    fn home_tree_links_files_individually() {
        let layout = Layout::new();
        let init = layout.repo_file("HOME/.config/nvim/init.vim", "");
        std::fs::create_dir_all(layout.home.join(".config")).unwrap();
        std::fs::write(layout.home.join(".config/user-owned"), "keep").unwrap();
        let (ctx, _log) = make_context(layout.config(), &[]);

        let result = stats(LinkHomeTree.run(&ctx).unwrap());
        assert_eq!(result.created, 1);
        assert!(is_link_to(&layout.home.join(".config/nvim/init.vim"), &init));
        assert!(layout.home.join(".config/user-owned").exists());
    }

    #[test]
    fn home_tree_missing_is_skipped() {
        let layout = Layout::new();
        let (ctx, _log) = make_context(layout.config(), &[]);
        let result = LinkHomeTree.run(&ctx).unwrap();
        assert!(matches!(
            result,
            TaskResult::Skipped(reason) if reason.contains("HOME directory not found")
        ));
    }

    #[test]
    fn home_tree_skips_files_below_excluded_path() {
        let layout = Layout::new();
        layout.repo_file("HOME/build/artifact", "");
        layout.repo_file("HOME/build.txt", "");
        let (ctx, _log) = make_context(layout.config(), &["HOME/build/**"]);

        let result = stats(LinkHomeTree.run(&ctx).unwrap());
        assert_eq!(result.created, 1);
        assert_eq!(result.ignored, 1);
        assert!(!layout.home.join("build").exists());
    }

    #[test]
    fn home_tree_negation_reincludes_file_below_ignored_directory() {
        let layout = Layout::new();
        let init = layout.repo_file("HOME/.config/nvim/init.vim", "");
        layout.repo_file("HOME/.config/fish/config.fish", "");
        let (ctx, _log) = make_context(
            layout.config(),
            &["HOME/.config/**", "!HOME/.config/nvim/**"],
        );

        let result = stats(LinkHomeTree.run(&ctx).unwrap());
        assert_eq!(result.created, 1);
        assert_eq!(result.ignored, 1);
        assert!(is_link_to(&layout.home.join(".config/nvim/init.vim"), &init));
        assert!(!layout.home.join(".config/fish").exists());
    }

    #[test]
    fn root_tree_links_into_system_root() {
        let layout = Layout::new();
        let hosts = layout.repo_file("ROOT/etc/hosts", "127.0.0.1 localhost");
        let (ctx, _log) = make_context(layout.config(), &[]);

        assert!(LinkRootTree.should_run(&ctx));
        let result = stats(LinkRootTree.run(&ctx).unwrap());
        assert_eq!(result.created, 1);
        assert!(is_link_to(&layout.sysroot.join("etc/hosts"), &hosts));
    }

    #[test]
    fn root_tree_not_applicable_on_windows() {
        let layout = Layout::new();
        let (ctx, _log) = make_platform_context(layout.config(), &[], Os::Windows);
        assert!(!LinkRootTree.should_run(&ctx));
        assert!(LinkHomeTree.should_run(&ctx));
    }

    #[test]
    fn root_tree_missing_is_skipped() {
        let layout = Layout::new();
        let (ctx, _log) = make_context(layout.config(), &[]);
        assert!(matches!(
            LinkRootTree.run(&ctx).unwrap(),
            TaskResult::Skipped(_)
        ));
    }
}
