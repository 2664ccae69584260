//! The link command: resolve configuration, load ignore rules, run the link tasks.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::{Cli, VERSION};
use crate::config::Config;
use crate::ignore::{IgnorePatternSet, IgnoreRules, file};
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::tasks::{self, Context};

/// Run the link command.
///
/// # Errors
///
/// Returns an error if configuration cannot be resolved or any link cannot
/// be reconciled.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<()> {
    let platform = Platform::detect();
    log.info(&format!("dotfileslinker {VERSION}"));

    log.stage("Resolving configuration");
    let config = Config::resolve(cli, &platform)?;
    log.info(&format!("root: {}", config.root.display()));
    log.info(&format!("home: {}", config.home.display()));
    log.info(&format!("ignore file: {}", config.ignore_file.display()));
    log.info(&format!("force: {}", yes_no(config.overwrite)));
    log.info(&format!("dry run: {}", yes_no(config.dry_run)));
    log.debug(&format!("platform: {}", platform.os));
    log.debug(&format!("case-sensitive paths: {}", config.case_sensitive));
    log.debug(&format!("system root: {}", config.system_root.display()));

    let rules = load_rules(&config, log.as_ref());
    let dry_run = config.dry_run;
    let ctx = Context::new(config, platform, Arc::clone(log) as Arc<dyn Log>, rules);

    link_dotfiles(&ctx, log)?;

    if dry_run {
        log.success("Dry run completed successfully. No changes were made.");
    } else {
        log.success("All operations completed.");
    }
    Ok(())
}

/// Run every link task against an already built context.
///
/// # Errors
///
/// Returns the first task error.
pub fn link_dotfiles(ctx: &Context, log: &Logger) -> Result<()> {
    let all_tasks = tasks::all_link_tasks();
    super::run_tasks(all_tasks.iter().map(AsRef::as_ref), ctx, log)
}

/// Load the ignore file into rules, falling back to defaults only when the
/// file cannot be read.
fn load_rules(config: &Config, log: &dyn Log) -> IgnoreRules {
    let user = match file::load(&config.ignore_file) {
        Ok(patterns) => patterns,
        Err(e) => {
            log.warn(&format!(
                "cannot read ignore file {}: {e}; continuing with default patterns",
                config.ignore_file.display()
            ));
            IgnorePatternSet::new()
        }
    };
    let rules = IgnoreRules::with_defaults(&user);
    log.debug(&format!(
        "loaded {} ignore patterns from {}",
        rules.user_pattern_count(),
        config.ignore_file.display()
    ));
    rules
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::ignore::PathCandidate;
    use crate::logging::{TaskStatus, test_logger};
    use crate::tasks::test_helpers::{Layout, make_context};

    #[test]
    fn load_rules_reads_user_patterns() {
        let layout = Layout::new();
        layout.repo_file("dotfiles_ignore", "*.md\n!KEEP.md\n");
        let config = layout.config();
        let log = test_logger();

        let rules = load_rules(&config, &log);
        assert_eq!(rules.user_pattern_count(), 2);
        assert!(rules.should_ignore(&PathCandidate::new("README.md", false)));
        assert!(!rules.should_ignore(&PathCandidate::new("KEEP.md", false)));
    }

    #[test]
    fn load_rules_missing_file_uses_defaults_only() {
        let layout = Layout::new();
        let log = test_logger();
        let rules = load_rules(&layout.config(), &log);
        assert_eq!(rules.user_pattern_count(), 0);
        assert!(rules.should_ignore(&PathCandidate::new(".git", true)));
    }

    #[test]
    fn load_rules_unreadable_file_falls_back() {
        let layout = Layout::new();
        std::fs::create_dir_all(layout.repo.join("dotfiles_ignore")).unwrap();
        let log = test_logger();
        let rules = load_rules(&layout.config(), &log);
        assert_eq!(rules.user_pattern_count(), 0);
    }

    #[test]
    fn link_dotfiles_runs_all_tasks() {
        let layout = Layout::new();
        layout.repo_file(".bashrc", "");
        layout.repo_file("HOME/.config/git/config", "");
        layout.repo_file("ROOT/etc/motd", "");
        let (ctx, log) = make_context(layout.config(), &[]);

        link_dotfiles(&ctx, &log).unwrap();

        let statuses: Vec<_> = log.task_entries().iter().map(|t| t.status).collect();
        assert_eq!(statuses, [TaskStatus::Ok, TaskStatus::Ok, TaskStatus::Ok]);
        assert!(layout.home.join(".bashrc").exists());
        assert!(layout.home.join(".config/git/config").exists());
        assert!(layout.sysroot.join("etc/motd").exists());
    }

    #[test]
    fn link_dotfiles_stops_at_first_failure() {
        let layout = Layout::new();
        layout.repo_file(".bashrc", "repo");
        layout.repo_file("HOME/.profile", "");
        std::fs::write(layout.home.join(".bashrc"), "mine").unwrap();
        let (ctx, log) = make_context(layout.config(), &[]);

        assert!(link_dotfiles(&ctx, &log).is_err());
        assert_eq!(log.task_entries().len(), 1);
        assert_eq!(log.failure_count(), 1);
        assert!(std::fs::symlink_metadata(layout.home.join(".profile")).is_err());
    }
}
