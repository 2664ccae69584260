//! Named units of work that link one part of the repository.
pub mod context;
pub mod discovery;
pub mod links;

pub use context::Context;

use anyhow::Result;

use crate::logging::TaskStatus;

/// Outcome of a task that ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed and applied its changes.
    Ok(TaskStats),
    /// Task had nothing to work on.
    Skipped(String),
    /// Task ran in dry-run mode; nothing was changed.
    DryRun(TaskStats),
}

/// Per-task link counters.
///
/// # Examples
///
/// ```
/// use dotfiles_linker::tasks::TaskStats;
///
/// let stats = TaskStats { created: 2, replaced: 0, already_linked: 5, ignored: 1 };
/// assert_eq!(stats.summary(false), "2 created, 5 already linked, 1 ignored");
/// assert_eq!(stats.summary(true), "2 would create, 5 already linked, 1 ignored");
/// assert_eq!(TaskStats::default().summary(false), "nothing to link");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Links created where nothing existed.
    pub created: u32,
    /// Occupied destinations replaced by links.
    pub replaced: u32,
    /// Destinations that already linked to the right source.
    pub already_linked: u32,
    /// Paths excluded by ignore rules.
    pub ignored: u32,
}

impl TaskStats {
    /// Format the non-zero counters, e.g. "3 created, 10 already linked".
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let (create, replace) = if dry_run {
            ("would create", "would replace")
        } else {
            ("created", "replaced")
        };
        let parts: Vec<String> = [
            (self.created, create),
            (self.replaced, replace),
            (self.already_linked, "already linked"),
            (self.ignored, "ignored"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{count} {label}"))
        .collect();

        if parts.is_empty() {
            "nothing to link".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Log the summary and wrap it in the matching [`TaskResult`].
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        let dry_run = ctx.config.dry_run;
        ctx.log.info(&self.summary(dry_run));
        if dry_run {
            TaskResult::DryRun(self)
        } else {
            TaskResult::Ok(self)
        }
    }
}

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task should run on the current platform.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if a source directory cannot be read or any link
    /// cannot be reconciled.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The tasks run by the link command, in execution order.
#[must_use]
pub fn all_link_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(links::LinkRepositoryDotfiles),
        Box::new(links::LinkHomeTree),
        Box::new(links::LinkRootTree),
    ]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's error after recording it as failed; the caller stops
/// the run.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok(stats)) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Ok, Some(&stats.summary(false)));
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun(stats)) => {
            ctx.log
                .record_task(task.name(), TaskStatus::DryRun, Some(&stats.summary(true)));
        }
        Err(e) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            return Err(e);
        }
    }
    Ok(())
}
