//! Top-level command orchestration.
pub mod link;

use anyhow::Result;

use crate::error::LinkError;
use crate::logging::Logger;
use crate::tasks::{self, Context, Task};

/// Execute tasks in order, stopping at the first failure.  The summary is
/// printed either way.
///
/// # Errors
///
/// Returns the first task error.
pub fn run_tasks<'a>(
    task_list: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    let result = task_list
        .into_iter()
        .try_for_each(|task| tasks::execute(task, ctx));
    log.print_summary();
    result
}

/// One-line, user-facing description of a failed run.
///
/// Link failures are reported by kind ("Permission denied: ...",
/// "Directory not found: ...").  A missing path counts as a directory
/// problem when its parent directory is missing too.
#[must_use]
pub fn describe_error(err: &anyhow::Error) -> String {
    err.downcast_ref::<LinkError>().map_or_else(
        || format!("Unexpected error: {err:#}"),
        |link| {
            let is_dir_context = link
                .path()
                .parent()
                .is_some_and(|parent| !parent.exists());
            link.describe(is_dir_context)
        },
    )
}
