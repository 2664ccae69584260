//! Execution context shared by every task.
use std::sync::Arc;

use crate::config::Config;
use crate::ignore::IgnoreRules;
use crate::logging::Log;
use crate::platform::Platform;
use crate::resources::symlink::ReconcileOpts;

/// Shared context for task execution.
#[derive(Clone)]
pub struct Context {
    /// Resolved run configuration.
    pub config: Arc<Config>,
    /// Detected platform information.
    pub platform: Platform,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Ignore rules loaded once for the whole run.
    pub rules: Arc<IgnoreRules>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("rules", &self.rules)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub fn new(config: Config, platform: Platform, log: Arc<dyn Log>, rules: IgnoreRules) -> Self {
        Self {
            config: Arc::new(config),
            platform,
            log,
            rules: Arc::new(rules),
        }
    }

    /// Reconciliation flags derived from the configuration.
    #[must_use]
    pub fn reconcile_opts(&self) -> ReconcileOpts {
        ReconcileOpts {
            overwrite: self.config.overwrite,
            simulate: self.config.dry_run,
            case_sensitive: self.config.case_sensitive,
        }
    }
}
