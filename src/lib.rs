//! Dotfiles linker.
//!
//! Links a dotfiles repository into place with symbolic links: dotted
//! entries at the repository root and everything under `HOME/` go into the
//! home directory, everything under `ROOT/` goes into `/` on Unix.  Paths
//! matching the built-in defaults or the user's ignore file are skipped.
//!
//! The public API is organised in layers:
//!
//! - **[`matching`]**: glob and gitignore-style matchers
//! - **[`ignore`]**: default and user patterns resolved into a keep/ignore verdict
//! - **[`resources`]**: idempotent `classify + decide + apply` for one symlink
//! - **[`tasks`]**: named units of work that enumerate and link a source tree
//! - **[`commands`]**: the `link` command wiring configuration, logging and tasks
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod matching;
pub mod platform;
pub mod resources;
pub mod tasks;
