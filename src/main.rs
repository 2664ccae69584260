//! Entry point for the `dotfileslinker` binary.
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotfiles_linker::cli::Cli;
use dotfiles_linker::commands;
use dotfiles_linker::logging::{Logger, init_subscriber};

const COMMAND: &str = "link";

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    init_subscriber(args.verbose, COMMAND);
    let log = Arc::new(Logger::new(COMMAND));

    match commands::link::run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&commands::describe_error(&e));
            log.debug(&format!("{e:?}"));
            ExitCode::FAILURE
        }
    }
}
