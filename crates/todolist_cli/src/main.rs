//! `todolist` command-line entry point.
//!
//! Prints a JSON envelope `{status, body}` on success and
//! `{status, code, error}` on stderr with a non-zero exit code on failure.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use commands::{Failure, Outcome};
use log::error;
use std::process::ExitCode;
use todolist_core::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match cli.config() {
        Ok(config) => config,
        Err(err) => return report_failure(&Failure::internal(err)),
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            return report_failure(&Failure::internal(err));
        }
    }

    let conn = match config.open_connection() {
        Ok(conn) => conn,
        Err(err) => return report_failure(&Failure::internal(err)),
    };

    match commands::run(&conn, config.item_scope, cli.command) {
        Ok(outcome) => report_success(&outcome),
        Err(failure) => {
            error!(
                "event=command module=cli status=error http_status={} error_code={}",
                failure.status, failure.code
            );
            report_failure(&failure)
        }
    }
}

fn report_success(outcome: &Outcome) -> ExitCode {
    match serde_json::to_string_pretty(outcome) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&Failure::internal(err)),
    }
}

fn report_failure(failure: &Failure) -> ExitCode {
    match serde_json::to_string(failure) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{}", failure.error),
    }
    ExitCode::FAILURE
}
