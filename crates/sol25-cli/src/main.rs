// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! SOL25 parser command-line interface.
//!
//! This is the entry point for the `sol25-parse` command: it reads a program
//! from standard input and writes its XML document to standard output.
//! Failures are reported on standard error and through the exit code.

use std::ffi::OsString;
use std::io::{self, Read, Write};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use miette::Diagnostic;
use sol25_core::compile::compile_bytes;
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod diagnostic;

/// Exit code for bad command-line arguments.
const EXIT_USAGE: i32 = 10;

/// Exit code for failures that are not the program's fault.
const EXIT_INTERNAL: i32 = 35;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "sol25_cli=warn,sol25_core=warn";

/// Parse a SOL25 program from standard input and print it as XML
#[derive(Debug, Parser)]
#[command(name = "sol25-parse", long_about = None)]
struct Cli {}

/// Failures outside the compiler pipeline.
#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("failed to read standard input")]
    #[diagnostic(code(sol25::io))]
    ReadInput(#[source] io::Error),

    #[error("failed to write standard output")]
    #[diagnostic(code(sol25::io))]
    WriteOutput(#[source] io::Error),
}

fn main() {
    init_tracing();

    if let Err(err) = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    })) {
        warn!("could not install diagnostic handler: {err}");
    }

    std::process::exit(run());
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();
}

/// Runs the command and returns its exit code.
fn run() -> i32 {
    let args: Vec<OsString> = std::env::args_os().collect();
    if let Some(code) = check_arguments(&args) {
        return code;
    }

    let mut input = Vec::new();
    if let Err(err) = io::stdin().lock().read_to_end(&mut input) {
        eprintln!("{:?}", miette::Report::new(CliError::ReadInput(err)));
        return EXIT_INTERNAL;
    }
    debug!(bytes = input.len(), "read standard input");

    match compile_bytes(&input) {
        Ok(document) => match write_output(&document) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{:?}", miette::Report::new(err));
                EXIT_INTERNAL
            }
        },
        Err(err) => {
            let code = err.exit_code();
            debug!(code, "compilation failed");
            let source = String::from_utf8_lossy(&input);
            eprintln!("{:?}", diagnostic::report(err, &source));
            code
        }
    }
}

/// Validates the command line, returning the exit code if the run must stop.
fn check_arguments(args: &[OsString]) -> Option<i32> {
    let arg_count = args.len().saturating_sub(1);
    match Cli::try_parse_from(args) {
        Err(err) => Some(argument_error(&err, arg_count)),
        // clap accepts a bare `--`; only an empty command line may run.
        Ok(_) if arg_count > 0 => {
            eprintln!(
                "error: unexpected arguments\n\n{}",
                Cli::command().render_usage()
            );
            Some(EXIT_USAGE)
        }
        Ok(_) => None,
    }
}

/// Handles a clap error: help on its own succeeds, anything else is a usage error.
fn argument_error(err: &clap::Error, arg_count: usize) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp if arg_count == 1 => {
            if err.print().is_err() {
                return EXIT_INTERNAL;
            }
            0
        }
        ErrorKind::DisplayHelp => {
            eprintln!(
                "error: '--help' cannot be combined with other arguments\n\n{}",
                Cli::command().render_usage()
            );
            EXIT_USAGE
        }
        _ => {
            // Nothing more can be done if stderr is gone.
            let _ = err.print();
            EXIT_USAGE
        }
    }
}

fn write_output(document: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(CliError::WriteOutput)
}
