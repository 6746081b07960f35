// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Image upload tool for the swupdate web server.
//!
//! Usage:
//!   swu-upload image.swu board.local
//!   swu-upload --port 8081 --timeout 600 image.swu 192.168.1.20
//!
//! Exits with status 0 only when the server answers 200, 1 on any failure
//! (argument errors included).

mod cli;
mod commands;
mod error;
mod logging;
mod transport;

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::error::UploadError;

/// Exit status for every failure, overriding clap's 2 for usage errors.
const FAILURE_STATUS: u8 = 1;

/// Outcome of argument parsing that does not fail the run.
enum Invocation {
    Run(Cli),
    /// `--help` or `--version`, printed by clap with status 0.
    Display(clap::Error),
}

fn parse_args<I, T>(args: I) -> Result<Invocation, UploadError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Invocation::Run(cli)),
        Err(e) if !e.use_stderr() => Ok(Invocation::Display(e)),
        Err(e) => Err(UploadError::Argument(e)),
    }
}

fn exit_status(result: &Result<(), UploadError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => FAILURE_STATUS,
    }
}

fn report(err: UploadError) {
    match err {
        UploadError::Argument(e) => {
            let _ = e.print();
        }
        other => eprintln!("{:#}", anyhow::Error::new(other)),
    }
}

fn main() -> ExitCode {
    let result = match parse_args(std::env::args_os()) {
        Ok(Invocation::Display(e)) => e.exit(),
        Ok(Invocation::Run(args)) => {
            logging::init(args.verbose);
            cli::run(args)
        }
        Err(e) => Err(e),
    };

    let status = exit_status(&result);
    if let Err(e) = result {
        report(e);
    }
    ExitCode::from(status)
}
