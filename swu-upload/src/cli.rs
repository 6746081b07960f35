// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::commands;
use crate::error::UploadError;
use crate::transport::Transport;

/// Default port of the swupdate web server.
pub const DEFAULT_PORT: u16 = 8080;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "swu-upload")]
#[command(about = "Upload a software image to the swupdate web server")]
#[command(version)]
pub struct Cli {
    /// The port to connect to
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    /// Overall request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the image
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Hostname of the target
    #[arg(value_name = "HOST")]
    pub host: String,
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> Result<(), UploadError> {
    let transport = Transport::new(cli.timeout.map(Duration::from_secs))?;
    commands::upload(&transport, &cli.file, &cli.host, cli.port)
}
