// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload failure taxonomy. Every variant ends the run with exit status 1.

use std::io;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// Bad option value or wrong number of positionals.
    #[error("invalid arguments")]
    Argument(#[source] clap::Error),

    /// Image could not be opened or queried.
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// HTTP client or request could not be built (bad URL, bad header).
    #[error("{context}")]
    RequestConstruction {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// Network failure, or the body stream failed while it was being sent.
    #[error("POST to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with something other than 200.
    #[error("{url} swupdate POST failed with {}", .status.as_u16())]
    ServerRejection { url: String, status: StatusCode },
}
