// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! HTTP transport layer for the swupdate web server.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::{Body, Client};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;

use swu_common::MultipartBody;

use crate::error::UploadError;

/// Blocking HTTP client performing a single POST per upload.
pub struct Transport {
    client: Client,
}

impl Transport {
    /// Create a transport. `None` means no overall request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, UploadError> {
        // Targets sit on the local network; ignore HTTP_PROXY and friends.
        let client = Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .map_err(|source| UploadError::RequestConstruction {
                context: "Failed to initialise HTTP client".to_string(),
                source,
            })?;

        Ok(Self { client })
    }

    /// POST `body` to `url` and return the response status.
    ///
    /// The body is sent with its declared `Content-Length`, never chunked.
    /// A read error from the body (including an image whose size changed
    /// since it was stat'ed) aborts the request and surfaces as
    /// [`UploadError::Transport`].
    pub fn post<R>(&self, url: &str, body: MultipartBody<R>) -> Result<StatusCode, UploadError>
    where
        R: Read + Send + 'static,
    {
        let (content_type, content_length, reader) = body.into_parts();

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(Body::sized(reader, content_length))
            .build()
            .map_err(|source| UploadError::RequestConstruction {
                context: format!("Failed to build request for {}", url),
                source,
            })?;

        debug!(%url, content_length, "sending upload request");

        let response = self
            .client
            .execute(request)
            .map_err(|source| UploadError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(%status, "server responded");
        Ok(status)
    }
}
