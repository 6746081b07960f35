// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementation for image uploads.

use std::path::Path;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use swu_common::multipart;
use swu_common::ImageFile;

use crate::error::UploadError;
use crate::transport::Transport;

/// Endpoint of the swupdate web server accepting images.
pub const UPLOAD_PATH: &str = "/upload";

/// Build the upload URL, bracketing bare IPv6 literals.
pub fn upload_url(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{}]:{}{}", host, port, UPLOAD_PATH)
    } else {
        format!("http://{}:{}{}", host, port, UPLOAD_PATH)
    }
}

/// Upload the image at `file` to `host:port`.
///
/// The file stays open until the request has completed or failed; it is
/// read only while the transport drains the body.
pub fn upload(
    transport: &Transport,
    file: &Path,
    host: &str,
    port: u16,
) -> Result<(), UploadError> {
    let image = ImageFile::open(file).map_err(|source| UploadError::Io {
        context: format!("Failed to open {}", file.display()),
        source,
    })?;

    let body = multipart::build(image).map_err(|source| UploadError::Io {
        context: format!("Failed to stat {}", file.display()),
        source,
    })?;
    debug!(
        file = %file.display(),
        content_length = body.content_length(),
        "multipart body ready"
    );

    let url = upload_url(host, port);

    println!("attempting to swupdate {}", host);
    let status = transport.post(&url, body)?;

    if status == StatusCode::OK {
        info!(%url, "upload accepted");
        println!("{} swupdate POST succeeded!", host);
        Ok(())
    } else {
        warn!(%url, %status, "upload rejected");
        Err(UploadError::ServerRejection { url, status })
    }
}
