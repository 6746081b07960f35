// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and utilities for swupdate image uploads.
//!
//! The web server of swupdate accepts a single `multipart/form-data` POST on
//! `/upload` and refuses chunked transfer encoding, so the body has to be
//! framed with an exact `Content-Length` up front:
//! - [`multipart`]: boundary constants, fragment rendering and [`multipart::build`]
//! - [`body`]: the lazy header + image + trailer reader handed to the transport

pub mod body;
pub mod multipart;

// Re-export commonly used types
pub use body::BodyReader;
pub use multipart::{build, FileStat, ImageFile, MultipartBody, Stat};
pub use multipart::{BOUNDARY, FIELD_NAME, PART_CONTENT_TYPE};
