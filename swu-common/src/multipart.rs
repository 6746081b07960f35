// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Multipart/form-data framing for a single image part.
//!
//! The body is never assembled in memory. [`build`] renders the two small
//! text fragments surrounding the image, adds up their encoded lengths with
//! the size reported by one `stat` call, and returns a [`BodyReader`] that
//! forwards to the image file in between.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::body::BodyReader;

// --- Framing constants ---

/// Boundary token used in the content type and in every delimiter line.
pub const BOUNDARY: &str = "superCalifragilisticExpialiBoundary";

/// Form field name of the image part.
pub const FIELD_NAME: &str = "file";

/// Content type announced for the image part.
pub const PART_CONTENT_TYPE: &str = "application/octet-stream";

// --- File handle abstraction ---

/// Result of a size query on an open image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Current length in bytes.
    pub size: u64,
    /// Base name, reported in the `Content-Disposition` line.
    pub name: String,
}

/// A readable source that can report its size and base name.
pub trait Stat: Read {
    fn stat(&self) -> io::Result<FileStat>;
}

/// An image file opened for reading, together with the base name it was
/// opened under (`std::fs::File` does not remember its path).
#[derive(Debug)]
pub struct ImageFile {
    file: File,
    name: String,
}

impl ImageFile {
    /// Open the image at `path` for reading.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_file(file, path))
    }

    /// Wrap an already open file, taking the base name from `path`.
    pub fn from_file(file: File, path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { file, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Read for ImageFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Stat for ImageFile {
    fn stat(&self) -> io::Result<FileStat> {
        let metadata = self.file.metadata()?;
        Ok(FileStat {
            size: metadata.len(),
            name: self.name.clone(),
        })
    }
}

// --- Fragment rendering ---

/// `Content-Type` header value of the request.
pub fn content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Opening delimiter and part headers, terminated by the blank line.
///
/// Quotes and line breaks in `file_name` are replaced with `_` so a hostile
/// name cannot break the framing; the server ignores the name anyway.
pub fn header_fragment(file_name: &str) -> String {
    let file_name: String = file_name
        .chars()
        .map(|c| if matches!(c, '"' | '\r' | '\n') { '_' } else { c })
        .collect();
    format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-type: {}\r\n\r\n",
        BOUNDARY, FIELD_NAME, file_name, PART_CONTENT_TYPE
    )
}

/// Line break closing the image, then the closing delimiter.
pub fn trailer_fragment() -> String {
    format!("\r\n--{}--\r\n", BOUNDARY)
}

// --- Body ---

/// A ready-to-send multipart body.
#[derive(Debug)]
pub struct MultipartBody<R> {
    content_type: String,
    content_length: u64,
    reader: BodyReader<R>,
}

impl<R> MultipartBody<R> {
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Exact number of bytes the reader yields when fully drained.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    pub fn into_reader(self) -> BodyReader<R> {
        self.reader
    }

    /// Split into `(content_type, content_length, reader)`.
    pub fn into_parts(self) -> (String, u64, BodyReader<R>) {
        (self.content_type, self.content_length, self.reader)
    }
}

/// Build the multipart body for `source`.
///
/// Performs exactly one `stat` call and never reads from `source` itself;
/// the returned reader pulls from it as it is drained. If `stat` fails the
/// error is returned and `source` is dropped.
pub fn build<R: Stat>(source: R) -> io::Result<MultipartBody<R>> {
    let stat = source.stat()?;

    let header = header_fragment(&stat.name).into_bytes();
    let trailer = trailer_fragment().into_bytes();
    let content_length = header.len() as u64 + stat.size + trailer.len() as u64;

    Ok(MultipartBody {
        content_type: content_type(),
        content_length,
        reader: BodyReader::new(header, source, stat.size, trailer),
    })
}
