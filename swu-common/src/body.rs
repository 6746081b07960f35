// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Lazy multipart body reader.
//!
//! Yields the header fragment, then the image bytes straight from the
//! underlying reader into the caller's buffer, then the trailer fragment.
//! Once the trailer is exhausted every further read returns `Ok(0)`.
//!
//! The image is expected to deliver exactly the size that was declared
//! when the body was built. A short image fails with
//! [`io::ErrorKind::UnexpectedEof`] and a longer one with
//! [`io::ErrorKind::InvalidData`], so the transport aborts instead of
//! sending a body that disagrees with its `Content-Length`.

use std::io::{self, Cursor, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Header,
    Image,
    Trailer,
    Done,
}

/// Single-pass reader over header + image + trailer.
#[derive(Debug)]
pub struct BodyReader<R> {
    header: Cursor<Vec<u8>>,
    image: R,
    image_remaining: u64,
    trailer: Cursor<Vec<u8>>,
    stage: Stage,
    emitted: u64,
}

impl<R> BodyReader<R> {
    /// Create a reader expecting exactly `image_size` bytes from `image`.
    pub fn new(header: Vec<u8>, image: R, image_size: u64, trailer: Vec<u8>) -> Self {
        Self {
            header: Cursor::new(header),
            image,
            image_remaining: image_size,
            trailer: Cursor::new(trailer),
            stage: Stage::Header,
            emitted: 0,
        }
    }

    /// Total bytes handed out so far.
    pub fn bytes_emitted(&self) -> u64 {
        self.emitted
    }

    /// Borrow the underlying image reader.
    pub fn get_ref(&self) -> &R {
        &self.image
    }

    /// True once the trailer has been fully read.
    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Done
    }

    fn emit(&mut self, n: usize) -> usize {
        self.emitted += n as u64;
        n
    }
}

impl<R: Read> BodyReader<R> {
    fn read_image(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let max = usize::try_from(self.image_remaining)
            .unwrap_or(usize::MAX)
            .min(buf.len());
        loop {
            match self.image.read(&mut buf[..max]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!(
                            "image ended {} bytes short of its declared size",
                            self.image_remaining
                        ),
                    ))
                }
                Ok(n) => {
                    self.image_remaining -= n as u64;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Check that the image has nothing left past its declared size.
    fn check_image_exhausted(&mut self) -> io::Result<()> {
        let mut probe = [0u8; 1];
        loop {
            match self.image.read(&mut probe) {
                Ok(0) => return Ok(()),
                Ok(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "image grew past its declared size",
                    ))
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> Read for BodyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            match self.stage {
                Stage::Header => {
                    let n = self.header.read(buf)?;
                    if n > 0 {
                        return Ok(self.emit(n));
                    }
                    self.stage = Stage::Image;
                }
                Stage::Image => {
                    if self.image_remaining == 0 {
                        self.check_image_exhausted()?;
                        self.stage = Stage::Trailer;
                        continue;
                    }
                    let n = self.read_image(buf)?;
                    return Ok(self.emit(n));
                }
                Stage::Trailer => {
                    let n = self.trailer.read(buf)?;
                    if n > 0 {
                        return Ok(self.emit(n));
                    }
                    self.stage = Stage::Done;
                }
                Stage::Done => return Ok(0),
            }
        }
    }
}
