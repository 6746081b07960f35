// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Tests for the lazy body reader: ordering, end-of-stream and size checks.

use std::io::{self, Cursor, Read};

use swu_common::BodyReader;

const HEADER: &[u8] = b"--B\r\nhdr\r\n\r\n";
const TRAILER: &[u8] = b"\r\n--B--\r\n";

fn body(image: &[u8], declared: u64) -> BodyReader<Cursor<Vec<u8>>> {
    BodyReader::new(
        HEADER.to_vec(),
        Cursor::new(image.to_vec()),
        declared,
        TRAILER.to_vec(),
    )
}

/// Reader that fails after handing out `ok` bytes.
struct FailingImage {
    ok: usize,
}

impl Read for FailingImage {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.ok == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        let n = self.ok.min(buf.len());
        buf[..n].fill(b'x');
        self.ok -= n;
        Ok(n)
    }
}

/// Reader that is interrupted before every successful read.
struct InterruptedImage {
    inner: Cursor<Vec<u8>>,
    interrupt_next: bool,
}

impl Read for InterruptedImage {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt_next = !self.interrupt_next;
        if !self.interrupt_next {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.inner.read(buf)
    }
}

// --- Ordering ---

#[test]
fn test_full_drain_order() {
    let mut r = body(b"ABCDE", 5);
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(out, [HEADER, b"ABCDE".as_slice(), TRAILER].concat());
    assert_eq!(r.bytes_emitted(), out.len() as u64);
}

#[test]
fn test_tiny_buffer_same_bytes() {
    let image: Vec<u8> = (0..=255u8).collect();
    let mut r = body(&image, image.len() as u64);

    let mut out = Vec::new();
    let mut buf = [0u8; 3];
    loop {
        let n = r.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, [HEADER, image.as_slice(), TRAILER].concat());
}

#[test]
fn test_image_bytes_forwarded_untouched() {
    let image = b"\r\n--B--\r\n\x00\x01\xfe\xff";
    let mut r = body(image, image.len() as u64);
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(&out[HEADER.len()..HEADER.len() + image.len()], image);
}

// --- End of stream ---

#[test]
fn test_eof_is_stable() {
    let mut r = body(b"AB", 2);
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert!(r.is_finished());

    let mut buf = [0u8; 16];
    for _ in 0..5 {
        assert_eq!(r.read(&mut buf).unwrap(), 0);
    }
    assert_eq!(r.bytes_emitted(), out.len() as u64);
}

#[test]
fn test_empty_image() {
    let mut r = body(b"", 0);
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(out, [HEADER, TRAILER].concat());
}

// --- Declared size checks ---

#[test]
fn test_short_image_fails() {
    let mut r = body(b"ABC", 5);
    let mut out = Vec::new();
    let err = r.read_to_end(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert!(err.to_string().contains("2 bytes short"));
    // Header and the three available bytes went out, the trailer did not.
    assert_eq!(out, [HEADER, b"ABC".as_slice()].concat());
}

#[test]
fn test_long_image_fails() {
    let mut r = body(b"ABCDEFG", 5);
    let mut out = Vec::new();
    let err = r.read_to_end(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(out, [HEADER, b"ABCDE".as_slice()].concat());
    assert!(!r.is_finished());
}

#[test]
fn test_image_read_error_propagates() {
    let mut r = BodyReader::new(
        HEADER.to_vec(),
        FailingImage { ok: 4 },
        10,
        TRAILER.to_vec(),
    );
    let mut out = Vec::new();
    let err = r.read_to_end(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other);
    assert_eq!(err.to_string(), "disk on fire");
    assert_eq!(out.len(), HEADER.len() + 4);
}

#[test]
fn test_interrupted_reads_are_retried() {
    let image = InterruptedImage {
        inner: Cursor::new(b"ABCDE".to_vec()),
        interrupt_next: false,
    };
    let mut r = BodyReader::new(HEADER.to_vec(), image, 5, TRAILER.to_vec());

    let mut out = Vec::new();
    let mut buf = [0u8; 64];
    loop {
        let n = r.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, [HEADER, b"ABCDE".as_slice(), TRAILER].concat());
}
