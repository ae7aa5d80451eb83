//! Byte sinks
//!
//! The emitter is abstracted away from how the output stream is
//! stored: it appends through the [`ByteSink`] trait and never seeks
//! or rewrites. The stock implementations cover the usual
//! destinations: a growable `Vec<u8>`, a [`BytesMut`] for zero-copy
//! hand-off into a pipeline, a fixed region, a counting null sink for
//! pre-sizing, and a hashing accumulator.
//!
//! Growable sinks never fail. `SliceSink` reports exhaustion with
//! [`EncodeError::SinkFull`]; whatever was appended before the
//! failure stays in place, and the message is corrupt from the
//! emitter's point of view.

use std::hash::Hasher;

use bytes::BytesMut;

use crate::Result;
use crate::error::EncodeError;

/// Append-only destination for emitted bytes
///
/// `put_slice` has a byte-at-a-time default; every stock impl
/// overrides it with a bulk append.
pub trait ByteSink {
    /// Append one byte
    fn put_byte(&mut self, byte: u8) -> Result<()>;

    /// Append a run of bytes
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.put_byte(byte)?;
        }
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        (**self).put_byte(byte)
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).put_slice(bytes)
    }
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        self.push(byte);
        Ok(())
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl ByteSink for BytesMut {
    #[inline]
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        self.extend_from_slice(&[byte]);
        Ok(())
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Fixed-region sink over a caller-provided buffer
///
/// Fails with [`EncodeError::SinkFull`] once the region is exhausted.
/// Bytes appended before the failure remain in the buffer.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> SliceSink<'a> {
    /// Create a sink over the given region
    #[inline]
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, written: 0 }
    }

    /// Number of bytes appended so far
    #[inline]
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Remaining capacity in bytes
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.written
    }
}

impl ByteSink for SliceSink<'_> {
    #[inline]
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        if self.written == self.buf.len() {
            return Err(EncodeError::sink_full(1, 0));
        }
        self.buf[self.written] = byte;
        self.written += 1;
        Ok(())
    }

    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let remaining = self.remaining();
        if bytes.len() > remaining {
            return Err(EncodeError::sink_full(bytes.len(), remaining));
        }
        self.buf[self.written..self.written + bytes.len()].copy_from_slice(bytes);
        self.written += bytes.len();
        Ok(())
    }
}

/// Null sink that counts bytes instead of storing them
///
/// Useful for computing a message's serialized size before allocating
/// the real buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSink {
    count: usize,
}

impl CountingSink {
    /// Create a counting sink at zero
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes appended so far
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl ByteSink for CountingSink {
    #[inline]
    fn put_byte(&mut self, _byte: u8) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.count += bytes.len();
        Ok(())
    }
}

/// Sink that feeds emitted bytes into a [`std::hash::Hasher`]
///
/// Lets callers fingerprint a message without materializing it.
#[derive(Debug)]
pub struct HasherSink<H> {
    hasher: H,
}

impl<H: Hasher> HasherSink<H> {
    /// Wrap a hasher
    #[inline]
    #[must_use]
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// Finish the underlying hasher
    #[inline]
    #[must_use]
    pub fn finish(&self) -> u64 {
        self.hasher.finish()
    }

    /// Unwrap the hasher
    #[inline]
    pub fn into_inner(self) -> H {
        self.hasher
    }
}

impl<H: Hasher> ByteSink for HasherSink<H> {
    #[inline]
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        self.hasher.write(&[byte]);
        Ok(())
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.hasher.write(bytes);
        Ok(())
    }
}
