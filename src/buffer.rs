//! Growable, reusable packet buffer.
//!
//! Uses `bytes::BytesMut` as the backing region. The logical length is what
//! callers see; capacity may exceed it so the same buffer can be reused
//! across packets without reallocating.
//!
//! A buffer may carry a reserved prefix: after `Protocol::packet` the first
//! `n` bytes hold the header placeholder and messages append after it.
//!
//! # Example
//!
//! ```
//! use packet_link::Buffer;
//!
//! let mut buffer = Buffer::with_capacity(64);
//! buffer.extend_from_slice(b"hello");
//! assert_eq!(&buffer[..], b"hello");
//! assert!(buffer.capacity() >= 64);
//! ```

use std::io;
use std::ops::{Deref, DerefMut};

use bytes::{Bytes, BytesMut};

/// Caller-owned byte region used to stage a packet in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Backing region; `data.len()` is the logical length.
    data: BytesMut,
    /// Bytes at the front reserved for a packet header.
    reserved: usize,
}

impl Buffer {
    /// Create an empty buffer without allocating.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with at least `capacity` bytes of backing storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
            reserved: 0,
        }
    }

    /// Logical length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the logical length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the backing region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Number of bytes at the front reserved for a header.
    #[inline]
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// Bytes after the reserved prefix.
    ///
    /// After `Protocol::packet` this is the serialized message; after
    /// `Protocol::read` it is the whole received payload.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[self.reserved.min(self.data.len())..]
    }

    /// Length of the bytes after the reserved prefix.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.data.len().saturating_sub(self.reserved)
    }

    /// Set the logical length.
    ///
    /// Shrinking keeps the backing region untouched. Growing within capacity
    /// reuses the region; growing past it reallocates and keeps existing
    /// content. Bytes exposed by growing are not guaranteed to be zero.
    pub fn resize(&mut self, len: usize) {
        if len <= self.data.len() {
            self.data.truncate(len);
        } else {
            self.data.resize(len, 0);
        }
        self.reserved = self.reserved.min(len);
    }

    /// Overwrite `src.len()` bytes starting at `offset`, growing if needed.
    ///
    /// # Panics
    ///
    /// Panics if `offset + src.len()` overflows `usize`.
    pub fn write_at(&mut self, offset: usize, src: &[u8]) {
        let Some(end) = offset.checked_add(src.len()) else {
            panic!("write_at range overflows: offset {} + {} bytes", offset, src.len());
        };
        if end > self.data.len() {
            self.resize(end);
        }
        self.data[offset..end].copy_from_slice(src);
    }

    /// Append bytes at the end of the logical region.
    #[inline]
    pub fn extend_from_slice(&mut self, src: &[u8]) {
        self.data.extend_from_slice(src);
    }

    /// Access the backing `BytesMut`, e.g. to use `bytes::BufMut` writers.
    ///
    /// Message writers must not touch the first `reserved()` bytes.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut BytesMut {
        &mut self.data
    }

    /// Drop all content and the reserved prefix, keeping capacity.
    pub fn clear(&mut self) {
        self.data.clear();
        self.reserved = 0;
    }

    /// Convert into immutable `Bytes` holding the logical region.
    pub fn freeze(self) -> Bytes {
        self.data.freeze()
    }

    /// Size the buffer for a new packet or payload.
    ///
    /// If `capacity` exceeds the current backing region a fresh region of
    /// that capacity is allocated (old content is discarded); otherwise the
    /// region is reused and only the logical length changes.
    pub(crate) fn prepare(&mut self, len: usize, capacity: usize, reserved: usize) {
        if capacity > self.data.capacity() {
            let mut data = BytesMut::with_capacity(capacity.max(len));
            data.resize(len, 0);
            self.data = data;
        } else if len <= self.data.len() {
            self.data.truncate(len);
        } else {
            self.data.resize(len, 0);
        }
        self.reserved = reserved.min(len);
    }

    /// Size the buffer to hold a received payload of `len` bytes.
    ///
    /// `len` comes off the wire, so a region that cannot be allocated is
    /// reported as `OutOfMemory` instead of aborting.
    pub(crate) fn prepare_payload(&mut self, len: usize) -> io::Result<()> {
        if len <= self.data.capacity() {
            self.prepare(len, len, 0);
            return Ok(());
        }

        let mut region = Vec::new();
        region
            .try_reserve_exact(len)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        region.resize(len, 0);
        self.data = BytesMut::from(Bytes::from(region));
        self.reserved = 0;
        Ok(())
    }
}

impl Deref for Buffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for Buffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<&[u8]> for Buffer {
    fn from(src: &[u8]) -> Self {
        Self {
            data: BytesMut::from(src),
            reserved: 0,
        }
    }
}

/// Appends to the logical region, so serializers can write straight into it.
impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
