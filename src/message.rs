//! Message trait and the built-in byte payloads.
//!
//! A message is anything that can append its wire representation to a
//! [`Buffer`] whose first `n` bytes are already reserved for the packet head.
//!
//! # Example
//!
//! ```
//! use packet_link::{Buffer, ByteOrder, Protocol, SimpleProtocol};
//!
//! let protocol = SimpleProtocol::packet_n(2, ByteOrder::BigEndian).unwrap();
//! let mut buffer = Buffer::new();
//!
//! protocol.packet(&mut buffer, &b"hello"[..]).unwrap();
//! assert_eq!(buffer.len(), 2 + 5);
//! assert_eq!(buffer.payload(), b"hello");
//! ```

use bytes::Bytes;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::protocol::MAX_HEAD_SIZE;

/// A payload producer that knows its size and how to append itself to a buffer.
pub trait Message {
    /// Capacity hint in bytes for the whole packet, head included.
    ///
    /// Advisory only: the protocol always reserves the head even if the
    /// hint is smaller, and a message may write past the hint.
    fn recommend_buffer_size(&self) -> usize;

    /// Append the payload to `buffer`.
    ///
    /// The first `buffer.reserved()` bytes are the head placeholder and must
    /// not be modified.
    ///
    /// # Errors
    ///
    /// Any error is surfaced unchanged by `Protocol::packet`.
    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()>;
}

impl<M: Message + ?Sized> Message for &M {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        (**self).recommend_buffer_size()
    }

    #[inline]
    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        (**self).write_buffer(buffer)
    }
}

impl Message for [u8] {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        MAX_HEAD_SIZE + self.len()
    }

    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        buffer.extend_from_slice(self);
        Ok(())
    }
}

impl<const N: usize> Message for [u8; N] {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        self.as_slice().recommend_buffer_size()
    }

    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        self.as_slice().write_buffer(buffer)
    }
}

impl Message for Vec<u8> {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        self.as_slice().recommend_buffer_size()
    }

    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        self.as_slice().write_buffer(buffer)
    }
}

impl Message for str {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        self.as_bytes().recommend_buffer_size()
    }

    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        self.as_bytes().write_buffer(buffer)
    }
}

impl Message for String {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        self.as_bytes().recommend_buffer_size()
    }

    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        self.as_bytes().write_buffer(buffer)
    }
}

impl Message for Bytes {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        MAX_HEAD_SIZE + self.len()
    }

    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        buffer.extend_from_slice(self);
        Ok(())
    }
}
