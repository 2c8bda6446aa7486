//! `{packet, N}` framing, in the style of Erlang's `gen_tcp` packet option.
//!
//! Each packet starts with a fixed-width unsigned length head (1, 2, 4 or 8
//! bytes, big or little endian) holding the payload length.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use packet_link::{Buffer, ByteOrder, Protocol, SimpleProtocol};
//!
//! let protocol = SimpleProtocol::packet_n(2, ByteOrder::BigEndian).unwrap();
//!
//! let mut out = Buffer::new();
//! protocol.packet(&mut out, "hello").unwrap();
//! let mut wire = Vec::new();
//! protocol.write(&mut wire, &mut out).unwrap();
//! assert_eq!(wire, [0x00, 0x05, b'h', b'e', b'l', b'l', b'o']);
//!
//! let mut input = Buffer::new();
//! protocol.read(&mut Cursor::new(wire), &mut input).unwrap();
//! assert_eq!(&input[..], b"hello");
//! ```

use std::io::{self, Read, Write};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::head::{ByteOrder, HeadSize, MAX_HEAD_SIZE};
use super::Protocol;
use crate::buffer::Buffer;
use crate::config::ProtocolConfig;
use crate::error::{LinkError, Result};
use crate::message::Message;

/// Length-prefixed protocol parameterized by head width and byte order.
///
/// Holds no per-read state: the head scratch space lives on the stack of
/// each read, so one instance can be shared by concurrent readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleProtocol {
    head: HeadSize,
    byte_order: ByteOrder,
    /// Payload limit in bytes, head excluded. 0 = unlimited.
    max_packet_size: usize,
}

impl SimpleProtocol {
    /// Create a `{packet, n}` protocol.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedHeaderWidth` unless `n` is 1, 2, 4 or 8.
    pub fn packet_n(n: usize, byte_order: ByteOrder) -> Result<Self> {
        let head = HeadSize::new(n)?;
        tracing::debug!("Created {{packet, {}}} protocol ({:?})", n, byte_order);
        Ok(Self::new(head, byte_order))
    }

    /// Create a protocol from an already validated head width.
    pub const fn new(head: HeadSize, byte_order: ByteOrder) -> Self {
        Self {
            head,
            byte_order,
            max_packet_size: 0,
        }
    }

    /// Builder-style variant of [`set_max_packet_size`](Self::set_max_packet_size).
    pub fn with_max_packet_size(mut self, max_packet_size: usize) -> Self {
        self.max_packet_size = max_packet_size;
        self
    }

    /// Limit payload length (head excluded). 0 disables the limit.
    pub fn set_max_packet_size(&mut self, max_packet_size: usize) {
        self.max_packet_size = max_packet_size;
    }

    /// Head width in bytes.
    #[inline]
    pub fn head_size(&self) -> usize {
        self.head.width()
    }

    /// Head width variant.
    #[inline]
    pub fn head(&self) -> HeadSize {
        self.head
    }

    /// Byte order of the head.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Configured payload limit, 0 = unlimited.
    #[inline]
    pub fn max_packet_size(&self) -> usize {
        self.max_packet_size
    }

    /// Effective configuration of this instance.
    pub fn config(&self) -> ProtocolConfig {
        ProtocolConfig {
            head_size: self.head.width(),
            byte_order: self.byte_order,
            max_packet_size: self.max_packet_size,
        }
    }

    #[inline]
    fn exceeds_max(&self, payload_len: u64) -> bool {
        self.max_packet_size > 0 && payload_len > self.max_packet_size as u64
    }

    /// Validate the buffer and stamp the head over its first `n` bytes.
    fn encode_head(&self, buffer: &mut Buffer) -> Result<()> {
        let n = self.head.width();
        if buffer.len() < n {
            return Err(LinkError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("buffer of {} bytes is shorter than the {} byte head", buffer.len(), n),
            )));
        }

        let payload_len = buffer.len() - n;
        if self.exceeds_max(payload_len as u64) {
            tracing::warn!(
                "Refusing to write packet: payload {} exceeds maximum {}",
                payload_len,
                self.max_packet_size
            );
            return Err(LinkError::PacketTooLarge);
        }

        self.head
            .encode(self.byte_order, payload_len, &mut buffer[..n])
            .map_err(|e| {
                tracing::warn!(
                    "Refusing to write packet: payload {} does not fit a {} byte head",
                    payload_len,
                    n
                );
                e
            })
    }

    /// Turn a received head into a payload length.
    fn decode_head(&self, head: &[u8]) -> Result<usize> {
        let payload_len = self.head.decode(self.byte_order, head);

        if self.exceeds_max(payload_len) {
            tracing::warn!(
                "Rejecting packet: payload {} exceeds maximum {}",
                payload_len,
                self.max_packet_size
            );
            return Err(LinkError::PacketTooLarge);
        }

        // No allocation may exceed `isize::MAX` bytes.
        if payload_len > isize::MAX as u64 {
            tracing::warn!("Rejecting packet: payload {} exceeds address space", payload_len);
            return Err(LinkError::PacketTooLarge);
        }
        Ok(payload_len as usize)
    }

    /// Async counterpart of [`Protocol::write`].
    pub async fn write_async<W>(&self, writer: &mut W, buffer: &mut Buffer) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        self.encode_head(buffer)?;
        writer.write_all(buffer).await?;
        tracing::trace!("Wrote packet of {} bytes", buffer.len());
        Ok(())
    }

    /// Async counterpart of [`Protocol::read`].
    pub async fn read_async<R>(&self, reader: &mut R, buffer: &mut Buffer) -> Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let n = self.head.width();
        let mut head = [0u8; MAX_HEAD_SIZE];
        reader.read_exact(&mut head[..n]).await?;

        let size = self.decode_head(&head[..n])?;
        buffer.prepare_payload(size)?;
        if size == 0 {
            return Ok(());
        }

        reader.read_exact(buffer).await?;
        tracing::trace!("Read packet with {} byte payload", size);
        Ok(())
    }
}

impl Protocol for SimpleProtocol {
    fn packet<M: Message + ?Sized>(&self, buffer: &mut Buffer, message: &M) -> Result<()> {
        let n = self.head.width();
        buffer.prepare(n, message.recommend_buffer_size(), n);
        message.write_buffer(buffer)
    }

    fn write<W: Write + ?Sized>(&self, writer: &mut W, buffer: &mut Buffer) -> Result<()> {
        self.encode_head(buffer)?;
        writer.write_all(buffer)?;
        tracing::trace!("Wrote packet of {} bytes", buffer.len());
        Ok(())
    }

    fn read<R: Read + ?Sized>(&self, reader: &mut R, buffer: &mut Buffer) -> Result<()> {
        let n = self.head.width();
        let mut head = [0u8; MAX_HEAD_SIZE];
        reader.read_exact(&mut head[..n])?;

        let size = self.decode_head(&head[..n])?;
        buffer.prepare_payload(size)?;
        if size == 0 {
            return Ok(());
        }

        reader.read_exact(buffer)?;
        tracing::trace!("Read packet with {} byte payload", size);
        Ok(())
    }
}
