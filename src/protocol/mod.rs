//! Protocol module - packet splitting over byte streams.
//!
//! This module implements the framing layer:
//! - [`Protocol`] trait: packet / write / read contract
//! - [`SimpleProtocol`]: `{packet, N}` length-prefixed framing
//! - Head encoding/decoding for 1, 2, 4 and 8 byte heads
//!
//! Custom protocols (delimiter based, fixed size, ...) implement
//! [`Protocol`] and keep its three contracts.

use std::io::{Read, Write};

use crate::buffer::Buffer;
use crate::error::Result;
use crate::message::Message;

mod head;
mod simple;

pub use head::{ByteOrder, HeadSize, MAX_HEAD_SIZE};
pub use simple::SimpleProtocol;

/// Packet splitting protocol.
pub trait Protocol {
    /// Serialize `message` into `buffer`, leaving room for the head at the front.
    ///
    /// On success `buffer` holds the head placeholder followed by the payload.
    /// The head bytes are undefined until [`Protocol::write`] runs. The
    /// buffer may grow.
    fn packet<M: Message + ?Sized>(&self, buffer: &mut Buffer, message: &M) -> Result<()>;

    /// Stamp the head in place and emit the whole buffer to `writer`.
    fn write<W: Write + ?Sized>(&self, writer: &mut W, buffer: &mut Buffer) -> Result<()>;

    /// Read exactly one packet from `reader`, leaving only its payload in `buffer`.
    ///
    /// The buffer may grow.
    fn read<R: Read + ?Sized>(&self, reader: &mut R, buffer: &mut Buffer) -> Result<()>;
}
