//! Packet connection over a bidirectional stream.
//!
//! `PacketConn` owns a stream, a protocol and one send and one receive
//! [`Buffer`], so a long-lived link reuses its allocations across packets.
//! Blocking (`std::io`) and async (`tokio::io`) streams are both supported.
//!
//! # Example
//!
//! ```no_run
//! use std::net::TcpStream;
//! use packet_link::{ByteOrder, PacketConn, SimpleProtocol};
//!
//! let stream = TcpStream::connect("127.0.0.1:7000").unwrap();
//! let protocol = SimpleProtocol::packet_n(4, ByteOrder::BigEndian).unwrap();
//! let mut conn = PacketConn::new(stream, protocol);
//!
//! conn.send("ping").unwrap();
//! let reply = conn.receive().unwrap();
//! println!("got {} bytes", reply.len());
//! ```

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::buffer::Buffer;
use crate::codec::MsgPackCodec;
use crate::error::Result;
use crate::message::Message;
use crate::protocol::{Protocol, SimpleProtocol};

/// A stream with packet framing and reusable buffers.
#[derive(Debug)]
pub struct PacketConn<S, P = SimpleProtocol> {
    stream: S,
    protocol: P,
    send_buf: Buffer,
    recv_buf: Buffer,
}

impl<S, P> PacketConn<S, P> {
    /// Wrap `stream` using `protocol` for framing.
    pub fn new(stream: S, protocol: P) -> Self {
        Self {
            stream,
            protocol,
            send_buf: Buffer::new(),
            recv_buf: Buffer::new(),
        }
    }

    /// The framing protocol.
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Payload of the last received packet.
    pub fn last_payload(&self) -> &[u8] {
        &self.recv_buf
    }

    /// Access the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Access the underlying stream mutably.
    ///
    /// Reading or writing through it directly desynchronizes the framing.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Unwrap and return the underlying stream, discarding the buffers.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write, P: Protocol> PacketConn<S, P> {
    /// Frame and send one message, then flush the stream.
    pub fn send<M: Message + ?Sized>(&mut self, message: &M) -> Result<()> {
        self.protocol.packet(&mut self.send_buf, message)?;
        self.protocol.write(&mut self.stream, &mut self.send_buf)?;
        self.stream.flush()?;
        Ok(())
    }

    /// Receive one packet and borrow its payload.
    ///
    /// After a `PacketTooLarge` error the stream is out of sync and should
    /// be closed.
    pub fn receive(&mut self) -> Result<&[u8]> {
        self.protocol.read(&mut self.stream, &mut self.recv_buf)?;
        Ok(&self.recv_buf)
    }

    /// Receive one packet and decode its payload as MsgPack.
    pub fn receive_msgpack<T: DeserializeOwned>(&mut self) -> Result<T> {
        let payload = self.receive()?;
        MsgPackCodec::decode(payload)
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> PacketConn<S, SimpleProtocol> {
    /// Async counterpart of [`send`](Self::send).
    pub async fn send_async<M: Message + ?Sized>(&mut self, message: &M) -> Result<()> {
        self.protocol.packet(&mut self.send_buf, message)?;
        self.protocol
            .write_async(&mut self.stream, &mut self.send_buf)
            .await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Async counterpart of [`receive`](Self::receive).
    pub async fn receive_async(&mut self) -> Result<&[u8]> {
        self.protocol
            .read_async(&mut self.stream, &mut self.recv_buf)
            .await?;
        Ok(&self.recv_buf)
    }

    /// Async counterpart of [`receive_msgpack`](Self::receive_msgpack).
    pub async fn receive_msgpack_async<T: DeserializeOwned>(&mut self) -> Result<T> {
        let payload = self.receive_async().await?;
        MsgPackCodec::decode(payload)
    }
}
