//! # packet-link
//!
//! Length-prefixed packet framing for byte stream transports, in the style
//! of Erlang's `{packet, N}` option.
//!
//! Every packet on the wire is a fixed-width unsigned length head (1, 2, 4
//! or 8 bytes, big or little endian) followed by that many payload bytes.
//!
//! ## Architecture
//!
//! - [`Buffer`]: caller-owned, reusable byte region
//! - [`Message`]: anything that can append itself to a buffer
//! - [`Protocol`]: the packet / write / read contract
//! - [`SimpleProtocol`]: `{packet, N}` implementation of [`Protocol`]
//! - [`PacketConn`]: stream + protocol + reusable buffers
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use packet_link::{Buffer, ByteOrder, Protocol, SimpleProtocol};
//!
//! let protocol = SimpleProtocol::packet_n(1, ByteOrder::BigEndian).unwrap();
//! let mut wire = Vec::new();
//! let mut buffer = Buffer::new();
//!
//! for payload in ["ABC", "XY"] {
//!     protocol.packet(&mut buffer, payload).unwrap();
//!     protocol.write(&mut wire, &mut buffer).unwrap();
//! }
//! assert_eq!(wire, b"\x03ABC\x02XY");
//!
//! let mut reader = Cursor::new(wire);
//! protocol.read(&mut reader, &mut buffer).unwrap();
//! assert_eq!(&buffer[..], b"ABC");
//! protocol.read(&mut reader, &mut buffer).unwrap();
//! assert_eq!(&buffer[..], b"XY");
//! ```

pub mod buffer;
pub mod codec;
pub mod config;
pub mod conn;
pub mod error;
pub mod message;
pub mod protocol;

pub use buffer::Buffer;
pub use config::ProtocolConfig;
pub use conn::PacketConn;
pub use error::{LinkError, Result};
pub use message::Message;
pub use protocol::{ByteOrder, HeadSize, Protocol, SimpleProtocol, MAX_HEAD_SIZE};
