//! Codec module - structured messages on top of the framing layer.
//!
//! - [`MsgPackMessage`] / [`MsgPackCodec`] - MessagePack using `rmp-serde`
//!   (struct-as-map)
//! - [`JsonMessage`] / [`decode_json`] - JSON using `serde_json`
//!
//! Raw byte payloads need no codec: `[u8]`, `Vec<u8>`, `str`, `String` and
//! `bytes::Bytes` implement [`Message`](crate::Message) directly.
//!
//! # Example
//!
//! ```
//! use packet_link::codec::{MsgPackCodec, MsgPackMessage};
//! use packet_link::{Buffer, ByteOrder, Protocol, SimpleProtocol};
//!
//! let protocol = SimpleProtocol::packet_n(2, ByteOrder::BigEndian).unwrap();
//! let mut buffer = Buffer::new();
//! protocol.packet(&mut buffer, &MsgPackMessage::new("hello")).unwrap();
//!
//! let decoded: String = MsgPackCodec::decode(buffer.payload()).unwrap();
//! assert_eq!(decoded, "hello");
//! ```

mod json;
mod msgpack;

pub use json::{decode_json, JsonMessage, DEFAULT_JSON_SIZE_HINT};
pub use msgpack::{MsgPackCodec, MsgPackMessage, DEFAULT_MSGPACK_SIZE_HINT};
