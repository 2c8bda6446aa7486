//! MsgPack messages using `rmp-serde`.
//!
//! Values are always written with `write_named` (structs as maps), so peers
//! in other languages see field names rather than positional arrays.
//!
//! # Example
//!
//! ```
//! use packet_link::codec::{MsgPackCodec, MsgPackMessage};
//! use packet_link::{Buffer, ByteOrder, Protocol, SimpleProtocol};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Ping {
//!     seq: u32,
//! }
//!
//! let protocol = SimpleProtocol::packet_n(4, ByteOrder::BigEndian).unwrap();
//! let mut buffer = Buffer::new();
//! protocol.packet(&mut buffer, &MsgPackMessage::new(&Ping { seq: 7 })).unwrap();
//!
//! let decoded: Ping = MsgPackCodec::decode(buffer.payload()).unwrap();
//! assert_eq!(decoded, Ping { seq: 7 });
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::message::Message;
use crate::protocol::MAX_HEAD_SIZE;

/// Default capacity hint for MsgPack packets.
pub const DEFAULT_MSGPACK_SIZE_HINT: usize = 256;

/// MessagePack codec for structured data.
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes (struct-as-map).
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized.
    #[inline]
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    /// Decode MsgPack bytes to a value.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes cannot be deserialized to type T.
    #[inline]
    pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

/// A message that serializes a value as MsgPack directly into the packet buffer.
#[derive(Debug)]
pub struct MsgPackMessage<'a, T: ?Sized> {
    value: &'a T,
    size_hint: usize,
}

impl<'a, T: Serialize + ?Sized> MsgPackMessage<'a, T> {
    /// Wrap a value with the default size hint.
    pub fn new(value: &'a T) -> Self {
        Self {
            value,
            size_hint: DEFAULT_MSGPACK_SIZE_HINT,
        }
    }

    /// Override the expected encoded size (head room is added automatically).
    pub fn with_size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = size_hint;
        self
    }
}

impl<T: Serialize + ?Sized> Message for MsgPackMessage<'_, T> {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        MAX_HEAD_SIZE + self.size_hint
    }

    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        rmp_serde::encode::write_named(buffer, self.value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkError;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct TestStruct {
        id: u32,
        name: String,
        active: bool,
    }

    fn sample() -> TestStruct {
        TestStruct {
            id: 42,
            name: "test".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_encode_decode_struct() {
        let encoded = MsgPackCodec::encode(&sample()).unwrap();
        let decoded: TestStruct = MsgPackCodec::decode(&encoded).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_struct_encodes_as_map() {
        let encoded = MsgPackCodec::encode(&sample()).unwrap();
        // fixmap with 3 entries, not fixarray (0x93)
        assert_eq!(encoded[0], 0x83);
    }

    #[test]
    fn test_message_writes_after_reserved_prefix() {
        let mut buffer = Buffer::new();
        buffer.prepare(2, 0, 2);
        buffer.write_at(0, &[0xEE, 0xEE]);

        let value = sample();
        MsgPackMessage::new(&value).write_buffer(&mut buffer).unwrap();

        assert_eq!(&buffer[..2], &[0xEE, 0xEE]);
        assert_eq!(buffer.payload(), MsgPackCodec::encode(&value).unwrap().as_slice());
    }

    #[test]
    fn test_message_size_hint() {
        let value = 1u8;
        let message = MsgPackMessage::new(&value);
        assert_eq!(
            message.recommend_buffer_size(),
            MAX_HEAD_SIZE + DEFAULT_MSGPACK_SIZE_HINT
        );
        let message = message.with_size_hint(8);
        assert_eq!(message.recommend_buffer_size(), MAX_HEAD_SIZE + 8);
    }

    #[test]
    fn test_unsized_value() {
        let values: &[u32] = &[1, 2, 3];
        let mut buffer = Buffer::new();
        MsgPackMessage::new(values).write_buffer(&mut buffer).unwrap();
        let decoded: Vec<u32> = MsgPackCodec::decode(buffer.payload()).unwrap();
        assert_eq!(decoded, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_error_on_invalid_data() {
        let result: Result<TestStruct> = MsgPackCodec::decode(b"not valid msgpack");
        assert!(matches!(result, Err(LinkError::MsgPackDecode(_))));
    }
}
