//! JSON messages using `serde_json`.
//!
//! Handy for text protocols and debugging; the payload is a single compact
//! JSON document with no trailing newline.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::message::Message;
use crate::protocol::MAX_HEAD_SIZE;

/// Default capacity hint for JSON packets.
pub const DEFAULT_JSON_SIZE_HINT: usize = 256;

/// A message that serializes a value as JSON directly into the packet buffer.
#[derive(Debug)]
pub struct JsonMessage<'a, T: ?Sized> {
    value: &'a T,
    size_hint: usize,
}

impl<'a, T: Serialize + ?Sized> JsonMessage<'a, T> {
    /// Wrap a value with the default size hint.
    pub fn new(value: &'a T) -> Self {
        Self {
            value,
            size_hint: DEFAULT_JSON_SIZE_HINT,
        }
    }

    /// Override the expected encoded size (head room is added automatically).
    pub fn with_size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = size_hint;
        self
    }
}

impl<T: Serialize + ?Sized> Message for JsonMessage<'_, T> {
    #[inline]
    fn recommend_buffer_size(&self) -> usize {
        MAX_HEAD_SIZE + self.size_hint
    }

    fn write_buffer(&self, buffer: &mut Buffer) -> Result<()> {
        serde_json::to_writer(buffer, self.value)?;
        Ok(())
    }
}

/// Decode a JSON payload.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkError;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Login {
        user: String,
        retries: u8,
    }

    #[test]
    fn test_json_message_payload() {
        let mut buffer = Buffer::new();
        buffer.prepare(1, 0, 1);

        let login = Login {
            user: "ana".to_string(),
            retries: 2,
        };
        JsonMessage::new(&login).write_buffer(&mut buffer).unwrap();

        assert_eq!(buffer.payload(), br#"{"user":"ana","retries":2}"#);
        let decoded: Login = decode_json(buffer.payload()).unwrap();
        assert_eq!(decoded, login);
    }

    #[test]
    fn test_json_size_hint() {
        let message = JsonMessage::new("x").with_size_hint(10);
        assert_eq!(message.recommend_buffer_size(), MAX_HEAD_SIZE + 10);
    }

    #[test]
    fn test_decode_json_error() {
        let result: Result<Login> = decode_json(b"{");
        assert!(matches!(result, Err(LinkError::Json(_))));
    }
}
