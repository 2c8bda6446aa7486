//! Error types for packet-link.

use thiserror::Error;

/// Main error type for all framing operations.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Header width is not one of 1, 2, 4 or 8 bytes.
    #[error("unsupported packet head size: {0}")]
    UnsupportedHeaderWidth(usize),

    /// Payload length exceeds the configured maximum or the header width.
    #[error("packet too large")]
    PacketTooLarge,

    /// Error returned by the underlying reader or writer.
    ///
    /// End of stream in the middle of a header or payload shows up here
    /// with `ErrorKind::UnexpectedEof`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error returned by a message while writing itself into a buffer.
    #[error("message error: {0}")]
    Message(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// JSON encode error, or a configuration document that could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LinkError {
    /// Wrap an arbitrary message serialization error.
    pub fn message<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LinkError::Message(err.into())
    }

    /// True if the stream ended before a full header or payload arrived.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, LinkError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }

    /// True for the shared oversize sentinel.
    #[inline]
    pub fn is_packet_too_large(&self) -> bool {
        matches!(self, LinkError::PacketTooLarge)
    }
}

/// Result type alias using LinkError.
pub type Result<T> = std::result::Result<T, LinkError>;
