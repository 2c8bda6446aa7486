//! Packet head encoding and decoding.
//!
//! A packet on the wire is a fixed-width unsigned length followed by the
//! payload:
//! ```text
//! ┌──────────────────────┬─────────────────────────┐
//! │ Head                 │ Payload                 │
//! │ 1, 2, 4 or 8 bytes   │ `head` bytes, opaque    │
//! │ unsigned, BE or LE   │                         │
//! └──────────────────────┴─────────────────────────┘
//! ```
//!
//! There is no magic, checksum or trailer. Packets are adjacent on the wire.

use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

/// Largest supported head width in bytes.
pub const MAX_HEAD_SIZE: usize = 8;

/// Byte order used for the length head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Most significant byte first (network order).
    #[default]
    #[serde(rename = "big", alias = "big_endian", alias = "be")]
    BigEndian,
    /// Least significant byte first.
    #[serde(rename = "little", alias = "little_endian", alias = "le")]
    LittleEndian,
}

/// Width of the length head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadSize {
    /// `{packet, 1}`: payloads up to 255 bytes.
    One,
    /// `{packet, 2}`: payloads up to 65535 bytes.
    Two,
    /// `{packet, 4}`: payloads up to 4 GiB - 1.
    Four,
    /// `{packet, 8}`.
    Eight,
}

impl HeadSize {
    /// Resolve a head width in bytes.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedHeaderWidth` unless `n` is 1, 2, 4 or 8.
    pub fn new(n: usize) -> Result<Self> {
        match n {
            1 => Ok(HeadSize::One),
            2 => Ok(HeadSize::Two),
            4 => Ok(HeadSize::Four),
            8 => Ok(HeadSize::Eight),
            other => Err(LinkError::UnsupportedHeaderWidth(other)),
        }
    }

    /// Head width in bytes.
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            HeadSize::One => 1,
            HeadSize::Two => 2,
            HeadSize::Four => 4,
            HeadSize::Eight => 8,
        }
    }

    /// Largest payload length representable in this head.
    #[inline]
    pub const fn max_payload(self) -> u64 {
        match self {
            HeadSize::One => u8::MAX as u64,
            HeadSize::Two => u16::MAX as u64,
            HeadSize::Four => u32::MAX as u64,
            HeadSize::Eight => u64::MAX,
        }
    }

    /// Write `payload_len` into the first `width()` bytes of `dst`.
    ///
    /// # Errors
    ///
    /// Returns `PacketTooLarge` if the length does not fit in the head.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `width()`.
    ///
    /// # Example
    ///
    /// ```
    /// use packet_link::protocol::{ByteOrder, HeadSize};
    ///
    /// let mut head = [0u8; 2];
    /// HeadSize::Two.encode(ByteOrder::BigEndian, 5, &mut head).unwrap();
    /// assert_eq!(head, [0x00, 0x05]);
    /// ```
    pub fn encode(self, order: ByteOrder, payload_len: usize, dst: &mut [u8]) -> Result<()> {
        debug_assert!(dst.len() >= self.width());
        match self {
            HeadSize::One => {
                dst[0] = u8::try_from(payload_len).map_err(|_| LinkError::PacketTooLarge)?;
            }
            HeadSize::Two => {
                let value = u16::try_from(payload_len).map_err(|_| LinkError::PacketTooLarge)?;
                let bytes = match order {
                    ByteOrder::BigEndian => value.to_be_bytes(),
                    ByteOrder::LittleEndian => value.to_le_bytes(),
                };
                dst[..2].copy_from_slice(&bytes);
            }
            HeadSize::Four => {
                let value = u32::try_from(payload_len).map_err(|_| LinkError::PacketTooLarge)?;
                let bytes = match order {
                    ByteOrder::BigEndian => value.to_be_bytes(),
                    ByteOrder::LittleEndian => value.to_le_bytes(),
                };
                dst[..4].copy_from_slice(&bytes);
            }
            HeadSize::Eight => {
                let value = u64::try_from(payload_len).map_err(|_| LinkError::PacketTooLarge)?;
                let bytes = match order {
                    ByteOrder::BigEndian => value.to_be_bytes(),
                    ByteOrder::LittleEndian => value.to_le_bytes(),
                };
                dst[..8].copy_from_slice(&bytes);
            }
        }
        Ok(())
    }

    /// Read the payload length from the first `width()` bytes of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than `width()`.
    pub fn decode(self, order: ByteOrder, src: &[u8]) -> u64 {
        debug_assert!(src.len() >= self.width());
        match (self, order) {
            (HeadSize::One, _) => u64::from(src[0]),
            (HeadSize::Two, ByteOrder::BigEndian) => u64::from(u16::from_be_bytes(array(src))),
            (HeadSize::Two, ByteOrder::LittleEndian) => u64::from(u16::from_le_bytes(array(src))),
            (HeadSize::Four, ByteOrder::BigEndian) => u64::from(u32::from_be_bytes(array(src))),
            (HeadSize::Four, ByteOrder::LittleEndian) => u64::from(u32::from_le_bytes(array(src))),
            (HeadSize::Eight, ByteOrder::BigEndian) => u64::from_be_bytes(array(src)),
            (HeadSize::Eight, ByteOrder::LittleEndian) => u64::from_le_bytes(array(src)),
        }
    }
}

impl TryFrom<usize> for HeadSize {
    type Error = LinkError;

    fn try_from(n: usize) -> Result<Self> {
        HeadSize::new(n)
    }
}

impl From<HeadSize> for usize {
    fn from(head: HeadSize) -> usize {
        head.width()
    }
}

#[inline]
fn array<const N: usize>(src: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&src[..N]);
    out
}
