//! Protocol configuration.
//!
//! A `ProtocolConfig` names the three knobs of `{packet, N}` framing and can
//! be loaded from JSON, so both ends of a link can share one settings file.
//!
//! # Example
//!
//! ```
//! use packet_link::{ByteOrder, ProtocolConfig};
//!
//! let config = ProtocolConfig::from_json(r#"{"head_size": 2, "byte_order": "little"}"#).unwrap();
//! let protocol = config.build().unwrap();
//!
//! assert_eq!(protocol.head_size(), 2);
//! assert_eq!(protocol.byte_order(), ByteOrder::LittleEndian);
//! assert_eq!(protocol.max_packet_size(), 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::protocol::{ByteOrder, SimpleProtocol};

/// Default head width in bytes.
pub const DEFAULT_HEAD_SIZE: usize = 4;

/// Settings for a [`SimpleProtocol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Head width in bytes: 1, 2, 4 or 8.
    pub head_size: usize,
    /// Byte order of the head (`"big"` or `"little"`).
    pub byte_order: ByteOrder,
    /// Payload limit in bytes, head excluded. 0 = unlimited.
    pub max_packet_size: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            head_size: DEFAULT_HEAD_SIZE,
            byte_order: ByteOrder::BigEndian,
            max_packet_size: 0,
        }
    }
}

impl ProtocolConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Json` if the document is malformed. The head width is only
    /// checked by [`build`](Self::build).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!("Loaded protocol config: {:?}", config);
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build the protocol described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedHeaderWidth` unless `head_size` is 1, 2, 4 or 8.
    pub fn build(&self) -> Result<SimpleProtocol> {
        Ok(SimpleProtocol::packet_n(self.head_size, self.byte_order)?
            .with_max_packet_size(self.max_packet_size))
    }
}
