//! Base58Check framing and version tags for exchanged extended keys.
//!
//! An exchanged key is the 78-byte payload (4-byte version tag first) followed
//! by the first four bytes of `SHA256(SHA256(payload))`, rendered in the
//! Bitcoin Base58 alphabet:
//!
//! ```text
//! base58( version(4) || body(74) || checksum(4) )
//! ```
//!
//! The version tag tells a reader whether the payload holds a private or a
//! public key and which network it belongs to. Tags are configuration, not
//! constants: [`Network`] provides the Bitcoin presets and a custom variant.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::EncodingError;

/// Whether a serialized key carries a private scalar or a public point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    Private,
    Public,
}

/// The pair of version tags used for one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionBytes {
    /// Tag for private keys (`xprv` on Bitcoin mainnet).
    pub private: [u8; 4],
    /// Tag for public keys (`xpub` on Bitcoin mainnet).
    pub public: [u8; 4],
}

impl VersionBytes {
    /// Bitcoin mainnet: `xprv` / `xpub`.
    pub const MAINNET: Self = Self {
        private: [0x04, 0x88, 0xAD, 0xE4],
        public: [0x04, 0x88, 0xB2, 0x1E],
    };

    /// Bitcoin testnet: `tprv` / `tpub`.
    pub const TESTNET: Self = Self {
        private: [0x04, 0x35, 0x83, 0x94],
        public: [0x04, 0x35, 0x87, 0xCF],
    };

    /// Tag for a key of the given kind.
    pub fn tag(&self, kind: KeyKind) -> [u8; 4] {
        match kind {
            KeyKind::Private => self.private,
            KeyKind::Public => self.public,
        }
    }

    /// Identify the kind of key a tag announces.
    pub fn kind_of(&self, tag: [u8; 4]) -> Result<KeyKind, EncodingError> {
        if tag == self.private {
            Ok(KeyKind::Private)
        } else if tag == self.public {
            Ok(KeyKind::Public)
        } else {
            Err(EncodingError::UnknownVersion(tag))
        }
    }
}

/// Network selector for version tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    /// Caller-supplied tags for other chains.
    Custom(VersionBytes),
}

impl Network {
    pub fn version_bytes(&self) -> VersionBytes {
        match self {
            Network::Mainnet => VersionBytes::MAINNET,
            Network::Testnet => VersionBytes::TESTNET,
            Network::Custom(v) => *v,
        }
    }
}

/// Encode `payload` as Base58Check.
pub fn encode_check(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Decode Base58Check text, verifying and stripping the checksum.
pub fn decode_check(text: &str) -> Result<Zeroizing<Vec<u8>>, EncodingError> {
    bs58::decode(text)
        .with_check(None)
        .into_vec()
        .map(Zeroizing::new)
        .map_err(|e| match e {
            bs58::decode::Error::InvalidChecksum { .. } => EncodingError::ChecksumMismatch,
            other => EncodingError::InvalidBase58(other.to_string()),
        })
}
