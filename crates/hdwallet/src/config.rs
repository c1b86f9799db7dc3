//! Wallet configuration.

use serde::{Deserialize, Serialize};

use hdwallet_core::constants::DEFAULT_MAX_DERIVATION_RETRIES;
use hdwallet_core::encoding::{Network, VersionBytes};

use crate::error::MnemonicError;
use crate::wordlist::Wordlist;

/// Settings shared by derivation, serialization and the mnemonic codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HdConfig {
    /// Version tags used for exchanged keys.
    pub network: Network,
    /// Indices skipped at most when a child key comes out invalid.
    pub max_derivation_retries: u32,
    /// Built-in wordlist name.
    pub language: String,
}

impl Default for HdConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            max_derivation_retries: DEFAULT_MAX_DERIVATION_RETRIES,
            language: "english".to_string(),
        }
    }
}

impl HdConfig {
    /// Bitcoin mainnet tags (`xprv` / `xpub`).
    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            ..Self::default()
        }
    }

    /// Bitcoin testnet tags (`tprv` / `tpub`).
    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            ..Self::default()
        }
    }

    pub fn versions(&self) -> VersionBytes {
        self.network.version_bytes()
    }

    /// Load the configured built-in wordlist.
    pub fn wordlist(&self) -> Result<Wordlist, MnemonicError> {
        Wordlist::builtin(&self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_mainnet_english() {
        let cfg = HdConfig::default();
        assert_eq!(cfg.network, Network::Mainnet);
        assert_eq!(cfg.max_derivation_retries, 100);
        assert_eq!(cfg.language, "english");
    }

    #[test]
    fn presets_select_version_bytes() {
        assert_eq!(HdConfig::mainnet().versions(), VersionBytes::MAINNET);
        assert_eq!(HdConfig::testnet().versions(), VersionBytes::TESTNET);
    }

    #[test]
    fn custom_network() {
        let tags = VersionBytes {
            private: [0x01, 0x02, 0x03, 0x04],
            public: [0x05, 0x06, 0x07, 0x08],
        };
        let cfg = HdConfig {
            network: Network::Custom(tags),
            ..HdConfig::default()
        };
        assert_eq!(cfg.versions(), tags);
    }

    #[test]
    fn wordlist_lookup() {
        assert_eq!(HdConfig::default().wordlist().unwrap().language(), "english");
        let cfg = HdConfig {
            language: "esperanto".into(),
            ..HdConfig::default()
        };
        assert!(matches!(
            cfg.wordlist().unwrap_err(),
            MnemonicError::WordlistUnavailable(_)
        ));
    }

    #[test]
    fn serde_fills_missing_fields() {
        let cfg: HdConfig = serde_json::from_str(r#"{"network":"Testnet"}"#).unwrap();
        assert_eq!(cfg, HdConfig::testnet());
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = HdConfig {
            max_derivation_retries: 7,
            language: "korean".into(),
            ..HdConfig::testnet()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: HdConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
