//! # hdwallet: hierarchical-deterministic keys, mnemonics and seed sharing.
//!
//! Creates BIP-32 master keys from a seed, derives child keys along BIP-44
//! style paths, exchanges extended keys in the standard 78-byte / Base58Check
//! form, encodes entropy as BIP-39 mnemonic phrases, and splits secrets into
//! Shamir shares over GF(256).
//!
//! # Modules
//!
//! - [`error`]: error enums per concern and the `WalletError` umbrella
//! - [`config`]: `HdConfig` (network tags, retry cap, wordlist language)
//! - [`keys`]: `Seed`, `ChildNumber`, `ExtendedKey` derivation and serialization
//! - [`path`]: `DerivationPath` parsing and resolution
//! - [`wordlist`]: validated 2048-word lists
//! - [`mnemonic`]: `Mnemonic` codec and PBKDF2 seed stretching
//! - [`shamir`]: `split` / `combine` secret sharing
//!
//! ```no_run
//! use hdwallet::{DerivationPath, ExtendedKey, HdConfig, Mnemonic};
//!
//! # fn main() -> Result<(), hdwallet::WalletError> {
//! let config = HdConfig::mainnet();
//! let mnemonic = Mnemonic::generate(&config.wordlist()?, 32)?;
//! let master = ExtendedKey::master_from_seed(mnemonic.to_seed("").as_bytes())?;
//! let path = DerivationPath::bip44(0, 0, 0, 0)?;
//! let leaf = path.resolve(&master, config.max_derivation_retries)?;
//! println!("{}", leaf.neuter().to_base58(&config.versions()).as_str());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod keys;
pub mod mnemonic;
pub mod path;
pub mod shamir;
pub mod wordlist;

// Re-exports for convenient access
pub use config::HdConfig;
pub use error::{KeyError, MnemonicError, PathError, ShamirError, WalletError};
pub use hdwallet_core::encoding::{KeyKind, Network, VersionBytes};
pub use keys::{ChildNumber, ExtendedKey, Fingerprint, KeyMaterial, Seed};
pub use mnemonic::{seed_from_mnemonic, Mnemonic};
pub use path::DerivationPath;
pub use shamir::{combine, split, Share, ShareSet};
pub use wordlist::Wordlist;
