//! Cross-crate test suite for hdwallet.
//!
//! Integration tests under `tests/` pin published BIP-32 / BIP-39 vectors and
//! check derivation, serialization, mnemonic and secret-sharing properties
//! across randomized inputs.

pub mod helpers;
