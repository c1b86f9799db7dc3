//! # hdwallet-core
//! Primitives underneath the hdwallet key tree: secp256k1 point operations,
//! GF(256) arithmetic, hashing and Base58Check framing.

pub mod constants;
pub mod crypto;
pub mod ec;
pub mod encoding;
pub mod error;
pub mod gf256;
