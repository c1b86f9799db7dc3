//! Hash and key-stretching functions used by the derivation tree.
//!
//! - HMAC-SHA512 drives master and child key derivation.
//! - HASH160 (`RIPEMD160(SHA256(x))`) produces key identifiers and fingerprints.
//! - Double SHA-256 backs the Base58Check checksum.
//! - PBKDF2-HMAC-SHA512 stretches mnemonic phrases into seeds.
//!
//! Outputs that carry secret material are returned as [`Zeroizing`] buffers so
//! they are wiped when the caller drops them.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use crate::constants::FINGERPRINT_LEN;

type HmacSha512 = Hmac<Sha512>;

/// Compute `HMAC-SHA512(key, data)`.
///
/// Derivation splits the 64-byte output into `IL` (left 32 bytes) and `IR`
/// (right 32 bytes); see [`split_hmac_output`].
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Zeroizing<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Split an HMAC-SHA512 output into its `(IL, IR)` halves.
pub fn split_hmac_output(i: &[u8; 64]) -> (Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>) {
    let mut il = Zeroizing::new([0u8; 32]);
    let mut ir = Zeroizing::new([0u8; 32]);
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}

/// SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// `SHA256(SHA256(data))`, the Base58Check checksum hash.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// `RIPEMD160(SHA256(data))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// First four bytes of [`hash160`] of a serialized public key.
pub fn fingerprint(public_key: &[u8]) -> [u8; FINGERPRINT_LEN] {
    let id = hash160(public_key);
    [id[0], id[1], id[2], id[3]]
}

/// `PBKDF2-HMAC-SHA512(password, salt, rounds)` into a 64-byte buffer.
pub fn pbkdf2_sha512(password: &[u8], salt: &[u8], rounds: u32) -> Zeroizing<[u8; 64]> {
    let mut out = Zeroizing::new([0u8; 64]);
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, out.as_mut());
    out
}
