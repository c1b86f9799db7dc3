//! Extended keys and BIP-32 child derivation.
//!
//! An [`ExtendedKey`] is one node of the derivation tree: a secp256k1 key
//! (private or public) paired with a 32-byte chain code and the bookkeeping
//! fields that place it in the tree. Deriving a child never mutates the
//! parent; every node is an independent immutable value and is `Send + Sync`.
//!
//! ```text
//! hardened (i >= 2^31):  I = HMAC-SHA512(c_par, 0x00 || k_par || ser32(i))
//! normal   (i <  2^31):  I = HMAC-SHA512(c_par, ser_P(K_par) || ser32(i))
//! child key = IL + parent key, child chain code = IR
//! ```

use rand::RngCore;
use std::fmt;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use hdwallet_core::constants::{
    CHAIN_CODE_LEN, FINGERPRINT_LEN, HARDENED_OFFSET, MASTER_HMAC_KEY, MAX_DEPTH, MAX_SEED_LEN,
    MIN_SEED_LEN, PUBLIC_KEY_LEN, SECRET_KEY_LEN, SERIALIZED_KEY_LEN,
};
use hdwallet_core::crypto::{hmac_sha512, split_hmac_output};
use hdwallet_core::ec::{PublicKey, SecretKey};
use hdwallet_core::encoding::{decode_check, encode_check, KeyKind, VersionBytes};
use hdwallet_core::error::{CurveError, EncodingError};

use crate::error::KeyError;

/// First four bytes of a key's HASH160 identifier.
pub type Fingerprint = [u8; FINGERPRINT_LEN];

/// Seed bytes fed to master key generation.
///
/// Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: Vec<u8>,
}

impl Seed {
    /// Draw `len` bytes from the OS cryptographic RNG.
    pub fn generate(len: usize) -> Result<Self, KeyError> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&len) {
            return Err(KeyError::InvalidSeedLength(len));
        }
        let mut bytes = vec![0u8; len];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| KeyError::EntropyUnavailable(e.to_string()))?;
        Ok(Self { bytes })
    }

    /// Wrap existing seed bytes. Length is checked by [`ExtendedKey::master_from_seed`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A 32-bit child index. The top bit marks a hardened child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChildNumber(u32);

impl ChildNumber {
    /// Normal child `index`, `None` if `index >= 2^31`.
    pub fn normal(index: u32) -> Option<Self> {
        (index < HARDENED_OFFSET).then_some(Self(index))
    }

    /// Hardened child `index'`, `None` if `index >= 2^31`.
    pub fn hardened(index: u32) -> Option<Self> {
        (index < HARDENED_OFFSET).then_some(Self(index | HARDENED_OFFSET))
    }

    pub fn is_hardened(self) -> bool {
        self.0 & HARDENED_OFFSET != 0
    }

    /// Index without the hardened bit.
    pub fn index(self) -> u32 {
        self.0 & !HARDENED_OFFSET
    }

    /// Full 32-bit value as serialized.
    pub fn value(self) -> u32 {
        self.0
    }

    /// The next index of the same class, `None` at the end of the class.
    pub fn next_in_class(self) -> Option<Self> {
        let next = self.index().checked_add(1)?;
        if self.is_hardened() {
            Self::hardened(next)
        } else {
            Self::normal(next)
        }
    }
}

impl From<u32> for ChildNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ChildNumber> for u32 {
    fn from(child: ChildNumber) -> Self {
        child.0
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.index())
        } else {
            write!(f, "{}", self.index())
        }
    }
}

/// The key half of an extended key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(SecretKey),
    Public(PublicKey),
}

/// One node of the derivation tree.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    key: KeyMaterial,
    chain_code: Zeroizing<[u8; CHAIN_CODE_LEN]>,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: ChildNumber,
}

impl ExtendedKey {
    /// Create the master node from a 16..=64 byte seed.
    ///
    /// `I = HMAC-SHA512("Bitcoin seed", seed)`; `IL` becomes the private key
    /// and `IR` the chain code. A seed whose `IL` is zero or not below the
    /// curve order is unusable and yields `InvalidScalarOrPoint { index: 0 }`.
    pub fn master_from_seed(seed: &[u8]) -> Result<Self, KeyError> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(KeyError::InvalidSeedLength(seed.len()));
        }
        let i = hmac_sha512(MASTER_HMAC_KEY, seed);
        let (il, ir) = split_hmac_output(&i);
        let secret =
            SecretKey::from_bytes(&il).map_err(|_| KeyError::InvalidScalarOrPoint { index: 0 })?;

        let master = Self {
            key: KeyMaterial::Private(secret),
            chain_code: ir,
            depth: 0,
            parent_fingerprint: [0; FINGERPRINT_LEN],
            child_number: ChildNumber::default(),
        };
        debug!(
            fingerprint = %hex::encode(master.fingerprint()),
            seed_len = seed.len(),
            "created master key"
        );
        Ok(master)
    }

    /// Draw a fresh random seed of `seed_len` bytes and build its master node.
    ///
    /// The seed is returned so the caller can back it up.
    pub fn generate_master(seed_len: usize) -> Result<(Seed, Self), KeyError> {
        let seed = Seed::generate(seed_len)?;
        let master = Self::master_from_seed(seed.as_bytes())?;
        Ok((seed, master))
    }

    /// Derive the child at `child`.
    ///
    /// Fails with `InvalidScalarOrPoint` for the roughly 1 in 2^127 indices
    /// whose tweak is unusable; [`derive_child_with_retry`](Self::derive_child_with_retry)
    /// skips those.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, KeyError> {
        let mut data = Zeroizing::new(Vec::with_capacity(1 + SECRET_KEY_LEN + 4));
        match (&self.key, child.is_hardened()) {
            (KeyMaterial::Public(_), true) => {
                return Err(KeyError::HardenedFromPublic {
                    index: child.value(),
                });
            }
            (KeyMaterial::Private(secret), true) => {
                data.push(0x00);
                data.extend_from_slice(&secret.to_bytes()[..]);
            }
            (_, false) => data.extend_from_slice(&self.public_key().to_bytes()),
        }
        data.extend_from_slice(&child.value().to_be_bytes());

        if self.depth == MAX_DEPTH {
            return Err(KeyError::DepthOverflow);
        }

        let i = hmac_sha512(&self.chain_code[..], &data);
        let (il, ir) = split_hmac_output(&i);
        let invalid = |_: CurveError| KeyError::InvalidScalarOrPoint {
            index: child.value(),
        };
        let key = match &self.key {
            KeyMaterial::Private(secret) => KeyMaterial::Private(secret.add_tweak(&il).map_err(invalid)?),
            KeyMaterial::Public(public) => KeyMaterial::Public(public.add_tweak(&il).map_err(invalid)?),
        };

        Ok(Self {
            key,
            chain_code: ir,
            depth: self.depth + 1,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
        })
    }

    /// Derive `child`, moving on to the next index of the same class whenever
    /// the current one yields an invalid key.
    ///
    /// At most `max_retries` indices are skipped. The returned node's
    /// [`child_number`](Self::child_number) records the index actually used.
    pub fn derive_child_with_retry(
        &self,
        child: ChildNumber,
        max_retries: u32,
    ) -> Result<Self, KeyError> {
        retry_derivation(child, max_retries, |c| self.derive_child(c))
    }

    /// `HASH160` of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        self.public_key().identifier()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.public_key().fingerprint()
    }

    /// Public-only counterpart with the same chain code and tree position.
    pub fn neuter(&self) -> Self {
        Self {
            key: KeyMaterial::Public(self.public_key()),
            ..self.clone()
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    pub fn kind(&self) -> KeyKind {
        if self.is_private() {
            KeyKind::Private
        } else {
            KeyKind::Public
        }
    }

    pub fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn chain_code(&self) -> &[u8; CHAIN_CODE_LEN] {
        &self.chain_code
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// The public key, computed from the private scalar when needed.
    pub fn public_key(&self) -> PublicKey {
        match &self.key {
            KeyMaterial::Private(secret) => secret.public_key(),
            KeyMaterial::Public(public) => public.clone(),
        }
    }

    /// Private scalar bytes, `None` for public-only nodes.
    pub fn private_key_bytes(&self) -> Option<Zeroizing<[u8; SECRET_KEY_LEN]>> {
        match &self.key {
            KeyMaterial::Private(secret) => Some(secret.to_bytes()),
            KeyMaterial::Public(_) => None,
        }
    }

    /// The 33-byte key field: `0x00 || scalar` or the compressed point.
    pub fn key_data(&self) -> Zeroizing<[u8; PUBLIC_KEY_LEN]> {
        let mut out = Zeroizing::new([0u8; PUBLIC_KEY_LEN]);
        match &self.key {
            KeyMaterial::Private(secret) => out[1..].copy_from_slice(&secret.to_bytes()[..]),
            KeyMaterial::Public(public) => out.copy_from_slice(&public.to_bytes()),
        }
        out
    }

    /// Encode as the 78-byte payload
    /// `version || depth || parent fp || child number || chain code || key data`.
    pub fn serialize(&self, versions: &VersionBytes) -> Zeroizing<[u8; SERIALIZED_KEY_LEN]> {
        let mut out = Zeroizing::new([0u8; SERIALIZED_KEY_LEN]);
        out[0..4].copy_from_slice(&versions.tag(self.kind()));
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_number.value().to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code[..]);
        out[45..78].copy_from_slice(&self.key_data()[..]);
        out
    }

    /// Decode the first 78 bytes of `bytes`.
    ///
    /// The version tag must be one of `versions`; it decides whether the key
    /// data is read as a private scalar or a public point.
    pub fn deserialize(bytes: &[u8], versions: &VersionBytes) -> Result<Self, KeyError> {
        if bytes.len() < SERIALIZED_KEY_LEN {
            return Err(EncodingError::TooShort {
                len: bytes.len(),
                min: SERIALIZED_KEY_LEN,
            }
            .into());
        }
        let kind = versions.kind_of(take::<4>(bytes, 0))?;
        let depth = bytes[4];
        let parent_fingerprint = take::<FINGERPRINT_LEN>(bytes, 5);
        let child_number = ChildNumber(u32::from_be_bytes(take::<4>(bytes, 9)));
        let chain_code = Zeroizing::new(take::<CHAIN_CODE_LEN>(bytes, 13));
        let key_data = Zeroizing::new(take::<PUBLIC_KEY_LEN>(bytes, 45));

        if depth == 0 && (parent_fingerprint != [0; FINGERPRINT_LEN] || child_number.value() != 0) {
            return Err(malformed("root key with non-zero parent fingerprint or child number"));
        }

        let key = match kind {
            KeyKind::Private => {
                if key_data[0] != 0x00 {
                    return Err(malformed("private key data must start with 0x00"));
                }
                let scalar = Zeroizing::new(take::<SECRET_KEY_LEN>(&key_data[..], 1));
                KeyMaterial::Private(
                    SecretKey::from_bytes(&scalar).map_err(|e| malformed(&e.to_string()))?,
                )
            }
            KeyKind::Public => KeyMaterial::Public(
                PublicKey::from_bytes(&key_data).map_err(|e| malformed(&e.to_string()))?,
            ),
        };

        Ok(Self {
            key,
            chain_code,
            depth,
            parent_fingerprint,
            child_number,
        })
    }

    /// Base58Check text of the 78-byte payload (`xprv...` / `xpub...` on mainnet).
    pub fn to_base58(&self, versions: &VersionBytes) -> Zeroizing<String> {
        Zeroizing::new(encode_check(&self.serialize(versions)[..]))
    }

    pub fn from_base58(text: &str, versions: &VersionBytes) -> Result<Self, KeyError> {
        let payload = decode_check(text)?;
        if payload.len() != SERIALIZED_KEY_LEN {
            return Err(malformed(&format!(
                "decoded {} bytes, expected {SERIALIZED_KEY_LEN}",
                payload.len()
            )));
        }
        Self::deserialize(&payload, versions)
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("kind", &self.kind())
            .field("public_key", &self.public_key())
            .field("chain_code", &"[REDACTED]")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number.to_string())
            .finish()
    }
}

/// Run `attempt` from `start`, stepping to the next index of the same class
/// after each `InvalidScalarOrPoint`, for at most `max_retries` skips.
pub(crate) fn retry_derivation<T>(
    start: ChildNumber,
    max_retries: u32,
    mut attempt: impl FnMut(ChildNumber) -> Result<T, KeyError>,
) -> Result<T, KeyError> {
    let mut child = start;
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);
        match attempt(child) {
            Err(KeyError::InvalidScalarOrPoint { index }) => {
                if attempts > max_retries {
                    return Err(KeyError::RetriesExhausted {
                        index: start.value(),
                        attempts,
                    });
                }
                let next = child
                    .next_in_class()
                    .ok_or(KeyError::IndexOutOfRange { index })?;
                warn!(skipped = %child, next = %next, "invalid child key, skipping index");
                child = next;
            }
            other => return other,
        }
    }
}

fn take<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[at..at + N]);
    out
}

fn malformed(reason: &str) -> KeyError {
    KeyError::Encoding(EncodingError::MalformedEncoding(reason.to_string()))
}
