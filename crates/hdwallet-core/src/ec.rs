//! secp256k1 scalar and point operations for the derivation tree.
//!
//! Uses the `k256` crate, whose scalar multiplication and scalar arithmetic are
//! constant time with respect to secret values. Every function here is pure:
//! there is no curve context object and no global state.
//!
//! # Tweaks
//!
//! Child derivation adds a 32-byte tweak `IL` to a parent key:
//!
//! ```text
//! private:  k_child = (IL + k_parent) mod n
//! public:   K_child = IL·G + K_parent
//! ```
//!
//! A tweak that is not below the curve order, a zero private result, or a
//! public result at infinity is rejected with a [`CurveError`]. Values are
//! never silently reduced.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::subtle::ConstantTimeEq;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, NonZeroScalar, ProjectivePoint, Scalar};
use std::fmt;
use zeroize::Zeroizing;

use crate::constants::{FINGERPRINT_LEN, PUBLIC_KEY_LEN, SECRET_KEY_LEN};
use crate::crypto;
use crate::error::CurveError;

/// A secp256k1 secret scalar in `[1, n)`.
///
/// Wraps [`k256::SecretKey`], which zeroizes its scalar on drop.
#[derive(Clone)]
pub struct SecretKey(k256::SecretKey);

impl SecretKey {
    /// Parse a 32-byte big-endian scalar. Zero and values `>= n` are rejected.
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_LEN]) -> Result<Self, CurveError> {
        k256::SecretKey::from_bytes(&FieldBytes::from(*bytes))
            .map(Self)
            .map_err(|_| CurveError::InvalidScalar)
    }

    /// Big-endian scalar bytes. Handle with care.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LEN]> {
        let mut out = Zeroizing::new([0u8; SECRET_KEY_LEN]);
        out.copy_from_slice(&self.0.to_bytes());
        out
    }

    /// The public point `k·G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }

    /// Compute `(tweak + self) mod n`.
    pub fn add_tweak(&self, tweak: &[u8; 32]) -> Result<Self, CurveError> {
        let tweak = parse_scalar(tweak)?;
        let sum = tweak + *self.0.to_nonzero_scalar();
        Option::<NonZeroScalar>::from(NonZeroScalar::new(sum))
            .map(|nz| Self(k256::SecretKey::from(nz)))
            .ok_or(CurveError::InvalidScalar)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..]).into()
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A secp256k1 point other than the identity.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(k256::PublicKey);

impl PublicKey {
    /// Parse a 33-byte compressed SEC1 point (`0x02`/`0x03` prefix + x).
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LEN]) -> Result<Self, CurveError> {
        if bytes[0] != 0x02 && bytes[0] != 0x03 {
            return Err(CurveError::InvalidPoint);
        }
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CurveError::InvalidPoint)
    }

    /// Compressed SEC1 encoding.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        let encoded = self.0.to_encoded_point(true);
        let mut out = [0u8; PUBLIC_KEY_LEN];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Compute `tweak·G + self`.
    pub fn add_tweak(&self, tweak: &[u8; 32]) -> Result<Self, CurveError> {
        let tweak = parse_scalar(tweak)?;
        let point = ProjectivePoint::GENERATOR * tweak + self.0.to_projective();
        k256::PublicKey::from_affine(point.to_affine())
            .map(Self)
            .map_err(|_| CurveError::PointAtInfinity)
    }

    /// `HASH160` of the compressed encoding.
    pub fn identifier(&self) -> [u8; 20] {
        crypto::hash160(&self.to_bytes())
    }

    /// First four bytes of [`identifier`](Self::identifier).
    pub fn fingerprint(&self) -> [u8; FINGERPRINT_LEN] {
        crypto::fingerprint(&self.to_bytes())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

/// Interpret 32 bytes as a scalar without reduction.
fn parse_scalar(bytes: &[u8; 32]) -> Result<Scalar, CurveError> {
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*bytes)))
        .ok_or(CurveError::InvalidScalar)
}
