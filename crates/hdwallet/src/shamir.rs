//! Shamir secret sharing over GF(256).
//!
//! Each byte of the secret is the constant term of its own random polynomial
//! of degree `threshold - 1`; share `x` holds that polynomial evaluated at
//! `x` for every byte. Any `threshold` shares recover the secret by Lagrange
//! interpolation at zero. Fewer reveal nothing about it.
//!
//! Shares carry no authentication: a corrupted share silently yields a wrong
//! secret.

use rand::RngCore;
use std::fmt;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use hdwallet_core::constants::MAX_SHARES;
use hdwallet_core::gf256::{eval_polynomial, lagrange_weights_at_zero, Gf256};

use crate::error::ShamirError;

/// One share: its x-coordinate and one field element per secret byte.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Share {
    index: u8,
    data: Vec<u8>,
}

impl Share {
    pub fn new(index: u8, data: Vec<u8>) -> Self {
        Self { index, data }
    }

    /// The x-coordinate, 1..=255 for shares produced by [`split`].
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("index", &self.index)
            .field("len", &self.data.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}

/// All shares of one split and the threshold they were made with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSet {
    threshold: usize,
    shares: Vec<Share>,
}

impl ShareSet {
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn into_shares(self) -> Vec<Share> {
        self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Recover the secret from every share in the set.
    pub fn combine(&self) -> Result<Zeroizing<Vec<u8>>, ShamirError> {
        combine(&self.shares, self.threshold)
    }
}

/// Split `secret` into `shares` shares, any `threshold` of which recover it.
pub fn split(secret: &[u8], shares: usize, threshold: usize) -> Result<ShareSet, ShamirError> {
    if secret.is_empty() {
        return Err(ShamirError::EmptySecret);
    }
    if threshold == 0 || threshold > shares || shares > MAX_SHARES as usize {
        return Err(ShamirError::InvalidThreshold { threshold, shares });
    }

    // Coefficients 1..threshold for every byte, drawn in one go.
    let degree = threshold - 1;
    let mut random = Zeroizing::new(vec![0u8; secret.len() * degree]);
    rand::rngs::OsRng
        .try_fill_bytes(&mut random)
        .map_err(|e| ShamirError::RandomnessUnavailable(e.to_string()))?;

    let mut out: Vec<Share> = (1..=shares)
        .map(|x| Share::new(x as u8, vec![0u8; secret.len()]))
        .collect();

    let mut coeffs = Zeroizing::new(vec![Gf256::ZERO; threshold]);
    for (j, &byte) in secret.iter().enumerate() {
        coeffs[0] = Gf256(byte);
        for (c, &r) in coeffs[1..]
            .iter_mut()
            .zip(&random[j * degree..(j + 1) * degree])
        {
            *c = Gf256(r);
        }
        for share in out.iter_mut() {
            share.data[j] = u8::from(eval_polynomial(&coeffs, Gf256(share.index)));
        }
    }

    info!(shares, threshold, secret_len = secret.len(), "split secret into shares");
    Ok(ShareSet {
        threshold,
        shares: out,
    })
}

/// Recover the secret from at least `threshold` shares.
///
/// All supplied shares take part in the interpolation.
pub fn combine(shares: &[Share], threshold: usize) -> Result<Zeroizing<Vec<u8>>, ShamirError> {
    if threshold == 0 || threshold > MAX_SHARES as usize {
        return Err(ShamirError::InvalidThreshold {
            threshold,
            shares: shares.len(),
        });
    }
    if shares.len() < threshold {
        return Err(ShamirError::InsufficientShares {
            required: threshold,
            supplied: shares.len(),
        });
    }

    let expected = shares[0].data.len();
    let mut seen = [false; 256];
    for share in shares {
        if share.index == 0 {
            return Err(ShamirError::ZeroIndex);
        }
        if std::mem::replace(&mut seen[share.index as usize], true) {
            return Err(ShamirError::DuplicateIndex(share.index));
        }
        if share.data.len() != expected {
            return Err(ShamirError::LengthMismatch {
                expected,
                got: share.data.len(),
            });
        }
    }
    if expected == 0 {
        return Err(ShamirError::EmptySecret);
    }

    let xs: Vec<Gf256> = shares.iter().map(|s| Gf256(s.index)).collect();
    let weights = lagrange_weights_at_zero(&xs).expect("share indices are distinct and non-zero");

    let secret: Vec<u8> = (0..expected)
        .map(|j| {
            let value = shares
                .iter()
                .zip(&weights)
                .fold(Gf256::ZERO, |acc, (s, &w)| acc + w * Gf256(s.data[j]));
            u8::from(value)
        })
        .collect();
    Ok(Zeroizing::new(secret))
}
