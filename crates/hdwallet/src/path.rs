//! Derivation paths such as `m/44'/0'/0'/0/0`.
//!
//! A path is the root marker `m` followed by `/`-separated segments. Each
//! segment is a decimal index below 2^31, with a trailing `'` for hardened
//! children. Account-level paths have at least three segments.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, debug_span, trace};

use hdwallet_core::constants::{BIP44_PURPOSE, MIN_ACCOUNT_PATH_SEGMENTS};

use crate::error::PathError;
use crate::keys::{ChildNumber, ExtendedKey};

/// A parsed, immutable derivation path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    segments: Vec<ChildNumber>,
}

impl DerivationPath {
    /// Parse `m/<index>[']/...`.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let rest = path
            .strip_prefix("m/")
            .ok_or_else(|| PathError::InvalidFormat(path.to_string()))?;

        let segments = rest
            .split('/')
            .enumerate()
            .map(|(position, text)| {
                parse_segment(text).ok_or_else(|| PathError::InvalidSegment {
                    position,
                    segment: text.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if segments.len() < MIN_ACCOUNT_PATH_SEGMENTS {
            return Err(PathError::TooShort {
                segments: segments.len(),
                min: MIN_ACCOUNT_PATH_SEGMENTS,
            });
        }
        Ok(Self { segments })
    }

    /// `m/44'/coin'/account'/change/address_index`.
    pub fn bip44(
        coin_type: u32,
        account: u32,
        change: u32,
        address_index: u32,
    ) -> Result<Self, PathError> {
        let parts = [
            (BIP44_PURPOSE, true),
            (coin_type, true),
            (account, true),
            (change, false),
            (address_index, false),
        ];
        let segments = parts
            .iter()
            .enumerate()
            .map(|(position, &(index, hardened))| {
                let child = if hardened {
                    ChildNumber::hardened(index)
                } else {
                    ChildNumber::normal(index)
                };
                child.ok_or_else(|| PathError::InvalidSegment {
                    position,
                    segment: if hardened { format!("{index}'") } else { index.to_string() },
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[ChildNumber] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk the path from `master`, one child per segment.
    ///
    /// Each step skips at most `max_retries` invalid indices. The first
    /// failing segment is reported with its position and text.
    pub fn resolve(&self, master: &ExtendedKey, max_retries: u32) -> Result<ExtendedKey, PathError> {
        let span = debug_span!("resolve", path = %self);
        let _enter = span.enter();

        let mut key = master.clone();
        for (position, &child) in self.segments.iter().enumerate() {
            key = key
                .derive_child_with_retry(child, max_retries)
                .map_err(|source| PathError::Derivation {
                    position,
                    segment: child.to_string(),
                    source,
                })?;
            trace!(position, child = %key.child_number(), depth = key.depth(), "derived");
        }

        debug!(
            depth = key.depth(),
            fingerprint = %hex::encode(key.fingerprint()),
            "path resolved"
        );
        Ok(key)
    }
}

fn parse_segment(text: &str) -> Option<ChildNumber> {
    let (digits, hardened) = match text.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (text, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: u32 = digits.parse().ok()?;
    if hardened {
        ChildNumber::hardened(index)
    } else {
        ChildNumber::normal(index)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.segments {
            write!(f, "/{child}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyError;
    use hdwallet_core::constants::{DEFAULT_MAX_DERIVATION_RETRIES, HARDENED_OFFSET};
    use hdwallet_core::encoding::VersionBytes;

    fn tv1_master() -> ExtendedKey {
        ExtendedKey::master_from_seed(&hex::decode("000102030405060708090a0b0c0d0e0f").unwrap())
            .unwrap()
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    #[test]
    fn parse_bip44_path() {
        let p = DerivationPath::parse("m/44'/0'/0'/0/0").unwrap();
        let values: Vec<u32> = p.segments().iter().map(|c| c.value()).collect();
        assert_eq!(
            values,
            vec![HARDENED_OFFSET + 44, HARDENED_OFFSET, HARDENED_OFFSET, 0, 0]
        );
        assert_eq!(p.len(), 5);
    }

    #[test]
    fn display_roundtrip() {
        for text in ["m/44'/0'/0'/0/0", "m/0'/1/2'/2/1000000000", "m/1/2/3"] {
            let p: DerivationPath = text.parse().unwrap();
            assert_eq!(p.to_string(), text);
        }
    }

    #[test]
    fn missing_root_marker() {
        for text in ["44'/0'/0'", "M/44'/0'/0'", "m", "", "/44'/0'/0'"] {
            assert_eq!(
                DerivationPath::parse(text).unwrap_err(),
                PathError::InvalidFormat(text.to_string()),
                "{text:?}"
            );
        }
    }

    #[test]
    fn invalid_segments() {
        let cases = [
            ("m/44'/abc/0'", 1, "abc"),
            ("m/44'//0'", 1, ""),
            ("m/44'/0'/0'/", 3, ""),
            ("m/44h/0'/0'", 0, "44h"),
            ("m/44'/-1/0", 1, "-1"),
            ("m/44'/+1/0", 1, "+1"),
            ("m/44'/0'/2147483648", 2, "2147483648"),
            ("m/44'/0'/2147483648'", 2, "2147483648'"),
            ("m/44'/0'/99999999999", 2, "99999999999"),
            ("m/44''/0'/0'", 0, "44''"),
            ("m/44'/0 /0'", 1, "0 "),
        ];
        for (text, position, segment) in cases {
            assert_eq!(
                DerivationPath::parse(text).unwrap_err(),
                PathError::InvalidSegment {
                    position,
                    segment: segment.to_string()
                },
                "{text:?}"
            );
        }
    }

    #[test]
    fn largest_indices_accepted() {
        let p = DerivationPath::parse("m/2147483647'/2147483647/0").unwrap();
        assert_eq!(p.segments()[0].value(), u32::MAX);
        assert_eq!(p.segments()[1].value(), HARDENED_OFFSET - 1);
    }

    #[test]
    fn too_short() {
        assert_eq!(
            DerivationPath::parse("m/44'/0'").unwrap_err(),
            PathError::TooShort {
                segments: 2,
                min: 3
            }
        );
    }

    #[test]
    fn bip44_builder() {
        let p = DerivationPath::bip44(0, 0, 0, 0).unwrap();
        assert_eq!(p, DerivationPath::parse("m/44'/0'/0'/0/0").unwrap());
        let p = DerivationPath::bip44(60, 2, 1, 7).unwrap();
        assert_eq!(p.to_string(), "m/44'/60'/2'/1/7");
    }

    #[test]
    fn bip44_rejects_out_of_range() {
        assert_eq!(
            DerivationPath::bip44(HARDENED_OFFSET, 0, 0, 0).unwrap_err(),
            PathError::InvalidSegment {
                position: 1,
                segment: "2147483648'".into()
            }
        );
        assert_eq!(
            DerivationPath::bip44(0, 0, 0, u32::MAX).unwrap_err(),
            PathError::InvalidSegment {
                position: 4,
                segment: u32::MAX.to_string()
            }
        );
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    #[test]
    fn resolve_tv1_chain() {
        let p = DerivationPath::parse("m/0'/1/2'/2/1000000000").unwrap();
        let leaf = p.resolve(&tv1_master(), DEFAULT_MAX_DERIVATION_RETRIES).unwrap();
        assert_eq!(leaf.depth(), 5);
        assert_eq!(
            leaf.to_base58(&VersionBytes::MAINNET).as_str(),
            "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76"
        );
        assert_eq!(
            leaf.neuter().to_base58(&VersionBytes::MAINNET).as_str(),
            "xpub6H1LXWLaKsWFhvm6RVpEL9P4KfRZSW7abD2ttkWP3SSQvnyA8FSVqNTEcYFgJS2UaFcxupHiYkro49S8yGasTvXEYBVPamhGW6cFJodrTHy"
        );
    }

    #[test]
    fn resolve_is_deterministic() {
        let p = DerivationPath::bip44(0, 0, 0, 0).unwrap();
        let m = tv1_master();
        assert_eq!(p.resolve(&m, 100).unwrap(), p.resolve(&m, 100).unwrap());
    }

    #[test]
    fn resolve_reports_failing_segment() {
        let p = DerivationPath::parse("m/0/1/2'").unwrap();
        let xpub = tv1_master().neuter();
        assert_eq!(
            p.resolve(&xpub, 100).unwrap_err(),
            PathError::Derivation {
                position: 2,
                segment: "2'".into(),
                source: KeyError::HardenedFromPublic {
                    index: HARDENED_OFFSET + 2
                },
            }
        );
    }

    #[test]
    fn resolve_public_only_normal_path() {
        let p = DerivationPath::parse("m/0/1/2").unwrap();
        let m = tv1_master();
        let from_private = p.resolve(&m, 100).unwrap().neuter();
        let from_public = p.resolve(&m.neuter(), 100).unwrap();
        assert_eq!(from_private, from_public);
    }
}
