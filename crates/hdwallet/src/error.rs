//! Wallet error types.

use hdwallet_core::error::{CurveError, EncodingError};
use thiserror::Error;

/// Errors from extended key creation, derivation and (de)serialization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Seed length outside 16..=64 bytes.
    #[error("invalid seed length: {0} bytes (expected 16..=64)")]
    InvalidSeedLength(usize),

    /// Hardened derivation requested from a public-only key.
    #[error("cannot derive hardened child {index:#010x} from a public key")]
    HardenedFromPublic {
        /// Requested child index (top bit set).
        index: u32,
    },

    /// The parent already sits at depth 255.
    #[error("derivation depth overflow")]
    DepthOverflow,

    /// `IL` was not below the curve order or the child key was zero / infinity.
    /// Retry with the next index.
    #[error("invalid child key at index {index:#010x}")]
    InvalidScalarOrPoint {
        /// Child index that produced the invalid key.
        index: u32,
    },

    /// Every retry up to the configured cap produced an invalid key.
    #[error("no valid child key from index {index:#010x} after {attempts} attempts")]
    RetriesExhausted {
        /// First index tried.
        index: u32,
        /// Number of indices tried.
        attempts: u32,
    },

    /// Retrying would leave the normal or hardened index range.
    #[error("child index range exhausted after {index:#010x}")]
    IndexOutOfRange {
        /// Last index tried.
        index: u32,
    },

    /// The OS random number generator failed while drawing a seed.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// Serialized key could not be decoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Errors from parsing or resolving a derivation path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path does not start with `m/`.
    #[error("invalid path format: {0}")]
    InvalidFormat(String),

    /// A segment is not a decimal index below 2^31, optionally followed by `'`.
    #[error("invalid path segment {position} '{segment}'")]
    InvalidSegment {
        /// Zero-based segment position after `m`.
        position: usize,
        /// Offending segment text.
        segment: String,
    },

    /// Fewer segments than an account-level path requires.
    #[error("path too short: {segments} segments, need at least {min}")]
    TooShort {
        /// Segments present.
        segments: usize,
        /// Segments required.
        min: usize,
    },

    /// Derivation failed while walking the path.
    #[error("derivation failed at segment {position} '{segment}': {source}")]
    Derivation {
        /// Zero-based segment position after `m`.
        position: usize,
        /// Segment text, e.g. `44'`.
        segment: String,
        /// Underlying derivation error.
        source: KeyError,
    },
}

/// Errors from wordlists and the mnemonic codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    /// Wordlist missing, of the wrong size, or containing duplicates.
    #[error("wordlist unavailable: {0}")]
    WordlistUnavailable(String),

    /// Entropy length not in {16, 20, 24, 28, 32} bytes.
    #[error("invalid entropy length: {0} bytes")]
    InvalidEntropyLength(usize),

    /// Phrase word count not in {12, 15, 18, 21, 24}.
    #[error("invalid word count: {0}")]
    InvalidWordCount(usize),

    /// A phrase word is not in the wordlist.
    #[error("unknown word at position {position}: '{word}'")]
    UnknownWord {
        /// Zero-based word position.
        position: usize,
        /// The word as given.
        word: String,
    },

    /// Checksum bits do not match SHA-256 of the entropy.
    #[error("invalid mnemonic checksum")]
    InvalidChecksum,

    /// The OS random number generator failed.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Errors from Shamir secret sharing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShamirError {
    /// Nothing to split.
    #[error("secret is empty")]
    EmptySecret,

    /// Threshold and share count violate `1 <= threshold <= shares <= 255`.
    #[error("invalid threshold {threshold} for {shares} shares")]
    InvalidThreshold {
        /// Requested threshold.
        threshold: usize,
        /// Requested share count.
        shares: usize,
    },

    /// Fewer shares supplied than the threshold requires.
    #[error("insufficient shares: need {required}, got {supplied}")]
    InsufficientShares {
        /// Threshold.
        required: usize,
        /// Shares supplied.
        supplied: usize,
    },

    /// Two shares carry the same index.
    #[error("duplicate share index {0}")]
    DuplicateIndex(u8),

    /// A share carries index 0, which would expose the secret.
    #[error("share index 0 is reserved")]
    ZeroIndex,

    /// Shares of different lengths were combined.
    #[error("share length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Length of the first share.
        expected: usize,
        /// Length of the offending share.
        got: usize,
    },

    /// The OS random number generator failed.
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(String),
}

/// Any error produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    #[error(transparent)]
    Shamir(#[from] ShamirError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
