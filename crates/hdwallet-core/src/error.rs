//! Error types for the hdwallet primitives.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("scalar is zero or not below the curve order")] InvalidScalar,
    #[error("invalid compressed point encoding")] InvalidPoint,
    #[error("result is the point at infinity")] PointAtInfinity,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("payload too short: {len} < {min}")] TooShort { len: usize, min: usize },
    #[error("malformed encoding: {0}")] MalformedEncoding(String),
    #[error("unknown version tag: {}", hex::encode(.0))] UnknownVersion([u8; 4]),
    #[error("base58 checksum mismatch")] ChecksumMismatch,
    #[error("invalid base58: {0}")] InvalidBase58(String),
}
