//! Shared fixtures for the integration tests.

use hdwallet::{ExtendedKey, Wordlist};
use tracing_subscriber::EnvFilter;

/// BIP-32 test vector 1 seed.
pub const TV1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

/// Install a `RUST_LOG`-driven subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Decode a hex fixture.
pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap_or_else(|e| panic!("bad hex fixture {s}: {e}"))
}

/// Master key for BIP-32 test vector 1.
pub fn tv1_master() -> ExtendedKey {
    master(&unhex(TV1_SEED))
}

/// Master key for `seed`, panicking on invalid fixtures.
pub fn master(seed: &[u8]) -> ExtendedKey {
    ExtendedKey::master_from_seed(seed).unwrap_or_else(|e| panic!("bad seed fixture: {e}"))
}

pub fn english() -> Wordlist {
    Wordlist::builtin("english").unwrap_or_else(|e| panic!("bundled wordlist: {e}"))
}
