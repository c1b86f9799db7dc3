//! Protocol constants for BIP32/39/44 derivation.

/// First hardened child index (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key used to derive the master node from a seed.
pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Shortest accepted seed, in bytes (128 bits).
pub const MIN_SEED_LEN: usize = 16;

/// Longest accepted seed, in bytes (512 bits).
pub const MAX_SEED_LEN: usize = 64;

/// Recommended seed length for freshly generated master keys.
pub const DEFAULT_SEED_LEN: usize = 32;

/// Deepest node in the tree. A node at this depth has no children.
pub const MAX_DEPTH: u8 = u8::MAX;

/// Length of a chain code, in bytes.
pub const CHAIN_CODE_LEN: usize = 32;

/// Length of a secp256k1 secret scalar, in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Length of a compressed secp256k1 point, in bytes.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of a key fingerprint, in bytes.
pub const FINGERPRINT_LEN: usize = 4;

/// Length of the serialized extended key payload, version tag included.
///
/// ```text
/// version(4) || depth(1) || parent_fingerprint(4) || child_number(4) || chain_code(32) || key_data(33)
/// ```
pub const SERIALIZED_KEY_LEN: usize = 78;

/// Default cap on consecutive invalid-child retries during derivation.
pub const DEFAULT_MAX_DERIVATION_RETRIES: u32 = 100;

/// Minimum number of segments in an account-level path (purpose/coin/account).
pub const MIN_ACCOUNT_PATH_SEGMENTS: usize = 3;

/// BIP44 purpose field.
pub const BIP44_PURPOSE: u32 = 44;

/// Number of words in a BIP39 wordlist.
pub const WORDLIST_LEN: usize = 2048;

/// Bits encoded by a single mnemonic word.
pub const BITS_PER_WORD: usize = 11;

/// Accepted mnemonic entropy lengths, in bytes (128 to 256 bits).
pub const ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// PBKDF2 iteration count for mnemonic seed stretching.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Salt prefix for mnemonic seed stretching.
pub const MNEMONIC_SALT_PREFIX: &str = "mnemonic";

/// Length of the seed produced from a mnemonic, in bytes.
pub const MNEMONIC_SEED_LEN: usize = 64;

/// Largest number of Shamir shares (x-coordinates 1..=255).
pub const MAX_SHARES: u8 = u8::MAX;
