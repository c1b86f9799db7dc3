//! BIP-39 mnemonic phrases and seed stretching.
//!
//! ```text
//! entropy (ENT bits) || SHA256(entropy)[0 .. ENT/32 bits]  ->  11-bit groups  ->  words
//! seed = PBKDF2-HMAC-SHA512(phrase, "mnemonic" || passphrase, 2048 rounds, 64 bytes)
//! ```
//!
//! Phrases and passphrases are used as given; callers handling non-ASCII
//! input should NFKD-normalize it first.

use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

use hdwallet_core::constants::{
    BITS_PER_WORD, ENTROPY_LENGTHS, MNEMONIC_SALT_PREFIX, PBKDF2_ROUNDS,
};
use hdwallet_core::crypto::{pbkdf2_sha512, sha256};

use crate::error::MnemonicError;
use crate::keys::Seed;
use crate::wordlist::Wordlist;

/// Entropy together with its word encoding.
///
/// Entropy and phrase are zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    language: String,
    entropy: Zeroizing<Vec<u8>>,
    phrase: Zeroizing<String>,
}

impl Mnemonic {
    /// Draw `entropy_len` bytes from the OS RNG and encode them.
    pub fn generate(wordlist: &Wordlist, entropy_len: usize) -> Result<Self, MnemonicError> {
        check_entropy_len(entropy_len)?;
        let mut entropy = Zeroizing::new(vec![0u8; entropy_len]);
        rand::rngs::OsRng
            .try_fill_bytes(&mut entropy)
            .map_err(|e| MnemonicError::EntropyUnavailable(e.to_string()))?;
        Self::from_entropy(wordlist, &entropy)
    }

    /// Encode `entropy` (16, 20, 24, 28 or 32 bytes) as words.
    pub fn from_entropy(wordlist: &Wordlist, entropy: &[u8]) -> Result<Self, MnemonicError> {
        check_entropy_len(entropy.len())?;
        let checksum_bits = entropy.len() / 4;
        let word_count = (entropy.len() * 8 + checksum_bits) / BITS_PER_WORD;

        // Checksum is at most 8 bits, so one trailing byte holds it.
        let mut bits = Zeroizing::new(Vec::with_capacity(entropy.len() + 1));
        bits.extend_from_slice(entropy);
        bits.push(sha256(entropy)[0]);

        let mut phrase = Zeroizing::new(String::new());
        for w in 0..word_count {
            let mut index: u16 = 0;
            for b in w * BITS_PER_WORD..(w + 1) * BITS_PER_WORD {
                index = (index << 1) | u16::from(bit(&bits, b));
            }
            let word = wordlist
                .word(index)
                .ok_or_else(|| MnemonicError::WordlistUnavailable("index past end".into()))?;
            if w > 0 {
                phrase.push(' ');
            }
            phrase.push_str(word);
        }

        Ok(Self {
            language: wordlist.language().to_string(),
            entropy: Zeroizing::new(entropy.to_vec()),
            phrase,
        })
    }

    /// Decode a phrase back to its entropy, verifying the checksum.
    ///
    /// Whitespace is normalized and words are lower-cased before lookup.
    pub fn parse(wordlist: &Wordlist, phrase: &str) -> Result<Self, MnemonicError> {
        let normalized = Zeroizing::new(phrase.to_lowercase());
        let words: Vec<&str> = normalized.split_whitespace().collect();
        let entropy_len = match words.len() {
            12 | 15 | 18 | 21 | 24 => words.len() * BITS_PER_WORD * 32 / 33 / 8,
            n => return Err(MnemonicError::InvalidWordCount(n)),
        };

        let mut bits = Zeroizing::new(vec![0u8; entropy_len + 1]);
        for (position, word) in words.iter().enumerate() {
            let index = wordlist
                .index_of(word)
                .ok_or_else(|| MnemonicError::UnknownWord {
                    position,
                    word: (*word).to_string(),
                })?;
            for i in 0..BITS_PER_WORD {
                if index & (1 << (BITS_PER_WORD - 1 - i)) != 0 {
                    let b = position * BITS_PER_WORD + i;
                    bits[b / 8] |= 0x80 >> (b % 8);
                }
            }
        }

        let entropy = &bits[..entropy_len];
        let checksum_bits = entropy_len / 4;
        // top `checksum_bits` bits of a byte; checksum_bits is 4..=8
        let mask = (0xFF00u16 >> checksum_bits) as u8;
        if bits[entropy_len] & mask != sha256(entropy)[0] & mask {
            return Err(MnemonicError::InvalidChecksum);
        }

        Self::from_entropy(wordlist, entropy)
    }

    /// Space-separated words.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.phrase.split(' ')
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Stretch into a 64-byte seed. See [`seed_from_mnemonic`].
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        seed_from_mnemonic(self, passphrase)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("language", &self.language)
            .field("words", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

/// `PBKDF2-HMAC-SHA512(phrase, "mnemonic" || passphrase, 2048)`.
pub fn seed_from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    let salt = Zeroizing::new(format!("{MNEMONIC_SALT_PREFIX}{passphrase}"));
    let out = pbkdf2_sha512(mnemonic.phrase().as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS);
    Seed::from_bytes(&out[..])
}

fn check_entropy_len(len: usize) -> Result<(), MnemonicError> {
    if ENTROPY_LENGTHS.contains(&len) {
        Ok(())
    } else {
        Err(MnemonicError::InvalidEntropyLength(len))
    }
}

fn bit(bytes: &[u8], i: usize) -> u8 {
    (bytes[i / 8] >> (7 - i % 8)) & 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdwallet_core::constants::MNEMONIC_SEED_LEN;
    use proptest::prelude::*;

    fn english() -> Wordlist {
        Wordlist::builtin("english").unwrap()
    }

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    // ------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------

    #[test]
    fn known_phrases_128_bit() {
        let wl = english();
        let cases: [(u8, &str); 4] = [
            (0x00, ABANDON_ABOUT),
            (0x7f, "legal winner thank year wave sausage worth useful legal winner thank yellow"),
            (0x80, "letter advice cage absurd amount doctor acoustic avoid letter advice cage above"),
            (0xff, "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"),
        ];
        for (byte, expected) in cases {
            let m = Mnemonic::from_entropy(&wl, &[byte; 16]).unwrap();
            assert_eq!(m.phrase(), expected, "entropy {byte:#04x}");
        }
    }

    #[test]
    fn word_counts_per_entropy_length() {
        let wl = english();
        for (len, words) in [(16, 12), (20, 15), (24, 18), (28, 21), (32, 24)] {
            let m = Mnemonic::from_entropy(&wl, &vec![0x5Au8; len]).unwrap();
            assert_eq!(m.word_count(), words, "{len} bytes");
        }
    }

    #[test]
    fn rejects_bad_entropy_length() {
        assert_eq!(
            Mnemonic::from_entropy(&english(), &[0u8; 17]).unwrap_err(),
            MnemonicError::InvalidEntropyLength(17)
        );
        assert_eq!(
            Mnemonic::generate(&english(), 33).unwrap_err(),
            MnemonicError::InvalidEntropyLength(33)
        );
    }

    #[test]
    fn generate_roundtrip() {
        let wl = english();
        let m = Mnemonic::generate(&wl, 32).unwrap();
        assert_eq!(m.entropy().len(), 32);
        assert_eq!(m.word_count(), 24);
        let back = Mnemonic::parse(&wl, m.phrase()).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn matches_bip39_crate() {
        let wl = english();
        let entropy: Vec<u8> = (0u8..32).collect();
        let ours = Mnemonic::from_entropy(&wl, &entropy).unwrap();
        let theirs = bip39::Mnemonic::from_entropy_in(bip39::Language::English, &entropy).unwrap();
        assert_eq!(ours.phrase(), theirs.to_string());
        assert_eq!(
            ours.to_seed("TREZOR").as_bytes(),
            &theirs.to_seed_normalized("TREZOR")[..]
        );
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    #[test]
    fn parse_normalizes_whitespace_and_case() {
        let m = Mnemonic::parse(&english(), "  Abandon abandon\tabandon abandon abandon abandon\nabandon abandon abandon abandon abandon ABOUT ").unwrap();
        assert_eq!(m.entropy(), &[0u8; 16]);
        assert_eq!(m.phrase(), ABANDON_ABOUT);
    }

    #[test]
    fn parse_wrong_word_count() {
        assert_eq!(
            Mnemonic::parse(&english(), "abandon abandon abandon").unwrap_err(),
            MnemonicError::InvalidWordCount(3)
        );
        assert_eq!(
            Mnemonic::parse(&english(), "").unwrap_err(),
            MnemonicError::InvalidWordCount(0)
        );
    }

    #[test]
    fn parse_unknown_word() {
        let phrase = ABANDON_ABOUT.replacen("abandon", "invalidword", 1);
        assert_eq!(
            Mnemonic::parse(&english(), &phrase).unwrap_err(),
            MnemonicError::UnknownWord {
                position: 0,
                word: "invalidword".into()
            }
        );
    }

    #[test]
    fn parse_bad_checksum() {
        // "abandon" x 12 has checksum bits 0000, which is wrong for zero entropy.
        let phrase = ["abandon"; 12].join(" ");
        assert_eq!(
            Mnemonic::parse(&english(), &phrase).unwrap_err(),
            MnemonicError::InvalidChecksum
        );
    }

    #[test]
    fn parse_uses_given_wordlist() {
        let korean = Wordlist::builtin("korean").unwrap();
        let m = Mnemonic::from_entropy(&korean, &[0x11; 16]).unwrap();
        assert_eq!(m.language(), "korean");
        assert_eq!(Mnemonic::parse(&korean, m.phrase()).unwrap(), m);
        assert!(Mnemonic::parse(&english(), m.phrase()).is_err());
    }

    // ------------------------------------------------------------------
    // Seed
    // ------------------------------------------------------------------

    #[test]
    fn seed_reference_vectors() {
        let m = Mnemonic::parse(&english(), ABANDON_ABOUT).unwrap();
        assert_eq!(
            hex::encode(m.to_seed("").as_bytes()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
        assert_eq!(
            hex::encode(seed_from_mnemonic(&m, "TREZOR").as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn seed_is_64_bytes_and_passphrase_sensitive() {
        let m = Mnemonic::from_entropy(&english(), &[0x42; 16]).unwrap();
        let a = m.to_seed("one");
        let b = m.to_seed("two");
        assert_eq!(a.len(), MNEMONIC_SEED_LEN);
        assert_ne!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.as_bytes(), m.to_seed("one").as_bytes());
    }

    #[test]
    fn debug_is_redacted() {
        let m = Mnemonic::parse(&english(), ABANDON_ABOUT).unwrap();
        let dbg = format!("{m:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("abandon"), "{dbg}");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn entropy_roundtrip(len_idx in 0usize..5, seed in any::<[u8; 32]>()) {
            let wl = english();
            let entropy = &seed[..ENTROPY_LENGTHS[len_idx]];
            let m = Mnemonic::from_entropy(&wl, entropy).unwrap();
            let back = Mnemonic::parse(&wl, m.phrase()).unwrap();
            prop_assert_eq!(back.entropy(), entropy);
        }

        #[test]
        fn agrees_with_bip39_crate(seed in any::<[u8; 32]>(), len_idx in 0usize..5) {
            let entropy = &seed[..ENTROPY_LENGTHS[len_idx]];
            let ours = Mnemonic::from_entropy(&english(), entropy).unwrap();
            let theirs = bip39::Mnemonic::from_entropy_in(bip39::Language::English, entropy).unwrap();
            prop_assert_eq!(ours.phrase(), theirs.to_string());
        }
    }
}
