//! Validated 2048-word lists for the mnemonic codec.
//!
//! A [`Wordlist`] is always passed explicitly; nothing here reads from disk.
//! Callers with their own list use [`Wordlist::from_text`] on data they
//! loaded, or [`Wordlist::builtin`] for the lists shipped by the `bip39`
//! crate.

use std::collections::HashMap;
use std::fmt;

use bip39::Language;
use hdwallet_core::constants::WORDLIST_LEN;

use crate::error::MnemonicError;

/// A language-tagged list of exactly 2048 distinct words.
#[derive(Clone, PartialEq, Eq)]
pub struct Wordlist {
    language: String,
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Wordlist {
    /// Build from words in index order.
    ///
    /// Every word must be non-empty, free of whitespace and unique, and there
    /// must be exactly 2048 of them.
    pub fn from_words<I, S>(language: &str, words: I) -> Result<Self, MnemonicError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != WORDLIST_LEN {
            return Err(MnemonicError::WordlistUnavailable(format!(
                "{language}: expected {WORDLIST_LEN} words, got {}",
                words.len()
            )));
        }

        let mut index = HashMap::with_capacity(WORDLIST_LEN);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(MnemonicError::WordlistUnavailable(format!(
                    "{language}: invalid word at index {i}"
                )));
            }
            // i < 2048, fits in u16
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(MnemonicError::WordlistUnavailable(format!(
                    "{language}: duplicate word '{word}'"
                )));
            }
        }

        Ok(Self {
            language: language.to_string(),
            words,
            index,
        })
    }

    /// Build from newline-separated text. Surrounding whitespace and blank
    /// lines are ignored.
    pub fn from_text(language: &str, text: &str) -> Result<Self, MnemonicError> {
        Self::from_words(
            language,
            text.lines().map(str::trim).filter(|line| !line.is_empty()),
        )
    }

    /// One of the bundled lists: `"english"` or `"korean"`.
    pub fn builtin(language: &str) -> Result<Self, MnemonicError> {
        let lang = match language.to_ascii_lowercase().as_str() {
            "english" => Language::English,
            "korean" => Language::Korean,
            other => {
                return Err(MnemonicError::WordlistUnavailable(format!(
                    "no built-in wordlist for '{other}'"
                )));
            }
        };
        Self::from_words(&language.to_ascii_lowercase(), lang.word_list().iter().copied())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Word at `index`, `None` past the end.
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    /// Position of `word`, `None` if it is not in the list.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl fmt::Debug for Wordlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wordlist")
            .field("language", &self.language)
            .field("len", &self.words.len())
            .finish()
    }
}
