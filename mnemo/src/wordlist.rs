//! The 2048-word vocabulary that mnemonic phrases are drawn from.
//!
//! A [`WordList`] is built once, validated, and then only read. Word order is
//! load-bearing: the position of a word in the list is the 11-bit value it
//! encodes, so reordering a list invalidates every phrase written with it.
//!
//! # Example
//!
//! ```
//! use mnemo::WordList;
//!
//! let words = WordList::english();
//! assert_eq!(words.word_at(0), Some("abandon"));
//! assert_eq!(words.index_of("zoo"), Some(2047));
//! ```

use std::fs;
use std::path::Path;

use bip39::Language;
use rustc_hash::FxHashMap;

use crate::{Error, Result};

/// Number of entries every word list must contain.
pub const WORDLIST_LEN: usize = 2048;

/// Minimum prefix length required for unambiguous word expansion.
///
/// The BIP-39 English list guarantees uniqueness at 4 characters.
pub const MIN_PREFIX_LEN: usize = 4;

/// Immutable bidirectional mapping between words and their 11-bit indices.
#[derive(Clone)]
pub struct WordList {
    words: Vec<Box<str>>,
    index: FxHashMap<Box<str>, u16>,
}

impl WordList {
    /// The standard BIP-39 English word list.
    pub fn english() -> Self {
        let words: Vec<Box<str>> = Language::English
            .word_list()
            .iter()
            .map(|w| Box::<str>::from(*w))
            .collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i as u16))
            .collect();
        Self { words, index }
    }

    /// Load a word list from a text file with one word per line.
    ///
    /// The line number (0-based) is the word's index. A trailing newline and
    /// `\r\n` line endings are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WordListUnavailable`] if the file cannot be read and
    /// [`Error::WordListFormat`] if it does not hold exactly 2048 distinct,
    /// non-empty words.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::WordListUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_words(text.lines())?;
        tracing::debug!(path = %path.display(), "loaded word list");
        Ok(list)
    }

    /// Build a word list from an in-memory sequence of words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WordListFormat`] unless the sequence holds exactly
    /// 2048 distinct, non-empty words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| Box::<str>::from(w.as_ref().trim_end_matches('\r')))
            .collect();
        Self::build(words)
    }

    fn build(words: Vec<Box<str>>) -> Result<Self> {
        if words.len() != WORDLIST_LEN {
            return Err(Error::WordListFormat(format!(
                "expected {WORDLIST_LEN} words, found {}",
                words.len()
            )));
        }

        let mut index = FxHashMap::default();
        index.reserve(WORDLIST_LEN);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(Error::WordListFormat(format!("empty entry at line {}", i + 1)));
            }
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(Error::WordListFormat(format!(
                    "duplicate word \"{word}\" at line {}",
                    i + 1
                )));
            }
        }

        Ok(Self { words, index })
    }

    /// Get the word at the given index.
    #[inline]
    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(|w| &**w)
    }

    /// Word for an 11-bit value. Every such value is in range for a valid list.
    #[inline]
    pub(crate) fn word(&self, index: u16) -> &str {
        &self.words[usize::from(index)]
    }

    /// Get the index of the given word.
    #[inline]
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Whether `word` is part of this list.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Iterate over all words in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.words.iter().map(|w| &**w)
    }

    /// Number of words (always 2048).
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; a constructed list is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Resolve a token to a full word.
    ///
    /// The token is returned as-is when it is a word of this list. Otherwise
    /// it is treated as a prefix of at least [`MIN_PREFIX_LEN`] characters
    /// that must identify exactly one word.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrefixTooShort`] if a non-exact token is shorter than
    /// the minimum, [`Error::UnknownPrefix`] if nothing matches, and
    /// [`Error::AmbiguousPrefix`] if several words match.
    pub fn resolve_prefix(&self, token: &str) -> Result<&str> {
        if let Some(i) = self.index_of(token) {
            return Ok(&*self.words[usize::from(i)]);
        }

        if token.chars().count() < MIN_PREFIX_LEN {
            return Err(Error::PrefixTooShort {
                prefix: token.to_owned(),
                min_len: MIN_PREFIX_LEN,
            });
        }

        let matches: Vec<&str> = self.iter().filter(|w| w.starts_with(token)).collect();
        match matches.as_slice() {
            [] => Err(Error::UnknownPrefix(token.to_owned())),
            [word] => Ok(*word),
            _ => Err(Error::AmbiguousPrefix {
                prefix: token.to_owned(),
                candidates: matches.iter().map(|w| (*w).to_owned()).collect(),
            }),
        }
    }
}

impl core::fmt::Debug for WordList {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "WordList({} words, first {:?})", self.words.len(), self.word_at(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic() -> Vec<String> {
        (0..WORDLIST_LEN).map(|i| format!("w{i:04}")).collect()
    }

    mod english_tests {
        use super::*;

        #[test]
        fn test_known_positions() {
            let list = WordList::english();
            assert_eq!(list.len(), WORDLIST_LEN);
            assert_eq!(list.word_at(0), Some("abandon"));
            assert_eq!(list.word_at(3), Some("about"));
            assert_eq!(list.word_at(102), Some("art"));
            assert_eq!(list.word_at(2047), Some("zoo"));
            assert_eq!(list.word_at(2048), None);
        }

        #[test]
        fn test_lookups_are_inverse() {
            let list = WordList::english();
            for (i, word) in list.iter().enumerate() {
                assert_eq!(list.index_of(word), Some(i as u16));
            }
            assert_eq!(list.index_of("notaword"), None);
        }
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_from_words_accepts_2048() {
            let list = WordList::from_words(synthetic()).unwrap();
            assert_eq!(list.word_at(17), Some("w0017"));
            assert_eq!(list.index_of("w2047"), Some(2047));
        }

        #[test]
        fn test_rejects_wrong_count() {
            let mut words = synthetic();
            words.pop();
            assert!(matches!(WordList::from_words(&words), Err(Error::WordListFormat(_))));
        }

        #[test]
        fn test_rejects_duplicates() {
            let mut words = synthetic();
            words[100] = "w0001".into();
            assert!(matches!(WordList::from_words(&words), Err(Error::WordListFormat(_))));
        }

        #[test]
        fn test_rejects_empty_entries() {
            let mut words = synthetic();
            words[5].clear();
            assert!(matches!(WordList::from_words(&words), Err(Error::WordListFormat(_))));
        }

        #[test]
        fn test_strips_carriage_returns() {
            let words: Vec<String> = synthetic().into_iter().map(|w| w + "\r").collect();
            let list = WordList::from_words(&words).unwrap();
            assert_eq!(list.index_of("w0000"), Some(0));
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_missing_file_is_unavailable() {
            let result = WordList::load("/nonexistent/mnemo/english.txt");
            assert!(matches!(result, Err(Error::WordListUnavailable { .. })));
        }

        #[test]
        fn test_loads_file_with_trailing_newline() {
            let path = std::env::temp_dir().join(format!("mnemo-wordlist-{}.txt", std::process::id()));
            let mut text = synthetic().join("\n");
            text.push('\n');
            fs::write(&path, text).unwrap();

            let list = WordList::load(&path).unwrap();
            fs::remove_file(&path).unwrap();

            assert_eq!(list.len(), WORDLIST_LEN);
            assert_eq!(list.word_at(2047), Some("w2047"));
        }
    }

    mod prefix_tests {
        use super::*;

        #[test]
        fn test_exact_and_prefix() {
            let list = WordList::english();
            assert_eq!(list.resolve_prefix("abandon").unwrap(), "abandon");
            assert_eq!(list.resolve_prefix("aban").unwrap(), "abandon");
            assert_eq!(list.resolve_prefix("wris").unwrap(), "wrist");
        }

        #[test]
        fn test_exact_short_words_accepted() {
            let list = WordList::english();
            assert_eq!(list.resolve_prefix("zoo").unwrap(), "zoo");
            assert_eq!(list.resolve_prefix("art").unwrap(), "art");
        }

        #[test]
        fn test_short_unknown_and_ambiguous() {
            let list = WordList::english();
            assert!(matches!(list.resolve_prefix("aba"), Err(Error::PrefixTooShort { .. })));
            assert!(matches!(list.resolve_prefix("zzzz"), Err(Error::UnknownPrefix(_))));

            let synthetic = WordList::from_words(synthetic()).unwrap();
            assert!(matches!(
                synthetic.resolve_prefix("w000"),
                Err(Error::AmbiguousPrefix { .. })
            ));
        }
    }
}
