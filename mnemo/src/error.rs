//! Error types for mnemonic encoding, seed derivation and recovery.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while working with mnemonics.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The word-list file could not be opened or read.
    WordListUnavailable {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The word list is malformed (wrong size, empty or duplicate entries).
    WordListFormat(String),
    /// The secure random source failed to produce entropy.
    EntropySource(rand_core::Error),
    /// Entropy bit length is not one of 128, 160, 192, 224 or 256.
    InvalidEntropyLength(usize),
    /// Phrase word count is not one of 12, 15, 18, 21 or 24.
    UnsupportedPhraseLength(usize),
    /// A word is not present in the word list.
    UnknownWord(String),
    /// A word index does not fit in 11 bits.
    IndexOutOfRange(u16),
    /// The phrase decodes, but its checksum bits do not match the entropy.
    InvalidChecksum,
    /// Mnemonic prefix is too short for unambiguous expansion.
    PrefixTooShort {
        /// The prefix that was too short.
        prefix: String,
        /// Minimum required prefix length.
        min_len: usize,
    },
    /// Mnemonic prefix does not match any word in the word list.
    UnknownPrefix(String),
    /// Mnemonic prefix matches multiple words in the word list.
    AmbiguousPrefix {
        /// The ambiguous prefix.
        prefix: String,
        /// Words that match the prefix.
        candidates: Vec<String>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WordListUnavailable { path, source } => {
                write!(f, "cannot read word list {}: {source}", path.display())
            }
            Self::WordListFormat(msg) => write!(f, "malformed word list: {msg}"),
            Self::EntropySource(e) => write!(f, "secure random source failed: {e}"),
            Self::InvalidEntropyLength(bits) => {
                write!(f, "invalid entropy length {bits} bits, must be 128, 160, 192, 224, or 256")
            }
            Self::UnsupportedPhraseLength(n) => {
                write!(f, "invalid word count {n}, must be 12, 15, 18, 21, or 24")
            }
            Self::UnknownWord(word) => write!(f, "word \"{word}\" is not in the word list"),
            Self::IndexOutOfRange(index) => {
                write!(f, "word index {index} is out of range (maximum 2047)")
            }
            Self::InvalidChecksum => write!(f, "mnemonic checksum mismatch"),
            Self::PrefixTooShort { prefix, min_len } => {
                write!(f, "prefix \"{prefix}\" is too short (minimum {min_len} characters)")
            }
            Self::UnknownPrefix(prefix) => {
                write!(f, "prefix \"{prefix}\" does not match any word")
            }
            Self::AmbiguousPrefix { prefix, candidates } => {
                write!(f, "prefix \"{prefix}\" is ambiguous, matches: {}", candidates.join(", "))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WordListUnavailable { source, .. } => Some(source),
            Self::EntropySource(e) => Some(e),
            Self::WordListFormat(_)
            | Self::InvalidEntropyLength(_)
            | Self::UnsupportedPhraseLength(_)
            | Self::UnknownWord(_)
            | Self::IndexOutOfRange(_)
            | Self::InvalidChecksum
            | Self::PrefixTooShort { .. }
            | Self::UnknownPrefix(_)
            | Self::AmbiguousPrefix { .. } => None,
        }
    }
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Self {
        Self::EntropySource(err)
    }
}

/// A convenient Result type alias for mnemo operations.
pub type Result<T> = core::result::Result<T, Error>;
