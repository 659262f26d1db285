//! Supported mnemonic sizes.
//!
//! BIP-39 ties every phrase length to exactly one entropy size and one
//! checksum width:
//!
//! | words | entropy bits | checksum bits |
//! |-------|--------------|---------------|
//! | 12    | 128          | 4             |
//! | 15    | 160          | 5             |
//! | 18    | 192          | 6             |
//! | 21    | 224          | 7             |
//! | 24    | 256          | 8             |

use core::fmt;

use crate::{Error, Result};

/// Number of bits encoded by a single mnemonic word.
pub const BITS_PER_WORD: usize = 11;

/// One of the five phrase lengths defined by BIP-39.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WordCount {
    /// 12 words, 128 bits of entropy.
    Words12,
    /// 15 words, 160 bits of entropy.
    Words15,
    /// 18 words, 192 bits of entropy.
    Words18,
    /// 21 words, 224 bits of entropy.
    Words21,
    /// 24 words, 256 bits of entropy.
    Words24,
}

impl WordCount {
    /// All supported sizes, shortest first.
    pub const ALL: [Self; 5] = [
        Self::Words12,
        Self::Words15,
        Self::Words18,
        Self::Words21,
        Self::Words24,
    ];

    /// Look up the size for a phrase of `words` words.
    pub const fn from_words(words: usize) -> Result<Self> {
        match words {
            12 => Ok(Self::Words12),
            15 => Ok(Self::Words15),
            18 => Ok(Self::Words18),
            21 => Ok(Self::Words21),
            24 => Ok(Self::Words24),
            n => Err(Error::UnsupportedPhraseLength(n)),
        }
    }

    /// Look up the size for an entropy buffer of `bits` bits.
    pub const fn from_entropy_bits(bits: usize) -> Result<Self> {
        match bits {
            128 => Ok(Self::Words12),
            160 => Ok(Self::Words15),
            192 => Ok(Self::Words18),
            224 => Ok(Self::Words21),
            256 => Ok(Self::Words24),
            n => Err(Error::InvalidEntropyLength(n)),
        }
    }

    /// Number of words in the phrase.
    pub const fn words(self) -> usize {
        match self {
            Self::Words12 => 12,
            Self::Words15 => 15,
            Self::Words18 => 18,
            Self::Words21 => 21,
            Self::Words24 => 24,
        }
    }

    /// Checksum width in bits.
    pub const fn checksum_bits(self) -> usize {
        match self {
            Self::Words12 => 4,
            Self::Words15 => 5,
            Self::Words18 => 6,
            Self::Words21 => 7,
            Self::Words24 => 8,
        }
    }

    /// Entropy size in bits.
    pub const fn entropy_bits(self) -> usize {
        self.words() * BITS_PER_WORD - self.checksum_bits()
    }

    /// Entropy size in bytes.
    pub const fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} words", self.words())
    }
}
