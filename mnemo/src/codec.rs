//! Bit-level conversion between entropy and mnemonic words.
//!
//! # Layout
//!
//! A phrase of `n` words carries `n * 11` bits: the entropy followed by its
//! checksum. Word `i` encodes bits `11 * i .. 11 * (i + 1)`, most significant
//! word first.
//!
//! ```text
//! | entropy (ENT bits)                          | checksum (ENT/32) |
//! | word 0 (11) | word 1 (11) | ... | word n-1 (11)                   |
//! ```
//!
//! Decoding always packs into a buffer whose width is fixed by the phrase
//! length, so entropy that begins with zero bytes keeps its full length
//! when the checksum is recomputed.

use core::fmt;

use zeroize::Zeroizing;

use crate::checksum::{checksum_bits, checksum_value};
use crate::length::{WordCount, BITS_PER_WORD};
use crate::seed::{derive_seed, Seed};
use crate::{Entropy, Error, Result, WordList};

/// Bytes needed for the longest phrase (24 words, 264 bits).
const MAX_PACKED_LEN: usize = 33;

/// Highest valid 11-bit word index.
const MAX_INDEX: u16 = (1 << BITS_PER_WORD) - 1;

/// A checksummed word sequence borrowed from a [`WordList`].
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic<'w> {
    words: Vec<&'w str>,
    indices: Vec<u16>,
}

impl<'w> Mnemonic<'w> {
    /// The words of the phrase, in order.
    #[inline]
    pub fn words(&self) -> &[&'w str] {
        &self.words
    }

    /// The 11-bit index of each word.
    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false` for a constructed mnemonic.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined by single spaces.
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.words.join(" "))
    }

    /// Derive the 64-byte seed for this phrase.
    pub fn to_seed(&self, password: &str) -> Seed {
        derive_seed(&self.phrase(), password)
    }
}

impl fmt::Display for Mnemonic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Mnemonic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({} words)", self.words.len())
    }
}

/// The bit fields recovered from a phrase.
#[derive(Clone, Debug)]
pub struct Decoded {
    /// Entropy in its full, fixed width.
    pub entropy: Entropy,
    /// Checksum bits carried by the last word.
    pub checksum: u32,
    /// Width of `checksum` in bits.
    pub checksum_bits: usize,
}

impl Decoded {
    /// Whether the carried checksum matches the entropy.
    pub fn checksum_matches(&self) -> bool {
        checksum_value(self.entropy.as_bytes(), self.checksum_bits) == self.checksum
    }
}

/// Encodes entropy into phrases and validates phrases against a word list.
#[derive(Clone, Copy, Debug)]
pub struct MnemonicCodec<'w> {
    wordlist: &'w WordList,
}

impl<'w> MnemonicCodec<'w> {
    /// Create a codec over `wordlist`.
    pub const fn new(wordlist: &'w WordList) -> Self {
        Self { wordlist }
    }

    /// The word list this codec reads from.
    pub const fn wordlist(&self) -> &'w WordList {
        self.wordlist
    }

    /// Encode raw entropy bytes into a phrase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntropyLength`] unless the entropy is 128,
    /// 160, 192, 224 or 256 bits long.
    pub fn encode(&self, entropy: &[u8]) -> Result<Mnemonic<'w>> {
        let size = WordCount::from_entropy_bits(entropy.len() * 8)?;
        Ok(self.encode_sized(entropy, size))
    }

    /// Encode a validated [`Entropy`] buffer.
    pub fn encode_entropy(&self, entropy: &Entropy) -> Mnemonic<'w> {
        self.encode_sized(entropy.as_bytes(), entropy.word_count())
    }

    fn encode_sized(&self, entropy: &[u8], size: WordCount) -> Mnemonic<'w> {
        let cs = checksum_bits(entropy);
        debug_assert_eq!(cs, size.checksum_bits());

        let mut packed = Zeroizing::new([0u8; MAX_PACKED_LEN]);
        packed[..entropy.len()].copy_from_slice(entropy);
        write_bits(&mut packed[..], entropy.len() * 8, cs, checksum_value(entropy, cs));

        let indices: Vec<u16> = (0..size.words())
            .map(|i| read_index(&packed[..], i * BITS_PER_WORD))
            .collect();
        self.assemble(&indices)
    }

    /// Build a mnemonic from word indices without validating the checksum.
    pub(crate) fn assemble(&self, indices: &[u16]) -> Mnemonic<'w> {
        Mnemonic {
            words: indices.iter().map(|&i| self.wordlist.word(i)).collect(),
            indices: indices.to_vec(),
        }
    }

    /// Split a phrase into its entropy and checksum fields.
    ///
    /// The checksum is not verified; see [`Decoded::checksum_matches`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPhraseLength`] for word counts other than
    /// 12, 15, 18, 21 or 24 and [`Error::UnknownWord`] for words missing from
    /// the list.
    pub fn decode<S: AsRef<str>>(&self, words: &[S]) -> Result<Decoded> {
        WordCount::from_words(words.len())?;
        let indices = words
            .iter()
            .map(|w| {
                let w = w.as_ref();
                self.wordlist
                    .index_of(w)
                    .ok_or_else(|| Error::UnknownWord(w.to_owned()))
            })
            .collect::<Result<Vec<u16>>>()?;
        self.decode_indices(&indices)
    }

    /// Split a sequence of word indices into entropy and checksum fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPhraseLength`] for unsupported lengths and
    /// [`Error::IndexOutOfRange`] for indices above 2047.
    pub fn decode_indices(&self, indices: &[u16]) -> Result<Decoded> {
        let size = WordCount::from_words(indices.len())?;
        if let Some(bad) = indices.iter().find(|&&i| i > MAX_INDEX) {
            return Err(Error::IndexOutOfRange(*bad));
        }

        let packed = pack_indices(indices);
        let entropy = Entropy::from_bytes(&packed[..size.entropy_bytes()])?;
        let checksum_bits = size.checksum_bits();
        let checksum = read_bits(&packed[..], size.entropy_bits(), checksum_bits);

        Ok(Decoded {
            entropy,
            checksum,
            checksum_bits,
        })
    }

    /// Whether `words` form a phrase with a matching checksum.
    ///
    /// Unsupported lengths and unknown words are simply invalid.
    pub fn is_valid<S: AsRef<str>>(&self, words: &[S]) -> bool {
        self.decode(words).is_ok_and(|d| d.checksum_matches())
    }

    /// Whether `indices` form a phrase with a matching checksum.
    ///
    /// This is the allocation-free check used on every search candidate.
    pub fn is_valid_indices(&self, indices: &[u16]) -> bool {
        let Ok(size) = WordCount::from_words(indices.len()) else {
            return false;
        };
        if indices.iter().any(|&i| i > MAX_INDEX) {
            return false;
        }

        let packed = pack_indices(indices);
        let cs = size.checksum_bits();
        let carried = read_bits(&packed[..], size.entropy_bits(), cs);
        checksum_value(&packed[..size.entropy_bytes()], cs) == carried
    }

    /// Parse and fully validate a phrase.
    ///
    /// # Errors
    ///
    /// Returns the [`decode`](Self::decode) errors, or
    /// [`Error::InvalidChecksum`] if the checksum does not match.
    pub fn parse(&self, phrase: &str) -> Result<Mnemonic<'w>> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let decoded = self.decode(&words)?;
        if !decoded.checksum_matches() {
            return Err(Error::InvalidChecksum);
        }
        let indices: Vec<u16> = words
            .iter()
            .filter_map(|w| self.wordlist.index_of(w))
            .collect();
        Ok(self.assemble(&indices))
    }
}

/// Pack 11-bit indices, most significant first, into a fixed-width buffer.
fn pack_indices(indices: &[u16]) -> Zeroizing<[u8; MAX_PACKED_LEN]> {
    let mut packed = Zeroizing::new([0u8; MAX_PACKED_LEN]);
    for (i, &index) in indices.iter().enumerate() {
        write_bits(&mut packed[..], i * BITS_PER_WORD, BITS_PER_WORD, u32::from(index));
    }
    packed
}

/// OR the low `width` bits of `value` into `buf` at bit `offset`, MSB first.
fn write_bits(buf: &mut [u8], offset: usize, width: usize, value: u32) {
    for i in 0..width {
        if (value >> (width - 1 - i)) & 1 == 1 {
            let bit = offset + i;
            buf[bit / 8] |= 0x80 >> (bit % 8);
        }
    }
}

/// Read `width` bits from `buf` starting at bit `offset`, MSB first.
fn read_bits(buf: &[u8], offset: usize, width: usize) -> u32 {
    (offset..offset + width).fold(0u32, |acc, bit| {
        (acc << 1) | u32::from((buf[bit / 8] >> (7 - bit % 8)) & 1)
    })
}

#[inline]
fn read_index(buf: &[u8], offset: usize) -> u16 {
    read_bits(buf, offset, BITS_PER_WORD) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_12: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const ZERO_24: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    mod encode_tests {
        use super::*;

        #[test]
        fn test_ascending_entropy_golden_vector() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let entropy = hex_literal::hex!("000102030405060708090a0b0c0d0e0f");

            let mnemonic = codec.encode(&entropy).unwrap();
            assert_eq!(
                mnemonic.indices(),
                &[0, 64, 1030, 64, 643, 28, 257, 266, 88, 771, 540, 251]
            );
            assert_eq!(
                mnemonic.to_string(),
                "abandon amount liar amount expire adjust cage candy arch gather drum buyer"
            );
            assert!(codec.is_valid(mnemonic.words()));

            let expected = hex_literal::hex!(
                "3779b041fab425e9c0fd55846b2a03e9a388fb12784067bd8ebdb464c2574a05bcc7a8eb54d7b2a2c8420ff60f630722ea5132d28605dbc996c8ca7d7a8311c0"
            );
            assert_eq!(mnemonic.to_seed("").as_bytes(), &expected);
        }

        #[test]
        fn test_official_vectors() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let cases: [(&[u8], &str); 5] = [
                (&[0x00; 16], ZERO_12),
                (&[0x7f; 16], "legal winner thank year wave sausage worth useful legal winner thank yellow"),
                (&[0x80; 16], "letter advice cage absurd amount doctor acoustic avoid letter advice cage above"),
                (&[0xff; 16], "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"),
                (&[0x00; 32], ZERO_24),
            ];
            for (entropy, phrase) in cases {
                assert_eq!(codec.encode(entropy).unwrap().to_string(), phrase);
            }
        }

        #[test]
        fn test_rejects_unsupported_entropy() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            for len in [0, 13, 15, 17, 31, 33] {
                assert!(matches!(
                    codec.encode(&vec![0u8; len]),
                    Err(Error::InvalidEntropyLength(bits)) if bits == len * 8
                ));
            }
        }

        #[test]
        fn test_word_count_follows_entropy() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            for size in WordCount::ALL {
                let mnemonic = codec.encode(&vec![0x5a; size.entropy_bytes()]).unwrap();
                assert_eq!(mnemonic.len(), size.words());
            }
        }
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn test_keeps_leading_zero_bytes() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let words: Vec<&str> = ZERO_12.split_whitespace().collect();

            let decoded = codec.decode(&words).unwrap();
            assert_eq!(decoded.entropy.as_bytes(), &[0u8; 16]);
            assert_eq!(decoded.checksum, 3);
            assert_eq!(decoded.checksum_bits, 4);
            assert!(decoded.checksum_matches());
        }

        #[test]
        fn test_ascending_entropy_roundtrip() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let entropy = hex_literal::hex!("000102030405060708090a0b0c0d0e0f");

            let mnemonic = codec.encode(&entropy).unwrap();
            let decoded = codec.decode(mnemonic.words()).unwrap();
            assert_eq!(decoded.entropy.as_bytes(), &entropy);
            assert_eq!(decoded.checksum, 11);
        }

        #[test]
        fn test_rejects_unsupported_length() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let words = vec!["abandon"; 13];
            assert!(matches!(codec.decode(&words), Err(Error::UnsupportedPhraseLength(13))));
            assert!(!codec.is_valid(&words));
        }

        #[test]
        fn test_rejects_unknown_word() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let mut words: Vec<&str> = ZERO_12.split_whitespace().collect();
            words[4] = "bitcoin";
            assert!(matches!(codec.decode(&words), Err(Error::UnknownWord(w)) if w == "bitcoin"));
            assert!(!codec.is_valid(&words));
        }

        #[test]
        fn test_rejects_out_of_range_index() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let mut indices = [0u16; 12];
            indices[0] = 2048;
            let err = codec.decode_indices(&indices).unwrap_err();
            assert!(matches!(err, Error::IndexOutOfRange(2048)));
            assert_eq!(err.to_string(), "word index 2048 is out of range (maximum 2047)");
            assert!(!codec.is_valid_indices(&indices));
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_detects_bad_checksum() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let words = vec!["abandon"; 12];
            assert!(!codec.is_valid(&words));
            assert!(matches!(
                codec.parse(&words.join(" ")),
                Err(Error::InvalidChecksum)
            ));
        }

        #[test]
        fn test_index_and_word_checks_agree() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let base = codec.encode(&[0x80; 16]).unwrap();

            for replacement in [0u16, 1, 4, 5, 700, 2047] {
                let mut indices = base.indices().to_vec();
                indices[11] = replacement;
                let words: Vec<&str> = indices.iter().map(|&i| list.word(i)).collect();
                assert_eq!(codec.is_valid_indices(&indices), codec.is_valid(&words));
            }
        }

        #[test]
        fn test_parse_accepts_extra_whitespace() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let spaced = format!("  {}  ", ZERO_12.replace(' ', "   "));
            let mnemonic = codec.parse(&spaced).unwrap();
            assert_eq!(mnemonic.to_string(), ZERO_12);
        }

        #[test]
        fn test_seed_from_official_vector() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let mnemonic = codec.encode(&[0x7f; 16]).unwrap();
            let expected = hex_literal::hex!(
                "2e8905819b8723fe2c1d161860e5ee1830318dbf49a83bd451cfb8440c28bd6fa457fe1296106559a3c80937a1c1069be3a3a5bd381ee6260e8d9739fce1f607"
            );
            assert_eq!(mnemonic.to_seed("TREZOR").as_bytes(), &expected);
        }

        #[test]
        fn test_debug_hides_words() {
            let list = WordList::english();
            let codec = MnemonicCodec::new(&list);
            let mnemonic = codec.parse(ZERO_12).unwrap();
            assert_eq!(format!("{mnemonic:?}"), "Mnemonic(12 words)");
        }
    }
}
