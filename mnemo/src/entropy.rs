//! Validated entropy buffers.

use rand_core::{CryptoRng, OsRng, RngCore};
use zeroize::Zeroizing;

use crate::{Result, WordCount};

/// Raw secret bits that a mnemonic encodes.
///
/// Always 16, 20, 24, 28 or 32 bytes. The buffer is wiped on drop.
#[derive(Clone)]
pub struct Entropy {
    bytes: Zeroizing<Vec<u8>>,
    size: WordCount,
}

impl Entropy {
    /// Wrap existing entropy bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidEntropyLength`] unless the buffer is
    /// 128, 160, 192, 224 or 256 bits long. Nothing is truncated or padded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let size = WordCount::from_entropy_bits(bytes.len() * 8)?;
        Ok(Self {
            bytes: Zeroizing::new(bytes.to_vec()),
            size,
        })
    }

    /// Draw fresh entropy for a phrase of the given size from the OS RNG.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EntropySource`] if the OS RNG fails.
    pub fn generate(size: WordCount) -> Result<Self> {
        Self::generate_with(&mut OsRng, size)
    }

    /// Draw fresh entropy from a caller-supplied cryptographic RNG.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EntropySource`] if the RNG fails.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R, size: WordCount) -> Result<Self> {
        let mut bytes = Zeroizing::new(vec![0u8; size.entropy_bytes()]);
        rng.try_fill_bytes(&mut bytes[..])?;
        Ok(Self { bytes, size })
    }

    /// The entropy bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Entropy length in bits.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Phrase size this entropy encodes to.
    #[inline]
    pub const fn word_count(&self) -> WordCount {
        self.size
    }
}

impl AsRef<[u8]> for Entropy {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Entropy({} bits)[REDACTED]", self.bit_len())
    }
}
