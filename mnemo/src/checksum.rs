//! BIP-39 checksum computation.
//!
//! The checksum of an entropy buffer is the leading `ENT / 32` bits of its
//! SHA-256 digest. The width and the value are computed separately so the
//! encoder and the validator always agree on how many bits they compare.

use sha2::{Digest, Sha256};

/// Checksum width in bits for `entropy` (CS = ENT / 32).
#[inline]
pub fn checksum_bits(entropy: &[u8]) -> usize {
    entropy.len() * 8 / 32
}

/// The most significant `bits` bits of SHA-256(`entropy`).
///
/// `bits` must be in `1..=32`.
#[inline]
pub fn checksum_value(entropy: &[u8], bits: usize) -> u32 {
    debug_assert!((1..=32).contains(&bits));
    let digest = Sha256::digest(entropy);
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    head >> (32 - bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WordCount;

    #[test]
    fn test_width_matches_length_table() {
        for size in WordCount::ALL {
            let entropy = vec![0u8; size.entropy_bytes()];
            assert_eq!(checksum_bits(&entropy), size.checksum_bits());
        }
    }

    #[test]
    fn test_all_zero_vectors() {
        // sha256(16 zero bytes) = 374708fff7719dd5979ec875d56cd2286f6d3cf7ec317a3b25632aab28ec37bb
        assert_eq!(checksum_value(&[0u8; 16], 4), 0x3);
        // sha256(32 zero bytes) = 66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925
        assert_eq!(checksum_value(&[0u8; 32], 8), 0x66);
    }

    #[test]
    fn test_value_fits_width() {
        let entropy = [0xffu8; 32];
        for bits in 1..=32 {
            let value = u64::from(checksum_value(&entropy, bits));
            assert!(value < 1u64 << bits);
        }
    }

    #[test]
    fn test_single_bit_flips_change_checksum() {
        let base = hex_literal::hex!("000102030405060708090a0b0c0d0e0f");
        let original = checksum_value(&base, 4);

        let changed = (0..128)
            .filter(|bit| {
                let mut flipped = base;
                flipped[bit / 8] ^= 0x80 >> (bit % 8);
                checksum_value(&flipped, 4) != original
            })
            .count();

        assert!(changed > 0);
    }
}
