//! Seed derivation (BIP-39 PBKDF2 step).

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

/// Number of PBKDF2 rounds for seed derivation.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Length of a derived seed in bytes.
pub const SEED_LEN: usize = 64;

/// Salt prefix prepended to the optional password.
const SALT_PREFIX: &str = "mnemonic";

/// A 64-byte seed derived from a mnemonic and password.
///
/// Opaque key material for downstream wallets. Wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    /// Get the seed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Lowercase hex without prefix or separators.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(*self.0))
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl core::fmt::Debug for Seed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Seed[REDACTED]")
    }
}

/// Derive a seed from mnemonic text and an optional password.
///
/// PBKDF2-HMAC-SHA512 with the mnemonic as password and
/// `"mnemonic" + password` as salt, 2048 rounds, 64-byte output.
pub fn derive_seed(mnemonic: &str, password: &str) -> Seed {
    let salt = Zeroizing::new(format!("{SALT_PREFIX}{password}"));
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(mnemonic.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed[..]);
    Seed(seed)
}
