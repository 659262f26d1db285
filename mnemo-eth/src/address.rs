//! Address derivation from seed bytes.

use k256::ecdsa::SigningKey;
use mnemo::Seed;
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::{Error, Result};

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte Ethereum-style account address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Create from raw 20-byte address.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Derive the address whose private key is the first 32 bytes of `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrivateKey`] if those bytes are zero or not
    /// below the curve order.
    pub fn from_seed(seed: &Seed) -> Result<Self> {
        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&seed.as_bytes()[..32]);
        Self::from_private_key(&secret)
    }

    /// Derive the address of a raw 32-byte secp256k1 private key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrivateKey`] if the key is out of range.
    pub fn from_private_key(bytes: &[u8; 32]) -> Result<Self> {
        let private_key = SigningKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)?;
        let public_key = private_key.verifying_key().to_encoded_point(false);
        Ok(Self::from_uncompressed(public_key.as_bytes()))
    }

    /// Hash a 65-byte uncompressed public key (`0x04 || x || y`).
    fn from_uncompressed(public_key: &[u8]) -> Self {
        let hash = Keccak256::digest(&public_key[1..]);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Lowercase hex without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}
