//! Error types for address derivation.

use core::fmt;

/// Errors that can occur while deriving an address from a seed.
#[derive(Debug)]
pub enum Error {
    /// The first 32 seed bytes are not a valid secp256k1 scalar.
    InvalidPrivateKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrivateKey => write!(f, "invalid private key"),
        }
    }
}

impl std::error::Error for Error {}
