//! Ethereum-style addresses for mnemo seeds.
//!
//! The first 32 bytes of a BIP-39 seed are used directly as a secp256k1
//! private key, without HD derivation. The address is the last 20 bytes of
//! the Keccak-256 hash of the uncompressed public key.
//!
//! # Usage
//!
//! ```
//! use mnemo::derive_seed;
//! use mnemo_eth::Address;
//!
//! let seed = derive_seed(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     "",
//! );
//! let address = Address::from_seed(&seed).unwrap();
//! assert_eq!(address.to_hex(), "ea6e8f7525e8af0669546ac6c5b8318fd2c6d7b6");
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod address;
mod error;

pub use address::{Address, ADDRESS_LEN};
pub use error::Error;

/// A convenient Result type alias for mnemo-eth operations.
pub type Result<T> = core::result::Result<T, Error>;
