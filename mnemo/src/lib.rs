//! # Mnemo - BIP-39 Mnemonic Toolkit
//!
//! Encoding, validation and seed derivation for BIP-39 mnemonic phrases,
//! plus an exhaustive, checksum-guided search for phrases with missing or
//! corrupted words.
//!
//! ## Features
//!
//! - **Fixed-width codec**: entropy with leading zero bytes round-trips exactly
//! - **Custom word lists**: any 2048-word list, loaded from a file
//! - **Recovery**: enumerate every valid completion of a partial phrase,
//!   sequentially or across the rayon thread pool
//! - **Zeroized secrets**: entropy, phrases and seeds are wiped on drop
//!
//! ## Example
//!
//! ```
//! use mnemo::{MnemonicCodec, WordList};
//!
//! let words = WordList::english();
//! let codec = MnemonicCodec::new(&words);
//!
//! let mnemonic = codec.encode(&[0u8; 16]).unwrap();
//! assert!(mnemonic.to_string().ends_with("abandon about"));
//!
//! let seed = mnemonic.to_seed("TREZOR");
//! assert_eq!(&seed.to_hex()[..8], "c55257c3");
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::uninlined_format_args,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::redundant_closure_for_method_calls,
    clippy::option_if_let_else,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::missing_fields_in_debug
)]
#![forbid(unsafe_code)]

pub mod checksum;
pub mod codec;
pub mod entropy;
pub mod error;
pub mod length;
pub mod recovery;
pub mod seed;
pub mod wordlist;

pub use codec::{Decoded, Mnemonic, MnemonicCodec};
pub use entropy::Entropy;
pub use error::{Error, Result};
pub use length::{WordCount, BITS_PER_WORD};
pub use recovery::{PartialMnemonic, RecoveryResult, RecoverySearch, SearchStats};
pub use seed::{derive_seed, Seed, PBKDF2_ROUNDS, SEED_LEN};
pub use wordlist::{WordList, MIN_PREFIX_LEN, WORDLIST_LEN};
