//! Cryptographic primitives for the Meridian wallet.
//!
//! - **Ed25519** for signing and signature verification
//! - **Blake2b** for hashing (transaction content digests)
//! - Address derivation under a network version byte (base58check)
//! - Passphrase and BIP39 mnemonic key derivation

pub mod address;
pub mod hash;
pub mod keys;
pub mod mnemonic;
pub mod sign;

pub use address::{address_from_public_key, validate_address};
pub use hash::{blake2b_256, blake2b_256_multi, transaction_digest};
pub use keys::{generate_keypair, keypair_from_passphrase, keypair_from_seed, public_from_private};
pub use mnemonic::{generate_mnemonic, keypair_from_mnemonic, validate_mnemonic, MnemonicError};
pub use sign::{sign_message, verify_signature};
