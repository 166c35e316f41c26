//! Fundamental types for the Meridian wallet CLI.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: cryptographic keys, wallet addresses, and the registry of
//! known network profiles.

pub mod address;
pub mod keys;
pub mod network;

pub use address::WalletAddress;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::{NetworkProfile, UnknownNetwork};
