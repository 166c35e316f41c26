//! Wallet address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Meridian wallet address.
///
/// Derived from the wallet's public key under a network version byte via
/// Blake2b hashing + base58check encoding (see `meridian_crypto::address`).
/// The version byte is the first payload byte, so addresses are only
/// comparable within one network.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Wrap a raw address string. No validation is performed here;
    /// use `meridian_crypto::address::validate_address` for that.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
