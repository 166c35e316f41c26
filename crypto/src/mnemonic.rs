//! BIP39 mnemonic generation and Ed25519 key derivation.
//!
//! Generates a 24-word mnemonic (256-bit entropy) and derives an Ed25519
//! keypair scoped by a BIP44 derivation path `m/44'/<coin>'/<account>'/0/0`,
//! where the coin type comes from the target network profile.
//!
//! The derivation uses HMAC-SHA512 keyed with the path string to produce a
//! 64-byte output from the BIP39 seed, then takes the first 32 bytes as the
//! Ed25519 secret key.

use bip39::Mnemonic;
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use meridian_types::{KeyPair, PrivateKey, PublicKey};
use sha2::Sha512;
use thiserror::Error;

type HmacSha512 = Hmac<Sha512>;

/// Errors arising from mnemonic operations.
#[derive(Debug, Error)]
pub enum MnemonicError {
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

/// The BIP44 path for a given coin type and account index.
pub fn bip44_path(coin_type: u32, account: u32) -> String {
    format!("m/44'/{coin_type}'/{account}'/0/0")
}

/// Generate a new 24-word BIP39 mnemonic from 256-bit entropy.
pub fn generate_mnemonic() -> Result<String, MnemonicError> {
    let mut entropy = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut entropy);
    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| MnemonicError::DerivationFailed(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Derive an Ed25519 keypair from a BIP39 mnemonic phrase.
///
/// Process:
/// 1. Validate the mnemonic and derive the BIP39 seed (empty passphrase)
/// 2. Apply HMAC-SHA512 keyed with the BIP44 path to derive a child key
/// 3. Take the first 32 bytes as the Ed25519 secret key
pub fn keypair_from_mnemonic(
    mnemonic: &str,
    coin_type: u32,
    account: u32,
) -> Result<KeyPair, MnemonicError> {
    let mnemonic = Mnemonic::parse_normalized(mnemonic)
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))?;

    let seed = mnemonic.to_seed_normalized("");

    let path = bip44_path(coin_type, account);
    let mut mac = HmacSha512::new_from_slice(path.as_bytes())
        .map_err(|e| MnemonicError::DerivationFailed(e.to_string()))?;
    mac.update(&seed);
    let result = mac.finalize().into_bytes();

    let mut secret_bytes = [0u8; 32];
    secret_bytes.copy_from_slice(&result[..32]);

    let signing_key = SigningKey::from_bytes(&secret_bytes);
    let verifying_key = signing_key.verifying_key();

    Ok(KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    })
}

/// Validate that a phrase is a well-formed BIP39 mnemonic.
pub fn validate_mnemonic(mnemonic: &str) -> bool {
    Mnemonic::parse_normalized(mnemonic).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET_COIN: u32 = 111;

    #[test]
    fn generate_produces_24_words() {
        let mnemonic = generate_mnemonic().unwrap();
        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        assert_eq!(words.len(), 24);
    }

    #[test]
    fn generated_mnemonic_is_valid() {
        let mnemonic = generate_mnemonic().unwrap();
        assert!(validate_mnemonic(&mnemonic));
    }

    #[test]
    fn keypair_from_mnemonic_deterministic() {
        let mnemonic = generate_mnemonic().unwrap();
        let kp1 = keypair_from_mnemonic(&mnemonic, MAINNET_COIN, 0).unwrap();
        let kp2 = keypair_from_mnemonic(&mnemonic, MAINNET_COIN, 0).unwrap();
        assert_eq!(kp1.public.0, kp2.public.0);
        assert_eq!(kp1.private.0, kp2.private.0);
    }

    #[test]
    fn account_index_changes_key() {
        let mnemonic = generate_mnemonic().unwrap();
        let kp0 = keypair_from_mnemonic(&mnemonic, MAINNET_COIN, 0).unwrap();
        let kp1 = keypair_from_mnemonic(&mnemonic, MAINNET_COIN, 1).unwrap();
        assert_ne!(kp0.public.0, kp1.public.0);
    }

    #[test]
    fn coin_type_changes_key() {
        let mnemonic = generate_mnemonic().unwrap();
        let main = keypair_from_mnemonic(&mnemonic, MAINNET_COIN, 0).unwrap();
        let dev = keypair_from_mnemonic(&mnemonic, 1, 0).unwrap();
        assert_ne!(main.public.0, dev.public.0);
    }

    #[test]
    fn invalid_mnemonic_rejected() {
        assert!(!validate_mnemonic("not a valid mnemonic phrase"));
        assert!(!validate_mnemonic(""));
        assert!(keypair_from_mnemonic("invalid words here", MAINNET_COIN, 0).is_err());
    }

    #[test]
    fn bip44_path_format() {
        assert_eq!(bip44_path(111, 0), "m/44'/111'/0'/0/0");
        assert_eq!(bip44_path(1, 5), "m/44'/1'/5'/0/0");
    }
}
