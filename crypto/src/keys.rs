//! Ed25519 key generation and derivation.

use ed25519_dalek::SigningKey;
use meridian_types::{KeyPair, PrivateKey, PublicKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Generate a new Ed25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();
    KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    let verifying_key = signing_key.verifying_key();
    PublicKey(verifying_key.to_bytes())
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    let verifying_key = signing_key.verifying_key();
    KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive a key pair from a passphrase (deterministic, no I/O).
///
/// The SHA-256 digest of the UTF-8 passphrase bytes is used as the
/// Ed25519 seed. The same passphrase always yields the same key pair.
pub fn keypair_from_passphrase(passphrase: &str) -> KeyPair {
    let digest = Sha256::digest(passphrase.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    keypair_from_seed(&seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_keypair() {
        let kp = generate_keypair();
        assert_ne!(kp.public.0, [0u8; 32]);
        assert_ne!(kp.private.0, [0u8; 32]);
    }

    #[test]
    fn public_from_private_is_deterministic() {
        let kp = generate_keypair();
        let pub2 = public_from_private(&kp.private);
        assert_eq!(kp.public.0, pub2.0);
    }

    #[test]
    fn keypair_from_seed_deterministic() {
        let seed = [42u8; 32];
        let kp1 = keypair_from_seed(&seed);
        let kp2 = keypair_from_seed(&seed);
        assert_eq!(kp1.public.0, kp2.public.0);
        assert_eq!(kp1.private.0, kp2.private.0);
    }

    #[test]
    fn different_seeds_produce_different_keys() {
        let kp1 = keypair_from_seed(&[1u8; 32]);
        let kp2 = keypair_from_seed(&[2u8; 32]);
        assert_ne!(kp1.public.0, kp2.public.0);
    }

    #[test]
    fn passphrase_derivation_deterministic() {
        let kp1 = keypair_from_passphrase("spare tent horse glue");
        let kp2 = keypair_from_passphrase("spare tent horse glue");
        assert_eq!(kp1.public.0, kp2.public.0);
        assert_eq!(kp1.private.0, kp2.private.0);
    }

    #[test]
    fn different_passphrases_produce_different_keys() {
        let kp1 = keypair_from_passphrase("one");
        let kp2 = keypair_from_passphrase("two");
        assert_ne!(kp1.public.0, kp2.public.0);
    }
}
