//! Blake2b hashing for transaction content digests.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Content digest of a transaction's canonical signed serialization,
/// hex-encoded. This is the transaction's network identifier.
pub fn transaction_digest(signed_bytes: &[u8]) -> String {
    hex::encode(blake2b_256(signed_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_deterministic() {
        let h1 = blake2b_256(b"hello meridian");
        let h2 = blake2b_256(b"hello meridian");
        assert_eq!(h1, h2);
    }

    #[test]
    fn different_input_different_hash() {
        assert_ne!(blake2b_256(b"a"), blake2b_256(b"b"));
    }

    #[test]
    fn multi_matches_concatenation() {
        let concat = blake2b_256(b"helloworld");
        let multi = blake2b_256_multi(&[b"hello", b"world"]);
        assert_eq!(concat, multi);
    }

    #[test]
    fn digest_is_hex_of_hash() {
        let digest = transaction_digest(b"payload");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hex::encode(blake2b_256(b"payload")));
    }
}
