//! Wallet address derivation under a network version byte.
//!
//! Address format: base58(payload || checksum), where
//! payload = version_byte || Blake2b-256(public_key)[0..20] (21 bytes) and
//! checksum = Blake2b-256(payload)[0..4].
//!
//! The version byte comes from the resolved network context, never from a
//! static default: the same public key encodes to different addresses on
//! different networks, and the node rejects mismatched versions.

use meridian_types::{PublicKey, WalletAddress};

/// Length of the hashed public key portion of the payload.
const PUBKEY_HASH_LEN: usize = 20;
/// Length of the truncated checksum.
const CHECKSUM_LEN: usize = 4;
/// Decoded address length: 1 (version) + 20 (hash) + 4 (checksum).
const DECODED_LEN: usize = 1 + PUBKEY_HASH_LEN + CHECKSUM_LEN;

/// Derive a wallet address from a public key under a version byte.
pub fn address_from_public_key(public_key: &PublicKey, version_byte: u8) -> WalletAddress {
    let hash = crate::blake2b_256(public_key.as_bytes());

    let mut payload = [0u8; 1 + PUBKEY_HASH_LEN];
    payload[0] = version_byte;
    payload[1..].copy_from_slice(&hash[..PUBKEY_HASH_LEN]);

    let checksum = crate::blake2b_256(&payload);

    let mut full = [0u8; DECODED_LEN];
    full[..payload.len()].copy_from_slice(&payload);
    full[payload.len()..].copy_from_slice(&checksum[..CHECKSUM_LEN]);

    WalletAddress::new(bs58::encode(full).into_string())
}

/// Decode an address and return its version byte if the checksum holds.
pub fn decode_address(address: &str) -> Option<u8> {
    let decoded = bs58::decode(address).into_vec().ok()?;
    if decoded.len() != DECODED_LEN {
        return None;
    }
    let (payload, checksum) = decoded.split_at(1 + PUBKEY_HASH_LEN);
    let expected = crate::blake2b_256(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return None;
    }
    Some(payload[0])
}

/// Validate that an address is well-formed and belongs to the network
/// identified by `version_byte`.
pub fn validate_address(address: &str, version_byte: u8) -> bool {
    decode_address(address) == Some(version_byte)
}
