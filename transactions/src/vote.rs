//! Vote transactions: cast and remove delegate votes.
//!
//! A vote transaction carries an ordered list of vote entries, each a
//! delegate public key (hex) prefixed with `+` (cast) or `-` (remove).
//! An unvote carries exactly one `-` entry.
//!
//! The transaction id is the Blake2b-256 digest of the canonical signed
//! serialization, so it can only be computed once every signature is
//! attached.

use meridian_types::{KeyPair, Signature, WalletAddress};
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;

/// Wire value of the vote transaction type.
pub const TYPE_VOTE: u8 = 3;

/// A vote transaction in the node's JSON wire shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTransaction {
    #[serde(rename = "type")]
    pub tx_type: u8,
    /// Hex-encoded public key of the sender.
    pub sender_public_key: String,
    /// The sender's own address; the node echoes it back for vote types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    /// Vote entries, `+<pubkey>` or `-<pubkey>`.
    pub votes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Second-factor signature, present only for accounts with a second secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl VoteTransaction {
    /// Build an unsigned unvote skeleton: one `-` entry for the delegate
    /// currently voted by the sender. `signature` and `id` stay absent
    /// until a signer runs.
    pub fn unvote(
        sender_public_key: impl Into<String>,
        recipient: &WalletAddress,
        delegate_public_key: &str,
    ) -> Self {
        Self {
            tx_type: TYPE_VOTE,
            sender_public_key: sender_public_key.into(),
            recipient_id: Some(recipient.as_str().to_string()),
            votes: vec![format!("-{delegate_public_key}")],
            signature: None,
            sign_signature: None,
            id: None,
        }
    }

    /// Canonical bytes covered by the first signature: type byte, sender
    /// public key bytes, recipient address, vote entries. Signatures and
    /// id are excluded.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let sender = hex::decode(&self.sender_public_key)
            .map_err(|e| TransactionError::InvalidSenderKey(e.to_string()))?;
        if sender.len() != 32 {
            return Err(TransactionError::InvalidSenderKey(format!(
                "expected 32 bytes, got {}",
                sender.len()
            )));
        }

        for entry in &self.votes {
            let valid = (entry.starts_with('+') || entry.starts_with('-'))
                && entry.len() == 65
                && hex::decode(&entry[1..]).map(|b| b.len() == 32).unwrap_or(false);
            if !valid {
                return Err(TransactionError::InvalidVoteEntry(entry.clone()));
            }
        }

        let mut bytes = Vec::with_capacity(128);
        bytes.push(self.tx_type);
        bytes.extend_from_slice(&sender);
        if let Some(recipient) = &self.recipient_id {
            bytes.extend_from_slice(recipient.as_bytes());
        }
        for entry in &self.votes {
            bytes.extend_from_slice(entry.as_bytes());
        }
        Ok(bytes)
    }

    /// Canonical bytes of the fully signed transaction: signing bytes
    /// followed by the attached signature(s).
    pub fn signed_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let signature = self.signature.as_ref().ok_or(TransactionError::Unsigned)?;
        let mut bytes = self.signing_bytes()?;
        bytes.extend_from_slice(
            &hex::decode(signature).map_err(|e| TransactionError::Signing(e.to_string()))?,
        );
        if let Some(second) = &self.sign_signature {
            bytes.extend_from_slice(
                &hex::decode(second).map_err(|e| TransactionError::Signing(e.to_string()))?,
            );
        }
        Ok(bytes)
    }

    /// Content digest of the signed serialization: the transaction id.
    pub fn compute_id(&self) -> Result<String, TransactionError> {
        Ok(meridian_crypto::transaction_digest(&self.signed_bytes()?))
    }

    /// Attach an externally produced signature (device path) and recompute
    /// the id from the now-signed payload.
    pub fn attach_signature(&mut self, signature: &Signature) -> Result<(), TransactionError> {
        self.signature = Some(signature.to_hex());
        self.id = Some(self.compute_id()?);
        Ok(())
    }
}

/// Sign a vote transaction with a passphrase, atomically producing the
/// signature(s) and the id.
///
/// This is the trusted primitive for the local-passphrase path: the sender
/// key is re-derived from the passphrase, the first signature covers the
/// canonical payload, the optional second signature covers payload plus
/// first signature, and the id is the digest of the final serialization.
pub fn sign_vote_transaction(
    tx: &mut VoteTransaction,
    passphrase: &str,
    second_secret: Option<&str>,
) -> Result<(), TransactionError> {
    let keys: KeyPair = meridian_crypto::keypair_from_passphrase(passphrase);
    tx.sender_public_key = keys.public.to_hex();

    let payload = tx.signing_bytes()?;
    let first = meridian_crypto::sign_message(&payload, &keys.private);
    tx.signature = Some(first.to_hex());

    if let Some(secret) = second_secret {
        let second_keys = meridian_crypto::keypair_from_passphrase(secret);
        let mut second_payload = payload;
        second_payload.extend_from_slice(first.as_bytes());
        let second = meridian_crypto::sign_message(&second_payload, &second_keys.private);
        tx.sign_signature = Some(second.to_hex());
    }

    tx.id = Some(tx.compute_id()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_crypto::{address_from_public_key, keypair_from_passphrase};

    const VERSION: u8 = 0x17;

    fn delegate_key() -> String {
        hex::encode([0xD1u8; 32])
    }

    fn build_skeleton(passphrase: &str) -> VoteTransaction {
        let keys = keypair_from_passphrase(passphrase);
        let address = address_from_public_key(&keys.public, VERSION);
        VoteTransaction::unvote(keys.public.to_hex(), &address, &delegate_key())
    }

    #[test]
    fn unvote_has_single_removal_entry() {
        let tx = build_skeleton("test passphrase");
        assert_eq!(tx.votes.len(), 1);
        assert!(tx.votes[0].starts_with('-'));
        assert_eq!(&tx.votes[0][1..], delegate_key());
        assert!(tx.signature.is_none());
        assert!(tx.id.is_none());
    }

    #[test]
    fn skeleton_serializes_without_signature_or_id() {
        let tx = build_skeleton("test passphrase");
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("signature").is_none());
        assert!(json.get("id").is_none());
        assert!(json.get("senderPublicKey").is_some());
        assert_eq!(json.get("type").unwrap(), 3);
    }

    #[test]
    fn signing_is_deterministic() {
        let mut tx1 = build_skeleton("same inputs");
        let mut tx2 = build_skeleton("same inputs");
        sign_vote_transaction(&mut tx1, "same inputs", None).unwrap();
        sign_vote_transaction(&mut tx2, "same inputs", None).unwrap();
        assert_eq!(tx1.id, tx2.id);
        assert_eq!(tx1.signature, tx2.signature);
    }

    #[test]
    fn changing_delegate_changes_id() {
        let keys = keypair_from_passphrase("voter");
        let address = address_from_public_key(&keys.public, VERSION);
        let mut tx1 = VoteTransaction::unvote(keys.public.to_hex(), &address, &delegate_key());
        let mut tx2 =
            VoteTransaction::unvote(keys.public.to_hex(), &address, &hex::encode([0xD2u8; 32]));
        sign_vote_transaction(&mut tx1, "voter", None).unwrap();
        sign_vote_transaction(&mut tx2, "voter", None).unwrap();
        assert_ne!(tx1.id, tx2.id);
    }

    #[test]
    fn changing_sender_changes_id() {
        let mut tx1 = build_skeleton("sender one");
        let mut tx2 = build_skeleton("sender two");
        sign_vote_transaction(&mut tx1, "sender one", None).unwrap();
        sign_vote_transaction(&mut tx2, "sender two", None).unwrap();
        assert_ne!(tx1.id, tx2.id);
    }

    #[test]
    fn second_secret_adds_signature_and_changes_id() {
        let mut plain = build_skeleton("voter");
        let mut dual = build_skeleton("voter");
        sign_vote_transaction(&mut plain, "voter", None).unwrap();
        sign_vote_transaction(&mut dual, "voter", Some("second")).unwrap();
        assert!(plain.sign_signature.is_none());
        assert!(dual.sign_signature.is_some());
        assert_ne!(plain.id, dual.id);
    }

    #[test]
    fn signature_verifies_against_sender_key() {
        let mut tx = build_skeleton("voter");
        sign_vote_transaction(&mut tx, "voter", None).unwrap();

        let payload = tx.signing_bytes().unwrap();
        let public = meridian_types::PublicKey::from_hex(&tx.sender_public_key).unwrap();
        let signature =
            meridian_types::Signature::from_hex(tx.signature.as_deref().unwrap()).unwrap();
        assert!(meridian_crypto::verify_signature(&payload, &signature, &public));
    }

    #[test]
    fn id_requires_signature() {
        let tx = build_skeleton("voter");
        assert!(matches!(tx.compute_id(), Err(TransactionError::Unsigned)));
    }

    #[test]
    fn attach_signature_computes_id() {
        let mut tx = build_skeleton("voter");
        let keys = keypair_from_passphrase("voter");
        let sig = meridian_crypto::sign_message(&tx.signing_bytes().unwrap(), &keys.private);
        tx.attach_signature(&sig).unwrap();
        assert_eq!(tx.id.as_deref().unwrap(), tx.compute_id().unwrap());
    }

    #[test]
    fn malformed_vote_entry_rejected() {
        let mut tx = build_skeleton("voter");
        tx.votes = vec!["no-prefix".to_string()];
        assert!(matches!(
            tx.signing_bytes(),
            Err(TransactionError::InvalidVoteEntry(_))
        ));
    }

    #[test]
    fn malformed_sender_key_rejected() {
        let mut tx = build_skeleton("voter");
        tx.sender_public_key = "abcd".to_string();
        assert!(matches!(
            tx.signing_bytes(),
            Err(TransactionError::InvalidSenderKey(_))
        ));
    }

    #[test]
    fn wire_roundtrip() {
        let mut tx = build_skeleton("voter");
        sign_vote_transaction(&mut tx, "voter", Some("second")).unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        let back: VoteTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
