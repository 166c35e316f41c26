//! Signing state machine and per-identity signer capabilities.
//!
//! `Unsigned → AwaitingConfirmation → Signing → Signed | Failed`.
//! The pipeline never branches on the identity kind: each variant
//! implements `TxSigner` once and the state machine drives whichever it
//! is handed.

use async_trait::async_trait;
use meridian_transactions::{sign_vote_transaction, VoteTransaction};

use crate::device::SigningDevice;
use crate::error::WalletError;
use crate::prompt::Prompt;

/// States of a transaction on its way to a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignerState {
    Unsigned,
    AwaitingConfirmation,
    Signing,
    Signed,
    Failed,
}

/// Capability that turns an unsigned skeleton into a signed transaction
/// with its id attached.
#[async_trait]
pub trait TxSigner: Send + Sync {
    async fn sign(&self, tx: &mut VoteTransaction) -> Result<(), WalletError>;
}

/// Local signing: signature and id are produced atomically inside the
/// crypto boundary.
pub struct PassphraseSigner {
    pub passphrase: String,
    pub second_secret: Option<String>,
}

#[async_trait]
impl TxSigner for PassphraseSigner {
    async fn sign(&self, tx: &mut VoteTransaction) -> Result<(), WalletError> {
        sign_vote_transaction(tx, &self.passphrase, self.second_secret.as_deref())?;
        Ok(())
    }
}

/// Device signing: the unsigned payload travels to the device with a
/// derivation path; the returned signature is attached and the id is
/// recomputed from the now-signed canonical serialization.
pub struct DeviceSigner<'a> {
    pub device: &'a dyn SigningDevice,
    pub path: String,
}

#[async_trait]
impl TxSigner for DeviceSigner<'_> {
    async fn sign(&self, tx: &mut VoteTransaction) -> Result<(), WalletError> {
        let payload = tx.signing_bytes()?;
        let signature = self.device.sign(&self.path, &payload).await?;
        tx.attach_signature(&signature)?;
        Ok(())
    }
}

/// Optional human-in-the-loop approval before signing.
pub struct ConfirmationGate<'a> {
    pub prompt: &'a dyn Prompt,
    pub summary: String,
}

/// Drive the state machine: gate (if any), then sign.
///
/// Declining the gate short-circuits with `Cancelled` before any
/// signature or network mutation. Signer failure is terminal for the
/// run.
pub async fn sign_transaction(
    tx: &mut VoteTransaction,
    signer: &dyn TxSigner,
    gate: Option<&ConfirmationGate<'_>>,
) -> Result<SignerState, WalletError> {
    let mut state = SignerState::Unsigned;
    tracing::debug!(?state, "transaction built");

    if let Some(gate) = gate {
        state = SignerState::AwaitingConfirmation;
        tracing::debug!(?state, "awaiting operator confirmation");
        if !gate.prompt.confirm(&gate.summary)? {
            tracing::debug!(state = ?SignerState::Failed, "operator declined");
            return Err(WalletError::Cancelled);
        }
    }

    state = SignerState::Signing;
    tracing::debug!(?state, "signing transaction");
    match signer.sign(tx).await {
        Ok(()) => {
            state = SignerState::Signed;
            tracing::debug!(?state, "transaction signed");
            Ok(state)
        }
        Err(e) => {
            tracing::debug!(state = ?SignerState::Failed, "signing failed");
            Err(e)
        }
    }
}
