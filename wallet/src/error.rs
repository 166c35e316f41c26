//! Pipeline error taxonomy.
//!
//! Every variant is fatal for the run; the operator re-invokes the
//! command after fixing the cause. The single recovered case, peer
//! broadcast failure after confirmed node acceptance, never surfaces
//! here (see `submit`).

use meridian_transactions::TransactionError;
use meridian_types::UnknownNetwork;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    /// Unknown network name; rejected before any network or device call.
    #[error(transparent)]
    Configuration(#[from] UnknownNetwork),

    /// Malformed operator input (empty passphrase, bad selection).
    #[error("validation error: {0}")]
    Validation(String),

    /// No compatible signing device is connected.
    #[error("signing device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The device rejected the payload, timed out, or disconnected.
    #[error("device signing failed: {0}")]
    DeviceSigning(String),

    /// The address has never voted; an unvote is meaningless.
    #[error("address {0} has no active vote")]
    NoActiveVote(String),

    /// Node unreachable, timeout, or malformed response transport.
    #[error("network error: {0}")]
    Network(String),

    /// The node's synchronous response refused the transaction.
    #[error("transaction rejected by node: {0}")]
    Rejected(String),

    /// The node's response violated the accept/id contract; indicates a
    /// node/client mismatch and is flagged distinctly from a rejection.
    #[error("inconsistent node response: {0}")]
    ProtocolInconsistency(String),

    /// The operator declined the confirmation gate. Terminal, but not a
    /// fault: nothing was signed or submitted.
    #[error("transaction cancelled by operator")]
    Cancelled,

    /// Reading operator input failed (closed stdin, I/O error).
    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
