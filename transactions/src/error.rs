use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("invalid sender public key: {0}")]
    InvalidSenderKey(String),

    #[error("invalid vote entry: {0}")]
    InvalidVoteEntry(String),

    #[error("transaction is not signed")]
    Unsigned,

    #[error("signing failed: {0}")]
    Signing(String),
}
