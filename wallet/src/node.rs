//! Node API seam.
//!
//! The pipeline talks to the network of record through this trait, so
//! tests can count invocations and drive every response shape. The real
//! implementation is `client::ConnectedContext`.

use async_trait::async_trait;
use meridian_transactions::VoteTransaction;
use meridian_types::WalletAddress;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// The delegate an address currently votes for. Fetched fresh each run,
/// never cached across runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegate {
    pub public_key: String,
    pub username: String,
}

/// The node's synchronous answer to a transaction POST.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTransactionResponse {
    /// Absent or `false` both mean rejection.
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub transaction_ids: Option<Vec<String>>,
}

/// Operations the pipeline needs from a connected node.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Address version byte of the resolved network context.
    fn version_byte(&self) -> u8;

    /// SLIP-44 coin type of the resolved network context.
    fn slip44(&self) -> u32;

    /// The delegate currently voted by `address`, or `None` if the
    /// address has not voted.
    async fn current_vote(&self, address: &WalletAddress)
        -> Result<Option<Delegate>, WalletError>;

    /// POST the signed transaction to the node of record.
    async fn post_transaction(
        &self,
        tx: &VoteTransaction,
    ) -> Result<PostTransactionResponse, WalletError>;

    /// Best-effort broadcast to additional peers. Callers treat failure
    /// as non-fatal once the node of record has accepted.
    async fn broadcast(&self, tx: &VoteTransaction) -> Result<(), WalletError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_response_defaults_to_rejection() {
        let resp: PostTransactionResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.success);
        assert!(resp.error.is_none());
        assert!(resp.transaction_ids.is_none());
    }

    #[test]
    fn post_response_parses_acceptance() {
        let resp: PostTransactionResponse =
            serde_json::from_str(r#"{"success":true,"transactionIds":["tx123"]}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.transaction_ids.unwrap(), vec!["tx123"]);
    }

    #[test]
    fn delegate_parses_camel_case() {
        let d: Delegate =
            serde_json::from_str(r#"{"publicKey":"ab","username":"u1"}"#).unwrap();
        assert_eq!(d.public_key, "ab");
        assert_eq!(d.username, "u1");
    }
}
