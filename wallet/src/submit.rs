//! Submission and acceptance confirmation.

use meridian_transactions::VoteTransaction;
use serde::Serialize;

use crate::error::WalletError;
use crate::node::NodeApi;

/// Terminal artifact of a successful submission. Never persisted.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionResult {
    pub accepted: bool,
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST the signed transaction and interpret the node's synchronous
/// verdict.
///
/// The node of record is authoritative: a missing or false `success`
/// marker is a rejection; `success` without any transaction id is a
/// protocol inconsistency, not a success. After confirmed acceptance a
/// best-effort peer broadcast runs; its failure is logged and swallowed
/// because the transaction is already accepted.
pub async fn submit(
    node: &dyn NodeApi,
    tx: &VoteTransaction,
) -> Result<SubmissionResult, WalletError> {
    let response = node.post_transaction(tx).await?;

    if !response.success {
        return Err(WalletError::Rejected(response.error.unwrap_or_else(|| {
            "failed to post transaction to the network".to_string()
        })));
    }

    let mut ids = response.transaction_ids.unwrap_or_default();
    if ids.is_empty() {
        return Err(WalletError::ProtocolInconsistency(
            "node accepted the transaction but returned no transaction id".to_string(),
        ));
    }
    let transaction_id = ids.remove(0);

    if let Err(e) = node.broadcast(tx).await {
        tracing::warn!("peer broadcast failed after acceptance: {e}");
    }

    Ok(SubmissionResult {
        accepted: true,
        transaction_id: Some(transaction_id),
        error: None,
    })
}
