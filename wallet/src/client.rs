//! HTTP client for Meridian nodes and the resolved network context.
//!
//! `ConnectedContext` is the single source of network parameters for a
//! run: every later address derivation and signature reads the version
//! byte resolved here, never a static default.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use meridian_transactions::VoteTransaction;
use meridian_types::{NetworkProfile, WalletAddress};
use meridian_utils::LogSink;
use serde::Deserialize;

use crate::error::WalletError;
use crate::node::{Delegate, NodeApi, PostTransactionResponse};

/// Wraps `reqwest::Client` with a node's base URL and typed methods for
/// each endpoint the pipeline needs.
#[derive(Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct AutoconfigureResponse {
    #[serde(default)]
    success: bool,
    network: Option<AutoconfigureNetwork>,
}

/// Network parameters as reported by a node's autoconfigure endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct AutoconfigureNetwork {
    /// Address version byte in force on the node's network.
    pub version: u8,
    /// SLIP-44 coin type; older nodes omit it.
    #[serde(default)]
    pub slip44: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DelegatesResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    delegates: Vec<Delegate>,
    #[serde(default)]
    error: Option<String>,
}

impl NodeClient {
    /// Create a new client targeting the given base URL
    /// (e.g. `http://node1.meridian.network:4001`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// The configured node URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, WalletError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(map_transport_error)?;
        if !response.status().is_success() {
            return Err(WalletError::Network(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| WalletError::Network(format!("invalid JSON response: {e}")))
    }

    /// Query the node's network parameters.
    pub async fn autoconfigure(&self) -> Result<AutoconfigureNetwork, WalletError> {
        let response: AutoconfigureResponse = self.get_json("/api/loader/autoconfigure").await?;
        if !response.success {
            return Err(WalletError::Network(
                "node refused autoconfigure request".to_string(),
            ));
        }
        response
            .network
            .ok_or_else(|| WalletError::Network("autoconfigure response had no network".into()))
    }

    /// The delegate currently voted by `address`, if any.
    pub async fn delegate_voted_by(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<Delegate>, WalletError> {
        let response: DelegatesResponse = self
            .get_json(&format!("/api/accounts/delegates?address={address}"))
            .await?;
        if !response.success {
            return Err(WalletError::Network(
                response
                    .error
                    .unwrap_or_else(|| "delegate lookup failed".to_string()),
            ));
        }
        Ok(response.delegates.into_iter().next())
    }

    /// POST a signed transaction and return the node's verdict verbatim.
    pub async fn post_transaction(
        &self,
        tx: &VoteTransaction,
    ) -> Result<PostTransactionResponse, WalletError> {
        let response = self
            .http
            .post(format!("{}/peer/transactions", self.base_url))
            .json(&serde_json::json!({ "transactions": [tx] }))
            .send()
            .await
            .map_err(map_transport_error)?;
        if !response.status().is_success() {
            return Err(WalletError::Network(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| WalletError::Network(format!("invalid JSON response: {e}")))
    }
}

fn map_transport_error(e: reqwest::Error) -> WalletError {
    if e.is_timeout() {
        WalletError::Network(format!("request timed out: {e}"))
    } else {
        WalletError::Network(format!("request failed: {e}"))
    }
}

// ── ConnectedContext ────────────────────────────────────────────────────

/// A resolved network context: one chosen node plus the network
/// parameters every downstream step must use.
pub struct ConnectedContext {
    client: NodeClient,
    version_byte: u8,
    slip44: u32,
    peers: Vec<String>,
    sink: Arc<dyn LogSink>,
}

impl ConnectedContext {
    /// Connect to the network described by `profile`.
    ///
    /// With an explicit `node`, the node's autoconfigure endpoint is
    /// authoritative: its reported parameters overwrite the profile's
    /// static ones. Otherwise the registered peers are probed in order
    /// and the static profile parameters stand.
    pub async fn connect(
        profile: &NetworkProfile,
        node: Option<&str>,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self, WalletError> {
        if let Some(node_url) = node {
            let client = NodeClient::new(node_url)?;
            sink.info(&format!("targeting node {node_url}"));
            let network = client.autoconfigure().await?;
            sink.info(&format!(
                "autoconfigured from node: network {}, version byte 0x{:02x}",
                network.name.as_deref().unwrap_or(profile.name),
                network.version
            ));
            return Ok(Self {
                client,
                version_byte: network.version,
                slip44: network.slip44.unwrap_or(profile.slip44),
                peers: profile.peers.iter().map(|p| p.to_string()).collect(),
                sink,
            });
        }

        for peer in profile.peers {
            let client = NodeClient::new(*peer)?;
            sink.info(&format!("probing peer {peer}"));
            match client.autoconfigure().await {
                Ok(_) => {
                    sink.info(&format!("connected to {peer}"));
                    return Ok(Self {
                        client,
                        version_byte: profile.version_byte,
                        slip44: profile.slip44,
                        peers: profile.peers.iter().map(|p| p.to_string()).collect(),
                        sink,
                    });
                }
                Err(e) => sink.warn(&format!("peer {peer} unavailable: {e}")),
            }
        }
        Err(WalletError::Network(format!(
            "no reachable peers for network {}",
            profile.name
        )))
    }

    /// The node this context posts to.
    pub fn node_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl NodeApi for ConnectedContext {
    fn version_byte(&self) -> u8 {
        self.version_byte
    }

    fn slip44(&self) -> u32 {
        self.slip44
    }

    async fn current_vote(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<Delegate>, WalletError> {
        self.sink.info(&format!("fetching current vote for {address}"));
        self.client.delegate_voted_by(address).await
    }

    async fn post_transaction(
        &self,
        tx: &VoteTransaction,
    ) -> Result<PostTransactionResponse, WalletError> {
        self.sink.info("posting transaction to node");
        self.client.post_transaction(tx).await
    }

    async fn broadcast(&self, tx: &VoteTransaction) -> Result<(), WalletError> {
        for peer in &self.peers {
            if peer == self.client.base_url() {
                continue;
            }
            let client = NodeClient::new(peer.clone())?;
            if let Err(e) = client.post_transaction(tx).await {
                self.sink.warn(&format!("broadcast to {peer} failed: {e}"));
            }
        }
        Ok(())
    }
}
