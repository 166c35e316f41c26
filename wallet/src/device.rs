//! Hardware signing device interface.
//!
//! The process never holds device-resident private keys; it sends the
//! unsigned canonical payload plus a BIP44 derivation path and receives a
//! signature back. The concrete transport is a local signing bridge
//! daemon speaking HTTP on loopback; tests substitute the trait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use meridian_types::Signature;
use meridian_utils::LogSink;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Default loopback endpoint of the signing bridge daemon.
pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:21213";

/// How long to wait for the operator to approve on the device itself.
const DEVICE_INTERACTION_TIMEOUT: Duration = Duration::from_secs(120);

/// One derivable account reported by the device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAccount {
    /// Derivation path the device used for this account.
    pub path: String,
    /// Hex-encoded public key.
    pub public_key: String,
    pub address: String,
}

/// The hardened BIP44 signing path for an account index:
/// `44'/<coin_type>'/<account_index>'/0/0`.
pub fn derivation_path(coin_type: u32, account_index: u32) -> String {
    format!("44'/{coin_type}'/{account_index}'/0/0")
}

/// A connected hardware signing device.
#[async_trait]
pub trait SigningDevice: Send + Sync {
    /// Whether a compatible device is connected and unlocked.
    async fn is_supported(&self) -> Result<bool, WalletError>;

    /// Enumerate up to `count` derivable accounts for the coin type.
    async fn accounts(&self, coin_type: u32, count: u32)
        -> Result<Vec<DeviceAccount>, WalletError>;

    /// Sign `payload` with the key at `path`. Blocks until the operator
    /// approves or rejects on the device, bounded by the interaction
    /// timeout.
    async fn sign(&self, path: &str, payload: &[u8]) -> Result<Signature, WalletError>;
}

// ── Bridge transport ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct BridgeStatus {
    #[serde(default)]
    connected: bool,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct BridgeAccounts {
    #[serde(default)]
    accounts: Vec<DeviceAccount>,
}

#[derive(Deserialize)]
struct BridgeSignature {
    #[serde(default)]
    signature: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the local signing bridge daemon.
pub struct BridgeDevice {
    http: reqwest::Client,
    base_url: String,
    sink: Arc<dyn LogSink>,
}

impl BridgeDevice {
    /// Create a bridge client targeting `base_url` (e.g. the default
    /// loopback endpoint).
    pub fn new(base_url: impl Into<String>, sink: Arc<dyn LogSink>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(DEVICE_INTERACTION_TIMEOUT)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                WalletError::DeviceUnavailable(format!("failed to create bridge client: {e}"))
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            sink,
        })
    }
}

#[async_trait]
impl SigningDevice for BridgeDevice {
    async fn is_supported(&self) -> Result<bool, WalletError> {
        let status: BridgeStatus = self
            .http
            .get(format!("{}/status", self.base_url))
            .send()
            .await
            .map_err(|e| WalletError::DeviceUnavailable(format!("bridge unreachable: {e}")))?
            .json()
            .await
            .map_err(|e| WalletError::DeviceUnavailable(format!("invalid bridge response: {e}")))?;

        if status.connected {
            self.sink.info(&format!(
                "signing device connected: {}",
                status.model.as_deref().unwrap_or("unknown model")
            ));
        }
        Ok(status.connected)
    }

    async fn accounts(
        &self,
        coin_type: u32,
        count: u32,
    ) -> Result<Vec<DeviceAccount>, WalletError> {
        self.sink.info("enumerating device accounts");
        let response: BridgeAccounts = self
            .http
            .post(format!("{}/accounts", self.base_url))
            .json(&serde_json::json!({ "coinType": coin_type, "count": count }))
            .send()
            .await
            .map_err(|e| WalletError::DeviceUnavailable(format!("bridge request failed: {e}")))?
            .json()
            .await
            .map_err(|e| WalletError::DeviceUnavailable(format!("invalid bridge response: {e}")))?;
        Ok(response.accounts)
    }

    async fn sign(&self, path: &str, payload: &[u8]) -> Result<Signature, WalletError> {
        self.sink.info("waiting for approval on the device");
        let response = self
            .http
            .post(format!("{}/sign", self.base_url))
            .json(&serde_json::json!({ "path": path, "payload": hex::encode(payload) }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WalletError::DeviceSigning("device interaction timed out".to_string())
                } else {
                    WalletError::DeviceSigning(format!("device disconnected: {e}"))
                }
            })?;

        let body: BridgeSignature = response
            .json()
            .await
            .map_err(|e| WalletError::DeviceSigning(format!("invalid bridge response: {e}")))?;

        if let Some(error) = body.error {
            return Err(WalletError::DeviceSigning(error));
        }
        let signature = body
            .signature
            .ok_or_else(|| WalletError::DeviceSigning("bridge returned no signature".into()))?;
        Signature::from_hex(&signature)
            .map_err(|e| WalletError::DeviceSigning(format!("malformed signature: {e}")))
    }
}
