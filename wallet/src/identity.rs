//! Signing identity resolution.
//!
//! Exactly one identity mode is active per run: a local passphrase whose
//! key pair lives only for the invocation, or a device-resident account
//! the process never holds the private key of.

use meridian_crypto::address_from_public_key;
use meridian_types::{PublicKey, WalletAddress};

use crate::device::SigningDevice;
use crate::error::WalletError;
use crate::prompt::Prompt;

/// Upper bound on device accounts offered for selection.
pub const ACCOUNT_SCAN_LIMIT: u32 = 10;

/// Who signs this run's transaction.
pub enum SigningIdentity {
    /// Local passphrase; the passphrase itself stays with the signer,
    /// only the derived public half is carried here.
    Passphrase {
        public_key: PublicKey,
        address: WalletAddress,
    },
    /// Device-resident account, selected by the operator.
    Device {
        account_index: u32,
        public_key: PublicKey,
        address: WalletAddress,
    },
}

impl SigningIdentity {
    /// Derive a passphrase identity under the resolved network's version
    /// byte. Pure computation, no I/O.
    pub fn from_passphrase(passphrase: &str, version_byte: u8) -> Result<Self, WalletError> {
        if passphrase.trim().is_empty() {
            return Err(WalletError::Validation(
                "the passphrase must be a non-empty string".to_string(),
            ));
        }
        let keys = meridian_crypto::keypair_from_passphrase(passphrase);
        let address = address_from_public_key(&keys.public, version_byte);
        Ok(Self::Passphrase {
            public_key: keys.public,
            address,
        })
    }

    /// Resolve an identity from a connected device: check support,
    /// enumerate a bounded account list, and let the operator pick one.
    pub async fn from_device(
        device: &dyn SigningDevice,
        prompt: &dyn Prompt,
        coin_type: u32,
    ) -> Result<Self, WalletError> {
        if !device.is_supported().await? {
            return Err(WalletError::DeviceUnavailable(
                "no compatible signing device connected".to_string(),
            ));
        }

        let accounts = device.accounts(coin_type, ACCOUNT_SCAN_LIMIT).await?;
        if accounts.is_empty() {
            return Err(WalletError::DeviceUnavailable(
                "device reported no derivable accounts".to_string(),
            ));
        }

        let index = prompt.select_account(&accounts)?;
        let account = accounts.get(index).ok_or_else(|| {
            WalletError::Validation(format!(
                "account index {index} out of range (device has {})",
                accounts.len()
            ))
        })?;

        let public_key = PublicKey::from_hex(&account.public_key).map_err(|e| {
            WalletError::DeviceUnavailable(format!("device returned malformed public key: {e}"))
        })?;

        Ok(Self::Device {
            account_index: index as u32,
            public_key,
            address: WalletAddress::new(account.address.clone()),
        })
    }

    pub fn address(&self) -> &WalletAddress {
        match self {
            Self::Passphrase { address, .. } | Self::Device { address, .. } => address,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        match self {
            Self::Passphrase { public_key, .. } | Self::Device { public_key, .. } => public_key,
        }
    }

    /// The selected device account index, for derivation-path
    /// reconstruction at signing time.
    pub fn device_account_index(&self) -> Option<u32> {
        match self {
            Self::Device { account_index, .. } => Some(*account_index),
            Self::Passphrase { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: u8 = 0x17;

    #[test]
    fn passphrase_identity_is_deterministic() {
        let a = SigningIdentity::from_passphrase("canyon drift", VERSION).unwrap();
        let b = SigningIdentity::from_passphrase("canyon drift", VERSION).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.device_account_index(), None);
    }

    #[test]
    fn version_byte_changes_address() {
        let main = SigningIdentity::from_passphrase("canyon drift", 0x17).unwrap();
        let dev = SigningIdentity::from_passphrase("canyon drift", 0x1e).unwrap();
        assert_ne!(main.address(), dev.address());
        assert_eq!(main.public_key(), dev.public_key());
    }

    #[test]
    fn empty_passphrase_rejected() {
        assert!(matches!(
            SigningIdentity::from_passphrase("", VERSION),
            Err(WalletError::Validation(_))
        ));
        assert!(matches!(
            SigningIdentity::from_passphrase("   ", VERSION),
            Err(WalletError::Validation(_))
        ));
    }

    #[test]
    fn address_matches_crypto_derivation() {
        let identity = SigningIdentity::from_passphrase("canyon drift", VERSION).unwrap();
        let keys = meridian_crypto::keypair_from_passphrase("canyon drift");
        let expected = address_from_public_key(&keys.public, VERSION);
        assert_eq!(identity.address(), &expected);
    }
}
