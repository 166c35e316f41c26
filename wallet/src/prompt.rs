//! Operator prompt capability.
//!
//! Secret input flows through this trait straight into the pipeline and
//! is never echoed into any log sink.

use crate::device::DeviceAccount;
use crate::error::WalletError;

/// Interactive requests the pipeline can make of the operator.
pub trait Prompt: Send + Sync {
    /// Ask for the signing passphrase.
    fn passphrase(&self) -> Result<String, WalletError>;

    /// Ask for the optional second secret. An empty answer means the
    /// account has none.
    fn second_secret(&self) -> Result<String, WalletError>;

    /// Present the derivable device accounts and ask for one index.
    fn select_account(&self, accounts: &[DeviceAccount]) -> Result<usize, WalletError>;

    /// Show a human-readable summary and ask for explicit approval.
    fn confirm(&self, summary: &str) -> Result<bool, WalletError>;
}
