//! The unvote pipeline: strict ordering from resolved network context to
//! confirmed acceptance.
//!
//! Order: identity resolution → current-vote lookup → build →
//! confirmation gate → sign → submit. Each step is a blocking suspension
//! point; nothing later starts before everything earlier finished.
//! Secrets are scoped to one `run` call and dropped with it.

use serde::Serialize;

use crate::builder;
use crate::device::{derivation_path, SigningDevice};
use crate::error::WalletError;
use crate::identity::SigningIdentity;
use crate::node::NodeApi;
use crate::prompt::Prompt;
use crate::signer::{sign_transaction, ConfirmationGate, DeviceSigner, PassphraseSigner};
use crate::submit::submit;

/// How the run obtains its second secret.
pub enum SecondSecret {
    /// The account has no second secret.
    None,
    /// Supplied on the command line.
    Value(String),
    /// Ask the operator.
    PromptOperator,
}

/// Where the signing identity comes from.
pub enum IdentitySource<'a> {
    /// Local passphrase, prompted for when not supplied.
    Passphrase {
        passphrase: Option<String>,
        second_secret: SecondSecret,
    },
    /// A connected hardware signing device.
    Device(&'a dyn SigningDevice),
}

/// What a successful run reports to the operator.
#[derive(Clone, Debug, Serialize)]
pub struct UnvoteOutcome {
    pub delegate: String,
    pub transaction_id: String,
}

enum PreparedSigner<'a> {
    Passphrase(PassphraseSigner),
    Device(&'a dyn SigningDevice),
}

/// One unvote invocation against a resolved network context.
pub struct UnvotePipeline<'a> {
    pub node: &'a dyn NodeApi,
    pub prompt: &'a dyn Prompt,
}

impl UnvotePipeline<'_> {
    /// Run the pipeline to completion.
    ///
    /// With `interactive` set, the operator must approve a summary of the
    /// action before anything is signed or submitted.
    pub async fn run(
        &self,
        source: IdentitySource<'_>,
        interactive: bool,
    ) -> Result<UnvoteOutcome, WalletError> {
        // Identity resolution. Input validation happens here, before the
        // first node call.
        let (identity, prepared) = match source {
            IdentitySource::Passphrase {
                passphrase,
                second_secret,
            } => {
                let passphrase = match passphrase {
                    Some(p) => p,
                    None => self.prompt.passphrase()?,
                };
                let second_secret = match second_secret {
                    SecondSecret::None => None,
                    SecondSecret::Value(value) => normalize_secret(value),
                    SecondSecret::PromptOperator => normalize_secret(self.prompt.second_secret()?),
                };
                let identity =
                    SigningIdentity::from_passphrase(&passphrase, self.node.version_byte())?;
                (
                    identity,
                    PreparedSigner::Passphrase(PassphraseSigner {
                        passphrase,
                        second_secret,
                    }),
                )
            }
            IdentitySource::Device(device) => {
                let identity =
                    SigningIdentity::from_device(device, self.prompt, self.node.slip44()).await?;
                (identity, PreparedSigner::Device(device))
            }
        };

        // Current-vote lookup; an address that never voted cannot unvote.
        let delegate = self
            .node
            .current_vote(identity.address())
            .await?
            .ok_or_else(|| WalletError::NoActiveVote(identity.address().to_string()))?;

        let mut tx = builder::build_unvote(&identity, &delegate);

        let gate = interactive.then(|| ConfirmationGate {
            prompt: self.prompt,
            summary: format!(
                "Removing vote for {} now. Are you sure? Y(es)/N(o)",
                delegate.username
            ),
        });

        match prepared {
            PreparedSigner::Passphrase(signer) => {
                sign_transaction(&mut tx, &signer, gate.as_ref()).await?;
            }
            PreparedSigner::Device(device) => {
                // The account index was fixed during identity resolution;
                // rebuild the device path from it.
                let account_index = identity.device_account_index().ok_or_else(|| {
                    WalletError::Validation("device identity lost its account index".to_string())
                })?;
                let signer = DeviceSigner {
                    device,
                    path: derivation_path(self.node.slip44(), account_index),
                };
                sign_transaction(&mut tx, &signer, gate.as_ref()).await?;
            }
        }

        let result = submit(self.node, &tx).await?;
        let Some(transaction_id) = result.transaction_id else {
            return Err(WalletError::ProtocolInconsistency(
                "submission reported success without a transaction id".to_string(),
            ));
        };

        Ok(UnvoteOutcome {
            delegate: delegate.username,
            transaction_id,
        })
    }
}

/// An empty second secret means the account has none.
fn normalize_secret(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
