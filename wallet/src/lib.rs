//! The Meridian unvote pipeline.
//!
//! Coordinates everything between the operator's intent and a confirmed
//! vote-removal transaction on the network:
//! - Network context resolution and node targeting
//! - Signing identity (local passphrase or hardware device account)
//! - Current-vote lookup for the signing address
//! - Transaction construction, confirmation gate, signing
//! - Submission and acceptance confirmation, with best-effort broadcast
//!
//! External systems (node, device, operator prompt) sit behind traits so
//! the pipeline can be exercised with mocks.

pub mod builder;
pub mod client;
pub mod device;
pub mod error;
pub mod identity;
pub mod node;
pub mod pipeline;
pub mod prompt;
pub mod signer;
pub mod submit;

pub use client::{ConnectedContext, NodeClient};
pub use device::{derivation_path, BridgeDevice, DeviceAccount, SigningDevice};
pub use error::WalletError;
pub use identity::SigningIdentity;
pub use node::{Delegate, NodeApi, PostTransactionResponse};
pub use pipeline::{IdentitySource, SecondSecret, UnvoteOutcome, UnvotePipeline};
pub use prompt::Prompt;
pub use signer::{ConfirmationGate, DeviceSigner, PassphraseSigner, SignerState, TxSigner};
pub use submit::{submit, SubmissionResult};
