//! Meridian transaction types.
//!
//! The wallet CLI only builds vote transactions (cast and removal); the
//! wire shape matches the node's JSON API (camelCase fields, hex-encoded
//! keys and signatures).

pub mod error;
pub mod vote;

pub use error::TransactionError;
pub use vote::{sign_vote_transaction, VoteTransaction, TYPE_VOTE};
