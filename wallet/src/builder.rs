//! Unvote transaction construction.

use meridian_transactions::VoteTransaction;

use crate::identity::SigningIdentity;
use crate::node::Delegate;

/// Build the unsigned unvote skeleton: a single `-` vote entry for the
/// delegate the sender currently votes for. Signature and id are left
/// absent; how they get attached depends on the identity variant (see
/// `signer`).
pub fn build_unvote(identity: &SigningIdentity, delegate: &Delegate) -> VoteTransaction {
    VoteTransaction::unvote(
        identity.public_key().to_hex(),
        identity.address(),
        &delegate.public_key,
    )
}
