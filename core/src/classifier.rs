//! Signup classification.
//!
//! Decides, per transaction, whether the reward cascade fires. A transaction
//! that merely *looks* like a signup (wrong payload length, dangling pointer,
//! unauthorized sender) is executed as an ordinary value transfer with zero
//! reward effect — block validity never depends on payload interpretation.

use ur_ledger::{ChainReader, PrivilegedConfig, Transaction};
use ur_types::TxHash;

/// First data byte marking a signup transaction.
pub const SIGNUP_MARKER: u8 = 0x01;

/// Payload length of a privileged-origin signup: the marker alone.
pub const PRIVILEGED_PAYLOAD_LEN: usize = 1;

/// Payload length of a member-origin signup: marker, 8-byte big-endian block
/// number, 32-byte hash of the transaction that signed up the sender.
pub const MEMBER_PAYLOAD_LEN: usize = 41;

/// A transaction classified as a signup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupKind {
    /// Sent by a privileged address — the root of a referral chain.
    Privileged,
    /// Sent by an existing member; carries the pointer to the sender's own
    /// signup transaction.
    Member { prior_block: u64, prior_tx: TxHash },
}

/// The payload of a privileged-origin signup.
pub fn privileged_signup_payload() -> Vec<u8> {
    vec![SIGNUP_MARKER]
}

/// The payload of a member-origin signup referencing the sender's own signup.
pub fn member_signup_payload(prior_block: u64, prior_tx: &TxHash) -> Vec<u8> {
    let mut data = Vec::with_capacity(MEMBER_PAYLOAD_LEN);
    data.push(SIGNUP_MARKER);
    data.extend_from_slice(&prior_block.to_be_bytes());
    data.extend_from_slice(prior_tx.as_bytes());
    data
}

/// Parse the pointer out of a member-origin payload.
pub(crate) fn parse_member_pointer(data: &[u8]) -> Option<(u64, TxHash)> {
    if data.len() != MEMBER_PAYLOAD_LEN || data[0] != SIGNUP_MARKER {
        return None;
    }
    let block = u64::from_be_bytes(data[1..9].try_into().ok()?);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[9..MEMBER_PAYLOAD_LEN]);
    Some((block, TxHash::new(hash)))
}

/// Whether a transaction has the shape of a signup: non-zero value, marker
/// byte, and one of the two valid payload lengths.
pub(crate) fn is_signup_shaped(tx: &Transaction) -> bool {
    !tx.value.is_zero()
        && (tx.data.len() == PRIVILEGED_PAYLOAD_LEN || tx.data.len() == MEMBER_PAYLOAD_LEN)
        && tx.data[0] == SIGNUP_MARKER
}

/// Classify a transaction observed in the block at `block_number`.
///
/// Returns `None` for everything that is not a well-formed, authorized
/// signup. A member-origin claim is only accepted when its pointer resolves
/// on the canonical chain to a signup-shaped transaction whose recipient is
/// the claiming sender.
pub fn classify(
    tx: &Transaction,
    privileged: &PrivilegedConfig,
    reader: &dyn ChainReader,
    block_number: u64,
) -> Option<SignupKind> {
    if tx.data.first() != Some(&SIGNUP_MARKER) || tx.value.is_zero() {
        return None;
    }
    // A privileged address cannot itself be signed up.
    if privileged.contains(&tx.to) {
        return None;
    }
    if privileged.contains(&tx.from) {
        return (tx.data.len() == PRIVILEGED_PAYLOAD_LEN).then_some(SignupKind::Privileged);
    }
    let (prior_block, prior_tx) = parse_member_pointer(&tx.data)?;
    // The sender's own signup must precede the block under execution.
    if prior_block >= block_number {
        return None;
    }
    let prior = reader.resolve_tx(prior_block, &prior_tx)?;
    (is_signup_shaped(prior) && prior.to == tx.from).then_some(SignupKind::Member {
        prior_block,
        prior_tx,
    })
}
