use thiserror::Error;
use ur_types::{Address, Wei};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance at {address}: need {needed}, have {available}")]
    InsufficientBalance {
        address: Address,
        needed: Wei,
        available: Wei,
    },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("block {number} does not extend the chain head {head}")]
    NonSequentialBlock { number: u64, head: u64 },

    #[error("rlp: {0}")]
    Rlp(#[from] crate::rlp::RlpError),
}
