use thiserror::Error;
use ur_ledger::LedgerError;
use ur_types::Wei;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("block {number} does not follow parent {parent}")]
    NonSequentialBlock { number: u64, parent: u64 },

    #[error("parent hash mismatch at block {number}")]
    ParentHashMismatch { number: u64 },

    #[error("{field} mismatch: header declares {declared}, replay computed {computed}")]
    CounterMismatch {
        field: &'static str,
        declared: Wei,
        computed: Wei,
    },

    #[error("state root mismatch at block {number}")]
    StateRootMismatch { number: u64 },

    #[error("privileged mapping is empty")]
    NoPrivilegedEntries,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
