//! The UR ledger data model.
//!
//! Transactions, the extended block header (with the `n_signups` / `total_wei`
//! consensus counters) and its canonical RLP codec, blocks, genesis
//! configuration, and the state / chain-reader capabilities the reward core
//! executes against.

pub mod block;
pub mod chain;
pub mod error;
pub mod genesis;
pub mod header;
pub mod rlp;
pub mod state;
pub mod transaction;

pub use block::Block;
pub use chain::{ChainReader, MemoryChain};
pub use error::LedgerError;
pub use genesis::{GenesisConfig, PrivilegedConfig, PrivilegedEntry};
pub use header::{BlockHeader, GENESIS_GAS_LIMIT};
pub use rlp::RlpError;
pub use state::{MemoryState, State};
pub use transaction::{Transaction, TRANSFER_GAS};
