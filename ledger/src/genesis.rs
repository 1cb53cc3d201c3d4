//! Genesis configuration — the consensus constants fixed at chain birth.
//!
//! The privileged mapping is loaded here once and threaded through the
//! state-transition context as an immutable record; there is no runtime
//! mutation path.

use crate::block::Block;
use crate::header::{BlockHeader, GENESIS_GAS_LIMIT};
use crate::state::{MemoryState, State};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ur_rewards::ReductionFactor;
use ur_types::{Address, BlockHash, NetworkId, Wei};

/// The addresses paired with one privileged sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegedEntry {
    /// Accrues management fees and unclaimed ancestor remainders.
    pub receiver: Address,
    /// Accrues the fixed per-signup UR Future Fund grant.
    pub ur_future_fund: Address,
}

/// The consensus-constant privileged mapping.
///
/// Ordered by address so that every node picks the same fallback entry when
/// a referral walk cannot reach its root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegedConfig {
    entries: BTreeMap<Address, PrivilegedEntry>,
}

impl PrivilegedConfig {
    pub fn from_entries(entries: impl IntoIterator<Item = (Address, PrivilegedEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, sender: &Address) -> Option<&PrivilegedEntry> {
        self.entries.get(sender)
    }

    pub fn contains(&self, sender: &Address) -> bool {
        self.entries.contains_key(sender)
    }

    /// The entry of the smallest privileged address — the deterministic
    /// fallback when a referral root cannot be resolved.
    pub fn first_entry(&self) -> Option<&PrivilegedEntry> {
        self.entries.values().next()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &PrivilegedEntry)> {
        self.entries.iter()
    }
}

/// Everything a node needs to construct block zero and its state.
#[derive(Clone, Debug)]
pub struct GenesisConfig {
    pub network: NetworkId,
    /// Initial balance map.
    pub balances: Vec<(Address, Wei)>,
    /// The privileged sender mapping.
    pub privileged: PrivilegedConfig,
    /// Optional override of the reward reduction table.
    pub reduction_override: Option<Vec<ReductionFactor>>,
}

impl GenesisConfig {
    /// A single-privileged-sender dev chain with well-known addresses and a
    /// funded privileged account. Used by the dev network and tests.
    pub fn dev(
        privileged_sender: Address,
        receiver: Address,
        ur_future_fund: Address,
        funds: Wei,
    ) -> Self {
        Self {
            network: NetworkId::Dev,
            balances: vec![(privileged_sender, funds)],
            privileged: PrivilegedConfig::from_entries([(
                privileged_sender,
                PrivilegedEntry {
                    receiver,
                    ur_future_fund,
                },
            )]),
            reduction_override: None,
        }
    }

    /// The default dev chain: fixed addresses, privileged sender funded with
    /// one UR.
    pub fn default_dev() -> Self {
        Self::dev(
            Address::new([0x5d; 20]),
            Address::new([0x59; 20]),
            Address::new([0x46; 20]),
            Wei::from_ur(1),
        )
    }

    /// Build the genesis block and the seeded state.
    ///
    /// Deterministic: the same config always yields the same genesis hash.
    pub fn build(&self) -> (Block, MemoryState) {
        let state = MemoryState::with_balances(self.balances.iter().copied());
        let header = BlockHeader {
            parent_hash: BlockHash::ZERO,
            coinbase: Address::ZERO,
            state_root: state.state_root(),
            tx_root: Block::compute_tx_root(&[]),
            receipts_root: BlockHash::ZERO,
            number: 0,
            gas_limit: GENESIS_GAS_LIMIT,
            gas_used: 0,
            timestamp: self.network.genesis_timestamp(),
            extra_data: self.network.as_str().as_bytes().to_vec(),
            mix_digest: BlockHash::ZERO,
            nonce: [0u8; 8],
            n_signups: Wei::ZERO,
            total_wei: Wei::ZERO,
        };
        (
            Block {
                header,
                transactions: Vec::new(),
            },
            state,
        )
    }
}
