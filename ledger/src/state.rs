//! The state capability consumed by the reward core.

use crate::error::LedgerError;
use crate::rlp;
use std::collections::BTreeMap;
use ur_types::{Address, BlockHash, Wei};

/// Account-balance state as the state transition sees it.
///
/// Reward credits are newly issued wei, so `add_balance` is infallible;
/// only debits can fail.
pub trait State {
    fn balance(&self, address: &Address) -> Wei;

    fn add_balance(&mut self, address: &Address, amount: Wei);

    fn sub_balance(&mut self, address: &Address, amount: Wei) -> Result<(), LedgerError>;

    /// Deterministic commitment over the full balance set.
    fn state_root(&self) -> BlockHash;
}

/// In-memory account state.
///
/// Balances are kept in a `BTreeMap` so the state root is independent of
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryState {
    balances: BTreeMap<Address, Wei>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances(balances: impl IntoIterator<Item = (Address, Wei)>) -> Self {
        Self {
            balances: balances.into_iter().collect(),
        }
    }

    /// Number of accounts with a non-zero balance.
    pub fn account_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }
}

impl State for MemoryState {
    fn balance(&self, address: &Address) -> Wei {
        self.balances.get(address).copied().unwrap_or(Wei::ZERO)
    }

    fn add_balance(&mut self, address: &Address, amount: Wei) {
        if amount.is_zero() {
            return;
        }
        let entry = self.balances.entry(*address).or_insert(Wei::ZERO);
        *entry += amount;
    }

    fn sub_balance(&mut self, address: &Address, amount: Wei) -> Result<(), LedgerError> {
        let available = self.balance(address);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    address: *address,
                    needed: amount,
                    available,
                })?;
        self.balances.insert(*address, remaining);
        Ok(())
    }

    fn state_root(&self) -> BlockHash {
        // The root is the digest of the RLP list of (address, balance)
        // pairs in address order, zero balances skipped.
        let mut items = Vec::with_capacity(self.balances.len() * 56);
        for (address, balance) in &self.balances {
            if balance.is_zero() {
                continue;
            }
            rlp::encode_bytes(&mut items, address.as_bytes());
            rlp::encode_uint(&mut items, balance.raw());
        }
        BlockHash::new(rlp::digest(&rlp::encode_list(&items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn missing_account_has_zero_balance() {
        let state = MemoryState::new();
        assert_eq!(state.balance(&addr(1)), Wei::ZERO);
    }

    #[test]
    fn add_then_sub() {
        let mut state = MemoryState::new();
        state.add_balance(&addr(1), Wei::from_ur(5));
        state.sub_balance(&addr(1), Wei::from_ur(2)).unwrap();
        assert_eq!(state.balance(&addr(1)), Wei::from_ur(3));
    }

    #[test]
    fn overdraw_is_an_error() {
        let mut state = MemoryState::new();
        state.add_balance(&addr(1), Wei::from_wei(10));
        let err = state.sub_balance(&addr(1), Wei::from_wei(11)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        // Balance untouched after the failed debit.
        assert_eq!(state.balance(&addr(1)), Wei::from_wei(10));
    }

    #[test]
    fn state_root_ignores_insertion_order() {
        let a = MemoryState::with_balances([
            (addr(1), Wei::from_ur(1)),
            (addr(2), Wei::from_ur(2)),
        ]);
        let b = MemoryState::with_balances([
            (addr(2), Wei::from_ur(2)),
            (addr(1), Wei::from_ur(1)),
        ]);
        assert_eq!(a.state_root(), b.state_root());
    }

    #[test]
    fn state_root_ignores_zero_balances() {
        let mut a = MemoryState::with_balances([(addr(1), Wei::from_ur(1))]);
        let b = a.clone();
        a.add_balance(&addr(9), Wei::ZERO);
        a.add_balance(&addr(3), Wei::from_wei(1));
        a.sub_balance(&addr(3), Wei::from_wei(1)).unwrap();
        assert_eq!(a.state_root(), b.state_root());
    }

    #[test]
    fn state_root_tracks_balances() {
        let mut state = MemoryState::with_balances([(addr(1), Wei::from_ur(1))]);
        let before = state.state_root();
        state.add_balance(&addr(1), Wei::from_wei(1));
        assert_ne!(state.state_root(), before);
    }
}
