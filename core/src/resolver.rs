//! Referral-chain resolution.
//!
//! Walks backwards through the canonical chain from a member-origin signup,
//! reconstructing the ancestors that earn tiered rewards and the privileged
//! root that selects the receiver / future-fund pair. Every failure mode is
//! silent termination — a pruned or malformed trail shortens the credited
//! chain, it never invalidates the block.

use crate::classifier::{is_signup_shaped, parse_member_pointer, PRIVILEGED_PAYLOAD_LEN};
use ur_ledger::{ChainReader, PrivilegedConfig};
use ur_rewards::MAX_REFERRAL_DEPTH;
use ur_types::{Address, TxHash};

/// The result of a referral walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferralChain {
    /// Ancestor recipients, nearest first, at most [`MAX_REFERRAL_DEPTH`].
    pub ancestors: Vec<Address>,
    /// The privileged sender at the chain root, when the walk reached it.
    pub root: Option<Address>,
}

impl ReferralChain {
    /// The trivial chain of a privileged-origin signup.
    pub fn rooted_at(privileged_sender: Address) -> Self {
        Self {
            ancestors: Vec::new(),
            root: Some(privileged_sender),
        }
    }
}

/// Walk the referral trail starting from the pointer carried by a
/// member-origin signup sent by `first_sender` in block `containing_block`.
///
/// Ancestors beyond depth seven are skipped but the walk continues to the
/// root, because the root chooses the privileged entry. Each hop must point
/// to a strictly smaller block number; a pointer that does not is treated
/// exactly like a resolution miss.
pub fn resolve_referrals(
    reader: &dyn ChainReader,
    privileged: &PrivilegedConfig,
    first_sender: Address,
    pointer: (u64, TxHash),
    containing_block: u64,
) -> ReferralChain {
    let mut ancestors = Vec::with_capacity(MAX_REFERRAL_DEPTH);
    let mut expected_recipient = first_sender;
    let mut ceiling = containing_block;
    let (mut block_number, mut tx_hash) = pointer;

    loop {
        if block_number >= ceiling {
            return ReferralChain {
                ancestors,
                root: None,
            };
        }
        let Some(tx) = reader.resolve_tx(block_number, &tx_hash) else {
            return ReferralChain {
                ancestors,
                root: None,
            };
        };
        if !is_signup_shaped(tx) || tx.to != expected_recipient {
            return ReferralChain {
                ancestors,
                root: None,
            };
        }

        if ancestors.len() < MAX_REFERRAL_DEPTH {
            ancestors.push(tx.to);
        }

        if tx.data.len() == PRIVILEGED_PAYLOAD_LEN {
            // Chain root: valid only when actually sent by a privileged address.
            let root = privileged.contains(&tx.from).then_some(tx.from);
            return ReferralChain { ancestors, root };
        }
        let Some((next_block, next_hash)) = parse_member_pointer(&tx.data) else {
            return ReferralChain {
                ancestors,
                root: None,
            };
        };
        expected_recipient = tx.from;
        ceiling = block_number;
        block_number = next_block;
        tx_hash = next_hash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{member_signup_payload, privileged_signup_payload};
    use ur_ledger::{Block, GenesisConfig, MemoryChain, PrivilegedEntry, Transaction};
    use ur_types::Wei;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn privileged_config() -> PrivilegedConfig {
        PrivilegedConfig::from_entries([(
            addr(0x5d),
            PrivilegedEntry {
                receiver: addr(0x59),
                ur_future_fund: addr(0x46),
            },
        )])
    }

    fn push_block(chain: &mut MemoryChain, tx: Transaction) -> (u64, TxHash) {
        let parent = chain.head().header.clone();
        let mut header = parent.clone();
        header.parent_hash = parent.hash();
        header.number = parent.number + 1;
        header.tx_root = Block::compute_tx_root(std::slice::from_ref(&tx));
        let number = header.number;
        let hash = tx.hash();
        chain
            .push(Block {
                header,
                transactions: vec![tx],
            })
            .unwrap();
        (number, hash)
    }

    /// Build a signup chain `privileged -> m1 -> m2 -> … -> m_len`, one
    /// signup per block, returning the members and the pointer to the last
    /// signup transaction.
    fn build_chain(chain: &mut MemoryChain, len: u8) -> (Vec<Address>, (u64, TxHash)) {
        let mut members = Vec::new();
        let mut pointer = {
            let tx = Transaction::new(
                0,
                addr(0x5d),
                addr(0x80),
                Wei::from_wei(1),
                privileged_signup_payload(),
            );
            members.push(addr(0x80));
            push_block(chain, tx)
        };
        for i in 1..len {
            let sender = addr(0x80 + i - 1);
            let member = addr(0x80 + i);
            let tx = Transaction::new(
                0,
                sender,
                member,
                Wei::from_wei(1),
                member_signup_payload(pointer.0, &pointer.1),
            );
            members.push(member);
            pointer = push_block(chain, tx);
        }
        (members, pointer)
    }

    #[test]
    fn three_deep_chain_resolves_nearest_first() {
        let (genesis, _) = GenesisConfig::default_dev().build();
        let mut chain = MemoryChain::new(genesis);
        let (members, pointer) = build_chain(&mut chain, 3);

        // m3 (members[2]) signs up a new member in the next block.
        let result = resolve_referrals(
            &chain,
            &privileged_config(),
            members[2],
            pointer,
            chain.height() + 1,
        );
        assert_eq!(result.ancestors, vec![members[2], members[1], members[0]]);
        assert_eq!(result.root, Some(addr(0x5d)));
    }

    #[test]
    fn ancestors_cap_at_seven_but_root_is_still_found() {
        let (genesis, _) = GenesisConfig::default_dev().build();
        let mut chain = MemoryChain::new(genesis);
        let (members, pointer) = build_chain(&mut chain, 10);

        let result = resolve_referrals(
            &chain,
            &privileged_config(),
            members[9],
            pointer,
            chain.height() + 1,
        );
        assert_eq!(result.ancestors.len(), MAX_REFERRAL_DEPTH);
        // Nearest first: m10, m9, … m4.
        for (k, ancestor) in result.ancestors.iter().enumerate() {
            assert_eq!(*ancestor, members[9 - k]);
        }
        assert_eq!(result.root, Some(addr(0x5d)));
    }

    #[test]
    fn dangling_pointer_terminates_silently() {
        let (genesis, _) = GenesisConfig::default_dev().build();
        let mut chain = MemoryChain::new(genesis);
        let (members, _) = build_chain(&mut chain, 2);

        let result = resolve_referrals(
            &chain,
            &privileged_config(),
            members[1],
            (1, TxHash::new([0xee; 32])),
            chain.height() + 1,
        );
        assert!(result.ancestors.is_empty());
        assert_eq!(result.root, None);
    }

    #[test]
    fn forward_pointer_terminates_silently() {
        let (genesis, _) = GenesisConfig::default_dev().build();
        let mut chain = MemoryChain::new(genesis);
        let (members, pointer) = build_chain(&mut chain, 2);

        // Claim the signup lives in the containing block itself.
        let result = resolve_referrals(
            &chain,
            &privileged_config(),
            members[1],
            pointer,
            pointer.0,
        );
        assert!(result.ancestors.is_empty());
        assert_eq!(result.root, None);
    }

    #[test]
    fn root_not_in_privileged_map_yields_no_root() {
        let (genesis, _) = GenesisConfig::default_dev().build();
        let mut chain = MemoryChain::new(genesis);

        // A root-shaped signup from a non-privileged sender.
        let tx = Transaction::new(
            0,
            addr(0x77),
            addr(0x80),
            Wei::from_wei(1),
            privileged_signup_payload(),
        );
        let pointer = push_block(&mut chain, tx);

        let result = resolve_referrals(
            &chain,
            &privileged_config(),
            addr(0x80),
            pointer,
            chain.height() + 1,
        );
        // The hop itself is well-shaped, so the recipient is still credited.
        assert_eq!(result.ancestors, vec![addr(0x80)]);
        assert_eq!(result.root, None);
    }
}
