//! Blocks — an extended header plus an ordered transaction list.

use crate::header::BlockHeader;
use crate::rlp;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use ur_types::{BlockHash, TxHash};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Commitment over the ordered transaction hashes: the digest of the
    /// RLP list of hashes.
    pub fn compute_tx_root(transactions: &[Transaction]) -> BlockHash {
        let mut items = Vec::with_capacity(transactions.len() * 33);
        for tx in transactions {
            rlp::encode_bytes(&mut items, tx.hash().as_bytes());
        }
        BlockHash::new(rlp::digest(&rlp::encode_list(&items)))
    }

    /// The block hash is the header hash.
    pub fn hash(&self) -> BlockHash {
        self.header.hash()
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    /// Find a transaction in this block by hash.
    pub fn find_transaction(&self, hash: &TxHash) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.hash() == *hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ur_types::{Address, Wei};

    fn tx(nonce: u64) -> Transaction {
        Transaction::new(
            nonce,
            Address::new([0x11; 20]),
            Address::new([0x22; 20]),
            Wei::from_wei(1),
            vec![],
        )
    }

    #[test]
    fn tx_root_depends_on_order() {
        let a = tx(0);
        let b = tx(1);
        let root_ab = Block::compute_tx_root(&[a.clone(), b.clone()]);
        let root_ba = Block::compute_tx_root(&[b, a]);
        assert_ne!(root_ab, root_ba);
    }

    #[test]
    fn empty_tx_root_is_stable() {
        assert_eq!(Block::compute_tx_root(&[]), Block::compute_tx_root(&[]));
    }

    #[test]
    fn find_transaction_by_hash() {
        let a = tx(0);
        let b = tx(1);
        let block = Block {
            header: crate::genesis::GenesisConfig::default_dev().build().0.header,
            transactions: vec![a.clone(), b.clone()],
        };
        assert_eq!(block.find_transaction(&b.hash()), Some(&b));
        let missing = tx(99).hash();
        assert_eq!(block.find_transaction(&missing), None);
    }
}
