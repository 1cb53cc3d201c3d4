//! The chain-reader capability and the in-memory chain.

use crate::block::Block;
use crate::error::LedgerError;
use crate::header::BlockHeader;
use crate::transaction::Transaction;
use ur_types::TxHash;

/// Read-only view of the canonical chain as the executing state transition
/// sees it.
///
/// The referral resolver depends only on this capability, which keeps the
/// state transition free of a back-pointer to the full blockchain object and
/// testable against a fixture chain.
pub trait ChainReader {
    fn block_by_number(&self, number: u64) -> Option<&Block>;

    fn transaction_by_hash(&self, hash: &TxHash) -> Option<(&Transaction, u64)>;

    fn current_header(&self) -> &BlockHeader;

    /// Resolve a transaction by its (block number, hash) pointer.
    fn resolve_tx(&self, block_number: u64, hash: &TxHash) -> Option<&Transaction> {
        self.block_by_number(block_number)?.find_transaction(hash)
    }
}

/// An in-memory canonical chain, genesis at index 0.
///
/// Blocks become visible to readers the moment they are pushed, so a signup
/// in block N can reference a signup in block N−1 of the same chain under
/// construction.
pub struct MemoryChain {
    blocks: Vec<Block>,
}

impl MemoryChain {
    pub fn new(genesis: Block) -> Self {
        Self {
            blocks: vec![genesis],
        }
    }

    /// The latest block.
    pub fn head(&self) -> &Block {
        self.blocks.last().expect("chain always has genesis")
    }

    /// The latest block number.
    pub fn height(&self) -> u64 {
        self.head().number()
    }

    /// Append a block that extends the head.
    pub fn push(&mut self, block: Block) -> Result<(), LedgerError> {
        let head = self.head();
        if block.number() != head.number() + 1 {
            return Err(LedgerError::NonSequentialBlock {
                number: block.number(),
                head: head.number(),
            });
        }
        if block.header.parent_hash != head.hash() {
            return Err(LedgerError::InvalidHeader {
                reason: "parent hash does not match chain head".into(),
            });
        }
        self.blocks.push(block);
        Ok(())
    }
}

impl ChainReader for MemoryChain {
    fn block_by_number(&self, number: u64) -> Option<&Block> {
        self.blocks.get(number as usize)
    }

    fn transaction_by_hash(&self, hash: &TxHash) -> Option<(&Transaction, u64)> {
        for block in &self.blocks {
            if let Some(tx) = block.find_transaction(hash) {
                return Some((tx, block.number()));
            }
        }
        None
    }

    fn current_header(&self) -> &BlockHeader {
        &self.head().header
    }
}
