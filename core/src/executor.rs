//! Block execution: sealing, import validation, and the miner reward hook.
//!
//! Transactions are applied sequentially in block order against a state
//! snapshot owned by the caller, so concurrent evaluations of competing
//! heads never share mutable reward state.

use crate::error::CoreError;
use crate::transition::{execute_transaction, BlockCounters, RewardContext};
use ur_ledger::{Block, BlockHeader, ChainReader, State, Transaction, TRANSFER_GAS};
use ur_rewards::block_reward;
use ur_types::{Address, BlockHash, Wei};

/// The result of executing a block's transactions plus finalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutedBlock {
    pub counters: BlockCounters,
    pub signups: usize,
}

/// Apply every transaction of `block` in order on top of `parent`, then the
/// miner reward hook: one unconditional `block_reward` to the coinbase,
/// which also participates in `total_wei`.
pub fn execute_block(
    parent: &BlockHeader,
    block: &Block,
    state: &mut dyn State,
    reader: &dyn ChainReader,
    ctx: &RewardContext<'_>,
) -> Result<ExecutedBlock, CoreError> {
    if block.header.number != parent.number + 1 {
        return Err(CoreError::NonSequentialBlock {
            number: block.header.number,
            parent: parent.number,
        });
    }
    if block.header.parent_hash != parent.hash() {
        return Err(CoreError::ParentHashMismatch {
            number: block.header.number,
        });
    }

    let mut counters = BlockCounters::from_header(parent);
    let coinbase = block.header.coinbase;
    let mut signups = 0;
    for tx in &block.transactions {
        let outcome = execute_transaction(
            tx,
            &coinbase,
            block.header.number,
            &mut counters,
            state,
            reader,
            ctx,
        )?;
        if outcome.is_some() {
            signups += 1;
        }
    }

    state.add_balance(&coinbase, block_reward());
    counters.total_wei += block_reward();

    Ok(ExecutedBlock { counters, signups })
}

/// Validate an incoming block by replay: recompute the counters and the
/// state root independently and reject the block if the header disagrees.
pub fn import_block(
    parent: &BlockHeader,
    block: &Block,
    state: &mut dyn State,
    reader: &dyn ChainReader,
    ctx: &RewardContext<'_>,
) -> Result<ExecutedBlock, CoreError> {
    let executed = execute_block(parent, block, state, reader, ctx)?;
    if executed.counters.n_signups != block.header.n_signups {
        return Err(CoreError::CounterMismatch {
            field: "n_signups",
            declared: block.header.n_signups,
            computed: executed.counters.n_signups,
        });
    }
    if executed.counters.total_wei != block.header.total_wei {
        return Err(CoreError::CounterMismatch {
            field: "total_wei",
            declared: block.header.total_wei,
            computed: executed.counters.total_wei,
        });
    }
    if state.state_root() != block.header.state_root {
        return Err(CoreError::StateRootMismatch {
            number: block.header.number,
        });
    }
    tracing::info!(
        number = block.header.number,
        signups = executed.signups,
        n_signups = %executed.counters.n_signups,
        total_wei = %executed.counters.total_wei,
        "block imported"
    );
    Ok(executed)
}

/// Produce a sealed block on top of `parent`: execute the transactions,
/// then write the final counters and roots into the header.
pub fn seal_block(
    parent: &BlockHeader,
    transactions: Vec<Transaction>,
    coinbase: Address,
    timestamp: u64,
    state: &mut dyn State,
    reader: &dyn ChainReader,
    ctx: &RewardContext<'_>,
) -> Result<Block, CoreError> {
    let mut header = BlockHeader {
        parent_hash: parent.hash(),
        coinbase,
        state_root: BlockHash::ZERO,
        tx_root: Block::compute_tx_root(&transactions),
        receipts_root: BlockHash::ZERO,
        number: parent.number + 1,
        gas_limit: parent.gas_limit,
        gas_used: transactions.len() as u64 * TRANSFER_GAS,
        timestamp,
        extra_data: Vec::new(),
        mix_digest: BlockHash::ZERO,
        nonce: [0u8; 8],
        n_signups: Wei::ZERO,
        total_wei: Wei::ZERO,
    };

    let block = Block {
        header: header.clone(),
        transactions,
    };
    let executed = execute_block(parent, &block, state, reader, ctx)?;

    header.n_signups = executed.counters.n_signups;
    header.total_wei = executed.counters.total_wei;
    header.state_root = state.state_root();
    Ok(Block {
        header,
        transactions: block.transactions,
    })
}
