//! The node: genesis, chain, state, and the reward schedule wired together.

use crate::config::NodeConfig;
use crate::error::NodeError;
use ur_core::{import_block, seal_block, RewardContext};
use ur_ledger::{
    Block, BlockHeader, ChainReader, GenesisConfig, MemoryChain, MemoryState, PrivilegedConfig,
    State, Transaction,
};
use ur_rewards::RewardSchedule;
use ur_types::{Address, Wei};

/// A UR node over the in-memory chain.
///
/// Owns the canonical chain, the account state at its head, and the
/// consensus-constant reward configuration.
pub struct UrNode {
    config: NodeConfig,
    chain: MemoryChain,
    state: MemoryState,
    schedule: RewardSchedule,
    privileged: PrivilegedConfig,
}

impl UrNode {
    /// Build a node from its configuration and genesis parameters.
    ///
    /// The reward schedule is validated here; an invalid table aborts
    /// initialization.
    pub fn new(config: NodeConfig, genesis: GenesisConfig) -> Result<Self, NodeError> {
        let schedule = match &genesis.reduction_override {
            Some(factors) => RewardSchedule::new(factors.clone())?,
            None => RewardSchedule::with_defaults()?,
        };
        let (genesis_block, state) = genesis.build();
        tracing::info!(
            network = config.network.as_str(),
            genesis = %genesis_block.hash(),
            privileged = genesis.privileged.len(),
            "chain initialized"
        );
        Ok(Self {
            config,
            chain: MemoryChain::new(genesis_block),
            state,
            schedule,
            privileged: genesis.privileged,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn head(&self) -> &BlockHeader {
        self.chain.current_header()
    }

    pub fn balance(&self, address: &Address) -> Wei {
        self.state.balance(address)
    }

    /// Validate and append a block produced elsewhere.
    ///
    /// The replay runs against a staging copy of the head state, so a
    /// rejected block leaves the node untouched.
    pub fn import_block(&mut self, block: Block) -> Result<(), NodeError> {
        let parent = self.chain.current_header().clone();
        let ctx = RewardContext {
            schedule: &self.schedule,
            privileged: &self.privileged,
        };
        let mut staging = self.state.clone();
        import_block(&parent, &block, &mut staging, &self.chain, &ctx)?;
        self.state = staging;
        self.chain.push(block)?;
        Ok(())
    }

    /// Seal the next block with the given transactions and append it.
    pub fn seal_next(
        &mut self,
        transactions: Vec<Transaction>,
        coinbase: Address,
        timestamp: u64,
    ) -> Result<Block, NodeError> {
        let parent = self.chain.current_header().clone();
        let ctx = RewardContext {
            schedule: &self.schedule,
            privileged: &self.privileged,
        };
        let mut sealing_state = self.state.clone();
        let block = seal_block(
            &parent,
            transactions,
            coinbase,
            timestamp,
            &mut sealing_state,
            &self.chain,
            &ctx,
        )?;
        self.state = sealing_state;
        self.chain.push(block.clone())?;
        tracing::debug!(
            number = block.number(),
            txs = block.transactions.len(),
            "block sealed"
        );
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ur_core::privileged_signup_payload;
    use ur_core::CoreError;
    use ur_rewards::block_reward;

    fn dev_node() -> UrNode {
        UrNode::new(NodeConfig::default(), GenesisConfig::default_dev()).unwrap()
    }

    fn dev_privileged() -> Address {
        GenesisConfig::default_dev().balances[0].0
    }

    #[test]
    fn node_starts_at_genesis() {
        let node = dev_node();
        assert_eq!(node.head().number, 0);
        assert!(node.head().n_signups.is_zero());
    }

    #[test]
    fn seal_and_reimport_round_trip() {
        let mut producer = dev_node();
        let mut validator = dev_node();

        let coinbase = Address::new([0xc0; 20]);
        let signup = Transaction::new(
            0,
            dev_privileged(),
            Address::new([0xaa; 20]),
            Wei::from_wei(1),
            privileged_signup_payload(),
        );
        let block = producer.seal_next(vec![signup], coinbase, 1).unwrap();

        validator.import_block(block.clone()).unwrap();
        assert_eq!(validator.head().n_signups, Wei::from_wei(1));
        assert_eq!(validator.head().hash(), producer.head().hash());
        assert_eq!(
            validator.balance(&coinbase),
            block_reward() * 2
        );
    }

    #[test]
    fn rejected_block_leaves_node_untouched() {
        let mut producer = dev_node();
        let mut validator = dev_node();

        let coinbase = Address::new([0xc0; 20]);
        let signup = Transaction::new(
            0,
            dev_privileged(),
            Address::new([0xaa; 20]),
            Wei::from_wei(1),
            privileged_signup_payload(),
        );
        let mut block = producer.seal_next(vec![signup], coinbase, 1).unwrap();
        block.header.n_signups = Wei::from_wei(9);

        let err = validator.import_block(block).unwrap_err();
        assert!(matches!(
            err,
            NodeError::Core(CoreError::CounterMismatch { .. })
        ));
        assert_eq!(validator.head().number, 0);
        assert!(validator.balance(&coinbase).is_zero());
    }
}
