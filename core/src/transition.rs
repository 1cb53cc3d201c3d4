//! The per-transaction state transition.
//!
//! Runs after the standard value transfer. When the classifier fires, the
//! whole reward cascade — member, future fund, management fee, ancestors,
//! remainder, miner bonus — is applied against the block's private running
//! counters. Nothing here is observable until the block is sealed.

use crate::classifier::{classify, SignupKind};
use crate::error::CoreError;
use crate::resolver::{resolve_referrals, ReferralChain};
use ur_ledger::{BlockHeader, ChainReader, PrivilegedConfig, State, Transaction};
use ur_rewards::{management_fee_for, RewardSchedule};
use ur_types::{Address, Wei};

/// Immutable per-chain context threaded through the transition.
#[derive(Clone, Copy)]
pub struct RewardContext<'a> {
    pub schedule: &'a RewardSchedule,
    pub privileged: &'a PrivilegedConfig,
}

/// The in-block running counters, seeded from the parent header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockCounters {
    pub n_signups: Wei,
    pub total_wei: Wei,
}

impl BlockCounters {
    pub fn from_header(header: &BlockHeader) -> Self {
        Self {
            n_signups: header.n_signups,
            total_wei: header.total_wei,
        }
    }
}

/// What one applied signup credited, for observability and tests.
#[derive(Clone, Debug)]
pub struct SignupOutcome {
    pub new_member: Address,
    pub ancestors_credited: usize,
    pub remainder: Wei,
    pub management_fee: Wei,
    /// Total newly issued wei recorded in the counters for this signup.
    pub issued: Wei,
}

/// Execute one transaction: the standard value transfer, then — when it
/// classifies as a signup — the reward cascade.
///
/// A failed transfer aborts the enclosing block; reward credits themselves
/// are unconditional issuance and cannot fail. Returns the signup outcome,
/// or `None` for ordinary transfers.
pub fn execute_transaction(
    tx: &Transaction,
    coinbase: &Address,
    block_number: u64,
    counters: &mut BlockCounters,
    state: &mut dyn State,
    reader: &dyn ChainReader,
    ctx: &RewardContext<'_>,
) -> Result<Option<SignupOutcome>, CoreError> {
    state.sub_balance(&tx.from, tx.value)?;
    state.add_balance(&tx.to, tx.value);

    let Some(kind) = classify(tx, ctx.privileged, reader, block_number) else {
        return Ok(None);
    };

    // Counters visible before this signup gate both the schedule tier and
    // the management fee.
    let n_prev = counters.n_signups;
    let wei_prev = counters.total_wei;
    let rewards = ctx.schedule.rewards_for(n_prev);

    let chain = match kind {
        SignupKind::Privileged => ReferralChain::rooted_at(tx.from),
        SignupKind::Member {
            prior_block,
            prior_tx,
        } => resolve_referrals(
            reader,
            ctx.privileged,
            tx.from,
            (prior_block, prior_tx),
            block_number,
        ),
    };
    let entry = chain
        .root
        .as_ref()
        .and_then(|root| ctx.privileged.get(root))
        .or_else(|| ctx.privileged.first_entry())
        .copied()
        .ok_or(CoreError::NoPrivilegedEntries)?;

    state.add_balance(&tx.to, rewards.signup_reward);
    state.add_balance(&entry.ur_future_fund, rewards.ur_future_fund_fee);

    let fee = management_fee_for(rewards, n_prev, wei_prev);
    if !fee.is_zero() {
        state.add_balance(&entry.receiver, fee);
    }

    let mut credited = Wei::ZERO;
    for (depth, ancestor) in chain.ancestors.iter().enumerate() {
        let amount = rewards.members_signup_rewards[depth];
        state.add_balance(ancestor, amount);
        credited += amount;
    }
    let remainder = rewards.total_signup_rewards - credited;
    if !remainder.is_zero() {
        state.add_balance(&entry.receiver, remainder);
    }

    state.add_balance(coinbase, rewards.miner_reward);

    let issued = rewards.total + fee;
    counters.n_signups += Wei::from_wei(1);
    counters.total_wei += issued;

    tracing::debug!(
        member = %tx.to,
        ancestors = chain.ancestors.len(),
        remainder = %remainder,
        management_fee = %fee,
        "signup applied"
    );

    Ok(Some(SignupOutcome {
        new_member: tx.to,
        ancestors_credited: chain.ancestors.len(),
        remainder,
        management_fee: fee,
        issued,
    }))
}
