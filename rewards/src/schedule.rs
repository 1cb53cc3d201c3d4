//! Reward schedule — base amounts, reduction tiers, and precomputed scaled tables.

use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use ur_types::Wei;

/// Maximum referral-chain depth credited per signup.
///
/// Consensus-fixed: changing it forks the chain, so it is deliberately not
/// exposed through runtime configuration.
pub const MAX_REFERRAL_DEPTH: usize = 7;

/// The base per-block issuance credited to the coinbase (7 UR).
pub fn block_reward() -> Wei {
    Wei::from_ur(7)
}

/// A reduction tier ratio applied to the base reward amounts.
///
/// Closed enumeration: new tiers are a consensus change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ratio {
    Full,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl Ratio {
    /// All ratios, in increasing-reduction order.
    pub const ALL: [Ratio; 5] = [
        Ratio::Full,
        Ratio::Half,
        Ratio::Quarter,
        Ratio::Eighth,
        Ratio::Sixteenth,
    ];

    /// The integer denominator of this ratio.
    pub fn denominator(&self) -> u64 {
        match self {
            Ratio::Full => 1,
            Ratio::Half => 2,
            Ratio::Quarter => 4,
            Ratio::Eighth => 8,
            Ratio::Sixteenth => 16,
        }
    }

    fn index(&self) -> usize {
        match self {
            Ratio::Full => 0,
            Ratio::Half => 1,
            Ratio::Quarter => 2,
            Ratio::Eighth => 3,
            Ratio::Sixteenth => 4,
        }
    }
}

/// A cumulative-signup threshold paired with the ratio that applies at or
/// above it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionFactor {
    pub n_signups_threshold: Wei,
    pub ratio: Ratio,
}

/// The default reduction table, ordered descending by threshold.
pub fn default_reduction_factors() -> Vec<ReductionFactor> {
    vec![
        ReductionFactor {
            n_signups_threshold: Wei::from_wei(100_000_000),
            ratio: Ratio::Sixteenth,
        },
        ReductionFactor {
            n_signups_threshold: Wei::from_wei(50_000_000),
            ratio: Ratio::Eighth,
        },
        ReductionFactor {
            n_signups_threshold: Wei::from_wei(10_000_000),
            ratio: Ratio::Quarter,
        },
        ReductionFactor {
            n_signups_threshold: Wei::from_wei(1_000_000),
            ratio: Ratio::Half,
        },
    ]
}

/// The base (full-ratio) reward amounts fixed by network genesis.
#[derive(Clone, Debug)]
pub struct BaseRewards {
    pub signup_reward: Wei,
    pub members_signup_rewards: [Wei; MAX_REFERRAL_DEPTH],
    pub management_fee: Wei,
    pub ur_future_fund_fee: Wei,
    pub miner_reward: Wei,
}

impl BaseRewards {
    /// The UR network base amounts: 2000 UR signup, a 2000 UR ancestor pool
    /// declining from depth 1 to depth 7, 1000 UR management fee, 5000 UR
    /// future-fund grant, one block reward per-signup miner bonus.
    pub fn ur_defaults() -> Self {
        Self {
            signup_reward: Wei::from_ur(2_000),
            members_signup_rewards: [
                Wei::from_ur(1_000),
                Wei::from_ur(400),
                Wei::from_ur(250),
                Wei::from_ur(150),
                Wei::from_ur(100),
                Wei::from_ur(60),
                Wei::from_ur(40),
            ],
            management_fee: Wei::from_ur(1_000),
            ur_future_fund_fee: Wei::from_ur(5_000),
            miner_reward: block_reward(),
        }
    }

    fn all_amounts(&self) -> impl Iterator<Item = Wei> + '_ {
        [
            self.signup_reward,
            self.management_fee,
            self.ur_future_fund_fee,
            self.miner_reward,
        ]
        .into_iter()
        .chain(self.members_signup_rewards.iter().copied())
    }
}

/// The fully scaled reward amounts for one reduction tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardSet {
    /// Credited to the newly signed-up member.
    pub signup_reward: Wei,
    /// Credited to ancestors, nearest first.
    pub members_signup_rewards: [Wei; MAX_REFERRAL_DEPTH],
    /// Sum of the seven ancestor amounts.
    pub total_signup_rewards: Wei,
    /// Conditionally credited to the receiver address.
    pub management_fee: Wei,
    /// Credited to the UR Future Fund address.
    pub ur_future_fund_fee: Wei,
    /// Extra coinbase credit per signup.
    pub miner_reward: Wei,
    /// signup + ancestor pool + future fund + miner bonus; the per-signup
    /// contribution to the header's `total_wei` (management fee excluded —
    /// it is gated and accounted separately).
    pub total: Wei,
}

impl RewardSet {
    fn scaled(base: &BaseRewards, ratio: Ratio) -> Self {
        let d = ratio.denominator();
        let mut members = [Wei::ZERO; MAX_REFERRAL_DEPTH];
        let mut pool = Wei::ZERO;
        for (slot, amount) in members.iter_mut().zip(base.members_signup_rewards.iter()) {
            *slot = amount.scale_down(d);
            pool += *slot;
        }
        let signup_reward = base.signup_reward.scale_down(d);
        let ur_future_fund_fee = base.ur_future_fund_fee.scale_down(d);
        let miner_reward = base.miner_reward.scale_down(d);
        Self {
            signup_reward,
            members_signup_rewards: members,
            total_signup_rewards: pool,
            management_fee: base.management_fee.scale_down(d),
            ur_future_fund_fee,
            miner_reward,
            total: signup_reward + pool + ur_future_fund_fee + miner_reward,
        }
    }
}

/// The validated reward schedule: reduction table plus one precomputed
/// `RewardSet` per ratio.
///
/// Construction is the only fallible operation; lookups are total.
#[derive(Debug)]
pub struct RewardSchedule {
    factors: Vec<ReductionFactor>,
    sets: [RewardSet; Ratio::ALL.len()],
}

impl RewardSchedule {
    /// Build a schedule from the UR base amounts and an explicit reduction
    /// table (descending thresholds).
    ///
    /// Fails if any base amount is not an exact multiple of every ratio
    /// denominator, or the table is malformed. Run at startup; a failure
    /// here must abort initialization.
    pub fn new(factors: Vec<ReductionFactor>) -> Result<Self, ScheduleError> {
        Self::with_base(BaseRewards::ur_defaults(), factors)
    }

    /// Build a schedule with the default reduction table.
    pub fn with_defaults() -> Result<Self, ScheduleError> {
        Self::new(default_reduction_factors())
    }

    pub fn with_base(
        base: BaseRewards,
        factors: Vec<ReductionFactor>,
    ) -> Result<Self, ScheduleError> {
        for amount in base.all_amounts() {
            for ratio in Ratio::ALL {
                let denominator = ratio.denominator();
                if !amount.is_divisible_by(denominator) {
                    return Err(ScheduleError::NotDivisible {
                        amount,
                        denominator,
                    });
                }
            }
        }
        for pair in factors.windows(2) {
            if pair[0].n_signups_threshold <= pair[1].n_signups_threshold {
                return Err(ScheduleError::ThresholdsNotDescending);
            }
        }
        if factors.iter().any(|f| f.n_signups_threshold.is_zero()) {
            return Err(ScheduleError::ZeroThreshold);
        }
        let sets = [
            RewardSet::scaled(&base, Ratio::Full),
            RewardSet::scaled(&base, Ratio::Half),
            RewardSet::scaled(&base, Ratio::Quarter),
            RewardSet::scaled(&base, Ratio::Eighth),
            RewardSet::scaled(&base, Ratio::Sixteenth),
        ];
        Ok(Self { factors, sets })
    }

    /// The ratio applying at a given cumulative signup count: the first table
    /// entry whose threshold is ≤ `n_signups`, or `Full` below every
    /// threshold.
    pub fn ratio_for(&self, n_signups: Wei) -> Ratio {
        self.factors
            .iter()
            .find(|f| f.n_signups_threshold <= n_signups)
            .map(|f| f.ratio)
            .unwrap_or(Ratio::Full)
    }

    /// The scaled reward amounts applying at a given cumulative signup count.
    pub fn rewards_for(&self, n_signups: Wei) -> &RewardSet {
        self.rewards_at(self.ratio_for(n_signups))
    }

    /// The scaled reward amounts for an explicit ratio.
    pub fn rewards_at(&self, ratio: Ratio) -> &RewardSet {
        &self.sets[ratio.index()]
    }
}
