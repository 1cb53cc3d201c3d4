//! Signup reward schedule for the UR chain.
//!
//! Pure, deterministic reward arithmetic: the base reward amounts, the
//! reduction tiers that scale them down as cumulative signups grow, and the
//! management-fee gate. Everything here is integer math over `Wei`; the
//! schedule is validated once at construction and total thereafter.

pub mod error;
pub mod fee;
pub mod schedule;

pub use error::ScheduleError;
pub use fee::{management_fee_applies, management_fee_for};
pub use schedule::{
    block_reward, default_reduction_factors, BaseRewards, Ratio, ReductionFactor, RewardSchedule,
    RewardSet, MAX_REFERRAL_DEPTH,
};
