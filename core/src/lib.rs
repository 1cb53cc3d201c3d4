//! The UR reward state transition.
//!
//! Consensus-critical: every node must compute identical credits for the
//! same inputs. The pieces, leaves first — the signup classifier, the
//! referral-chain resolver, the per-transaction transition hook that applies
//! the reward cascade, and the block executor that seals and validates the
//! extended header counters.

pub mod classifier;
pub mod error;
pub mod executor;
pub mod resolver;
pub mod transition;

pub use classifier::{
    classify, member_signup_payload, privileged_signup_payload, SignupKind, MEMBER_PAYLOAD_LEN,
    PRIVILEGED_PAYLOAD_LEN, SIGNUP_MARKER,
};
pub use error::CoreError;
pub use executor::{execute_block, import_block, seal_block, ExecutedBlock};
pub use resolver::{resolve_referrals, ReferralChain};
pub use transition::{execute_transaction, BlockCounters, RewardContext, SignupOutcome};
