use thiserror::Error;
use ur_types::Wei;

/// Fatal schedule-configuration errors, detected at startup.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("base amount {amount} is not divisible by scaling denominator {denominator}")]
    NotDivisible { amount: Wei, denominator: u64 },

    #[error("reduction thresholds must be strictly descending")]
    ThresholdsNotDescending,

    #[error("reduction threshold must not be zero")]
    ZeroThreshold,
}
