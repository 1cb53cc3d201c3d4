use thiserror::Error;
use ur_core::CoreError;
use ur_ledger::LedgerError;
use ur_rewards::ScheduleError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("invalid reward schedule: {0}")]
    Schedule(#[from] ScheduleError),
}
