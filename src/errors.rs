use thiserror::Error;

use crate::money::{Money, Rate};

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("schedule did not converge within {months} months, balance {balance} still outstanding")]
    NonConvergence { months: u32, balance: Money },

    #[error("principal must be positive: {amount}")]
    InvalidPrincipal { amount: Money },

    #[error("annual rate must be non-negative: {rate}")]
    NegativeRate { rate: Rate },

    #[error("term must be at least one month")]
    ZeroTerm,

    #[error("early payment #{index}: {reason}")]
    InvalidEarlyPayment { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
