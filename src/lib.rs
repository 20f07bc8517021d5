pub mod early;
pub mod errors;
pub mod money;
pub mod payment;
pub mod schedule;
pub mod types;

// re-export key types
pub use errors::{Result, ScheduleError};
pub use money::{Money, Rate};
pub use schedule::{compute_schedule, MAX_MONTHS_GUARD};
pub use types::{
    CalcResult, CalcSummary, EarlyPaymentMode, EarlyPaymentRepeat, EarlyPaymentSpec, LoanRequest,
    PaymentType, ScheduleRow,
};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
