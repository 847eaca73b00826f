mod account;
mod category;
pub mod date;
mod date_range;
mod reminder;
pub mod report;
mod shared;
mod transaction;
mod user;

pub use account::{Account, PEMKey};
pub use category::{Category, InvalidCategoryError};
pub use date_range::{DateRange, DateRangeQuery, DateRangeTag, UPCOMING_DAYS};
pub use reminder::{
    CompletedReminder, InvalidReminderError, InvalidReminderStatusError, NewReminder, Reminder,
    ReminderStatus, StatusDecision,
};
pub use shared::entity::{Entity, Owned, ID};
pub use shared::metadata::Metadata;
pub use shared::recurrence::{InvalidRecurrenceIntervalError, Recurrence, RecurrenceInterval};
pub use transaction::{
    InvalidTransactionError, InvalidTransactionKindError, Transaction, TransactionKind,
};
pub use user::User;

pub use chrono_tz::Tz;
pub use rust_decimal::Decimal;
