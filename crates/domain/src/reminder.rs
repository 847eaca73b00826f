use crate::shared::{
    entity::{Entity, Owned, ID},
    recurrence::{Recurrence, RecurrenceInterval},
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Overdue,
    Completed,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid reminder status: `{0}`")]
pub struct InvalidReminderStatusError(String);

impl FromStr for ReminderStatus {
    type Err = InvalidReminderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            "completed" => Ok(Self::Completed),
            _ => Err(InvalidReminderStatusError(s.to_string())),
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Completed => "completed",
        };
        write!(f, "{}", status)
    }
}

impl ReminderStatus {
    pub fn all() -> [Self; 3] {
        [Self::Pending, Self::Overdue, Self::Completed]
    }

    /// Parses a status filter which is either a single status or a
    /// comma separated list of them, e.g. `pending,overdue`.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, InvalidReminderStatusError> {
        let mut statuses = Vec::new();
        for status in s.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let status = status.parse()?;
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }
        Ok(statuses)
    }

    /// Status implied by the due date alone
    pub fn from_due_date(due_date: &DateTime<Utc>, now: &DateTime<Utc>) -> Self {
        if due_date < now {
            Self::Overdue
        } else {
            Self::Pending
        }
    }
}

/// The rule deciding which status a `Reminder` gets when it is created or updated.
///
/// | explicit status | currently completed | result              |
/// |-----------------|---------------------|---------------------|
/// | given           | any                 | the explicit status |
/// | none            | yes                 | completed           |
/// | none            | no                  | from due date       |
#[derive(Debug, Clone, Copy)]
pub struct StatusDecision {
    pub explicit: Option<ReminderStatus>,
    pub current: Option<ReminderStatus>,
}

impl StatusDecision {
    pub fn decide(&self, due_date: &DateTime<Utc>, now: &DateTime<Utc>) -> ReminderStatus {
        match (self.explicit, self.current) {
            (Some(explicit), _) => explicit,
            (None, Some(ReminderStatus::Completed)) => ReminderStatus::Completed,
            (None, _) => ReminderStatus::from_due_date(due_date, now),
        }
    }
}

/// A `Reminder` is a bill or payment a `User` wants to remember before its due date.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub user_id: ID,
    pub account_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub category: String,
    pub amount: Option<Decimal>,
    pub recurrence: Recurrence,
    pub status: ReminderStatus,
    pub created: i64,
    pub updated: i64,
}

/// Everything a client decides about a new `Reminder`
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub user_id: ID,
    pub account_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub category: String,
    pub amount: Option<Decimal>,
    pub recurrence: Recurrence,
    pub status: Option<ReminderStatus>,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderError {
    #[error("A reminder needs a title")]
    MissingTitle,
    #[error("A reminder needs a category")]
    MissingCategory,
    #[error("The amount of a reminder can not be negative")]
    NegativeAmount,
}

/// Result of completing a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedReminder {
    pub reminder: Reminder,
    /// The next occurrence of a recurring `Reminder`
    pub next: Option<Reminder>,
}

impl Reminder {
    pub fn new(new: NewReminder, now: DateTime<Utc>) -> Result<Self, InvalidReminderError> {
        let status = StatusDecision {
            explicit: new.status,
            current: None,
        }
        .decide(&new.due_date, &now);

        let reminder = Self {
            id: Default::default(),
            user_id: new.user_id,
            account_id: new.account_id,
            title: new.title.trim().to_string(),
            description: new.description,
            due_date: new.due_date,
            category: new.category.trim().to_string(),
            amount: new.amount,
            recurrence: new.recurrence,
            status,
            created: now.timestamp_millis(),
            updated: now.timestamp_millis(),
        };
        reminder.validate()?;
        Ok(reminder)
    }

    pub fn validate(&self) -> Result<(), InvalidReminderError> {
        if self.title.is_empty() {
            return Err(InvalidReminderError::MissingTitle);
        }
        if self.category.is_empty() {
            return Err(InvalidReminderError::MissingCategory);
        }
        if matches!(self.amount, Some(amount) if amount.is_sign_negative()) {
            return Err(InvalidReminderError::NegativeAmount);
        }
        Ok(())
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    pub fn recurrence_interval(&self) -> Option<RecurrenceInterval> {
        self.recurrence.interval()
    }

    pub fn is_completed(&self) -> bool {
        self.status == ReminderStatus::Completed
    }

    /// Moves the due date and applies the status rule to the result.
    pub fn reschedule(
        &mut self,
        due_date: Option<DateTime<Utc>>,
        explicit_status: Option<ReminderStatus>,
        now: DateTime<Utc>,
    ) {
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        self.status = StatusDecision {
            explicit: explicit_status,
            current: Some(self.status),
        }
        .decide(&self.due_date, &now);
        self.updated = now.timestamp_millis();
    }

    /// Marks the `Reminder` as completed and, if it recurs, creates its next
    /// occurrence one interval after the current due date. Returns `None` when
    /// the `Reminder` is already completed.
    pub fn complete<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Option<CompletedReminder> {
        if self.is_completed() {
            return None;
        }

        let mut completed = self.clone();
        completed.status = ReminderStatus::Completed;
        completed.updated = now.timestamp_millis();

        let next = self.recurrence_interval().map(|interval| Self {
            id: Default::default(),
            due_date: interval.advance(&self.due_date, tz),
            status: ReminderStatus::Pending,
            created: now.timestamp_millis(),
            updated: now.timestamp_millis(),
            ..self.clone()
        });

        Some(CompletedReminder {
            reminder: completed,
            next,
        })
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for Reminder {
    fn user_id(&self) -> &ID {
        &self.user_id
    }
}
