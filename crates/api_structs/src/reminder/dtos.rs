use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_domain::{Decimal, RecurrenceInterval, Reminder, ReminderStatus, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub category: String,
    pub amount: Option<Decimal>,
    pub is_recurring: bool,
    pub recurrence_interval: Option<RecurrenceInterval>,
    pub status: ReminderStatus,
    pub created: i64,
    pub updated: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            is_recurring: reminder.is_recurring(),
            recurrence_interval: reminder.recurrence_interval(),
            id: reminder.id,
            user_id: reminder.user_id,
            title: reminder.title,
            description: reminder.description,
            due_date: reminder.due_date,
            category: reminder.category,
            amount: reminder.amount,
            status: reminder.status,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}

/// Number of reminders with a status and the sum of their amounts
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountDTO {
    pub count: usize,
    pub amount: Decimal,
}
