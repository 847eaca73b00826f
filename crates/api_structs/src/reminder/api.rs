use crate::{
    dtos::{BulkDeleteResultDTO, ReminderDTO, StatusCountDTO},
    shared::api::UserPathParams,
};
use serde::{Deserialize, Serialize};
use tally_domain::{Decimal, Reminder, ReminderStatus, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        /// Either a date, `2025-06-01`, or a RFC 3339 timestamp
        pub due_date: String,
        pub category: String,
        #[serde(default)]
        pub amount: Option<Decimal>,
        #[serde(default)]
        pub is_recurring: Option<bool>,
        #[serde(default)]
        pub recurrence_interval: Option<String>,
        #[serde(default)]
        pub status: Option<ReminderStatus>,
    }

    pub type PathParams = UserPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// A single status or a comma separated list of them
        pub status: Option<String>,
        pub category: Option<String>,
        pub date_range: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub page: Option<usize>,
        pub limit: Option<usize>,
    }

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
        pub total: usize,
        pub page: usize,
        pub limit: usize,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>, total: usize, page: usize, limit: usize) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
                total,
                page,
                limit,
            }
        }
    }
}

pub mod get_reminders_summary {
    use super::*;

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub pending: StatusCountDTO,
        pub overdue: StatusCountDTO,
        pub completed: StatusCountDTO,
        /// Sum of the amounts of every reminder that is not completed
        pub outstanding_amount: Decimal,
        /// Reminders that are not completed and due within the upcoming range
        pub upcoming: Vec<ReminderDTO>,
    }
}

pub mod update_reminder {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub due_date: Option<String>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub amount: Option<Decimal>,
        #[serde(default)]
        pub is_recurring: Option<bool>,
        #[serde(default)]
        pub recurrence_interval: Option<String>,
        #[serde(default)]
        pub status: Option<ReminderStatus>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod complete_reminder {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
        /// The next occurrence of a recurring reminder
        pub next: Option<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder, next: Option<Reminder>) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
                next: next.map(ReminderDTO::new),
            }
        }
    }
}

pub mod delete_reminder {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminders {
    use super::*;

    pub type RequestBody = crate::shared::api::BulkDeleteRequestBody;

    pub type APIResponse = BulkDeleteResultDTO;
}
