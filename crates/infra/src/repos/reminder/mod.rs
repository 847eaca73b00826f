mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::{QueryPage, ReminderQuery, StatusSum};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use tally_domain::{CompletedReminder, Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Matching `Reminder`s ordered by due date, earliest first
    async fn find_by_query(&self, query: &ReminderQuery) -> anyhow::Result<QueryPage<Reminder>>;
    /// One entry per status the `User` has `Reminder`s in
    async fn sum_by_status(&self, user_id: &ID) -> anyhow::Result<Vec<StatusSum>>;
    /// Stores the completed `Reminder` and inserts its next occurrence as one
    /// operation. Returns `false` without changing anything if the stored
    /// `Reminder` was already completed.
    async fn complete(&self, completed: &CompletedReminder) -> anyhow::Result<bool>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()>;
}
