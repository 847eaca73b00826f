use super::IReminderRepo;
use crate::repos::shared::{
    inmemory_repo::*,
    query_structs::{QueryPage, ReminderQuery, StatusSum},
};
use tally_domain::{CompletedReminder, Decimal, Reminder, ReminderStatus, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn matches(reminder: &Reminder, query: &ReminderQuery) -> bool {
    reminder.user_id == query.user_id
        && (query.statuses.is_empty() || query.statuses.contains(&reminder.status))
        && query
            .category
            .as_ref()
            .map(|category| &reminder.category == category)
            .unwrap_or(true)
        && query
            .due
            .as_ref()
            .map(|range| range.contains(&reminder.due_date))
            .unwrap_or(true)
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }

    async fn find_by_query(&self, query: &ReminderQuery) -> anyhow::Result<QueryPage<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| matches(r, query));
        reminders.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| a.created.cmp(&b.created))
        });
        Ok(paginate(reminders, &query.pagination))
    }

    async fn sum_by_status(&self, user_id: &ID) -> anyhow::Result<Vec<StatusSum>> {
        let reminders = find_by(&self.reminders, |r| r.user_id == *user_id);
        let sums = ReminderStatus::all()
            .into_iter()
            .filter_map(|status| {
                let with_status = reminders
                    .iter()
                    .filter(|r| r.status == status)
                    .collect::<Vec<_>>();
                if with_status.is_empty() {
                    return None;
                }
                Some(StatusSum {
                    status,
                    count: with_status.len(),
                    amount: with_status
                        .iter()
                        .filter_map(|r| r.amount)
                        .sum::<Decimal>(),
                })
            })
            .collect();
        Ok(sums)
    }

    async fn complete(&self, completed: &CompletedReminder) -> anyhow::Result<bool> {
        let mut reminders = self.reminders.lock().unwrap();
        let stored = match reminders
            .iter_mut()
            .find(|r| r.id == completed.reminder.id)
        {
            Some(stored) => stored,
            None => return Ok(false),
        };
        if stored.is_completed() {
            return Ok(false);
        }
        *stored = completed.reminder.clone();
        if let Some(next) = &completed.next {
            reminders.push(next.clone());
        }
        Ok(true)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()> {
        find_and_delete_by(&self.reminders, |r| r.user_id == *user_id);
        Ok(())
    }
}
