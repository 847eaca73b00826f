use super::IReminderRepo;
use crate::repos::shared::query_structs::{QueryPage, ReminderQuery, StatusSum};
use chrono::{DateTime, Utc};
use sqlx::{
    postgres::PgArguments, query::Query, types::Uuid, FromRow, PgPool, Postgres, QueryBuilder,
};
use tally_domain::{CompletedReminder, Decimal, Recurrence, Reminder, ID};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    account_uid: Uuid,
    title: String,
    description: Option<String>,
    due_date: DateTime<Utc>,
    category: String,
    amount: Option<Decimal>,
    is_recurring: bool,
    recurrence_interval: Option<String>,
    status: String,
    created: i64,
    updated: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(e: ReminderRaw) -> anyhow::Result<Self> {
        let interval = e
            .recurrence_interval
            .and_then(|interval| interval.parse().ok());
        Ok(Self {
            id: e.reminder_uid.into(),
            user_id: e.user_uid.into(),
            account_id: e.account_uid.into(),
            title: e.title,
            description: e.description,
            due_date: e.due_date,
            category: e.category,
            amount: e.amount,
            recurrence: Recurrence::from_parts(e.is_recurring, interval),
            status: e.status.parse()?,
            created: e.created,
            updated: e.updated,
        })
    }
}

/// Converts a stored row, logging rows that no longer describe a valid `Reminder`
fn read_row(raw: ReminderRaw) -> Option<Reminder> {
    let reminder_uid = raw.reminder_uid;
    Reminder::try_from(raw)
        .map_err(|e| {
            error!(
                "Stored reminder with id: {} could not be read: {:?}",
                reminder_uid, e
            );
            e
        })
        .ok()
}

fn insert_query(reminder: &Reminder) -> Query<'_, Postgres, PgArguments> {
    sqlx::query(
        r#"
        INSERT INTO reminders(
            reminder_uid, user_uid, account_uid, title, description, due_date,
            category, amount, is_recurring, recurrence_interval, status, created, updated
        )
        VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(reminder.id.inner_ref())
    .bind(reminder.user_id.inner_ref())
    .bind(reminder.account_id.inner_ref())
    .bind(&reminder.title)
    .bind(&reminder.description)
    .bind(reminder.due_date)
    .bind(&reminder.category)
    .bind(reminder.amount)
    .bind(reminder.is_recurring())
    .bind(reminder.recurrence_interval().map(|i| i.to_string()))
    .bind(reminder.status.to_string())
    .bind(reminder.created)
    .bind(reminder.updated)
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ReminderQuery) {
    builder
        .push(" WHERE user_uid = ")
        .push_bind(*query.user_id.inner_ref());
    if !query.statuses.is_empty() {
        let statuses = query
            .statuses
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        builder.push(" AND status = ANY(").push_bind(statuses).push(")");
    }
    if let Some(category) = &query.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(due) = &query.due {
        builder
            .push(" AND due_date >= ")
            .push_bind(due.start)
            .push(" AND due_date <= ")
            .push_bind(due.end);
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert_query(reminder)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Unable to insert reminder: {:?}. DB returned error: {:?}",
                    reminder.id, e
                );
                e
            })?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
            description = $3,
            due_date = $4,
            category = $5,
            amount = $6,
            is_recurring = $7,
            recurrence_interval = $8,
            status = $9,
            updated = $10
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.due_date)
        .bind(&reminder.category)
        .bind(reminder.amount)
        .bind(reminder.is_recurring())
        .bind(reminder.recurrence_interval().map(|i| i.to_string()))
        .bind(reminder.status.to_string())
        .bind(reminder.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save reminder: {:?}. DB returned error: {:?}",
                reminder.id, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let res: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder with id: {:?} failed. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })
        .ok()?;
        res.and_then(read_row)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        let res: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete reminder with id: {:?} failed. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })
        .ok()?;
        res.and_then(read_row)
    }

    async fn find_by_query(&self, query: &ReminderQuery) -> anyhow::Result<QueryPage<Reminder>> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM reminders");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let (limit, offset) = query.pagination.sql_bounds();
        let mut select = QueryBuilder::new("SELECT * FROM reminders");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY due_date ASC, created ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let reminders: Vec<ReminderRaw> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find reminders by query: {:?} failed. DB returned error: {:?}",
                    query, e
                );
                e
            })?;

        Ok(QueryPage {
            items: reminders
                .into_iter()
                .map(Reminder::try_from)
                .collect::<anyhow::Result<Vec<_>>>()?,
            total: total as usize,
        })
    }

    async fn sum_by_status(&self, user_id: &ID) -> anyhow::Result<Vec<StatusSum>> {
        let rows: Vec<(String, i64, Decimal)> = sqlx::query_as(
            r#"
            SELECT status, COUNT(*), COALESCE(SUM(amount), 0)
            FROM reminders
            WHERE user_uid = $1
            GROUP BY status
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(status, count, amount)| -> anyhow::Result<StatusSum> {
                Ok(StatusSum {
                    status: status.parse()?,
                    count: count as usize,
                    amount,
                })
            })
            .collect()
    }

    async fn complete(&self, completed: &CompletedReminder) -> anyhow::Result<bool> {
        let reminder = &completed.reminder;
        let mut tx = self.pool.begin().await?;

        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET status = $2,
            updated = $3
            WHERE reminder_uid = $1 AND
            status <> 'completed'
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.status.to_string())
        .bind(reminder.updated)
        .execute(&mut *tx)
        .await?;

        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(next) = &completed.next {
            insert_query(next).execute(&mut *tx).await.map_err(|e| {
                error!(
                    "Unable to insert next occurrence of reminder: {:?}. DB returned error: {:?}",
                    reminder.id, e
                );
                e
            })?;
        }
        tx.commit().await?;

        Ok(true)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tally_domain::ReminderStatus;

    fn row(status: &str) -> ReminderRaw {
        ReminderRaw {
            reminder_uid: *ID::new().inner_ref(),
            user_uid: *ID::new().inner_ref(),
            account_uid: *ID::new().inner_ref(),
            title: "Rent".into(),
            description: None,
            due_date: Utc::now(),
            category: "Housing".into(),
            amount: Some(Decimal::from(900)),
            is_recurring: true,
            recurrence_interval: Some("monthly".into()),
            status: status.into(),
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn reads_stored_statuses() {
        let reminder = Reminder::try_from(row("completed")).unwrap();
        assert_eq!(reminder.status, ReminderStatus::Completed);
        assert!(reminder.is_recurring());
    }

    #[test]
    fn rejects_unknown_stored_statuses() {
        assert!(Reminder::try_from(row("done")).is_err());
        assert!(read_row(row("")).is_none());
    }
}
