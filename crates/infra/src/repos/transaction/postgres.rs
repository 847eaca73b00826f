use super::ITransactionRepo;
use crate::repos::shared::query_structs::{QueryPage, TransactionQuery};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, QueryBuilder};
use tally_domain::{
    report::{CategorySum, KindSum},
    DateRange, Decimal, Recurrence, Transaction, TransactionKind, ID,
};
use tracing::error;

pub struct PostgresTransactionRepo {
    pool: PgPool,
}

impl PostgresTransactionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TransactionRaw {
    transaction_uid: Uuid,
    user_uid: Uuid,
    account_uid: Uuid,
    kind: String,
    category: String,
    subcategory: Option<String>,
    amount: Decimal,
    date: DateTime<Utc>,
    is_recurring: bool,
    recurrence_interval: Option<String>,
    description: Option<String>,
    created: i64,
    updated: i64,
}

impl TryFrom<TransactionRaw> for Transaction {
    type Error = anyhow::Error;

    fn try_from(e: TransactionRaw) -> anyhow::Result<Self> {
        let interval = e
            .recurrence_interval
            .and_then(|interval| interval.parse().ok());
        Ok(Self {
            id: e.transaction_uid.into(),
            user_id: e.user_uid.into(),
            account_id: e.account_uid.into(),
            kind: e.kind.parse()?,
            category: e.category,
            subcategory: e.subcategory,
            amount: e.amount,
            date: e.date,
            recurrence: Recurrence::from_parts(e.is_recurring, interval),
            description: e.description,
            created: e.created,
            updated: e.updated,
        })
    }
}

fn push_range(builder: &mut QueryBuilder<'_, Postgres>, range: Option<&DateRange>) {
    if let Some(range) = range {
        builder
            .push(" AND date >= ")
            .push_bind(range.start)
            .push(" AND date <= ")
            .push_bind(range.end);
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &TransactionQuery) {
    builder
        .push(" WHERE user_uid = ")
        .push_bind(*query.user_id.inner_ref());
    if let Some(kind) = query.kind {
        builder.push(" AND kind = ").push_bind(kind.to_string());
    }
    if let Some(category) = &query.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    push_range(builder, query.date.as_ref());
}

#[async_trait::async_trait]
impl ITransactionRepo for PostgresTransactionRepo {
    async fn insert(&self, transaction: &Transaction) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions(
                transaction_uid, user_uid, account_uid, kind, category, subcategory,
                amount, date, is_recurring, recurrence_interval, description, created, updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(transaction.id.inner_ref())
        .bind(transaction.user_id.inner_ref())
        .bind(transaction.account_id.inner_ref())
        .bind(transaction.kind.to_string())
        .bind(&transaction.category)
        .bind(&transaction.subcategory)
        .bind(transaction.amount)
        .bind(transaction.date)
        .bind(transaction.recurrence.is_recurring())
        .bind(transaction.recurrence.interval().map(|i| i.to_string()))
        .bind(&transaction.description)
        .bind(transaction.created)
        .bind(transaction.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert transaction: {:?}. DB returned error: {:?}",
                transaction.id, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, transaction: &Transaction) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET kind = $2,
            category = $3,
            subcategory = $4,
            amount = $5,
            date = $6,
            is_recurring = $7,
            recurrence_interval = $8,
            description = $9,
            updated = $10
            WHERE transaction_uid = $1
            "#,
        )
        .bind(transaction.id.inner_ref())
        .bind(transaction.kind.to_string())
        .bind(&transaction.category)
        .bind(&transaction.subcategory)
        .bind(transaction.amount)
        .bind(transaction.date)
        .bind(transaction.recurrence.is_recurring())
        .bind(transaction.recurrence.interval().map(|i| i.to_string()))
        .bind(&transaction.description)
        .bind(transaction.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save transaction: {:?}. DB returned error: {:?}",
                transaction.id, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, transaction_id: &ID) -> Option<Transaction> {
        let res: Option<TransactionRaw> = sqlx::query_as(
            r#"
            SELECT * FROM transactions
            WHERE transaction_uid = $1
            "#,
        )
        .bind(transaction_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find transaction with id: {:?} failed. DB returned error: {:?}",
                transaction_id, e
            );
            e
        })
        .ok()?;
        res.and_then(|t| t.try_into().ok())
    }

    async fn delete(&self, transaction_id: &ID) -> Option<Transaction> {
        let res: Option<TransactionRaw> = sqlx::query_as(
            r#"
            DELETE FROM transactions
            WHERE transaction_uid = $1
            RETURNING *
            "#,
        )
        .bind(transaction_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete transaction with id: {:?} failed. DB returned error: {:?}",
                transaction_id, e
            );
            e
        })
        .ok()?;
        res.and_then(|t| t.try_into().ok())
    }

    async fn find_by_query(
        &self,
        query: &TransactionQuery,
    ) -> anyhow::Result<QueryPage<Transaction>> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM transactions");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let (limit, offset) = query.pagination.sql_bounds();
        let mut select = QueryBuilder::new("SELECT * FROM transactions");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY date DESC, created DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let transactions: Vec<TransactionRaw> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find transactions by query: {:?} failed. DB returned error: {:?}",
                    query, e
                );
                e
            })?;

        Ok(QueryPage {
            items: transactions
                .into_iter()
                .map(Transaction::try_from)
                .collect::<anyhow::Result<Vec<_>>>()?,
            total: total as usize,
        })
    }

    async fn sum_by_kind(
        &self,
        user_id: &ID,
        range: Option<&DateRange>,
    ) -> anyhow::Result<Vec<KindSum>> {
        let mut builder = QueryBuilder::new("SELECT kind, SUM(amount) FROM transactions");
        builder
            .push(" WHERE user_uid = ")
            .push_bind(*user_id.inner_ref());
        push_range(&mut builder, range);
        builder.push(" GROUP BY kind");

        let rows: Vec<(String, Decimal)> = builder.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(kind, amount)| -> anyhow::Result<KindSum> {
                Ok(KindSum {
                    kind: kind.parse()?,
                    amount,
                })
            })
            .collect()
    }

    async fn sum_by_category(
        &self,
        user_id: &ID,
        kind: TransactionKind,
        range: Option<&DateRange>,
    ) -> anyhow::Result<Vec<CategorySum>> {
        let mut builder =
            QueryBuilder::new("SELECT category, subcategory, SUM(amount) FROM transactions");
        builder
            .push(" WHERE user_uid = ")
            .push_bind(*user_id.inner_ref())
            .push(" AND kind = ")
            .push_bind(kind.to_string());
        push_range(&mut builder, range);
        builder.push(" GROUP BY category, subcategory");

        let rows: Vec<(String, Option<String>, Decimal)> =
            builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|(category, subcategory, amount)| CategorySum {
                category,
                subcategory,
                amount,
            })
            .collect())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM transactions
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
