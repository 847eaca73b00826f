mod account;
mod category;
mod rate_limit;
mod reminder;
mod shared;
mod transaction;
mod user;

use account::{IAccountRepo, InMemoryAccountRepo, PostgresAccountRepo};
use category::{ICategoryRepo, InMemoryCategoryRepo, PostgresCategoryRepo};
use rate_limit::{IRateLimitRepo, InMemoryRateLimitRepo, PostgresRateLimitRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use transaction::{ITransactionRepo, InMemoryTransactionRepo, PostgresTransactionRepo};
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

pub use shared::query_structs::*;

#[derive(Clone)]
pub struct Repos {
    pub accounts: Arc<dyn IAccountRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub transactions: Arc<dyn ITransactionRepo>,
    pub categories: Arc<dyn ICategoryRepo>,
    pub rate_limits: Arc<dyn IRateLimitRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            accounts: Arc::new(PostgresAccountRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            transactions: Arc::new(PostgresTransactionRepo::new(pool.clone())),
            categories: Arc::new(PostgresCategoryRepo::new(pool.clone())),
            rate_limits: Arc::new(PostgresRateLimitRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            transactions: Arc::new(InMemoryTransactionRepo::new()),
            categories: Arc::new(InMemoryCategoryRepo::new()),
            rate_limits: Arc::new(InMemoryRateLimitRepo::new()),
        }
    }
}
