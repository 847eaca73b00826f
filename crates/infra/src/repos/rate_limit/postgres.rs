use super::IRateLimitRepo;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresRateLimitRepo {
    pool: PgPool,
}

impl PostgresRateLimitRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IRateLimitRepo for PostgresRateLimitRepo {
    async fn hit(&self, key: &str, window_start: i64, expires_at: i64) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO rate_limits(key, window_start, count, expires_at)
            VALUES($1, $2, 1, $3)
            ON CONFLICT(key, window_start) DO UPDATE
            SET count = rate_limits.count + 1
            RETURNING count
            "#,
        )
        .bind(key)
        .bind(window_start)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to count request for rate limit key: {}. DB returned error: {:?}",
                key, e
            );
            e
        })?;
        Ok(count)
    }

    async fn purge_expired(&self, now: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM rate_limits
            WHERE expires_at < $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
