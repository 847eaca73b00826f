mod inmemory;
mod postgres;

pub use inmemory::InMemoryRateLimitRepo;
pub use postgres::PostgresRateLimitRepo;

/// Counter of requests made by one client within one fixed window
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitWindow {
    pub key: String,
    /// Unix millis at which the window started
    pub window_start: i64,
    pub count: i64,
    /// Unix millis after which the window can be purged
    pub expires_at: i64,
}

#[async_trait::async_trait]
pub trait IRateLimitRepo: Send + Sync {
    /// Counts one request for `key` in the window starting at `window_start`
    /// and returns the number of requests counted in that window so far.
    async fn hit(&self, key: &str, window_start: i64, expires_at: i64) -> anyhow::Result<i64>;
    /// Removes every window that expired before `now`
    async fn purge_expired(&self, now: i64) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_context, TallyContext};

    async fn create_contexts() -> Vec<TallyContext> {
        vec![TallyContext::create_inmemory(), setup_context().await]
    }

    #[tokio::test]
    async fn counts_per_key_and_window() {
        for ctx in create_contexts().await {
            let key = format!("10.0.0.{}", tally_utils::create_random_secret(6));
            let repo = &ctx.repos.rate_limits;

            assert_eq!(repo.hit(&key, 0, 60_000).await.unwrap(), 1);
            assert_eq!(repo.hit(&key, 0, 60_000).await.unwrap(), 2);
            assert!(repo.hit("other", 0, 60_000).await.unwrap() >= 1);
            // Next window starts from scratch
            assert_eq!(repo.hit(&key, 60_000, 120_000).await.unwrap(), 1);

            repo.purge_expired(60_001).await.unwrap();
            assert_eq!(repo.hit(&key, 0, 60_000).await.unwrap(), 1);
            assert_eq!(repo.hit(&key, 60_000, 120_000).await.unwrap(), 2);
        }
    }
}
