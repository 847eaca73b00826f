use super::{IRateLimitRepo, RateLimitWindow};

pub struct InMemoryRateLimitRepo {
    windows: std::sync::Mutex<Vec<RateLimitWindow>>,
}

impl InMemoryRateLimitRepo {
    pub fn new() -> Self {
        Self {
            windows: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IRateLimitRepo for InMemoryRateLimitRepo {
    async fn hit(&self, key: &str, window_start: i64, expires_at: i64) -> anyhow::Result<i64> {
        let mut windows = self.windows.lock().unwrap();
        match windows
            .iter_mut()
            .find(|w| w.key == key && w.window_start == window_start)
        {
            Some(window) => {
                window.count += 1;
                Ok(window.count)
            }
            None => {
                windows.push(RateLimitWindow {
                    key: key.to_string(),
                    window_start,
                    count: 1,
                    expires_at,
                });
                Ok(1)
            }
        }
    }

    async fn purge_expired(&self, now: i64) -> anyhow::Result<()> {
        let mut windows = self.windows.lock().unwrap();
        windows.retain(|w| w.expires_at >= now);
        Ok(())
    }
}
