mod config;
mod repos;
mod system;

pub use config::{Config, RateLimitConfig};
pub use repos::{
    IReminderRepo, Pagination, QueryPage, ReminderQuery, Repos, StatusSum, TransactionQuery,
};
use std::sync::Arc;
pub use system::{FixedSys, ISys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct TallyContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl TallyContext {
    /// Context with every repository kept in process memory.
    /// Used by tests and when no database is configured.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.sys.get_datetime()
    }
}

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

/// Will setup the infrastructure context given the environment.
///
/// Postgres is used when `DATABASE_URL` is set, otherwise the
/// inmemory repositories.
pub async fn setup_context() -> TallyContext {
    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(postgres_connection_string) => {
            info!(
                "{} env var was provided. Going to use postgres.",
                PSQL_CONNECTION_STRING
            );
            TallyContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        Err(_) => {
            info!(
                "{} env var was not provided. Going to use inmemory infra.",
                PSQL_CONNECTION_STRING
            );
            TallyContext::create_inmemory()
        }
    }
}
