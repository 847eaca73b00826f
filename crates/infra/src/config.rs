use chrono_tz::Tz;
use std::str::FromStr;
use tally_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests a single client may make within one window
    pub max_requests: i64,
    /// Length of a fixed rate limiting window in seconds
    pub window_secs: i64,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code used to create new `Account`s
    pub create_account_secret_code: String,
    /// Port for the application to run on
    pub port: usize,
    /// Timezone whose wall clock decides where days, months and years
    /// start when resolving date ranges and recurrences
    pub timezone: Tz,
    pub rate_limit: RateLimitConfig,
    /// Page size used when a client does not ask for one
    pub default_page_size: usize,
    /// Upper bound on the page size a client can ask for
    pub max_page_size: usize,
}

fn parse_env_or<T: FromStr + ToString>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name,
                    value,
                    default.to_string()
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let create_account_secret_code = match std::env::var("CREATE_ACCOUNT_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find CREATE_ACCOUNT_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for creating accounts was generated and set to: {}",
                    code
                );
                code
            }
        };

        let port = parse_env_or("PORT", 5000_usize);

        let timezone = match std::env::var("TALLY_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given TALLY_TIMEZONE: {} is not a valid IANA timezone, falling back to UTC.",
                        tz
                    );
                    Tz::UTC
                }
            },
            Err(_) => Tz::UTC,
        };

        let rate_limit = RateLimitConfig {
            max_requests: parse_env_or("TALLY_RATE_LIMIT_MAX_REQUESTS", 300_i64),
            window_secs: parse_env_or("TALLY_RATE_LIMIT_WINDOW_SECS", 60_i64).max(1),
        };

        let max_page_size = parse_env_or("TALLY_MAX_PAGE_SIZE", 100_usize).max(1);
        let default_page_size = parse_env_or("TALLY_DEFAULT_PAGE_SIZE", 20_usize)
            .clamp(1, max_page_size);

        Self {
            create_account_secret_code,
            port,
            timezone,
            rate_limit,
            default_page_size,
            max_page_size,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
