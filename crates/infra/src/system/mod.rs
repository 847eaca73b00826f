use chrono::{DateTime, Utc};
use tally_domain::date::datetime_from_millis;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    fn get_datetime(&self) -> DateTime<Utc> {
        datetime_from_millis(self.get_timestamp_millis())
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// System frozen at a given instant
pub struct FixedSys {
    pub timestamp_millis: i64,
}

impl FixedSys {
    pub fn at(datetime: DateTime<Utc>) -> Self {
        Self {
            timestamp_millis: datetime.timestamp_millis(),
        }
    }
}

impl ISys for FixedSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }
}
