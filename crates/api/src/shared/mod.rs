pub mod auth;
pub mod bulk_delete;
pub mod guard;
pub mod query;
pub mod rate_limit;
pub mod usecase;
