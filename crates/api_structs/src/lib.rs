mod account;
mod category;
mod reminder;
mod report;
mod shared;
mod status;
mod transaction;
mod user;

pub mod dtos {
    pub use crate::account::dtos::*;
    pub use crate::category::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::shared::dtos::*;
    pub use crate::transaction::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::account::api::*;
pub use crate::category::api::*;
pub use crate::reminder::api::*;
pub use crate::report::api::*;
pub use crate::shared::api::*;
pub use crate::status::api::*;
pub use crate::transaction::api::*;
pub use crate::user::api::*;
