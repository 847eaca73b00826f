mod account;
mod base;
mod category;
mod reminder;
mod report;
mod status;
mod transaction;
mod user;

use account::AccountClient;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use category::CategoryClient;
pub use category::{CreateCategoryInput, UpdateCategoryInput};
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, GetRemindersInput, UpdateReminderInput};
use report::ReportClient;
use status::StatusClient;
use std::sync::Arc;
pub use tally_api_structs::dtos::*;
pub use tally_api_structs::{
    create_category, create_reminder, create_transaction, get_category_report, get_dashboard,
    get_reminders, get_transactions, update_category, update_reminder, update_transaction,
};
pub use tally_domain::{
    report::{CategoryBreakdown, MonthlySeries, Totals},
    Decimal, Metadata, ReminderStatus, TransactionKind, ID,
};
use transaction::TransactionClient;
pub use transaction::{CreateTransactionInput, GetTransactionsInput, UpdateTransactionInput};
use user::UserClient;
pub use user::{CreateUserInput, UpdateUserInput};

// Domain
pub use tally_api_structs::dtos::AccountDTO as Account;
pub use tally_api_structs::dtos::CategoryDTO as Category;
pub use tally_api_structs::dtos::ReminderDTO as Reminder;
pub use tally_api_structs::dtos::TransactionDTO as Transaction;
pub use tally_api_structs::dtos::UserDTO as User;

/// Path of a route acting on `user_id`s behalf when given, otherwise on
/// behalf of the authenticated user
pub(crate) fn scoped(user_id: &Option<ID>, path: &str) -> String {
    match user_id {
        Some(user_id) => format!("user/{}/{}", user_id, path),
        None => path.to_string(),
    }
}

/// Tally Server SDK
///
/// The SDK contains methods for interacting with the Tally server API,
/// either as an account admin or as one of the users of an account.
#[derive(Clone)]
pub struct TallySDK {
    pub account: AccountClient,
    pub category: CategoryClient,
    pub reminder: ReminderClient,
    pub report: ReportClient,
    pub status: StatusClient,
    pub transaction: TransactionClient,
    pub user: UserClient,
}

impl TallySDK {
    /// Client authenticated by the secret api key of an account
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::from_base(base)
    }

    /// Client authenticated as a user by a token signed with the account key
    pub fn new_user<T: Into<String>>(address: String, account_id: ID, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_user_token(account_id, token.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let account = AccountClient::new(base.clone());
        let category = CategoryClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let report = ReportClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let transaction = TransactionClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            account,
            category,
            reminder,
            report,
            status,
            transaction,
            user,
        }
    }
}
