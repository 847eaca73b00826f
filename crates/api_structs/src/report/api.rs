use crate::{
    dtos::TransactionDTO,
    shared::api::{DateFilterParams, UserPathParams},
};
use serde::{Deserialize, Serialize};
use tally_domain::{
    report::{CategoryBreakdown, MonthlySeries, Totals},
    DateRange, TransactionKind,
};

pub mod get_dashboard {
    use super::*;

    pub type QueryParams = DateFilterParams;

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct ReminderCountsDTO {
        pub pending: usize,
        pub overdue: usize,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// `None` when the totals cover every transaction
        pub range: Option<DateRange>,
        pub totals: Totals,
        pub expenses: CategoryBreakdown,
        pub recent_transactions: Vec<TransactionDTO>,
        pub reminders: ReminderCountsDTO,
    }
}

pub mod get_category_report {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// Defaults to expense
        #[serde(rename = "type")]
        pub kind: Option<TransactionKind>,
        pub date_range: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub range: Option<DateRange>,
        pub breakdown: CategoryBreakdown,
    }
}

pub mod get_monthly_report {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// Defaults to the current year
        pub year: Option<i32>,
    }

    pub type PathParams = UserPathParams;

    pub type APIResponse = MonthlySeries;
}
