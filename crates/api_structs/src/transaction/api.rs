use crate::{
    dtos::{BulkDeleteResultDTO, TransactionDTO},
    shared::api::UserPathParams,
};
use serde::{Deserialize, Serialize};
use tally_domain::{Decimal, Transaction, TransactionKind, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub transaction: TransactionDTO,
}

impl TransactionResponse {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction: TransactionDTO::new(transaction),
        }
    }
}

pub mod create_transaction {
    use super::*;

    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category: String,
        #[serde(default)]
        pub subcategory: Option<String>,
        pub amount: Decimal,
        /// Either a date, `2025-06-01`, or a RFC 3339 timestamp
        pub date: String,
        #[serde(default)]
        pub is_recurring: Option<bool>,
        #[serde(default)]
        pub recurrence_interval: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
    }

    pub type PathParams = UserPathParams;

    pub type APIResponse = TransactionResponse;
}

pub mod get_transaction {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub transaction_id: ID,
    }

    pub type APIResponse = TransactionResponse;
}

pub mod get_transactions {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(rename = "type")]
        pub kind: Option<TransactionKind>,
        pub category: Option<String>,
        pub date_range: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub page: Option<usize>,
        pub limit: Option<usize>,
    }

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub transactions: Vec<TransactionDTO>,
        pub total: usize,
        pub page: usize,
        pub limit: usize,
    }

    impl APIResponse {
        pub fn new(transactions: Vec<Transaction>, total: usize, page: usize, limit: usize) -> Self {
            Self {
                transactions: transactions.into_iter().map(TransactionDTO::new).collect(),
                total,
                page,
                limit,
            }
        }
    }
}

pub mod update_transaction {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default, rename = "type")]
        pub kind: Option<TransactionKind>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub subcategory: Option<String>,
        #[serde(default)]
        pub amount: Option<Decimal>,
        #[serde(default)]
        pub date: Option<String>,
        #[serde(default)]
        pub is_recurring: Option<bool>,
        #[serde(default)]
        pub recurrence_interval: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub transaction_id: ID,
    }

    pub type APIResponse = TransactionResponse;
}

pub mod delete_transaction {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub transaction_id: ID,
    }

    pub type APIResponse = TransactionResponse;
}

pub mod delete_transactions {
    use super::*;

    pub type RequestBody = crate::shared::api::BulkDeleteRequestBody;

    pub type APIResponse = BulkDeleteResultDTO;
}
