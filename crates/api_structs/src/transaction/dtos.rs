use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_domain::{Decimal, RecurrenceInterval, Transaction, TransactionKind, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDTO {
    pub id: ID,
    pub user_id: ID,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurrence_interval: Option<RecurrenceInterval>,
    pub description: Option<String>,
    pub created: i64,
    pub updated: i64,
}

impl TransactionDTO {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            is_recurring: transaction.recurrence.is_recurring(),
            recurrence_interval: transaction.recurrence.interval(),
            id: transaction.id,
            user_id: transaction.user_id,
            kind: transaction.kind,
            category: transaction.category,
            subcategory: transaction.subcategory,
            amount: transaction.amount,
            date: transaction.date,
            description: transaction.description,
            created: transaction.created,
            updated: transaction.updated,
        }
    }
}
