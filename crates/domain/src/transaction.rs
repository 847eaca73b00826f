use crate::shared::{
    entity::{Entity, Owned, ID},
    recurrence::Recurrence,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid transaction type: `{0}`. Expected `income` or `expense`")]
pub struct InvalidTransactionKindError(String);

impl FromStr for TransactionKind {
    type Err = InvalidTransactionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(InvalidTransactionKindError(s.to_string())),
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A single entry in the ledger of a `User`
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: ID,
    pub user_id: ID,
    pub account_id: ID,
    pub kind: TransactionKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub recurrence: Recurrence,
    pub description: Option<String>,
    pub created: i64,
    pub updated: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTransactionError {
    #[error("The amount of a transaction must be greater than zero")]
    NonPositiveAmount,
    #[error("A transaction needs a category")]
    MissingCategory,
}

impl Transaction {
    pub fn validate(&self) -> Result<(), InvalidTransactionError> {
        if self.amount <= Decimal::ZERO {
            return Err(InvalidTransactionError::NonPositiveAmount);
        }
        if self.category.trim().is_empty() {
            return Err(InvalidTransactionError::MissingCategory);
        }
        Ok(())
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

impl Entity for Transaction {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for Transaction {
    fn user_id(&self) -> &ID {
        &self.user_id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn transaction(amount: Decimal) -> Transaction {
        Transaction {
            id: Default::default(),
            user_id: Default::default(),
            account_id: Default::default(),
            kind: TransactionKind::Expense,
            category: "groceries".into(),
            subcategory: None,
            amount,
            date: Utc::now(),
            recurrence: Recurrence::none(),
            description: None,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(transaction(Decimal::new(1, 2)).validate().is_ok());
        assert_eq!(
            transaction(Decimal::ZERO).validate(),
            Err(InvalidTransactionError::NonPositiveAmount)
        );
        assert_eq!(
            transaction(Decimal::new(-500, 0)).validate(),
            Err(InvalidTransactionError::NonPositiveAmount)
        );
    }

    #[test]
    fn category_is_required() {
        let mut t = transaction(Decimal::ONE);
        t.category = "  ".into();
        assert_eq!(t.validate(), Err(InvalidTransactionError::MissingCategory));
    }

    #[test]
    fn kind_is_a_fixed_enum() {
        assert_eq!("income".parse(), Ok(TransactionKind::Income));
        assert_eq!("expense".parse(), Ok(TransactionKind::Expense));
        assert!("transfer".parse::<TransactionKind>().is_err());
        assert_eq!(TransactionKind::Expense.to_string(), "expense");
    }
}
