use crate::{
    shared::entity::{Entity, Owned, ID},
    TransactionKind,
};
use thiserror::Error;

/// A named bucket a `User` sorts their `Transaction`s into
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: ID,
    pub user_id: ID,
    pub account_id: ID,
    pub name: String,
    pub kind: TransactionKind,
    pub subcategories: Vec<String>,
    pub created: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidCategoryError {
    #[error("A category needs a name")]
    MissingName,
    #[error("Subcategory names can not be empty")]
    EmptySubcategory,
}

impl Category {
    pub fn new(user_id: ID, account_id: ID, name: &str, kind: TransactionKind, created: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            account_id,
            name: name.trim().to_string(),
            kind,
            subcategories: Vec::new(),
            created,
        }
    }

    /// Replaces the subcategories, trimming names and dropping duplicates
    pub fn set_subcategories(&mut self, subcategories: Vec<String>) -> Result<(), InvalidCategoryError> {
        let mut cleaned: Vec<String> = Vec::with_capacity(subcategories.len());
        for sub in subcategories {
            let sub = sub.trim().to_string();
            if sub.is_empty() {
                return Err(InvalidCategoryError::EmptySubcategory);
            }
            if !cleaned.iter().any(|existing| existing.eq_ignore_ascii_case(&sub)) {
                cleaned.push(sub);
            }
        }
        self.subcategories = cleaned;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), InvalidCategoryError> {
        if self.name.is_empty() {
            return Err(InvalidCategoryError::MissingName);
        }
        Ok(())
    }

    /// Two categories clash if they have the same kind and the same name ignoring case
    pub fn clashes_with(&self, other: &Category) -> bool {
        self.id != other.id
            && self.user_id == other.user_id
            && self.kind == other.kind
            && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Entity for Category {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for Category {
    fn user_id(&self) -> &ID {
        &self.user_id
    }
}
