use crate::shared::{
    entity::{Entity, ID},
    metadata::Metadata,
};

/// A member of a household `Account`
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub account_id: ID,
    pub name: Option<String>,
    pub metadata: Metadata,
    pub created: i64,
}

impl User {
    pub fn new(account_id: ID, created: i64) -> Self {
        Self {
            id: Default::default(),
            account_id,
            name: None,
            metadata: Default::default(),
            created,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
