use serde::{Deserialize, Serialize};
use tally_domain::{Category, TransactionKind, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDTO {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub subcategories: Vec<String>,
    pub created: i64,
}

impl CategoryDTO {
    pub fn new(category: Category) -> Self {
        Self {
            id: category.id,
            user_id: category.user_id,
            name: category.name,
            kind: category.kind,
            subcategories: category.subcategories,
            created: category.created,
        }
    }
}
