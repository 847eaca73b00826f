use serde::{Deserialize, Serialize};
use tally_domain::{Metadata, User, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub account_id: ID,
    pub name: Option<String>,
    pub metadata: Metadata,
    pub created: i64,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            account_id: user.account_id,
            name: user.name,
            metadata: user.metadata,
            created: user.created,
        }
    }
}
