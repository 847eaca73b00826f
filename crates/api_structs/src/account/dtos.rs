use serde::{Deserialize, Serialize};
use tally_domain::{Account, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDTO {
    pub id: ID,
    pub public_jwt_key: Option<String>,
    pub created: i64,
}

impl AccountDTO {
    pub fn new(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            public_jwt_key: account.public_jwt_key.clone().map(|key| key.inner()),
            created: account.created,
        }
    }
}
