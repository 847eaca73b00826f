use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use tally_utils::create_random_secret;

const API_KEY_LEN: usize = 30;

/// An `Account` is a household. It owns the `User`s that share a budget and
/// holds the credentials used to administrate them.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: ID,
    pub secret_api_key: String,
    /// Public key used to verify the json web tokens the household issues to its `User`s
    pub public_jwt_key: Option<PEMKey>,
    pub created: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PEMKey(String);

impl PEMKey {
    pub fn new(key: String) -> anyhow::Result<Self> {
        jsonwebtoken::DecodingKey::from_rsa_pem(key.as_bytes())?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn inner(self) -> String {
        self.0
    }
}

impl Account {
    pub fn new(created: i64) -> Self {
        Self {
            id: Default::default(),
            public_jwt_key: None,
            secret_api_key: Self::generate_secret_api_key(),
            created,
        }
    }

    pub fn generate_secret_api_key() -> String {
        let rand_secret = create_random_secret(API_KEY_LEN);
        format!("sk_{}", rand_secret)
    }

    pub fn set_public_jwt_key(&mut self, key: Option<PEMKey>) {
        self.public_jwt_key = key;
    }
}

impl Entity for Account {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_account() {
        let acc = Account::new(0);
        assert!(acc.secret_api_key.starts_with("sk_"));
        assert!(acc.secret_api_key.len() > API_KEY_LEN);
    }

    #[test]
    fn it_rejects_invalid_public_key() {
        assert!(PEMKey::new("badpem".into()).is_err());
    }

    #[test]
    fn it_accepts_valid_public_key() {
        let pub_key = std::fs::read("../api/config/test_public_rsa_key.crt").unwrap();
        let pub_key = String::from_utf8(pub_key).expect("Test public key to be valid utf8");

        assert!(PEMKey::new(pub_key).is_ok());
    }
}
