use super::setup::TestApp;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use tally_sdk::{Account, CreateUserInput, TallySDK, User, ID};

const PUBLIC_KEY: &str = "./crates/api/config/test_public_rsa_key.crt";
const PRIVATE_KEY: &str = "./crates/api/config/test_private_rsa_key.pem";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    exp: usize,
    iat: usize,
    user_id: ID,
    policy: Policy,
}

#[derive(Serialize)]
struct Policy {
    allow: Vec<String>,
}

/// Everything needed to act both as an account admin and as one of its users
pub struct Household {
    pub account: Account,
    pub admin: TallySDK,
    pub user: User,
    /// Authenticated as `user` with every permission
    pub member: TallySDK,
}

pub fn user_token(user_id: &ID, allow: &[&str]) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        exp: now + 60 * 60,
        iat: now,
        user_id: user_id.clone(),
        policy: Policy {
            allow: allow.iter().map(|p| p.to_string()).collect(),
        },
    };
    let private_key = std::fs::read(PRIVATE_KEY).expect("Expected to read the private test key");
    let encoding_key =
        EncodingKey::from_rsa_pem(&private_key).expect("Expected a valid private test key");
    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .expect("Expected to sign the user token")
}

pub async fn setup_household(app: &TestApp, sdk: &TallySDK) -> Household {
    let res = sdk
        .account
        .create(&app.config.create_account_secret_code)
        .await
        .expect("Expected to create account");
    let account = res.account;
    let admin = TallySDK::new(app.address.clone(), res.secret_api_key);

    let public_key =
        std::fs::read_to_string(PUBLIC_KEY).expect("Expected to read the public test key");
    admin
        .account
        .set_account_pub_key(Some(public_key))
        .await
        .expect("Expected to set the account public key");

    let user = admin
        .user
        .create(CreateUserInput {
            name: Some("Kari".into()),
            metadata: None,
        })
        .await
        .expect("Expected to create user")
        .user;

    let member = TallySDK::new_user(
        app.address.clone(),
        account.id.clone(),
        user_token(&user.id, &["*"]),
    );

    Household {
        account,
        admin,
        user,
        member,
    }
}
