use super::Policy;
use crate::error::TallyError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tally_domain::{Account, User, ID};
use tally_infra::TallyContext;

pub const ACCOUNT_HEADER: &str = "tally-account";
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Expiration time (as UTC timestamp)
    exp: usize,
    /// Issued at (as UTC timestamp)
    iat: usize,
    /// The `User` the token was issued for
    user_id: ID,
    /// What the `User` is allowed to do
    policy: Option<Policy>,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .trim_start_matches("Bearer")
        .trim_start_matches("bearer")
        .trim()
        .to_string()
}

fn decode_token(account: &Account, token: &str) -> anyhow::Result<Claims> {
    let public_key = match &account.public_jwt_key {
        Some(public_key) => public_key,
        None => return Err(anyhow::Error::msg("Account does not support user tokens")),
    };
    let decoding_key = DecodingKey::from_rsa_pem(public_key.as_bytes())?;
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::RS256))?.claims;

    Ok(claims)
}

async fn auth_user_req(
    req: &HttpRequest,
    account: &Account,
    ctx: &TallyContext,
) -> Option<(User, Policy)> {
    let token = req.headers().get("authorization")?.to_str().ok()?;
    let token = parse_authtoken_header(token);
    let claims = decode_token(account, &token).ok()?;
    let user = ctx
        .repos
        .users
        .find_by_account_id(&claims.user_id, &account.id)
        .await?;

    Some((user, claims.policy.unwrap_or_default()))
}

async fn get_client_account(req: &HttpRequest, ctx: &TallyContext) -> Result<Account, TallyError> {
    let account_id = match req.headers().get(ACCOUNT_HEADER) {
        Some(account_id) => account_id.to_str().ok().and_then(|id| id.parse::<ID>().ok()),
        None => {
            return Err(TallyError::UnidentifiableClient(format!(
                "Unable to find the {} header",
                ACCOUNT_HEADER
            )))
        }
    };
    let account_id = account_id.ok_or_else(|| {
        TallyError::UnidentifiableClient(format!("Malformed {} header provided", ACCOUNT_HEADER))
    })?;

    ctx.repos.accounts.find(&account_id).await.ok_or_else(|| {
        TallyError::UnidentifiableClient("Unable to find the account the client belongs to".into())
    })
}

/// Authenticates a `User` request by the json web token in the `Authorization`
/// header, verified with the public key of the `Account` named by the
/// `tally-account` header.
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &TallyContext,
) -> Result<(User, Policy), TallyError> {
    let account = get_client_account(req, ctx).await?;

    auth_user_req(req, &account, ctx)
        .await
        .ok_or_else(|| TallyError::Unauthorized("Unable to find user from credentials".into()))
}

/// Authenticates an `Account` admin request by the secret api key in the
/// `x-api-key` header
pub async fn protect_account_route(
    req: &HttpRequest,
    ctx: &TallyContext,
) -> Result<Account, TallyError> {
    let api_key = match req.headers().get(API_KEY_HEADER) {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(TallyError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(TallyError::Unauthorized(format!(
                "Unable to find api-key in {} header",
                API_KEY_HEADER
            )))
        }
    };

    ctx.repos
        .accounts
        .find_by_apikey(api_key)
        .await
        .ok_or_else(|| {
            TallyError::Unauthorized(format!(
                "Invalid api-key provided in {} header",
                API_KEY_HEADER
            ))
        })
}

/// The `User` an admin acts on behalf of. Users of other `Account`s are not found.
pub async fn account_can_modify_user(
    account: &Account,
    user_id: &ID,
    ctx: &TallyContext,
) -> Result<User, TallyError> {
    ctx.repos
        .users
        .find_by_account_id(user_id, &account.id)
        .await
        .ok_or_else(|| {
            TallyError::NotFound(format!("A user with id: {}, was not found.", user_id))
        })
}
