use crate::shared::usecase::{execute, UseCase};
use crate::{error::TallyError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::set_account_pub_key::{APIResponse, RequestBody};
use tally_domain::{Account, PEMKey};
use tally_infra::TallyContext;

pub async fn set_account_pub_key_controller(
    http_req: HttpRequest,
    ctx: web::Data<TallyContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = SetAccountPubKeyUseCase {
        account,
        public_jwt_key: body.0.public_jwt_key,
    };

    execute(usecase, &ctx)
        .await
        .map(|account| HttpResponse::Ok().json(APIResponse::new(account)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct SetAccountPubKeyUseCase {
    pub account: Account,
    pub public_jwt_key: Option<String>,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidPemKey,
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidPemKey => {
                Self::BadClientData("Malformed public pem key provided".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetAccountPubKeyUseCase {
    type Response = Account;

    type Error = UseCaseError;

    const NAME: &'static str = "SetAccountPublicKey";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let key = match self.public_jwt_key.clone() {
            Some(key) => Some(PEMKey::new(key).map_err(|_| UseCaseError::InvalidPemKey)?),
            None => None,
        };
        self.account.set_public_jwt_key(key);

        match ctx.repos.accounts.save(&self.account).await {
            Ok(_) => Ok(self.account.clone()),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
