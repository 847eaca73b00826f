use crate::shared::usecase::{execute, UseCase};
use crate::{error::TallyError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::create_user::*;
use tally_domain::{Metadata, User, ID};
use tally_infra::TallyContext;

pub async fn create_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateUserUseCase {
        account_id: account.id,
        name: body.name,
        metadata: body.metadata.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub account_id: ID,
    pub name: Option<String>,
    pub metadata: Metadata,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let mut user = User::new(self.account_id.clone(), ctx.sys.get_timestamp_millis());
        user.name = self.name.clone();
        user.metadata = self.metadata.clone();

        match ctx.repos.users.insert(&user).await {
            Ok(_) => Ok(user),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
