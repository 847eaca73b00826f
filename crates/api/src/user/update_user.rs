use crate::{
    error::TallyError,
    shared::{
        auth::{account_can_modify_user, protect_account_route},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::update_user::*;
use tally_domain::{Metadata, User};
use tally_infra::TallyContext;

pub async fn update_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let body = body.0;
    let usecase = UpdateUserUseCase {
        user,
        name: body.name,
        metadata: body.metadata,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct UpdateUserUseCase {
    user: User,
    name: Option<String>,
    metadata: Option<Metadata>,
}

#[derive(Debug)]
enum UseCaseError {
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
impl UseCase for UpdateUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateUser";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        if let Some(name) = self.name.take() {
            self.user.name = Some(name);
        }
        if let Some(metadata) = self.metadata.take() {
            self.user.metadata = metadata;
        }

        ctx.repos
            .users
            .save(&self.user)
            .await
            .map(|_| self.user.clone())
            .map_err(|_| UseCaseError::StorageError)
    }
}
