use crate::shared::usecase::{execute, UseCase};
use crate::{
    error::TallyError,
    shared::auth::{account_can_modify_user, protect_account_route},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::delete_user::*;
use tally_domain::User;
use tally_infra::TallyContext;

pub async fn delete_user_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = DeleteUserUseCase { user };
    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(TallyError::from)
}

/// Deletes the `User` together with everything recorded in their budget
#[derive(Debug)]
struct DeleteUserUseCase {
    user: User,
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
impl UseCase for DeleteUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteUser";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let user_id = &self.user.id;
        ctx.repos
            .reminders
            .delete_by_user(user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .transactions
            .delete_by_user(user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .categories
            .delete_by_user(user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.repos
            .users
            .delete(user_id)
            .await
            .ok_or(UseCaseError::StorageError)
    }
}
