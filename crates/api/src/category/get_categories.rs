use crate::shared::auth::{account_can_modify_user, protect_account_route, protect_route};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::get_categories::{APIResponse, PathParams, QueryParams};
use tally_domain::{Category, TransactionKind, ID};
use tally_infra::TallyContext;

pub async fn get_categories_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = GetCategoriesUseCase {
        user_id: user.id,
        kind: query_params.kind,
    };

    execute(usecase, &ctx)
        .await
        .map(|categories| HttpResponse::Ok().json(APIResponse::new(categories)))
        .map_err(TallyError::from)
}

pub async fn get_categories_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetCategoriesUseCase {
        user_id: user.id,
        kind: query_params.kind,
    };

    execute(usecase, &ctx)
        .await
        .map(|categories| HttpResponse::Ok().json(APIResponse::new(categories)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct GetCategoriesUseCase {
    user_id: ID,
    kind: Option<TransactionKind>,
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
impl UseCase for GetCategoriesUseCase {
    type Response = Vec<Category>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCategories";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .categories
            .find_by_user(&self.user_id, self.kind)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
