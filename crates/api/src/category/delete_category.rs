use crate::shared::{
    auth::{protect_route, Permission},
    guard::{Guard, OwnershipError},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{error::TallyError, shared::usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::delete_category::{APIResponse, PathParams};
use tally_domain::{Category, ID};
use tally_infra::TallyContext;

pub async fn delete_category_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteCategoryUseCase {
        user_id: user.id,
        category_id: path_params.category_id.clone(),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|category| HttpResponse::Ok().json(APIResponse::new(category)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct DeleteCategoryUseCase {
    user_id: ID,
    category_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    Ownership(OwnershipError),
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Ownership(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteCategoryUseCase {
    type Response = Category;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteCategory";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let category = ctx.repos.categories.find(&self.category_id).await;
        Guard::against_foreign_record(category, &self.category_id, &self.user_id)
            .map_err(UseCaseError::Ownership)?;

        ctx.repos
            .categories
            .delete(&self.category_id)
            .await
            .ok_or_else(|| UseCaseError::Ownership(OwnershipError::NotFound(self.category_id.clone())))
    }
}

impl PermissionBoundary for DeleteCategoryUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DeleteCategory]
    }
}
