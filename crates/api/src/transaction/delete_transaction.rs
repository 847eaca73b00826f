use crate::shared::{
    auth::{protect_route, Permission},
    guard::{Guard, OwnershipError},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{error::TallyError, shared::usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::delete_transaction::{APIResponse, PathParams};
use tally_domain::{Transaction, ID};
use tally_infra::TallyContext;

pub async fn delete_transaction_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteTransactionUseCase {
        user_id: user.id,
        transaction_id: path_params.transaction_id.clone(),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|transaction| HttpResponse::Ok().json(APIResponse::new(transaction)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct DeleteTransactionUseCase {
    user_id: ID,
    transaction_id: ID,
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
impl UseCase for DeleteTransactionUseCase {
    type Response = Transaction;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTransaction";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let transaction = ctx.repos.transactions.find(&self.transaction_id).await;
        Guard::against_foreign_record(transaction, &self.transaction_id, &self.user_id)
            .map_err(UseCaseError::Ownership)?;

        ctx.repos
            .transactions
            .delete(&self.transaction_id)
            .await
            .ok_or_else(|| UseCaseError::Ownership(OwnershipError::NotFound(self.transaction_id.clone())))
    }
}

impl PermissionBoundary for DeleteTransactionUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DeleteTransaction]
    }
}
