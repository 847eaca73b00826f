use crate::shared::{
    auth::protect_route,
    guard::{Guard, OwnershipError},
};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::get_transaction::{APIResponse, PathParams};
use tally_domain::{Transaction, ID};
use tally_infra::TallyContext;

pub async fn get_transaction_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetTransactionUseCase {
        user_id: user.id,
        transaction_id: path_params.transaction_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|transaction| HttpResponse::Ok().json(APIResponse::new(transaction)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct GetTransactionUseCase {
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
impl UseCase for GetTransactionUseCase {
    type Response = Transaction;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTransaction";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let transaction = ctx.repos.transactions.find(&self.transaction_id).await;
        Guard::against_foreign_record(transaction, &self.transaction_id, &self.user_id)
            .map_err(UseCaseError::Ownership)
    }
}
