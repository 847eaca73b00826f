use crate::shared::{
    auth::{protect_route, Permission},
    bulk_delete::BulkDeleteResult,
    guard::{Guard, OwnershipError},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{error::TallyError, shared::usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::delete_transactions::{APIResponse, RequestBody};
use tally_domain::ID;
use tally_infra::TallyContext;

pub async fn delete_transactions_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteTransactionsUseCase {
        user_id: user.id,
        transaction_ids: body.0.ids,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::from(res)))
        .map_err(TallyError::from)
}

/// Deletes every `Transaction` of the list the `User` owns and reports the
/// rest as failures
#[derive(Debug)]
struct DeleteTransactionsUseCase {
    user_id: ID,
    transaction_ids: Vec<ID>,
}

#[derive(Debug)]
enum UseCaseError {}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTransactionsUseCase {
    type Response = BulkDeleteResult;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTransactions";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let mut res = BulkDeleteResult::default();
        for transaction_id in &self.transaction_ids {
            let transaction = ctx.repos.transactions.find(transaction_id).await;
            match Guard::against_foreign_record(transaction, transaction_id, &self.user_id) {
                Ok(transaction) => match ctx.repos.transactions.delete(&transaction.id).await {
                    Some(_) => res.record(Ok(transaction.id)),
                    None => res.record(Err(OwnershipError::NotFound(transaction.id))),
                },
                Err(e) => res.record(Err(e)),
            }
        }
        Ok(res)
    }
}

impl PermissionBoundary for DeleteTransactionsUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DeleteTransaction]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use tally_domain::{Decimal, Recurrence, Transaction, TransactionKind};

    #[actix_web::main]
    #[test]
    async fn keeps_going_past_failed_items() {
        let ctx = TallyContext::create_inmemory();
        let user_id = ID::new();
        let transaction = Transaction {
            id: Default::default(),
            user_id: user_id.clone(),
            account_id: ID::new(),
            kind: TransactionKind::Income,
            category: "Salary".into(),
            subcategory: None,
            amount: Decimal::from(3000),
            date: Utc::now(),
            recurrence: Recurrence::none(),
            description: None,
            created: 0,
            updated: 0,
        };
        ctx.repos.transactions.insert(&transaction).await.unwrap();
        let missing = ID::new();

        let mut usecase = DeleteTransactionsUseCase {
            user_id,
            transaction_ids: vec![missing.clone(), transaction.id.clone()],
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.success, vec![transaction.id.clone()]);
        assert_eq!(res.failed, vec![OwnershipError::NotFound(missing)]);
        assert!(ctx.repos.transactions.find(&transaction.id).await.is_none());
    }
}
