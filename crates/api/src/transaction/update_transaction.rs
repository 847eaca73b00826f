use crate::shared::{
    auth::{protect_route, Permission},
    guard::{Guard, OwnershipError},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{error::TallyError, shared::usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::update_transaction::{APIResponse, PathParams, RequestBody};
use tally_domain::{
    date::{parse_datetime, InvalidDateError},
    InvalidTransactionError, Recurrence, RecurrenceInterval, Transaction, ID,
};
use tally_infra::TallyContext;

pub async fn update_transaction_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = UpdateTransactionUseCase {
        user_id: user.id,
        transaction_id: path_params.transaction_id.clone(),
        body: body.0,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|transaction| HttpResponse::Ok().json(APIResponse::new(transaction)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct UpdateTransactionUseCase {
    user_id: ID,
    transaction_id: ID,
    body: RequestBody,
}

#[derive(Debug)]
enum UseCaseError {
    Ownership(OwnershipError),
    InvalidDate(InvalidDateError),
    InvalidTransaction(InvalidTransactionError),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Ownership(e) => e.into(),
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::InvalidTransaction(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTransactionUseCase {
    type Response = Transaction;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTransaction";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let transaction = ctx.repos.transactions.find(&self.transaction_id).await;
        let mut transaction =
            Guard::against_foreign_record(transaction, &self.transaction_id, &self.user_id)
                .map_err(UseCaseError::Ownership)?;

        if let Some(date) = &self.body.date {
            transaction.date =
                parse_datetime(date, &ctx.config.timezone).map_err(UseCaseError::InvalidDate)?;
        }
        if let Some(kind) = self.body.kind {
            transaction.kind = kind;
        }
        if let Some(category) = &self.body.category {
            transaction.category = category.trim().to_string();
        }
        if let Some(subcategory) = &self.body.subcategory {
            let subcategory = subcategory.trim();
            transaction.subcategory = if subcategory.is_empty() {
                None
            } else {
                Some(subcategory.to_string())
            };
        }
        if let Some(amount) = self.body.amount {
            transaction.amount = amount;
        }
        if let Some(description) = &self.body.description {
            transaction.description = Some(description.clone());
        }
        if self.body.is_recurring.is_some() || self.body.recurrence_interval.is_some() {
            let is_recurring = self
                .body
                .is_recurring
                .unwrap_or_else(|| transaction.recurrence.is_recurring());
            let interval = match &self.body.recurrence_interval {
                Some(tag) => Some(RecurrenceInterval::from_tag(Some(tag))),
                None => transaction.recurrence.interval(),
            };
            transaction.recurrence = Recurrence::from_parts(is_recurring, interval);
        }
        transaction.updated = ctx.sys.get_timestamp_millis();

        transaction
            .validate()
            .map_err(UseCaseError::InvalidTransaction)?;

        ctx.repos
            .transactions
            .save(&transaction)
            .await
            .map(|_| transaction)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for UpdateTransactionUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::UpdateTransaction]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use tally_domain::{Decimal, TransactionKind};

    async fn setup(ctx: &TallyContext) -> Transaction {
        let transaction = Transaction {
            id: Default::default(),
            user_id: ID::new(),
            account_id: ID::new(),
            kind: TransactionKind::Expense,
            category: "Food".into(),
            subcategory: Some("Groceries".into()),
            amount: Decimal::from(30),
            date: Utc::now(),
            recurrence: Recurrence::none(),
            description: None,
            created: 0,
            updated: 0,
        };
        ctx.repos.transactions.insert(&transaction).await.unwrap();
        transaction
    }

    #[actix_web::main]
    #[test]
    async fn updates_only_the_given_fields() {
        let ctx = TallyContext::create_inmemory();
        let transaction = setup(&ctx).await;

        let mut usecase = UpdateTransactionUseCase {
            user_id: transaction.user_id.clone(),
            transaction_id: transaction.id.clone(),
            body: RequestBody {
                amount: Some(Decimal::from(45)),
                subcategory: Some(" ".into()),
                ..Default::default()
            },
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.amount, Decimal::from(45));
        assert_eq!(updated.subcategory, None);
        assert_eq!(updated.category, "Food");
        assert_eq!(updated.date, transaction.date);
    }

    #[actix_web::main]
    #[test]
    async fn keeps_the_amount_positive() {
        let ctx = TallyContext::create_inmemory();
        let transaction = setup(&ctx).await;

        let mut usecase = UpdateTransactionUseCase {
            user_id: transaction.user_id.clone(),
            transaction_id: transaction.id.clone(),
            body: RequestBody {
                amount: Some(Decimal::ZERO),
                ..Default::default()
            },
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTransaction(_))
        ));
        assert_eq!(
            ctx.repos.transactions.find(&transaction.id).await,
            Some(transaction)
        );
    }
}
