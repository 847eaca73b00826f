use crate::shared::auth::{account_can_modify_user, Permission};
use crate::shared::{
    auth::{protect_account_route, protect_route},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::create_transaction::{APIResponse, PathParams, RequestBody};
use tally_domain::{
    date::{parse_datetime, InvalidDateError},
    InvalidTransactionError, Recurrence, RecurrenceInterval, Transaction, User,
};
use tally_infra::TallyContext;

pub async fn create_transaction_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = CreateTransactionUseCase {
        user,
        body: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|transaction| HttpResponse::Created().json(APIResponse::new(transaction)))
        .map_err(TallyError::from)
}

pub async fn create_transaction_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = CreateTransactionUseCase {
        user,
        body: body.0,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|transaction| HttpResponse::Created().json(APIResponse::new(transaction)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct CreateTransactionUseCase {
    user: User,
    body: RequestBody,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidDate(InvalidDateError),
    InvalidTransaction(InvalidTransactionError),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::InvalidTransaction(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTransactionUseCase {
    type Response = Transaction;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTransaction";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let date = parse_datetime(&self.body.date, &ctx.config.timezone)
            .map_err(UseCaseError::InvalidDate)?;
        let now = ctx.sys.get_timestamp_millis();

        let transaction = Transaction {
            id: Default::default(),
            user_id: self.user.id.clone(),
            account_id: self.user.account_id.clone(),
            kind: self.body.kind,
            category: self.body.category.trim().to_string(),
            subcategory: self
                .body
                .subcategory
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            amount: self.body.amount,
            date,
            recurrence: Recurrence::from_parts(
                self.body.is_recurring.unwrap_or(false),
                Some(RecurrenceInterval::from_tag(
                    self.body.recurrence_interval.as_deref(),
                )),
            ),
            description: self.body.description.clone(),
            created: now,
            updated: now,
        };
        transaction
            .validate()
            .map_err(UseCaseError::InvalidTransaction)?;

        ctx.repos
            .transactions
            .insert(&transaction)
            .await
            .map(|_| transaction)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateTransactionUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateTransaction]
    }
}
