use crate::shared::{
    auth::{account_can_modify_user, protect_account_route, protect_route},
    query::{resolve_date_filter, PageRequest},
};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::get_transactions::{APIResponse, PathParams, QueryParams};
use tally_domain::{date::InvalidDateError, DateRangeQuery, Transaction, TransactionKind, ID};
use tally_infra::{TallyContext, TransactionQuery};

pub async fn get_transactions_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = GetTransactionsUseCase::new(user.id, query_params.0, &ctx);
    handle(usecase, &ctx).await
}

pub async fn get_transactions_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetTransactionsUseCase::new(user.id, query_params.0, &ctx);
    handle(usecase, &ctx).await
}

async fn handle(
    usecase: GetTransactionsUseCase,
    ctx: &TallyContext,
) -> Result<HttpResponse, TallyError> {
    let page = usecase.page;
    execute(usecase, ctx)
        .await
        .map(|(transactions, total)| {
            HttpResponse::Ok().json(APIResponse::new(transactions, total, page.page, page.limit))
        })
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct GetTransactionsUseCase {
    user_id: ID,
    kind: Option<TransactionKind>,
    category: Option<String>,
    date: DateRangeQuery,
    page: PageRequest,
}

impl GetTransactionsUseCase {
    fn new(user_id: ID, query: QueryParams, ctx: &TallyContext) -> Self {
        Self {
            user_id,
            kind: query.kind,
            category: query.category.filter(|c| !c.trim().is_empty()),
            date: DateRangeQuery {
                date_range: query.date_range,
                start_date: query.start_date,
                end_date: query.end_date,
            },
            page: PageRequest::new(query.page, query.limit, &ctx.config),
        }
    }
}

#[derive(Debug)]
enum UseCaseError {
    InvalidDate(InvalidDateError),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTransactionsUseCase {
    /// A page of transactions together with the total number of matches
    type Response = (Vec<Transaction>, usize);

    type Error = UseCaseError;

    const NAME: &'static str = "GetTransactions";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let date = resolve_date_filter(&self.date, ctx).map_err(UseCaseError::InvalidDate)?;

        let query = TransactionQuery {
            user_id: self.user_id.clone(),
            kind: self.kind,
            category: self.category.clone(),
            date,
            pagination: self.page.pagination(),
        };

        ctx.repos
            .transactions
            .find_by_query(&query)
            .await
            .map(|page| (page.items, page.total))
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tally_domain::{Decimal, Recurrence};
    use tally_infra::FixedSys;

    async fn insert(ctx: &TallyContext, user_id: &ID, kind: TransactionKind, month: u32) {
        let transaction = Transaction {
            id: Default::default(),
            user_id: user_id.clone(),
            account_id: ID::new(),
            kind,
            category: "General".into(),
            subcategory: None,
            amount: Decimal::from(10),
            date: Utc.with_ymd_and_hms(2025, month, 10, 12, 0, 0).unwrap(),
            recurrence: Recurrence::none(),
            description: None,
            created: 0,
            updated: 0,
        };
        ctx.repos.transactions.insert(&transaction).await.unwrap();
    }

    #[actix_web::main]
    #[test]
    async fn filters_by_kind_and_date_range() {
        let mut ctx = TallyContext::create_inmemory();
        ctx.sys = Arc::new(FixedSys::at(Utc.with_ymd_and_hms(2025, 6, 20, 0, 0, 0).unwrap()));
        let user_id = ID::new();
        insert(&ctx, &user_id, TransactionKind::Expense, 6).await;
        insert(&ctx, &user_id, TransactionKind::Income, 6).await;
        insert(&ctx, &user_id, TransactionKind::Expense, 5).await;
        insert(&ctx, &user_id, TransactionKind::Expense, 1).await;

        let query = QueryParams {
            kind: Some(TransactionKind::Expense),
            date_range: Some("last-3-months".into()),
            ..Default::default()
        };
        let mut usecase = GetTransactionsUseCase::new(user_id.clone(), query, &ctx);
        let (transactions, total) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(total, 2);
        assert!(transactions[0].date > transactions[1].date);

        let query = QueryParams {
            start_date: Some("2025-13-01".into()),
            end_date: Some("2025-06-30".into()),
            ..Default::default()
        };
        let mut usecase = GetTransactionsUseCase::new(user_id, query, &ctx);
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidDate(_))
        ));
    }
}
