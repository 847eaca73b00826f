use crate::shared::{
    auth::{account_can_modify_user, protect_account_route, protect_route},
    query::resolve_date_filter,
};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::get_category_report::{APIResponse, PathParams, QueryParams};
use tally_domain::{
    date::InvalidDateError, report::CategoryBreakdown, DateRangeQuery, TransactionKind, ID,
};
use tally_infra::TallyContext;

pub async fn get_category_report_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = GetCategoryReportUseCase::new(user.id, query_params.0);
    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(report))
        .map_err(TallyError::from)
}

pub async fn get_category_report_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetCategoryReportUseCase::new(user.id, query_params.0);
    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(report))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct GetCategoryReportUseCase {
    user_id: ID,
    kind: TransactionKind,
    range: DateRangeQuery,
}

impl GetCategoryReportUseCase {
    fn new(user_id: ID, query: QueryParams) -> Self {
        Self {
            user_id,
            kind: query.kind.unwrap_or(TransactionKind::Expense),
            range: DateRangeQuery {
                date_range: query.date_range,
                start_date: query.start_date,
                end_date: query.end_date,
            },
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
impl UseCase for GetCategoryReportUseCase {
    type Response = APIResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCategoryReport";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let range = resolve_date_filter(&self.range, ctx).map_err(UseCaseError::InvalidDate)?;
        let sums = ctx
            .repos
            .transactions
            .sum_by_category(&self.user_id, self.kind, range.as_ref())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(APIResponse {
            kind: self.kind,
            range,
            breakdown: CategoryBreakdown::new(sums),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tally_domain::{Decimal, Recurrence, Transaction};

    #[actix_web::main]
    #[test]
    async fn breaks_down_expenses_by_default() {
        let ctx = TallyContext::create_inmemory();
        let user_id = ID::new();
        let entries = vec![
            (TransactionKind::Expense, "Food", Some("Groceries"), 75),
            (TransactionKind::Expense, "Food", None, 25),
            (TransactionKind::Expense, "Transport", None, 100),
            (TransactionKind::Income, "Salary", None, 5000),
        ];
        for (kind, category, subcategory, amount) in entries {
            let transaction = Transaction {
                id: Default::default(),
                user_id: user_id.clone(),
                account_id: ID::new(),
                kind,
                category: category.into(),
                subcategory: subcategory.map(String::from),
                amount: Decimal::from(amount),
                date: Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap(),
                recurrence: Recurrence::none(),
                description: None,
                created: 0,
                updated: 0,
            };
            ctx.repos.transactions.insert(&transaction).await.unwrap();
        }

        let mut usecase = GetCategoryReportUseCase::new(user_id, QueryParams::default());
        let report = usecase.execute(&ctx).await.unwrap();
        assert_eq!(report.kind, TransactionKind::Expense);
        assert_eq!(report.range, None);
        assert_eq!(report.breakdown.total, Decimal::from(200));
        let food = report
            .breakdown
            .categories
            .iter()
            .find(|c| c.category == "Food")
            .unwrap();
        assert_eq!(food.percentage, Decimal::from(50));
        assert_eq!(food.subcategories.len(), 2);
    }
}
