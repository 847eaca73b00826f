use crate::shared::{
    auth::{account_can_modify_user, protect_account_route, protect_route},
    query::resolve_date_filter,
};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::dtos::TransactionDTO;
use tally_api_structs::get_dashboard::{APIResponse, PathParams, QueryParams, ReminderCountsDTO};
use tally_domain::{
    date::InvalidDateError,
    report::{CategoryBreakdown, Totals},
    DateRangeQuery, ReminderStatus, TransactionKind, ID,
};
use tally_infra::{Pagination, TallyContext, TransactionQuery};

/// Number of latest transactions shown on the dashboard
const RECENT_TRANSACTIONS: usize = 5;

pub async fn get_dashboard_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = GetDashboardUseCase {
        user_id: user.id,
        range: query_params.0.into(),
    };

    execute(usecase, &ctx)
        .await
        .map(|dashboard| HttpResponse::Ok().json(dashboard))
        .map_err(TallyError::from)
}

pub async fn get_dashboard_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetDashboardUseCase {
        user_id: user.id,
        range: query_params.0.into(),
    };

    execute(usecase, &ctx)
        .await
        .map(|dashboard| HttpResponse::Ok().json(dashboard))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct GetDashboardUseCase {
    user_id: ID,
    range: DateRangeQuery,
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
impl UseCase for GetDashboardUseCase {
    type Response = APIResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetDashboard";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let range = resolve_date_filter(&self.range, ctx).map_err(UseCaseError::InvalidDate)?;
        let transactions = &ctx.repos.transactions;

        let kind_sums = transactions
            .sum_by_kind(&self.user_id, range.as_ref())
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let expense_sums = transactions
            .sum_by_category(&self.user_id, TransactionKind::Expense, range.as_ref())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let recent = transactions
            .find_by_query(&TransactionQuery {
                date: range,
                ..TransactionQuery::for_user(
                    self.user_id.clone(),
                    Pagination::page(1, RECENT_TRANSACTIONS),
                )
            })
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let status_sums = ctx
            .repos
            .reminders
            .sum_by_status(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let count_of = |status: ReminderStatus| {
            status_sums
                .iter()
                .find(|s| s.status == status)
                .map(|s| s.count)
                .unwrap_or(0)
        };

        Ok(APIResponse {
            range,
            totals: Totals::from_kind_sums(&kind_sums),
            expenses: CategoryBreakdown::new(expense_sums),
            recent_transactions: recent.items.into_iter().map(TransactionDTO::new).collect(),
            reminders: ReminderCountsDTO {
                pending: count_of(ReminderStatus::Pending),
                overdue: count_of(ReminderStatus::Overdue),
            },
        })
    }
}
