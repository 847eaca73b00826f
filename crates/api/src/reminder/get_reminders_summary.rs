use crate::shared::auth::{account_can_modify_user, protect_account_route, protect_route};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::dtos::{ReminderDTO, StatusCountDTO};
use tally_api_structs::get_reminders_summary::{APIResponse, PathParams};
use tally_domain::{DateRange, DateRangeTag, Reminder, ReminderStatus, ID};
use tally_infra::{Pagination, ReminderQuery, StatusSum, TallyContext};

/// Upper bound on the number of upcoming reminders listed in a summary
const MAX_UPCOMING: usize = 100;

pub async fn get_reminders_summary_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = GetRemindersSummaryUseCase { user_id: user.id };
    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(summary.into_response()))
        .map_err(TallyError::from)
}

pub async fn get_reminders_summary_controller(
    http_req: HttpRequest,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersSummaryUseCase { user_id: user.id };
    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(summary.into_response()))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct GetRemindersSummaryUseCase {
    user_id: ID,
}

#[derive(Debug)]
struct Summary {
    sums: Vec<StatusSum>,
    upcoming: Vec<Reminder>,
}

impl Summary {
    fn status(&self, status: ReminderStatus) -> StatusCountDTO {
        self.sums
            .iter()
            .find(|s| s.status == status)
            .map(|s| StatusCountDTO {
                count: s.count,
                amount: s.amount,
            })
            .unwrap_or_default()
    }

    fn into_response(self) -> APIResponse {
        let pending = self.status(ReminderStatus::Pending);
        let overdue = self.status(ReminderStatus::Overdue);
        APIResponse {
            outstanding_amount: pending.amount + overdue.amount,
            pending,
            overdue,
            completed: self.status(ReminderStatus::Completed),
            upcoming: self.upcoming.into_iter().map(ReminderDTO::new).collect(),
        }
    }
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
impl UseCase for GetRemindersSummaryUseCase {
    type Response = Summary;

    type Error = UseCaseError;

    const NAME: &'static str = "GetRemindersSummary";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let sums = ctx
            .repos
            .reminders
            .sum_by_status(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let query = ReminderQuery {
            statuses: vec![ReminderStatus::Pending, ReminderStatus::Overdue],
            due: DateRange::from_tag(DateRangeTag::Upcoming, ctx.now(), &ctx.config.timezone),
            ..ReminderQuery::for_user(self.user_id.clone(), Pagination::page(1, MAX_UPCOMING))
        };
        let upcoming = ctx
            .repos
            .reminders
            .find_by_query(&query)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .items;

        Ok(Summary { sums, upcoming })
    }
}
