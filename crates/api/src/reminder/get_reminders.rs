use crate::shared::{
    auth::{account_can_modify_user, protect_account_route, protect_route},
    query::{resolve_date_filter, PageRequest},
};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::get_reminders::{APIResponse, PathParams, QueryParams};
use tally_domain::{
    date::InvalidDateError, DateRangeQuery, InvalidReminderStatusError, Reminder, ReminderStatus,
    ID,
};
use tally_infra::{ReminderQuery, TallyContext};

pub async fn get_reminders_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = GetRemindersUseCase::new(user.id, query_params.0, &ctx);
    handle(usecase, &ctx).await
}

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase::new(user.id, query_params.0, &ctx);
    handle(usecase, &ctx).await
}

async fn handle(usecase: GetRemindersUseCase, ctx: &TallyContext) -> Result<HttpResponse, TallyError> {
    let page = usecase.page;
    execute(usecase, ctx)
        .await
        .map(|(reminders, total)| {
            HttpResponse::Ok().json(APIResponse::new(reminders, total, page.page, page.limit))
        })
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct GetRemindersUseCase {
    user_id: ID,
    status: Option<String>,
    category: Option<String>,
    due: DateRangeQuery,
    page: PageRequest,
}

impl GetRemindersUseCase {
    fn new(user_id: ID, query: QueryParams, ctx: &TallyContext) -> Self {
        Self {
            user_id,
            status: query.status,
            category: query.category.filter(|c| !c.trim().is_empty()),
            due: DateRangeQuery {
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
    InvalidStatus(InvalidReminderStatusError),
    InvalidDate(InvalidDateError),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidStatus(e) => Self::BadClientData(e.to_string()),
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    /// A page of reminders together with the total number of matches
    type Response = (Vec<Reminder>, usize);

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let statuses = match &self.status {
            Some(status) => ReminderStatus::parse_list(status).map_err(UseCaseError::InvalidStatus)?,
            None => Vec::new(),
        };
        let due = resolve_date_filter(&self.due, ctx).map_err(UseCaseError::InvalidDate)?;

        let query = ReminderQuery {
            user_id: self.user_id.clone(),
            statuses,
            category: self.category.clone(),
            due,
            pagination: self.page.pagination(),
        };

        ctx.repos
            .reminders
            .find_by_query(&query)
            .await
            .map(|page| (page.items, page.total))
            .map_err(|_| UseCaseError::StorageError)
    }
}
