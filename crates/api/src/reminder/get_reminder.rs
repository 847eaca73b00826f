use crate::shared::{
    auth::protect_route,
    guard::{Guard, OwnershipError},
};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::get_reminder::{APIResponse, PathParams};
use tally_domain::{Reminder, ID};
use tally_infra::TallyContext;

pub async fn get_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetReminderUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct GetReminderUseCase {
    user_id: ID,
    reminder_id: ID,
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
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx.repos.reminders.find(&self.reminder_id).await;
        Guard::against_foreign_record(reminder, &self.reminder_id, &self.user_id)
            .map_err(UseCaseError::Ownership)
    }
}
