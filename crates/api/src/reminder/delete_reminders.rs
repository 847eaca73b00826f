use crate::shared::{
    auth::{protect_route, Permission},
    bulk_delete::BulkDeleteResult,
    guard::{Guard, OwnershipError},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{error::TallyError, shared::usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::delete_reminders::{APIResponse, RequestBody};
use tally_domain::ID;
use tally_infra::TallyContext;

pub async fn delete_reminders_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteRemindersUseCase {
        user_id: user.id,
        reminder_ids: body.0.ids,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::from(res)))
        .map_err(TallyError::from)
}

/// Deletes every `Reminder` of the list the `User` owns and reports the
/// rest as failures
#[derive(Debug)]
struct DeleteRemindersUseCase {
    user_id: ID,
    reminder_ids: Vec<ID>,
}

#[derive(Debug)]
enum UseCaseError {}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteRemindersUseCase {
    type Response = BulkDeleteResult;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminders";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let mut res = BulkDeleteResult::default();
        for reminder_id in &self.reminder_ids {
            let reminder = ctx.repos.reminders.find(reminder_id).await;
            let outcome = match Guard::against_foreign_record(reminder, reminder_id, &self.user_id) {
                Ok(_) => match ctx.repos.reminders.delete(reminder_id).await {
                    Some(_) => Ok(reminder_id.clone()),
                    None => Err(OwnershipError::NotFound(reminder_id.clone())),
                },
                Err(e) => Err(e),
            };
            res.record(outcome);
        }
        Ok(res)
    }
}

impl PermissionBoundary for DeleteRemindersUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DeleteReminder]
    }
}
